use crate::core::models::alignment::{AlignmentPair, Column};
use crate::core::models::contact_map::{DenseContactMap, SparseContactMap};
use tracing::{debug, instrument, trace};

/// Result of one left-to-right pass over the alignment columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentIndex {
    /// Query residue aligned to each target residue, `None` where the query has a gap.
    pub target_to_query: Vec<Option<usize>>,
    /// Candidate contacts around query insertions. Lower neighbours that would fall
    /// below zero are never produced; upper ones may exceed `query_length` and are
    /// dropped when the output is assembled.
    pub generated: Vec<(usize, usize)>,
    /// Number of query residues covered by the alignment.
    pub query_length: usize,
}

impl AlignmentIndex {
    /// Walks the columns once, tracking the ungapped target and query positions.
    ///
    /// An inserted query residue (target gap) is linked to up to `generated_contacts`
    /// sequence neighbours on each side, so insertions stay locally connected even
    /// without structural evidence.
    pub fn build(alignment: &AlignmentPair, generated_contacts: u32) -> Self {
        let generated_contacts = generated_contacts as usize;
        let mut target_to_query = Vec::with_capacity(alignment.len());
        let mut generated = Vec::new();
        let mut query_index = 0usize;

        for column in alignment.columns() {
            match column {
                Column::Deletion => target_to_query.push(None),
                Column::Insertion => {
                    for j in 1..=generated_contacts {
                        if let Some(below) = query_index.checked_sub(j) {
                            generated.push((below, query_index));
                        }
                        generated.push((query_index + j, query_index));
                    }
                    query_index += 1;
                }
                Column::Match => {
                    target_to_query.push(Some(query_index));
                    query_index += 1;
                }
            }
        }

        Self {
            target_to_query,
            generated,
            query_length: query_index,
        }
    }

    /// Query position of target residue `target`. Residues beyond the aligned region
    /// are treated as unaligned.
    pub fn query_position(&self, target: usize) -> Option<usize> {
        self.target_to_query.get(target).copied().flatten()
    }

    /// Target contacts whose endpoints both have a query counterpart, in query indices.
    pub fn translate<'a>(
        &'a self,
        target_contacts: &'a SparseContactMap,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        target_contacts
            .pairs()
            .iter()
            .filter_map(move |&(i, j)| Some((self.query_position(i)?, self.query_position(j)?)))
    }
}

/// Re-indexes a target's contacts into the query's residue numbering.
///
/// The output is `query_length × query_length` with the diagonal set. Translated and
/// generated pairs are written symmetrically; any pair with an endpoint outside
/// `[0, query_length)` is dropped silently, which routinely happens for generated
/// contacts next to the sequence ends.
#[instrument(skip_all, name = "alignment_remap_task")]
pub fn run(
    alignment: &AlignmentPair,
    target_contacts: &SparseContactMap,
    generated_contacts: u32,
) -> DenseContactMap {
    let index = AlignmentIndex::build(alignment, generated_contacts);
    let mut output = DenseContactMap::new(index.query_length);

    let mut dropped = 0usize;
    for (p, q) in index
        .generated
        .iter()
        .copied()
        .chain(index.translate(target_contacts))
    {
        if !output.set_contact(p, q) {
            trace!(p, q, "Dropping out-of-range contact.");
            dropped += 1;
        }
    }

    debug!(
        columns = alignment.len(),
        query_length = index.query_length,
        generated = index.generated.len(),
        dropped,
        "Remapped target contacts onto query."
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aln(query: &str, target: &str) -> AlignmentPair {
        AlignmentPair::new(query, target).unwrap()
    }

    fn dense_from_rows(rows: &[&[u8]]) -> DenseContactMap {
        let mut map = DenseContactMap::new(rows.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell == 1 {
                    map.set_contact(i, j);
                }
            }
        }
        map
    }

    #[test]
    fn index_for_mixed_gaps() {
        let index = AlignmentIndex::build(&aln("AC-T", "A-GT"), 1);
        assert_eq!(index.target_to_query, vec![Some(0), None, Some(2)]);
        assert_eq!(index.generated, vec![(0, 1), (2, 1)]);
        assert_eq!(index.query_length, 3);
    }

    #[test]
    fn mixed_gap_scenario() {
        let target = SparseContactMap::from_pairs(3, [(0, 2)]).unwrap();
        let map = run(&aln("AC-T", "A-GT"), &target, 1);
        assert_eq!(map.size(), 3);
        assert!(map.is_contact(0, 2));
        assert!(map.is_contact(0, 1));
        assert!(map.is_contact(1, 2));
        for i in 0..3 {
            assert!(map.is_contact(i, i));
        }
    }

    #[test]
    fn identity_alignment_reproduces_the_target_map() {
        let target = SparseContactMap::from_pairs(5, [(0, 1), (1, 3), (2, 4)]).unwrap();
        let map = run(&aln("ACDEF", "ACDEF"), &target, 2);
        assert_eq!(map, DenseContactMap::from(&target));
    }

    #[test]
    fn query_gap_drops_contacts_of_the_deleted_residue() {
        let target = SparseContactMap::from_pairs(3, [(0, 1), (1, 2), (0, 2)]).unwrap();
        let map = run(&aln("A-C", "ABC"), &target, 2);
        assert_eq!(map, dense_from_rows(&[&[1, 1], &[1, 1]]));
    }

    #[test]
    fn target_gap_generates_neighbour_contacts() {
        let target = SparseContactMap::from_pairs(2, [(0, 1)]).unwrap();
        let map = run(&aln("ABC", "A-C"), &target, 1);
        assert_eq!(map, dense_from_rows(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]));
    }

    #[test]
    fn generated_contacts_reach_the_requested_distance() {
        let target = SparseContactMap::empty(4);
        let map = run(&aln("AAXAA", "AA-AA"), &target, 2);
        assert_eq!(map.size(), 5);
        for other in [0, 1, 3, 4] {
            assert!(map.is_contact(2, other));
        }
        assert!(!map.is_contact(0, 1));
        assert!(!map.is_contact(3, 4));
        assert_eq!(map.contact_count(), 4);
    }

    #[test]
    fn generated_contacts_past_either_end_are_filtered() {
        let target = SparseContactMap::empty(0);
        let map = run(&aln("XY", "--"), &target, 3);
        assert_eq!(map.size(), 2);
        assert_eq!(map.contact_count(), 1);
        assert!(map.is_contact(0, 1));
        assert!(!map.is_contact(0, 2));
    }

    #[test]
    fn zero_generated_contacts_leaves_insertions_isolated() {
        let target = SparseContactMap::from_pairs(2, [(0, 1)]).unwrap();
        let map = run(&aln("ABC", "A-C"), &target, 0);
        assert!(map.is_contact(0, 2));
        assert!(!map.is_contact(1, 0));
        assert!(!map.is_contact(1, 2));
    }

    #[test]
    fn target_indices_beyond_the_alignment_are_ignored() {
        let target = SparseContactMap::from_pairs(10, [(0, 1), (1, 9)]).unwrap();
        let map = run(&aln("AB", "AB"), &target, 2);
        assert_eq!(map.size(), 2);
        assert!(map.is_contact(0, 1));
    }

    #[test]
    fn output_is_symmetric_with_full_diagonal() {
        let target = SparseContactMap::from_pairs(6, [(0, 5), (1, 4), (2, 3), (0, 2)]).unwrap();
        let map = run(&aln("M-KLV-AQ", "MRK-VWA-"), &target, 2);
        for i in 0..map.size() {
            assert!(map.is_contact(i, i));
            for j in 0..map.size() {
                assert_eq!(map.is_contact(i, j), map.is_contact(j, i));
            }
        }
    }

    #[test]
    fn empty_alignment_gives_an_empty_map() {
        let map = run(&aln("", ""), &SparseContactMap::empty(0), 2);
        assert_eq!(map.size(), 0);
    }
}
