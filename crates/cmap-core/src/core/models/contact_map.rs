use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ContactMapError {
    #[error("Residue index {index} is out of bounds for a map of {size} residues")]
    IndexOutOfBounds { index: usize, size: usize },
}

/// Residue pairs in contact, each stored once as `(i, j)` with `i < j`.
///
/// The diagonal is implicit. Pairs are kept sorted in row-major order, which is
/// the order the contact scan produces them in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SparseContactMap {
    size: usize,
    pairs: Vec<(usize, usize)>,
}

impl SparseContactMap {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            pairs: Vec::new(),
        }
    }

    /// Builds a map from arbitrary pairs.
    ///
    /// Pairs are normalized to `i < j`; self-pairs and duplicates are dropped.
    pub fn from_pairs<I>(size: usize, pairs: I) -> Result<Self, ContactMapError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut normalized = Vec::new();
        for (a, b) in pairs {
            for index in [a, b] {
                if index >= size {
                    return Err(ContactMapError::IndexOutOfBounds { index, size });
                }
            }
            if a != b {
                normalized.push((a.min(b), a.max(b)));
            }
        }
        normalized.sort_unstable();
        normalized.dedup();
        Ok(Self {
            size,
            pairs: normalized,
        })
    }

    /// Trusted constructor for the contact scan, whose rows are already ordered and in range.
    pub(crate) fn from_sorted_pairs(size: usize, pairs: Vec<(usize, usize)>) -> Self {
        debug_assert!(pairs.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(pairs.iter().all(|&(i, j)| i < j && j < size));
        Self { size, pairs }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        if i == j {
            return i < self.size;
        }
        self.pairs.binary_search(&(i.min(j), i.max(j))).is_ok()
    }

    pub fn to_dense(&self) -> DenseContactMap {
        DenseContactMap::from(self)
    }
}

/// A square, symmetric boolean contact matrix stored row-major.
///
/// The diagonal is always set. Every mutation writes both `(i, j)` and `(j, i)`,
/// so symmetry holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseContactMap {
    size: usize,
    cells: Vec<bool>,
}

impl DenseContactMap {
    /// A map of `size` residues with only the diagonal set.
    pub fn new(size: usize) -> Self {
        let mut cells = vec![false; size * size];
        for i in 0..size {
            cells[i * size + i] = true;
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Marks `(i, j)` and `(j, i)`. Returns `false` and leaves the map untouched when
    /// either index is out of range.
    pub fn set_contact(&mut self, i: usize, j: usize) -> bool {
        if i >= self.size || j >= self.size {
            return false;
        }
        self.cells[i * self.size + j] = true;
        self.cells[j * self.size + i] = true;
        true
    }

    pub fn is_contact(&self, i: usize, j: usize) -> bool {
        i < self.size && j < self.size && self.cells[i * self.size + j]
    }

    /// Number of off-diagonal contacts, counting each unordered pair once.
    pub fn contact_count(&self) -> usize {
        (0..self.size)
            .map(|i| self.row(i)[i + 1..].iter().filter(|&&c| c).count())
            .sum()
    }

    pub fn row(&self, i: usize) -> &[bool] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        // chunks_exact(0) panics, and a zero-sized map has no rows anyway.
        self.cells.chunks_exact(self.size.max(1))
    }

    /// Row-major cells, `size * size` long.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub fn to_sparse(&self) -> SparseContactMap {
        let pairs = (0..self.size)
            .flat_map(|i| {
                self.row(i)
                    .iter()
                    .enumerate()
                    .skip(i + 1)
                    .filter(|(_, c)| **c)
                    .map(move |(j, _)| (i, j))
            })
            .collect();
        SparseContactMap::from_sorted_pairs(self.size, pairs)
    }
}

impl From<&SparseContactMap> for DenseContactMap {
    fn from(sparse: &SparseContactMap) -> Self {
        let mut dense = DenseContactMap::new(sparse.size());
        for &(i, j) in sparse.pairs() {
            dense.set_contact(i, j);
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric_with_diagonal(map: &DenseContactMap) {
        for i in 0..map.size() {
            assert!(map.is_contact(i, i), "diagonal cell {i} must be set");
            for j in 0..map.size() {
                assert_eq!(map.is_contact(i, j), map.is_contact(j, i));
            }
        }
    }

    #[test]
    fn from_pairs_normalizes_orders_and_deduplicates() {
        let sparse = SparseContactMap::from_pairs(4, [(2, 0), (0, 2), (1, 1), (3, 1)]).unwrap();
        assert_eq!(sparse.pairs(), &[(0, 2), (1, 3)]);
        assert_eq!(sparse.len(), 2);
    }

    #[test]
    fn from_pairs_rejects_out_of_range_index() {
        let err = SparseContactMap::from_pairs(3, [(0, 3)]).unwrap_err();
        assert_eq!(err, ContactMapError::IndexOutOfBounds { index: 3, size: 3 });
    }

    #[test]
    fn sparse_contains_is_symmetric_and_includes_diagonal() {
        let sparse = SparseContactMap::from_pairs(3, [(0, 2)]).unwrap();
        assert!(sparse.contains(0, 2));
        assert!(sparse.contains(2, 0));
        assert!(sparse.contains(1, 1));
        assert!(!sparse.contains(0, 1));
        assert!(!sparse.contains(3, 3));
    }

    #[test]
    fn new_dense_map_has_only_the_diagonal() {
        let dense = DenseContactMap::new(3);
        assert_symmetric_with_diagonal(&dense);
        assert_eq!(dense.contact_count(), 0);
    }

    #[test]
    fn set_contact_writes_both_halves_and_ignores_out_of_range() {
        let mut dense = DenseContactMap::new(3);
        assert!(dense.set_contact(2, 0));
        assert!(!dense.set_contact(0, 3));
        assert!(dense.is_contact(0, 2));
        assert!(dense.is_contact(2, 0));
        assert_eq!(dense.contact_count(), 1);
        assert_symmetric_with_diagonal(&dense);
    }

    #[test]
    fn dense_and_sparse_convert_into_each_other() {
        let sparse = SparseContactMap::from_pairs(5, [(0, 1), (1, 4), (2, 3)]).unwrap();
        let dense = DenseContactMap::from(&sparse);
        assert_symmetric_with_diagonal(&dense);
        assert_eq!(dense.contact_count(), 3);
        assert_eq!(dense.to_sparse(), sparse);
    }

    #[test]
    fn rows_cover_the_matrix_in_order() {
        let mut dense = DenseContactMap::new(2);
        dense.set_contact(0, 1);
        let rows: Vec<&[bool]> = dense.rows().collect();
        assert_eq!(rows, vec![&[true, true][..], &[true, true][..]]);
        assert_eq!(DenseContactMap::new(0).rows().count(), 0);
    }
}
