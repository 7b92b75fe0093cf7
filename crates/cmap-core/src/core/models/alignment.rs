use thiserror::Error;

pub const GAP: u8 = b'-';

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AlignmentError {
    #[error("Alignment strings differ in length (query: {query}, target: {target})")]
    LengthMismatch { query: usize, target: usize },
}

/// What an alignment column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Both sequences have a residue.
    Match,
    /// The query has a residue the target lacks.
    Insertion,
    /// The target has a residue the query lacks. Columns gapped on both sides land
    /// here too, since the query side is checked first.
    Deletion,
}

/// A pairwise alignment between a query and a target, as two equal-length gapped strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPair {
    query: String,
    target: String,
}

impl AlignmentPair {
    pub fn new(query: impl Into<String>, target: impl Into<String>) -> Result<Self, AlignmentError> {
        let (query, target) = (query.into(), target.into());
        if query.len() != target.len() {
            return Err(AlignmentError::LengthMismatch {
                query: query.len(),
                target: target.len(),
            });
        }
        Ok(Self { query, target })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = Column> + '_ {
        self.query
            .bytes()
            .zip(self.target.bytes())
            .map(|(q, t)| match (q, t) {
                (GAP, _) => Column::Deletion,
                (_, GAP) => Column::Insertion,
                _ => Column::Match,
            })
    }

    /// Ungapped query length.
    pub fn query_length(&self) -> usize {
        self.query.bytes().filter(|&b| b != GAP).count()
    }

    /// Ungapped target length.
    pub fn target_length(&self) -> usize {
        self.target.bytes().filter(|&b| b != GAP).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_strings_of_different_length() {
        assert_eq!(
            AlignmentPair::new("AC-", "A-"),
            Err(AlignmentError::LengthMismatch {
                query: 3,
                target: 2
            })
        );
    }

    #[test]
    fn columns_classify_gaps() {
        let aln = AlignmentPair::new("AC-T", "A-GT").unwrap();
        let columns: Vec<Column> = aln.columns().collect();
        assert_eq!(
            columns,
            vec![
                Column::Match,
                Column::Insertion,
                Column::Deletion,
                Column::Match
            ]
        );
        assert_eq!(aln.query_length(), 3);
        assert_eq!(aln.target_length(), 3);
    }

    #[test]
    fn double_gap_column_counts_as_deletion() {
        let aln = AlignmentPair::new("-", "-").unwrap();
        assert_eq!(aln.columns().next(), Some(Column::Deletion));
    }
}
