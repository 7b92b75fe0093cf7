use super::contact_map::{DenseContactMap, SparseContactMap};

/// The strict upper triangle of a contact matrix, bit-packed.
///
/// Cell `(a, b)` with `a < b` lives at the triangular index
/// `bits - (n - a)(n - a - 1)/2 + (b - a - 1)`, where `bits = n(n - 1)/2`. Bit `k` is
/// stored in byte `k / 8` at position `k % 8`, least significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedContactMap {
    size: usize,
    bytes: Vec<u8>,
}

/// Number of cells in the strict upper triangle of an `n × n` matrix.
pub const fn triangle_bits(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Number of bytes needed to hold the strict upper triangle of an `n × n` matrix.
pub const fn triangle_bytes(n: usize) -> usize {
    triangle_bits(n).div_ceil(8)
}

impl PackedContactMap {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            bytes: vec![0; triangle_bytes(size)],
        }
    }

    /// Wraps raw bytes. Returns `None` if the length is wrong for `size` residues.
    pub fn from_bytes(size: usize, bytes: Vec<u8>) -> Option<Self> {
        (bytes.len() == triangle_bytes(size)).then_some(Self { size, bytes })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_len(&self) -> usize {
        triangle_bits(self.size)
    }

    /// Triangular index of the unordered pair `{i, j}`, or `None` on the diagonal or
    /// outside the map.
    pub fn triangular_index(&self, i: usize, j: usize) -> Option<usize> {
        let (a, b) = (i.min(j), i.max(j));
        if a == b || b >= self.size {
            return None;
        }
        let n = self.size;
        Some(self.bit_len() - (n - a) * (n - a - 1) / 2 + (b - a - 1))
    }

    /// Inverse of [`Self::triangular_index`].
    pub fn pair_from_index(&self, k: usize) -> Option<(usize, usize)> {
        if k >= self.bit_len() {
            return None;
        }
        let n = self.size;
        // Closed-form row estimate, then nudged to absorb floating point error.
        let disc = (4 * n * (n - 1)) as f64 - 8.0 * k as f64 - 7.0;
        let estimate = n as f64 - 2.0 - (disc.sqrt() / 2.0 - 0.5).floor();
        let mut a = (estimate.max(0.0) as usize).min(n - 2);
        let row_start = |a: usize| self.bit_len() - (n - a) * (n - a - 1) / 2;
        while a > 0 && row_start(a) > k {
            a -= 1;
        }
        while a + 2 < n && row_start(a + 1) <= k {
            a += 1;
        }
        Some((a, k - row_start(a) + a + 1))
    }

    pub fn set(&mut self, i: usize, j: usize) -> bool {
        match self.triangular_index(i, j) {
            Some(k) => {
                self.bytes[k / 8] |= 1 << (k % 8);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        if i == j {
            return i < self.size;
        }
        self.triangular_index(i, j)
            .is_some_and(|k| (self.bytes[k / 8] >> (k % 8)) & 1 == 1)
    }

    /// Set pairs in row-major order.
    pub fn iter_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n)
            .flat_map(move |a| (a + 1..n).map(move |b| (a, b)))
            .enumerate()
            .filter(move |(k, _)| (self.bytes[k / 8] >> (k % 8)) & 1 == 1)
            .map(|(_, pair)| pair)
    }

    pub fn to_sparse(&self) -> SparseContactMap {
        SparseContactMap::from_sorted_pairs(self.size, self.iter_pairs().collect())
    }

    pub fn to_dense(&self) -> DenseContactMap {
        DenseContactMap::from(&self.to_sparse())
    }
}

impl From<&SparseContactMap> for PackedContactMap {
    fn from(sparse: &SparseContactMap) -> Self {
        let mut packed = PackedContactMap::new(sparse.size());
        for &(i, j) in sparse.pairs() {
            packed.set(i, j);
        }
        packed
    }
}

impl From<&DenseContactMap> for PackedContactMap {
    fn from(dense: &DenseContactMap) -> Self {
        PackedContactMap::from(&dense.to_sparse())
    }
}
