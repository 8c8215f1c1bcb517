use std::ops::BitAnd;

/// Fixed-length bit set packed into u64 words.
/// Bits past `len` in the last word are always zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Panics if `idx >= len`.
    #[inline]
    pub fn set(&mut self, idx: usize) {
        assert!(idx < self.len, "bit index {idx} out of range for length {}", self.len);
        self.words[idx >> 6] |= 1u64 << (idx & 63);
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        idx < self.len && self.words[idx >> 6] & (1u64 << (idx & 63)) != 0
    }

    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Popcount of the intersection without materializing it.
    #[inline]
    pub fn and_count(&self, other: &BitSet) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |idx| self.get(idx))
    }
}

impl BitAnd for &BitSet {
    type Output = BitSet;

    fn bitand(self, rhs: Self) -> Self::Output {
        BitSet {
            words: self.words.iter().zip(rhs.words.iter()).map(|(a, b)| a & b).collect(),
            len: self.len.min(rhs.len),
        }
    }
}

impl FromIterator<bool> for BitSet {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut words = Vec::new();
        let mut len = 0usize;
        for bit in iter {
            if len & 63 == 0 {
                words.push(0u64);
            }
            if bit {
                let last = words.len() - 1;
                words[last] |= 1u64 << (len & 63);
            }
            len += 1;
        }
        Self { words, len }
    }
}
