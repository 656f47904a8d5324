//! Compact fixed-width bitset holding one genotype.
//!
//! # Overview
//! Each genotype is a string of `N` characters from `{0, 1}`. Character `i`
//! of the string maps to bit `i` of the bitset, so two genotypes can be
//! compared word by word with XOR and a population count.
//!
//! # Example
//! For `N = 4`:
//! - `"0001"` → bit 3 set → `0b1000`
//! - `"0111"` → bits 1, 2, 3 set → `0b1110`
//! - differing bits: `0b1000 ^ 0b1110 = 0b0110` → 2 bits differ

/// A compact bitset with an explicit width in bits.
///
/// Internally stores bits in `Vec<u64>` words to support arbitrary widths.
/// Each u64 word holds 64 bit positions; bits past `len` are always zero.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Bitset {
    words: Vec<u64>,
    len: usize,
}

impl Bitset {
    /// Creates a new bitset of `len` bits, all set to 0.
    ///
    /// # Example
    /// ```
    /// # use bitvector_genealogy::bitset::Bitset;
    /// // 100 bits need 2 words (128 bits)
    /// let bs = Bitset::zeros(100);
    /// assert_eq!(bs.len(), 100);
    /// assert_eq!(bs.count_ones(), 0);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Bitset {
            words: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Parses a string of `'0'`/`'1'` characters into a bitset of the same width.
    ///
    /// Returns `None` as soon as any other character is seen; nothing is
    /// truncated or padded.
    ///
    /// # Example
    /// ```
    /// # use bitvector_genealogy::bitset::Bitset;
    /// let bs = Bitset::from_bit_str("0110").unwrap();
    /// assert_eq!(bs.len(), 4);
    /// assert!(bs.get(1) && bs.get(2));
    /// assert!(Bitset::from_bit_str("01x0").is_none());
    /// ```
    pub fn from_bit_str(s: &str) -> Option<Self> {
        let mut bs = Bitset::zeros(s.len());
        for (idx, byte) in s.bytes().enumerate() {
            match byte {
                b'0' => {}
                b'1' => bs.set(idx),
                _ => return None,
            }
        }
        Some(bs)
    }

    /// Width of the bitset in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the bit at the given index to 1.
    ///
    /// # Example
    /// ```
    /// # use bitvector_genealogy::bitset::Bitset;
    /// let mut bs = Bitset::zeros(8);
    /// bs.set(0);
    /// bs.set(5);
    /// assert!(bs.get(5));
    /// assert_eq!(bs.count_ones(), 2);
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < self.len, "bit {idx} out of range for width {}", self.len);
        let word = idx >> 6;     // Equivalent to idx / 64
        let bit = idx & 63;      // Equivalent to idx % 64
        self.words[word] |= 1u64 << bit;
    }

    /// Returns whether the bit at `idx` is 1.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        idx < self.len && (self.words[idx >> 6] >> (idx & 63)) & 1 == 1
    }

    /// Counts the number of set bits (population count).
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Counts the bits that differ between `self` and `other`:
    /// `popcount(self XOR other)`.
    ///
    /// Both bitsets must have the same width.
    ///
    /// # Example
    /// ```
    /// # use bitvector_genealogy::bitset::Bitset;
    /// let a = Bitset::from_bit_str("0001").unwrap();
    /// let b = Bitset::from_bit_str("0111").unwrap();
    /// assert_eq!(a.xor_count(&b), 2);
    /// ```
    #[inline]
    pub fn xor_count(&self, other: &Bitset) -> usize {
        debug_assert_eq!(self.len, other.len);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum()
    }
}

impl std::fmt::Display for Bitset {
    /// Renders the bitset back in its `'0'`/`'1'` input form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for idx in 0..self.len {
            f.write_str(if self.get(idx) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
