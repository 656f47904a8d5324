//! Genotypes and the mutation-normalized dissimilarity between them.
//!
//! # Dissimilarity
//! Under a per-bit mutation probability `p`, a child of a genotype with `N`
//! bits is expected to differ from it in `floor(N * p / 100)` bits. The
//! dissimilarity of two genotypes is how far their observed difference
//! strays from that expectation:
//!
//! ```text
//! hamming       = popcount(a XOR b)
//! dissimilarity = |hamming - expected_flips|
//! ```
//!
//! It is symmetric, and zero when the observed difference matches the
//! expected mutation count exactly. It is not a metric: a genotype compared
//! with itself scores `expected_flips`, and the triangle inequality need not hold.

use crate::bitset::Bitset;
use crate::error::{GenealogyError, Result};
use std::fmt;
use std::str::FromStr;

/// One bit vector of the population together with its input position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genotype {
    index: usize,
    bits: Bitset,
}

impl Genotype {
    pub fn new(index: usize, bits: Bitset) -> Self {
        Genotype { index, bits }
    }

    /// Parses one `'0'`/`'1'` line; `None` if any other character appears.
    pub fn parse(index: usize, line: &str) -> Option<Self> {
        Bitset::from_bit_str(line).map(|bits| Genotype { index, bits })
    }

    /// Position of this genotype in the input.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bits(&self) -> &Bitset {
        &self.bits
    }

    /// Number of bits in which `self` and `other` differ.
    pub fn hamming(&self, other: &Genotype) -> usize {
        self.bits.xor_count(&other.bits)
    }

    /// Dissimilarity to `other` under `model`, see [`MutationModel::dissimilarity`].
    pub fn dissimilarity(&self, other: &Genotype, model: &MutationModel) -> usize {
        model.dissimilarity(self, other)
    }
}

/// Per-bit mutation probability as an integer percentage in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MutationPercent(u8);

impl MutationPercent {
    pub fn new(percent: u8) -> Result<Self> {
        if percent > 100 {
            return Err(GenealogyError::Configuration(format!(
                "mutation percentage {percent} should be an integer between 0 and 100"
            )));
        }
        Ok(MutationPercent(percent))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for MutationPercent {
    type Err = GenealogyError;

    /// # Example
    /// ```
    /// # use bitvector_genealogy::genotype::MutationPercent;
    /// let p: MutationPercent = "20".parse().unwrap();
    /// assert_eq!(p.get(), 20);
    /// assert!("101".parse::<MutationPercent>().is_err());
    /// assert!("twenty".parse::<MutationPercent>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let percent = trimmed.parse::<u8>().map_err(|_| {
            GenealogyError::Configuration(format!(
                "'{s}' should be an integer between 0 and 100"
            ))
        })?;
        MutationPercent::new(percent)
    }
}

impl fmt::Display for MutationPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Mutation model shared by every comparison of one run.
///
/// Built once from the mutation percentage and the genotype width `scale`,
/// then passed by reference wherever dissimilarities are computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MutationModel {
    percent: MutationPercent,
    scale: usize,
}

impl MutationModel {
    pub fn new(percent: MutationPercent, scale: usize) -> Self {
        MutationModel { percent, scale }
    }

    pub fn percent(&self) -> MutationPercent {
        self.percent
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Expected number of flipped bits per generation: `floor(N * p / 100)`.
    ///
    /// # Example
    /// ```
    /// # use bitvector_genealogy::genotype::{MutationModel, MutationPercent};
    /// let model = MutationModel::new(MutationPercent::new(20).unwrap(), 12);
    /// assert_eq!(model.expected_flips(), 2);
    /// ```
    pub fn expected_flips(&self) -> usize {
        self.scale * self.percent.get() as usize / 100
    }

    /// Absolute deviation of the observed bit difference from [`Self::expected_flips`].
    ///
    /// # Panics
    /// If the genotypes have different widths. A validated population never
    /// holds such a pair.
    pub fn dissimilarity(&self, a: &Genotype, b: &Genotype) -> usize {
        assert_eq!(
            a.bits.len(),
            b.bits.len(),
            "genotypes {} and {} differ in width",
            a.index,
            b.index
        );
        a.hamming(b).abs_diff(self.expected_flips())
    }
}
