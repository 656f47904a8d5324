//! Weighted candidate edges between every pair of genotypes.
//!
//! # Enumeration order
//! Pairs are produced for increasing `left`, and for each `left` for
//! increasing `right > left`:
//!
//! ```text
//! N = 4:  (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
//! ```
//!
//! The spanning-graph builders sort relations by weight with a *stable*
//! sort, so this order decides which edge wins a tie.

use crate::genotype::MutationModel;
use crate::population::Population;
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

/// A candidate edge between genotypes `left < right`, weighted by their
/// normalized bit distance `nbd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PairRelation {
    pub nbd: usize,
    pub left: usize,
    pub right: usize,
}

impl PairRelation {
    pub fn new(nbd: usize, left: usize, right: usize) -> Self {
        debug_assert_ne!(left, right, "a relation never joins a genotype to itself");
        PairRelation { nbd, left, right }
    }

    /// True if `vertex` is one of the two endpoints.
    #[inline]
    pub fn touches(&self, vertex: usize) -> bool {
        self.left == vertex || self.right == vertex
    }
}

/// Every unordered pair of the population with its dissimilarity.
///
/// Returns exactly `N * (N - 1) / 2` relations in enumeration order.
/// Pairs are scored in parallel; the output order does not depend on the
/// thread count.
///
/// # Example
/// ```
/// # use std::io::Cursor;
/// # use bitvector_genealogy::genotype::{MutationModel, MutationPercent};
/// # use bitvector_genealogy::population::Population;
/// # use bitvector_genealogy::relation::enumerate_all_pairs;
/// let pop = Population::load(Cursor::new("000\n001\n011\n"), None).unwrap();
/// let model = MutationModel::new(MutationPercent::new(0).unwrap(), pop.scale());
/// let pairs: Vec<_> = enumerate_all_pairs(&pop, &model)
///     .iter()
///     .map(|r| (r.left, r.right, r.nbd))
///     .collect();
/// assert_eq!(pairs, vec![(0, 1, 1), (0, 2, 2), (1, 2, 1)]);
/// ```
pub fn enumerate_all_pairs(population: &Population, model: &MutationModel) -> Vec<PairRelation> {
    let genotypes = population.genotypes();
    let n = genotypes.len();

    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| (i + 1..n).map(move |j| (i, j)))
        .map(|(i, j)| {
            let (a, b) = (&genotypes[i], &genotypes[j]);
            PairRelation::new(model.dissimilarity(a, b), a.index(), b.index())
        })
        .collect()
}

/// [`enumerate_all_pairs`] sorted ascending by `nbd`, ties kept in
/// enumeration order.
pub fn sorted_relations(population: &Population, model: &MutationModel) -> Vec<PairRelation> {
    let t0 = Instant::now();
    let mut relations = enumerate_all_pairs(population, model);
    // par_sort_by_key is stable
    relations.par_sort_by_key(|r| r.nbd);
    debug!(
        "Scored and sorted {} relations in {:.3}s",
        relations.len(),
        t0.elapsed().as_secs_f64()
    );
    relations
}

/// Symmetric `N x N` dissimilarity matrix. The diagonal holds each
/// genotype's self-dissimilarity, which is the expected flip count.
pub fn dissimilarity_matrix(population: &Population, model: &MutationModel) -> Vec<Vec<usize>> {
    let n = population.scale();
    let mut mat = vec![vec![model.expected_flips(); n]; n];
    for r in enumerate_all_pairs(population, model) {
        mat[r.left][r.right] = r.nbd;
        mat[r.right][r.left] = r.nbd;
    }
    mat
}
