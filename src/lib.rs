//! Crate root: lightweight module orchestration and public re-exports.
//!
//! Infers a rooted genealogy for a population of `N` genotypes of `N` bits:
//! score every pair by mutation-normalized dissimilarity, connect the
//! population with the cheapest relations, then prune leaves until a single
//! progenitor remains.
//!
//! Modules:
//! - `bitset`: compact fixed-width bit vector.
//! - `genotype`: genotypes, mutation model and dissimilarity.
//! - `population`: reading and validating the input population.
//! - `relation`: pairwise relations, their enumeration order and matrix.
//! - `spanning`: spanning-graph construction (greedy or union-find).
//! - `genealogy`: leaf pruning into a parent array, Newick export.
//! - `io`: data sources and output writers (plain, gzip, stdio).
//! - `error`: crate error type.
//! - `api`: Python bindings via `pyo3` (gated behind "python" feature).

pub mod bitset;
pub mod error;
pub mod genealogy;
pub mod genotype;
pub mod io;
pub mod population;
pub mod relation;
pub mod spanning;

#[cfg(feature = "python")]
pub mod api;

// Re-export frequently used types & functions
pub use bitset::Bitset;
pub use error::{GenealogyError, Result};
pub use genealogy::{Genealogy, root_tree};
pub use genotype::{Genotype, MutationModel, MutationPercent};
pub use population::Population;
pub use relation::{PairRelation, enumerate_all_pairs, sorted_relations};
pub use spanning::{Component, SpanningMethod, build_spanning_graph};

/// Run the whole pipeline on a loaded population: relations, spanning
/// graph, then leaf pruning.
///
/// # Example
/// ```
/// # use std::io::Cursor;
/// # use bitvector_genealogy::{infer_genealogy, MutationPercent, Population, SpanningMethod};
/// let pop = Population::load(Cursor::new("0000\n0001\n0011\n0111\n"), None).unwrap();
/// let percent = MutationPercent::new(0).unwrap();
/// let genealogy = infer_genealogy(&pop, percent, SpanningMethod::Greedy).unwrap();
/// assert_eq!(genealogy.to_signed(), vec![1, 2, 1, 2]);
/// ```
pub fn infer_genealogy(
    population: &Population,
    percent: MutationPercent,
    method: SpanningMethod,
) -> Result<Genealogy> {
    let scale = population.scale();
    let model = MutationModel::new(percent, scale);
    log::info!(
        "Relating {} genotypes at {percent} mutation ({} expected flips)",
        scale,
        model.expected_flips()
    );

    let relations = sorted_relations(population, &model);
    let graph = method.build(&relations, scale)?;
    root_tree(&graph, scale)
}
