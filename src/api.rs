//! Python binding layer for genealogy inference.
//!
//! Provides Python functions that read a population file and return the
//! parent array or the pairwise dissimilarity matrix.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::GenealogyError;
use crate::genotype::{MutationModel, MutationPercent};
use crate::io::open_source;
use crate::population::Population;
use crate::relation::dissimilarity_matrix as pairwise_matrix;
use crate::spanning::SpanningMethod;

fn to_py_err(e: GenealogyError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Helper function to read and validate a population file
fn read_population(path: &str, scale: Option<usize>) -> PyResult<Population> {
    let source = open_source(path)
        .map_err(|e| PyValueError::new_err(format!("Failed to read '{}': {}", path, e)))?;
    Population::load(source, scale).map_err(to_py_err)
}

fn parse_method(method: &str) -> PyResult<SpanningMethod> {
    match method.to_ascii_lowercase().as_str() {
        "greedy" => Ok(SpanningMethod::Greedy),
        "kruskal" => Ok(SpanningMethod::Kruskal),
        other => Err(PyValueError::new_err(format!(
            "Unknown spanning method '{}', expected 'greedy' or 'kruskal'",
            other
        ))),
    }
}

/// Infer the parent of every genotype in a population file.
///
/// Args:
///     mutation_percent: Bitwise mutation probability as an integer percentage (0-100)
///     path: Population file of N lines of N bits ('.gz' accepted)
///     scale: Population scale N (default: length of the first line)
///     method: Spanning graph construction, 'greedy' or 'kruskal' (default: 'greedy')
///
/// Returns:
///     A list of N parent indices, -1 where no parent was recorded
///
/// Raises:
///     ValueError: If the percentage or population is invalid, the population
///     cannot be related, or the genealogy does not converge
#[pyfunction]
#[pyo3(signature = (mutation_percent, path, scale=None, method="greedy"))]
fn infer_parents(
    mutation_percent: u8,
    path: &str,
    scale: Option<usize>,
    method: &str,
) -> PyResult<Vec<i64>> {
    let percent = MutationPercent::new(mutation_percent).map_err(to_py_err)?;
    let method = parse_method(method)?;
    let population = read_population(path, scale)?;

    let genealogy = crate::infer_genealogy(&population, percent, method).map_err(to_py_err)?;
    Ok(genealogy.to_signed())
}

/// Compute the pairwise dissimilarity matrix of a population file.
///
/// Args:
///     mutation_percent: Bitwise mutation probability as an integer percentage (0-100)
///     path: Population file of N lines of N bits ('.gz' accepted)
///     scale: Population scale N (default: length of the first line)
///
/// Returns:
///     An N x N list of lists; the diagonal holds the expected flip count
#[pyfunction]
#[pyo3(signature = (mutation_percent, path, scale=None))]
fn dissimilarity_matrix(
    mutation_percent: u8,
    path: &str,
    scale: Option<usize>,
) -> PyResult<Vec<Vec<usize>>> {
    let percent = MutationPercent::new(mutation_percent).map_err(to_py_err)?;
    let population = read_population(path, scale)?;
    let model = MutationModel::new(percent, population.scale());
    Ok(pairwise_matrix(&population, &model))
}

/// Python module definition
#[pymodule]
fn bitvector_genealogy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(infer_parents, m)?)?;
    m.add_function(wrap_pyfunction!(dissimilarity_matrix, m)?)?;
    Ok(())
}
