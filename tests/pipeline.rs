use bitvector_genealogy::io::{open_source, write_parents};
use bitvector_genealogy::relation::{dissimilarity_matrix, enumerate_all_pairs};
use bitvector_genealogy::{
    GenealogyError, MutationModel, MutationPercent, Population, SpanningMethod, infer_genealogy,
    root_tree, sorted_relations,
};
use itertools::Itertools;
use std::collections::HashSet;
use std::io::Cursor;
use tempfile::tempdir;

fn population(text: &str) -> Population {
    Population::load(Cursor::new(text.as_bytes()), None).unwrap()
}

fn percent(p: u8) -> MutationPercent {
    MutationPercent::new(p).unwrap()
}

/// Deterministic population of `n` genotypes, each a few flips away from
/// an earlier one.
fn lineage(n: usize, seed: u64) -> String {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    let mut rows: Vec<Vec<u8>> = vec![vec![b'0'; n]];
    while rows.len() < n {
        let mut child = rows[next() % rows.len()].clone();
        for _ in 0..1 + next() % 3 {
            let bit = next() % n;
            child[bit] = if child[bit] == b'0' { b'1' } else { b'0' };
        }
        rows.push(child);
    }
    rows.into_iter()
        .map(|r| String::from_utf8(r).unwrap() + "\n")
        .collect()
}

// ============= Worked example =============

#[test]
fn test_stairs_round_trip() {
    let pop = population("0000\n0001\n0011\n0111\n");
    let genealogy = infer_genealogy(&pop, percent(0), SpanningMethod::Greedy).unwrap();
    assert_eq!(genealogy.to_signed(), vec![1, 2, 1, 2]);
    assert_eq!(genealogy.to_string(), "1\n2\n1\n2\n");
}

#[test]
fn test_short_population_reports_line_three() {
    let err = Population::load(Cursor::new("0000\n0001\n0011\n"), Some(4)).unwrap_err();
    match err {
        GenealogyError::InvalidPopulation { line, content } => {
            assert_eq!(line, 3);
            assert_eq!(content, "");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ============= Redundant edges =============

/// ```text
///   0000 - 0001      (0,1) and (0,2) cost 1, (1,2) costs 2 and closes
///     \    /         the triangle before 1111 joins through (1,3)
///      0010
/// ```
const TRIANGLE: &str = "0000\n0001\n0010\n1111\n";

#[test]
fn test_greedy_cycle_does_not_converge() {
    let pop = population(TRIANGLE);
    let result = infer_genealogy(&pop, percent(0), SpanningMethod::Greedy);
    assert!(matches!(result, Err(GenealogyError::DidNotConverge)));
}

#[test]
fn test_greedy_graph_has_redundant_edge() {
    let pop = population(TRIANGLE);
    let model = MutationModel::new(percent(0), 4);
    let graph = SpanningMethod::Greedy
        .build(&sorted_relations(&pop, &model), 4)
        .unwrap();
    assert_eq!(graph.vertices().len(), 4);
    assert_eq!(graph.edges().len(), 4);
}

#[test]
fn test_kruskal_roots_the_same_population() {
    let pop = population(TRIANGLE);
    let genealogy = infer_genealogy(&pop, percent(0), SpanningMethod::Kruskal).unwrap();
    assert_eq!(genealogy.to_signed(), vec![1, 0, 0, 1]);
    assert_eq!(genealogy.progenitor(), Some(0));
}

#[test]
fn test_two_genotypes_cannot_be_related_greedily() {
    let pop = population("01\n11\n");
    assert!(matches!(
        infer_genealogy(&pop, percent(0), SpanningMethod::Greedy),
        Err(GenealogyError::Disconnected)
    ));
    let g = infer_genealogy(&pop, percent(0), SpanningMethod::Kruskal).unwrap();
    assert_eq!(g.to_signed(), vec![1, 0]);
}

// ============= Properties on larger populations =============

#[test]
fn test_relation_count_and_symmetry() {
    for seed in 1..4 {
        let pop = population(&lineage(12, seed));
        let model = MutationModel::new(percent(10), pop.scale());
        let relations = enumerate_all_pairs(&pop, &model);
        assert_eq!(relations.len(), 12 * 11 / 2);
        let pairs: HashSet<(usize, usize)> = relations.iter().map(|r| (r.left, r.right)).collect();
        assert_eq!(pairs.len(), relations.len());

        let mat = dissimilarity_matrix(&pop, &model);
        for (i, j) in (0..12).tuple_combinations() {
            assert_eq!(mat[i][j], mat[j][i]);
        }
    }
}

#[test]
fn test_greedy_graph_spans_population() {
    for seed in 1..6 {
        let pop = population(&lineage(16, seed));
        let model = MutationModel::new(percent(5), pop.scale());
        let graph = SpanningMethod::Greedy
            .build(&sorted_relations(&pop, &model), 16)
            .unwrap();
        assert_eq!(graph.vertices().len(), 16);
        assert!(graph.edges().len() >= 15);
    }
}

#[test]
fn test_kruskal_genealogy_reproduces_tree_edges() {
    for seed in 1..6 {
        let pop = population(&lineage(20, seed));
        let model = MutationModel::new(percent(5), pop.scale());
        let tree = SpanningMethod::Kruskal
            .build(&sorted_relations(&pop, &model), 20)
            .unwrap();
        assert_eq!(tree.edges().len(), 19);

        let genealogy = root_tree(&tree, 20).unwrap();
        let recovered: HashSet<(usize, usize)> = genealogy
            .parents()
            .iter()
            .enumerate()
            .filter_map(|(v, p)| p.map(|p| (v.min(p), v.max(p))))
            .collect();
        let expected: HashSet<(usize, usize)> =
            tree.edges().iter().map(|r| (r.left, r.right)).collect();
        assert_eq!(recovered, expected);

        let unparented = genealogy.parents().iter().filter(|p| p.is_none()).count();
        assert!(unparented <= 1);
        assert!(genealogy.progenitor().is_some());
        assert!(genealogy.to_newick().unwrap().ends_with(';'));
    }
}

// ============= Files =============

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bitvectors.data");
    std::fs::write(&data, "0000\n0001\n0011\n0111\n").unwrap();

    let pop = Population::load(open_source(&data).unwrap(), Some(4)).unwrap();
    let genealogy = infer_genealogy(&pop, percent(0), SpanningMethod::Greedy).unwrap();

    let out = dir.path().join("parents.data");
    write_parents(&out, &genealogy).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "1\n2\n1\n2\n");
}
