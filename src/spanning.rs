//! Spanning-graph construction over the weight-sorted relations.
//!
//! # Greedy component growth
//! Relations are visited in ascending weight. Each relation either seeds a
//! new [`Component`], or joins the first component that shares one of its
//! endpoints, absorbing any other component it also touches:
//!
//! ```text
//! components: {0,1} {2,3}      relation (1,2)
//!   scan:  {0,1} touches 1  -> target
//!          {2,3} touches 2  -> merged into target, removed
//!   add:   {0,1,2,3} + edge (1,2)
//! ```
//!
//! Membership of an endpoint is the only connectivity test, so a relation
//! whose endpoints already share a component is still attached to it. Such
//! an edge closes a cycle, and rooting the result later fails to converge.
//!
//! A relation that seeds a new component never completes the graph on its
//! own; only a relation joining an existing component can.
//!
//! # Union-find
//! [`SpanningMethod::Kruskal`] walks the same sorted relations but skips
//! relations whose endpoints are already connected, so it always yields a
//! tree of `N - 1` edges.

use crate::error::{GenealogyError, Result};
use crate::relation::PairRelation;
use log::{debug, info};
use std::collections::BTreeSet;

/// A connected subgraph under construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Component {
    vertices: BTreeSet<usize>,
    edges: Vec<PairRelation>,
}

impl Component {
    /// A component holding `relation` and both of its endpoints.
    pub fn seeded(relation: PairRelation) -> Self {
        let mut c = Component::default();
        c.add(relation);
        c
    }

    /// Add `relation` and its endpoints (endpoints idempotently).
    pub fn add(&mut self, relation: PairRelation) {
        self.vertices.insert(relation.left);
        self.vertices.insert(relation.right);
        self.edges.push(relation);
    }

    /// True if `relation` shares at least one endpoint with this component.
    pub fn connects_to(&self, relation: &PairRelation) -> bool {
        self.vertices.contains(&relation.left) || self.vertices.contains(&relation.right)
    }

    /// Absorb all vertices and edges of `other`; its edges follow ours.
    pub fn merge_with(&mut self, other: Component) {
        self.vertices.extend(other.vertices);
        self.edges.extend(other.edges);
    }

    /// True once the component covers all `scale` genotypes.
    pub fn is_full(&self, scale: usize) -> bool {
        self.vertices.len() >= scale
    }

    pub fn vertices(&self) -> &BTreeSet<usize> {
        &self.vertices
    }

    pub fn edges(&self) -> &[PairRelation] {
        &self.edges
    }
}

/// How the spanning graph is assembled from the sorted relations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpanningMethod {
    /// Component growth by endpoint membership; may attach cycle-closing edges.
    #[default]
    Greedy,
    /// Union-find minimum spanning tree; never attaches a cycle-closing edge.
    Kruskal,
}

impl SpanningMethod {
    /// Build a component spanning `scale` genotypes from `relations`, which
    /// must already be sorted by weight.
    ///
    /// # Errors
    /// `Disconnected` if no component ever covers all genotypes.
    pub fn build(self, relations: &[PairRelation], scale: usize) -> Result<Component> {
        let component = match self {
            SpanningMethod::Greedy => build_spanning_graph(relations, scale),
            SpanningMethod::Kruskal => build_spanning_tree(relations, scale),
        }?;
        info!(
            "Spanning graph ({self:?}): {} vertices, {} edges",
            component.vertices.len(),
            component.edges.len()
        );
        Ok(component)
    }
}

/// Greedy component growth over weight-sorted `relations`.
///
/// # Example
/// ```
/// # use bitvector_genealogy::relation::PairRelation;
/// # use bitvector_genealogy::spanning::build_spanning_graph;
/// let relations = [
///     PairRelation::new(1, 0, 1),
///     PairRelation::new(1, 1, 2),
///     PairRelation::new(1, 2, 3),
///     PairRelation::new(2, 0, 2),
/// ];
/// let graph = build_spanning_graph(&relations, 4).unwrap();
/// assert_eq!(graph.edges().len(), 3);
/// ```
pub fn build_spanning_graph(relations: &[PairRelation], scale: usize) -> Result<Component> {
    let mut components: Vec<Component> = Vec::new();

    for relation in relations {
        let mut target: Option<usize> = None;
        let mut k = 0;
        while k < components.len() {
            if !components[k].connects_to(relation) {
                k += 1;
                continue;
            }
            match target {
                None => {
                    target = Some(k);
                    k += 1;
                }
                Some(t) => {
                    // t < k, so removing k leaves t in place
                    let absorbed = components.remove(k);
                    components[t].merge_with(absorbed);
                }
            }
        }

        match target {
            None => components.push(Component::seeded(*relation)),
            Some(t) => {
                components[t].add(*relation);
                if components[t].is_full(scale) {
                    debug!("Greedy growth complete with {} open components", components.len());
                    return Ok(components.swap_remove(t));
                }
            }
        }
    }

    Err(GenealogyError::Disconnected)
}

/// Minimum spanning tree over weight-sorted `relations` with a union-find.
pub fn build_spanning_tree(relations: &[PairRelation], scale: usize) -> Result<Component> {
    let mut dsu = DisjointSet::new(scale);
    let mut tree = Component::default();
    if scale == 1 {
        tree.vertices.insert(0);
        return Ok(tree);
    }

    for relation in relations {
        if dsu.find(relation.left) == dsu.find(relation.right) {
            continue;
        }
        dsu.union(relation.left, relation.right);
        tree.add(*relation);
        if tree.edges.len() + 1 == scale {
            return Ok(tree);
        }
    }

    Err(GenealogyError::Disconnected)
}

/// Disjoint set union with path compression and union by rank.
#[derive(Clone, Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[node] != node {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, left: usize, right: usize) {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return;
        }
        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
    }
}
