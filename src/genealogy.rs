//! Rooting a spanning graph by repeatedly pruning its leaves.
//!
//! # Algorithm
//! 1. Turn the edge list into a neighborhood map `vertex -> {neighbors}`.
//! 2. Each round, take a snapshot of every vertex with exactly one
//!    neighbor (the leaves). Record that neighbor as the leaf's parent and
//!    drop the leaf from the parent's neighborhood.
//! 3. Remove the round's leaves from the map and repeat until at most one
//!    vertex is left: the progenitor.
//!
//! ```text
//!   0 - 1 - 2 - 3        round 1: leaves {0, 3}   parent[0]=1 parent[3]=2
//!       1 - 2            round 2: leaves {1, 2}   parent[1]=2 parent[2]=1
//! ```
//!
//! A path with an even number of vertices ends on two vertices that are
//! leaves of the same round. Both are pruned together and each records the
//! other as its parent, so no vertex keeps the "no parent" marker.
//!
//! A round without leaves while more than one vertex remains means the
//! graph holds a cycle; rooting then fails with `DidNotConverge`.

use crate::error::{GenealogyError, Result};
use crate::spanning::Component;
use log::{debug, info};
use phylotree::tree::{Node, Tree as PhyloTree};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

type Neighbors = BTreeMap<usize, BTreeSet<usize>>;

/// Parent array produced by [`root_tree`].
///
/// `parent(v) == None` means no parent was recorded for `v`, which marks
/// the progenitor when exactly one vertex survives pruning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genealogy {
    parents: Vec<Option<usize>>,
    rounds: usize,
}

impl Genealogy {
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parents.get(vertex).copied().flatten()
    }

    /// Number of pruning rounds it took to converge.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Parents with the `-1` marker for "no parent", in vertex order.
    pub fn to_signed(&self) -> Vec<i64> {
        self.parents
            .iter()
            .map(|p| p.map_or(-1, |p| p as i64))
            .collect()
    }

    /// The root ancestor.
    ///
    /// The lowest vertex without a parent, or, when the final two vertices
    /// were pruned together and name each other, the lower of that pair.
    pub fn progenitor(&self) -> Option<usize> {
        if let Some(root) = self.parents.iter().position(Option::is_none) {
            return Some(root);
        }
        (0..self.parents.len()).find(|&v| {
            self.parent(v)
                .and_then(|p| self.parent(p))
                .is_some_and(|pp| pp == v)
        })
    }

    /// Children of every vertex, with the progenitor's mutual pair edge
    /// kept only once (from progenitor down).
    fn children(&self, root: usize) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.parents.len()];
        for (v, p) in self.parents.iter().enumerate() {
            if let Some(p) = *p {
                if v != root {
                    children[p].push(v);
                }
            }
        }
        children
    }

    /// Render the genealogy as a rooted Newick tree.
    ///
    /// Vertices are named by their genotype index and hang from their
    /// recorded parent below the [progenitor](Self::progenitor).
    ///
    /// # Errors
    /// `Newick` if there is no progenitor or the tree cannot be written.
    pub fn to_newick(&self) -> Result<String> {
        let root = self
            .progenitor()
            .ok_or_else(|| GenealogyError::Newick("genealogy has no progenitor".to_string()))?;
        let children = self.children(root);

        let mut tree = PhyloTree::new();
        let root_id = tree.add(Node::new_named(&root.to_string()));
        let mut stack = vec![(root, root_id)];
        while let Some((vertex, node_id)) = stack.pop() {
            for &child in &children[vertex] {
                let child_id = tree
                    .add_child(Node::new_named(&child.to_string()), node_id, None)
                    .map_err(|e| GenealogyError::Newick(e.to_string()))?;
                stack.push((child, child_id));
            }
        }

        tree.to_newick()
            .map_err(|e| GenealogyError::Newick(e.to_string()))
    }
}

impl fmt::Display for Genealogy {
    /// One parent per line in vertex order, `-1` for none.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.to_signed() {
            writeln!(f, "{p}")?;
        }
        Ok(())
    }
}

/// Neighborhood map holding both directions of every edge in `component`.
fn discover(component: &Component) -> Neighbors {
    let mut neighbors = Neighbors::new();
    for e in component.edges() {
        neighbors.entry(e.left).or_default().insert(e.right);
        neighbors.entry(e.right).or_default().insert(e.left);
    }
    neighbors
}

/// Orient the spanning `component` over `scale` genotypes into a parent array.
///
/// # Errors
/// `DidNotConverge` if a round finds no leaf while more than one vertex remains.
pub fn root_tree(component: &Component, scale: usize) -> Result<Genealogy> {
    let mut neighbors = discover(component);
    let mut parents = vec![None; scale];
    let mut rounds = 0;

    while neighbors.len() > 1 {
        // Snapshot this round's leaves before touching the map
        let leaves: Vec<(usize, usize)> = neighbors
            .iter()
            .filter(|(_, adjacent)| adjacent.len() == 1)
            .filter_map(|(&child, adjacent)| adjacent.first().map(|&parent| (child, parent)))
            .collect();

        if leaves.is_empty() {
            debug!(
                "No leaves among {} remaining vertices after {rounds} rounds",
                neighbors.len()
            );
            return Err(GenealogyError::DidNotConverge);
        }

        for &(child, parent) in &leaves {
            parents[child] = Some(parent);
            if let Some(adjacent) = neighbors.get_mut(&parent) {
                adjacent.remove(&child);
            }
        }
        for (child, _) in leaves {
            neighbors.remove(&child);
        }
        rounds += 1;
    }

    info!("Genealogy converged after {rounds} rounds");
    Ok(Genealogy { parents, rounds })
}
