//! Edge-list graph model shared by all procedures.
//!
//! A causal graph is a mapping from an edge-type label (`"-->"`, `"<->"`,
//! `"---"`, ...) to an ordered list of vertex pairs. The labels are opaque
//! here; only the rule table a query runs under gives them meaning. Pair
//! order within a directed type is semantically meaningful (source, target)
//! and is preserved.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub use causalid_reach::Vertex;

/// Unordered vertex set used for query results and set algebra between
/// queries.
pub type VertexSet = FxHashSet<Vertex>;

/// Edge lists keyed by edge-type label, in deterministic insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeMap {
    edges: IndexMap<String, Vec<(Vertex, Vertex)>>,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends edges of `edge_type`, creating the type if absent.
    pub fn insert(&mut self, edge_type: impl Into<String>, mut pairs: Vec<(Vertex, Vertex)>) {
        self.edges
            .entry(edge_type.into())
            .or_default()
            .append(&mut pairs);
    }

    pub fn edges(&self, edge_type: &str) -> Option<&[(Vertex, Vertex)]> {
        self.edges.get(edge_type).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(Vertex, Vertex)])> {
        self.edges
            .iter()
            .map(|(label, pairs)| (label.as_str(), pairs.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.edges.values().all(Vec::is_empty)
    }

    /// Smallest `p` such that every endpoint lies in `0..p`.
    ///
    /// Isolated vertices carry no edge, so callers that need the full
    /// universe must supply `p` themselves.
    pub fn vertex_upper_bound(&self) -> usize {
        self.edges
            .values()
            .flatten()
            .map(|&(u, v)| u.max(v) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns a copy with every `(u, v)` edge of `edge_type` removed where
    /// `u ∈ from` and `v ∈ to`.
    ///
    /// All other edge types pass through unchanged; if `edge_type` is absent
    /// the result equals the input. The receiver is never modified.
    pub fn removed_edges(&self, from: &VertexSet, to: &VertexSet, edge_type: &str) -> EdgeMap {
        let mut result = self.clone();
        if let Some(pairs) = result.edges.get_mut(edge_type) {
            pairs.retain(|&(u, v)| !from.contains(&u) || !to.contains(&v));
        }
        result
    }

    /// Directed parents of `x`: every `u` with `u --> x`.
    pub(crate) fn parents_of(&self, x: Vertex) -> Vec<Vertex> {
        self.edges("-->")
            .into_iter()
            .flatten()
            .filter_map(|&(u, v)| (v == x).then_some(u))
            .collect()
    }

    /// Bidirected neighbors of `x`: every `u` with `u <-> x` in either pair
    /// order.
    pub(crate) fn siblings_of(&self, x: Vertex) -> Vec<Vertex> {
        self.edges("<->")
            .into_iter()
            .flatten()
            .filter_map(|&(u, v)| {
                if u == x {
                    Some(v)
                } else if v == x {
                    Some(u)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Ordered copy of a vertex set, for deterministic seeding of follow-up
/// queries and stable log output.
pub(crate) fn sorted(set: VertexSet) -> Vec<Vertex> {
    let mut vertices: Vec<Vertex> = set.into_iter().collect();
    vertices.sort_unstable();
    vertices
}

impl<S: Into<String>> FromIterator<(S, Vec<(Vertex, Vertex)>)> for EdgeMap {
    fn from_iter<I: IntoIterator<Item = (S, Vec<(Vertex, Vertex)>)>>(iter: I) -> Self {
        let mut map = EdgeMap::new();
        for (edge_type, pairs) in iter {
            map.insert(edge_type, pairs);
        }
        map
    }
}
