//! Query instances: the indexed graph and the named vertex sets.
//!
//! Both are validated against a specific [`Ruletable`], which fixes the edge
//! vocabulary and the set (role) vocabulary. A [`Graph`] built against one
//! table must not be queried with another; the domain layer enforces this by
//! pairing handles with their table.

use thiserror::Error;

use crate::ruletable::Ruletable;
use crate::Vertex;

/// Graph indexed for traversal: for every vertex, the list of
/// `(neighbor, traversal-edge-id)` moves leaving it.
///
/// An asymmetric edge type contributes two traversal ids: one for following
/// the edge and one for crossing it against its orientation. A symmetric type
/// uses the same id in both directions.
#[derive(Debug)]
pub struct Graph {
    vertex_count: usize,
    adjacency: Vec<Vec<(Vertex, usize)>>,
}

impl Graph {
    /// Indexes `edge_lists` against the rule table's edge vocabulary.
    ///
    /// The vertex universe is `0..=max` over all endpoints; isolated vertices
    /// beyond that range are still valid seeds (see [`crate::reach::reach`]).
    pub fn new<'a, I>(edge_lists: I, ruletable: &Ruletable) -> Result<Graph, GraphError>
    where
        I: IntoIterator<Item = (&'a str, &'a [(Vertex, Vertex)])>,
    {
        let mut adjacency: Vec<Vec<(Vertex, usize)>> = Vec::new();
        for (edge_type, edges) in edge_lists {
            let (forward, reverse) = ruletable
                .edge_ids(edge_type)
                .ok_or_else(|| GraphError::UnknownEdgeType(edge_type.to_owned()))?;
            for &(u, v) in edges {
                let needed = u.max(v) + 1;
                if adjacency.len() < needed {
                    adjacency.resize_with(needed, Vec::new);
                }
                adjacency[u].push((v, forward));
                adjacency[v].push((u, reverse));
            }
        }
        Ok(Graph {
            vertex_count: adjacency.len(),
            adjacency,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub(crate) fn moves(&self, u: Vertex) -> &[(Vertex, usize)] {
        &self.adjacency[u]
    }
}

/// Errors raised while indexing a graph against a rule table.
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("edge type '{0}' is not declared by the rule table")]
    UnknownEdgeType(String),
}

/// Role assignment: one membership bitmap per set declared by the rule table.
///
/// Roles the caller does not supply stay empty.
#[derive(Debug)]
pub struct Sets(Vec<Vec<bool>>);

impl Sets {
    /// Validates `roles` against the rule table's set vocabulary.
    pub fn new<'a, I>(roles: I, ruletable: &Ruletable) -> Result<Sets, SetsError>
    where
        I: IntoIterator<Item = (&'a str, &'a [Vertex])>,
    {
        let mut bitmaps = vec![Vec::new(); ruletable.set_count()];
        for (role, members) in roles {
            let id = ruletable
                .set_id(role)
                .ok_or_else(|| SetsError::UnknownRole(role.to_owned()))?;
            let bitmap = &mut bitmaps[id];
            for &v in members {
                if bitmap.len() <= v {
                    bitmap.resize(v + 1, false);
                }
                if bitmap[v] {
                    return Err(SetsError::DuplicateMember {
                        role: role.to_owned(),
                        vertex: v,
                    });
                }
                bitmap[v] = true;
            }
        }
        Ok(Sets(bitmaps))
    }

    #[inline]
    pub(crate) fn contains(&self, set_id: usize, vertex: Vertex) -> bool {
        self.0[set_id].get(vertex).copied().unwrap_or(false)
    }

    pub(crate) fn members(&self, set_id: usize) -> impl Iterator<Item = Vertex> + '_ {
        self.0[set_id]
            .iter()
            .enumerate()
            .filter_map(|(v, &present)| present.then_some(v))
    }

    /// Largest vertex index (plus one) mentioned by any role.
    pub(crate) fn max_size(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Errors raised while validating a role assignment.
#[derive(Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("role '{0}' is not recognized by the rule table")]
    UnknownRole(String),
    #[error("vertex {vertex} appears twice in role '{role}'")]
    DuplicateMember { role: String, vertex: Vertex },
}
