//! The reachability capability consumed by every procedure.
//!
//! Procedures never talk to the engine directly; they go through
//! [`ReachOracle`], which [`Tables`] implements with the bundled engine.
//! Tests (or an alternative engine) can substitute their own implementation
//! without touching the algorithms.

use std::sync::Arc;

use causalid_reach::{reach, Graph, Ruletable, Sets};

use crate::error::{CausalError, CausalResult};
use crate::graph::{EdgeMap, Vertex, VertexSet};
use crate::tables::{TableKind, Tables};

/// A role assignment: role name to member vertices, supplied fresh per query.
pub type RoleAssignment<'a> = [(&'a str, &'a [Vertex])];

/// A graph pre-indexed against one rule table.
///
/// Indexing costs more than a single query, so call sites issuing many
/// queries against the same structure build one handle and reuse it. The
/// handle stays valid for any table sharing the edge vocabulary of the one
/// it was built against; anything else is rejected.
pub struct ParsedGraph {
    graph: Graph,
    table: Arc<Ruletable>,
    kind: TableKind,
}

/// Query input: a raw edge map (indexed on the fly) or a reusable handle.
#[derive(Clone, Copy)]
pub enum GraphView<'a> {
    Raw(&'a EdgeMap),
    Parsed(&'a ParsedGraph),
}

impl<'a> From<&'a EdgeMap> for GraphView<'a> {
    fn from(graph: &'a EdgeMap) -> Self {
        GraphView::Raw(graph)
    }
}

impl<'a> From<&'a ParsedGraph> for GraphView<'a> {
    fn from(graph: &'a ParsedGraph) -> Self {
        GraphView::Parsed(graph)
    }
}

/// The injected reachability capability: index a graph, run a query.
pub trait ReachOracle {
    /// Indexes `graph` against the named table for repeated querying.
    fn parse(&self, graph: &EdgeMap, kind: TableKind) -> CausalResult<ParsedGraph>;

    /// Set of vertices reachable from the seed roles under the table's
    /// automaton. Missing roles default to empty; unknown role names are an
    /// error.
    fn query(
        &self,
        graph: GraphView<'_>,
        roles: &RoleAssignment<'_>,
        kind: TableKind,
    ) -> CausalResult<VertexSet>;
}

impl ReachOracle for Tables {
    fn parse(&self, graph: &EdgeMap, kind: TableKind) -> CausalResult<ParsedGraph> {
        let table = self.get(kind);
        let indexed = Graph::new(graph.iter(), table)?;
        Ok(ParsedGraph {
            graph: indexed,
            table: Arc::clone(table),
            kind,
        })
    }

    fn query(
        &self,
        graph: GraphView<'_>,
        roles: &RoleAssignment<'_>,
        kind: TableKind,
    ) -> CausalResult<VertexSet> {
        let table = self.get(kind);
        let sets = Sets::new(roles.iter().copied(), table)?;
        let reached = match graph {
            GraphView::Raw(raw) => {
                let indexed = Graph::new(raw.iter(), table)?;
                reach(&indexed, &sets, table)
            }
            GraphView::Parsed(parsed) => {
                if !parsed.table.same_edge_vocabulary(table) {
                    return Err(CausalError::TableMismatch {
                        built: parsed.kind.file_name().to_owned(),
                        queried: kind.file_name().to_owned(),
                    });
                }
                reach(&parsed.graph, &sets, table)
            }
        };
        Ok(reached.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> EdgeMap {
        EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2)])])
    }

    #[test]
    fn test_raw_query() {
        let tables = Tables::builtin().unwrap();
        let g = chain();
        let des = tables
            .query((&g).into(), &[("X", &[0])], TableKind::Descendants)
            .unwrap();
        assert_eq!(des, VertexSet::from_iter([0, 1, 2]));
    }

    #[test]
    fn test_parsed_handle_reuse_across_compatible_tables() {
        let tables = Tables::builtin().unwrap();
        let g = chain();
        let handle = tables.parse(&g, TableKind::Descendants).unwrap();
        let des = tables
            .query((&handle).into(), &[("X", &[0])], TableKind::Descendants)
            .unwrap();
        assert_eq!(des.len(), 3);
        // ancestors shares the ADMG edge vocabulary
        let anc = tables
            .query((&handle).into(), &[("X", &[2])], TableKind::Ancestors)
            .unwrap();
        assert_eq!(anc, VertexSet::from_iter([0, 1, 2]));
    }

    #[test]
    fn test_parsed_handle_rejected_for_foreign_vocabulary() {
        let tables = Tables::builtin().unwrap();
        let g = chain();
        // CPDAG vocabulary (--- instead of <->) is incompatible
        let handle = tables.parse(&g, TableKind::PossibleDescendants).unwrap();
        let err = tables
            .query((&handle).into(), &[("X", &[0])], TableKind::Descendants)
            .unwrap_err();
        assert!(matches!(err, CausalError::TableMismatch { .. }));
    }

    #[test]
    fn test_unknown_role_is_an_error() {
        let tables = Tables::builtin().unwrap();
        let g = chain();
        let err = tables
            .query((&g).into(), &[("Q", &[0])], TableKind::Descendants)
            .unwrap_err();
        assert!(matches!(err, CausalError::Roles(_)));
    }

    #[test]
    fn test_schema_error_on_undeclared_edge_type() {
        let tables = Tables::builtin().unwrap();
        let g = EdgeMap::from_iter([("o->", vec![(0usize, 1usize)])]);
        let err = tables
            .query((&g).into(), &[("X", &[0])], TableKind::Descendants)
            .unwrap_err();
        assert!(matches!(err, CausalError::Schema(_)));
    }
}
