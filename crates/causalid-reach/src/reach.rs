//! The reachability automaton.
//!
//! A breadth-first search over `(vertex, edge, color)` states: `edge` is the
//! traversal string by which the vertex was entered and `color` an arbitrary
//! table-defined mode. The rule table decides which transitions are legal and
//! which visited states report their vertex.

use std::collections::VecDeque;

use crate::dense::{Dense2, Dense3};
use crate::instance::{Graph, Sets};
use crate::ruletable::Ruletable;
use crate::Vertex;

/// One automaton state.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct State {
    pub(crate) node: Vertex,
    pub(crate) edge: usize,
    pub(crate) color: usize,
}

/// Computes the vertices reachable from the table's seed states.
///
/// Deterministic and side-effect free: the result depends only on the three
/// arguments, and vertices are reported in discovery order. Seed vertices
/// beyond the graph's edge-derived range (isolated vertices) are reported if
/// their seed state is an output state.
pub fn reach(graph: &Graph, sets: &Sets, ruletable: &Ruletable) -> Vec<Vertex> {
    let n = graph.vertex_count().max(sets.max_size());
    let mut visited = Dense3::filled(n, ruletable.edge_count(), ruletable.color_count(), false);
    let mut queue = VecDeque::new();

    let mut is_output = Dense2::filled(ruletable.edge_count(), ruletable.color_count(), false);
    for &(edge, color) in ruletable.outputs() {
        *is_output.get_mut(edge, color) = true;
    }

    let mut result = Vec::new();
    let mut reported = vec![false; n];

    for &(set, edge, color) in ruletable.starts() {
        for node in sets.members(set) {
            let state = State { node, edge, color };
            if *visited.get(state.node, state.edge, state.color) {
                continue;
            }
            *visited.get_mut(state.node, state.edge, state.color) = true;
            if state.node >= graph.vertex_count() {
                // isolated seed: no moves, report directly if it outputs
                if !reported[state.node] && *is_output.get(state.edge, state.color) {
                    result.push(state.node);
                    reported[state.node] = true;
                }
            } else {
                queue.push_back(state);
            }
        }
    }

    while let Some(prev) = queue.pop_front() {
        if !reported[prev.node] && *is_output.get(prev.edge, prev.color) {
            result.push(prev.node);
            reported[prev.node] = true;
        }
        tracing::trace!(node = prev.node, edge = prev.edge, color = prev.color, "visit");
        for &(node, edge) in graph.moves(prev.node) {
            for &color in ruletable.possible_colors(prev.edge, prev.color, edge) {
                let next = State { node, edge, color };
                if !*visited.get(next.node, next.edge, next.color)
                    && ruletable.passes(sets, prev, next)
                {
                    *visited.get_mut(next.node, next.edge, next.color) = true;
                    queue.push_back(next);
                }
            }
        }
    }
    result
}
