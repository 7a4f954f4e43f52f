//! Nearest and minimal d-separator search for ADMGs.

use crate::error::{ensure_disjoint, CausalResult};
use crate::graph::{sorted, EdgeMap, Vertex, VertexSet};
use crate::oracle::{GraphView, ReachOracle};
use crate::tables::TableKind;

/// Finds the d-separator between `x` and `y` that is nearest to `x`, drawn
/// from the restricted pool `r` and always containing `i`.
///
/// Returns `None` when `x` and `y` cannot be separated within `r`. The
/// closure query evaluates the fixed point in a single pass; there is no
/// iteration here.
pub fn nearest_separator(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: &[Vertex],
    y: &[Vertex],
    i: &[Vertex],
    r: &[Vertex],
) -> CausalResult<Option<VertexSet>> {
    ensure_disjoint("X", x, "Y", y)?;
    nearest_separator_view(oracle, g.into(), x, y, i, r)
}

pub(crate) fn nearest_separator_view(
    oracle: &impl ReachOracle,
    view: GraphView<'_>,
    x: &[Vertex],
    y: &[Vertex],
    i: &[Vertex],
    r: &[Vertex],
) -> CausalResult<Option<VertexSet>> {
    let seeds: VertexSet = x.iter().chain(y).chain(i).copied().collect();
    let a = oracle.query(view, &[("X", &sorted(seeds))], TableKind::Ancestors)?;

    let z0: VertexSet = r
        .iter()
        .copied()
        .filter(|v| a.contains(v) && !x.contains(v) && !y.contains(v))
        .collect();

    let xstar = oracle.query(
        view,
        &[("X", x), ("Z", &sorted(z0.clone())), ("A", &sorted(a))],
        TableKind::Closure,
    )?;
    if y.iter().any(|v| xstar.contains(v)) {
        tracing::debug!("seed side reaches the target side, no separator in the pool");
        return Ok(None);
    }
    let separator = z0
        .intersection(&xstar)
        .chain(i)
        .copied()
        .collect();
    Ok(Some(separator))
}

/// Finds an inclusion-minimal d-separator between `x` and `y` within `r`,
/// always containing `i`.
///
/// Composes two nearest-separator passes: the second runs with the first
/// result as its pool, which is what makes the intersection minimal; a
/// single pass is only minimal relative to the ancestral closure.
pub fn min_separator(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: &[Vertex],
    y: &[Vertex],
    i: &[Vertex],
    r: &[Vertex],
) -> CausalResult<Option<VertexSet>> {
    let Some(zx) = nearest_separator(oracle, g, x, y, i, r)? else {
        return Ok(None);
    };
    let Some(zy) = nearest_separator(oracle, g, y, x, i, &sorted(zx.clone()))? else {
        return Ok(None);
    };
    let separator = zx.intersection(&zy).chain(i).copied().collect();
    Ok(Some(separator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Tables;

    fn chain_with_fork() -> EdgeMap {
        // 1 -> 0, 1 -> 2, 0 -> 2, 2 -> 3, 3 -> 4
        EdgeMap::from_iter([("-->", vec![(0, 2), (1, 0), (1, 2), (2, 3), (3, 4)])])
    }

    #[test]
    fn test_nearest_separator() {
        let tables = Tables::builtin().unwrap();
        let near = nearest_separator(&tables, &chain_with_fork(), &[0], &[4], &[], &[0, 1, 2, 3, 4])
            .unwrap()
            .unwrap();
        assert_eq!(near, VertexSet::from_iter([1, 2]));
    }

    #[test]
    fn test_min_separator_is_smaller_than_nearest() {
        let tables = Tables::builtin().unwrap();
        let min = min_separator(&tables, &chain_with_fork(), &[0], &[4], &[], &[0, 1, 2, 3, 4])
            .unwrap()
            .unwrap();
        assert_eq!(min, VertexSet::from_iter([2]));
    }

    #[test]
    fn test_required_vertices_always_included() {
        let tables = Tables::builtin().unwrap();
        let g = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (3, 1)])]);
        let min = min_separator(&tables, &g, &[0], &[2], &[3], &[1, 3]).unwrap().unwrap();
        assert!(min.contains(&3));
        assert!(min.contains(&1));
    }

    #[test]
    fn test_adjacent_pair_has_no_separator() {
        let tables = Tables::builtin().unwrap();
        let g = EdgeMap::from_iter([("-->", vec![(0, 1)])]);
        assert_eq!(min_separator(&tables, &g, &[0], &[1], &[], &[]).unwrap(), None);
    }
}
