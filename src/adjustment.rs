//! Adjustment-set procedures for CPDAGs.
//!
//! Both procedures realize the generalized adjustment criterion for Markov
//! equivalence classes: amenability, the forbidden set, and blocking of
//! non-causal definite-status paths, each obtained from one reachability
//! query. Later queries consume earlier results as seeds, so the query order
//! is fixed.

use crate::error::{ensure_disjoint, CausalResult};
use crate::graph::{sorted, EdgeMap, Vertex, VertexSet};
use crate::oracle::ReachOracle;
use crate::tables::TableKind;

/// Checks whether `w` is a valid adjustment set for estimating the effect of
/// `x` on `y` in the CPDAG `g`.
///
/// The three conditions (amenability, forbidden set, backdoor blocking) are
/// independently necessary; all three are evaluated.
pub fn is_cpdag_adjustment(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: &[Vertex],
    y: &[Vertex],
    w: &[Vertex],
) -> CausalResult<bool> {
    ensure_disjoint("X", x, "Y", y)?;
    ensure_disjoint("X", x, "W", w)?;
    ensure_disjoint("Y", y, "W", w)?;

    let nam = oracle.query(g.into(), &[("X", x)], TableKind::NotAmenable)?;

    let anc = oracle.query(g.into(), &[("X", y), ("W", x)], TableKind::PossibleAncestors)?;
    let des = oracle.query(g.into(), &[("X", x)], TableKind::PossibleDescendants)?;
    let cn = sorted(anc.intersection(&des).copied().collect());
    let forb = oracle.query(g.into(), &[("X", &cn)], TableKind::PossibleDescendants)?;

    let bconn = oracle.query(
        g.into(),
        &[("X", x), ("C", &cn), ("W", w)],
        TableKind::BackdoorConnectedCpdag,
    )?;
    tracing::debug!(?cn, amenable = !hits(&nam, y), "adjustment check");

    let amenable = !hits(&nam, y);
    let forbidden_free = !hits(&forb, w);
    let blocked = !hits(&bconn, y);
    Ok(amenable && forbidden_free && blocked)
}

/// Computes the optimal adjustment set for `(x, y)` in the CPDAG `g`.
///
/// Returns `None` when adjustment is undefined or impossible for the pair;
/// the empty set is a legitimate non-`None` result.
pub fn optimal_adjustment(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: &[Vertex],
    y: &[Vertex],
) -> CausalResult<Option<VertexSet>> {
    ensure_disjoint("X", x, "Y", y)?;

    let des = oracle.query(g.into(), &[("X", x)], TableKind::PossibleDescendants)?;
    if y.iter().any(|v| !des.contains(v)) {
        // an outcome the treatments cannot possibly reach
        return Ok(None);
    }

    let nam = oracle.query(g.into(), &[("X", x)], TableKind::NotAmenable)?;
    let anc = oracle.query(g.into(), &[("X", y), ("W", x)], TableKind::PossibleAncestors)?;
    let cn = sorted(anc.intersection(&des).copied().collect());
    let forb = oracle.query(g.into(), &[("X", &cn)], TableKind::PossibleDescendants)?;
    if hits(&forb, x) || hits(&nam, y) {
        return Ok(None);
    }

    let pre_opt = oracle.query(g.into(), &[("X", &cn)], TableKind::Parents)?;
    let optimal = pre_opt
        .into_iter()
        .filter(|v| !forb.contains(v) && !x.contains(v))
        .collect();
    Ok(Some(optimal))
}

fn hits(set: &VertexSet, vertices: &[Vertex]) -> bool {
    vertices.iter().any(|v| set.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Tables;

    #[test]
    fn test_single_treatment_with_undirected_component() {
        let tables = Tables::builtin().unwrap();
        let cpdag = EdgeMap::from_iter([
            ("-->", vec![(0, 1), (0, 2), (3, 1), (3, 2)]),
            ("---", vec![(0, 4), (1, 2)]),
        ]);
        assert!(is_cpdag_adjustment(&tables, &cpdag, &[0], &[2], &[3]).unwrap());
    }

    #[test]
    fn test_rejects_overlapping_roles() {
        let tables = Tables::builtin().unwrap();
        let cpdag = EdgeMap::from_iter([("-->", vec![(0, 1)])]);
        assert!(is_cpdag_adjustment(&tables, &cpdag, &[0], &[0], &[]).is_err());
    }

    #[test]
    fn test_optimal_adjustment_empty_set_is_valid() {
        let tables = Tables::builtin().unwrap();
        let dag = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (2, 3), (2, 4)])]);
        let opt = optimal_adjustment(&tables, &dag, &[0], &[3]).unwrap();
        assert_eq!(opt, Some(VertexSet::default()));
    }

    #[test]
    fn test_optimal_adjustment_none_when_outcome_unreachable() {
        let tables = Tables::builtin().unwrap();
        let cpdag = EdgeMap::from_iter([
            ("-->", vec![(1, 4), (3, 4), (2, 4)]),
            ("---", vec![(0, 1), (0, 3), (1, 3)]),
        ]);
        assert_eq!(optimal_adjustment(&tables, &cpdag, &[4], &[2]).unwrap(), None);
    }
}
