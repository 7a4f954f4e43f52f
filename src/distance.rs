//! Parent-adjustment intervention distance between two causal graphs.

use crate::error::{CausalError, CausalResult};
use crate::graph::{sorted, EdgeMap, VertexSet};
use crate::oracle::ReachOracle;
use crate::tables::TableKind;

/// Counts, over all ordered pairs `(t, y)`, the disagreements between the
/// adjustment implications of `guess` and those of `truth` on the vertex
/// universe `0..p`.
///
/// For each target `t` the guessed parent set is tried as an adjustment set
/// in the true graph. A pair is a mistake when a claimed parent is actually
/// a possible descendant, when amenability is claimed away wrongly, or when
/// the guessed parents fail to be a valid adjustment set for the pair.
///
/// Both graphs are indexed once and the handles reused across all `p`
/// targets; re-indexing per target would dominate the runtime.
pub fn parent_aid(
    oracle: &impl ReachOracle,
    p: usize,
    truth: &EdgeMap,
    guess: &EdgeMap,
) -> CausalResult<usize> {
    if truth.vertex_upper_bound() > p || guess.vertex_upper_bound() > p {
        return Err(CausalError::InvalidArgument(format!(
            "graph endpoints exceed the vertex universe 0..{p}"
        )));
    }

    let mut parents: Vec<VertexSet> = vec![VertexSet::default(); p];
    for &(u, v) in guess.edges("-->").unwrap_or(&[]) {
        parents[v].insert(u);
    }

    let truth_handle = oracle.parse(truth, TableKind::PossibleDescendants)?;
    let guess_handle = oracle.parse(guess, TableKind::PossibleDescendants)?;

    let mut mistakes = 0;
    for t in 0..p {
        let pt = sorted(parents[t].clone());
        let target = [t];

        let nam_guess = oracle.query(
            (&guess_handle).into(),
            &[("X", &target)],
            TableKind::NotAmenable,
        )?;
        let des_true = oracle.query(
            (&truth_handle).into(),
            &[("X", &target)],
            TableKind::PossibleDescendants,
        )?;
        let nam_true = oracle.query(
            (&truth_handle).into(),
            &[("X", &target)],
            TableKind::NotAmenable,
        )?;
        let forbidden = oracle.query(
            (&truth_handle).into(),
            &[("X", &target), ("Z", &pt)],
            TableKind::ForbiddenPathConnected,
        )?;
        let non_causal = oracle.query(
            (&truth_handle).into(),
            &[("X", &target), ("Z", &pt)],
            TableKind::NonCausalConnected,
        )?;

        for y in 0..p {
            if y == t {
                continue;
            }
            let mistake = if parents[t].contains(&y) {
                // a claimed parent that the true graph can reach causally
                des_true.contains(&y)
            } else if nam_guess.contains(&y) {
                !nam_true.contains(&y)
            } else {
                nam_true.contains(&y) || forbidden.contains(&y) || non_causal.contains(&y)
            };
            if mistake {
                mistakes += 1;
            }
        }
        tracing::trace!(vertex = t, mistakes, "scored target");
    }
    Ok(mistakes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Tables;

    #[test]
    fn test_distance_between_dags() {
        let tables = Tables::builtin().unwrap();
        let truth = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (0, 3), (3, 2)])]);
        let guess = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (3, 0), (3, 2)])]);
        assert_eq!(parent_aid(&tables, 4, &truth, &guess).unwrap(), 5);
    }

    #[test]
    fn test_self_distance_is_zero() {
        let tables = Tables::builtin().unwrap();
        let g = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (0, 3), (3, 2)])]);
        assert_eq!(parent_aid(&tables, 4, &g, &g).unwrap(), 0);
        let cpdag = EdgeMap::from_iter([("-->", vec![(0, 1), (2, 1), (3, 1)]), ("---", vec![(2, 3)])]);
        assert_eq!(parent_aid(&tables, 4, &cpdag, &cpdag).unwrap(), 0);
    }

    #[test]
    fn test_rejects_undersized_universe() {
        let tables = Tables::builtin().unwrap();
        let g = EdgeMap::from_iter([("-->", vec![(0, 5)])]);
        assert!(parent_aid(&tables, 4, &g, &g).is_err());
    }
}
