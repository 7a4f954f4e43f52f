//! Front-door set construction for ADMGs.

use crate::error::{ensure_disjoint, CausalResult};
use crate::graph::{sorted, EdgeMap, Vertex, VertexSet};
use crate::oracle::ReachOracle;
use crate::tables::TableKind;

/// Searches for a front-door set for `(x, y)` within the candidate pool `r`,
/// required to contain every vertex of `i`.
///
/// Returns the maximal set this derivation reaches, not a minimal one; `None`
/// is the defined negative outcome, not an error.
pub fn frontdoor(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: &[Vertex],
    y: &[Vertex],
    i: &[Vertex],
    r: &[Vertex],
) -> CausalResult<Option<VertexSet>> {
    ensure_disjoint("X", x, "Y", y)?;
    ensure_disjoint("X", x, "R", r)?;
    ensure_disjoint("Y", y, "R", r)?;

    // candidates free of backdoor paths from the treatments
    let bconn = oracle.query(g.into(), &[("X", x)], TableKind::BackdoorConnectedAdmg)?;
    let zi = sorted(r.iter().copied().filter(|v| !bconn.contains(v)).collect());

    let a = sorted(oracle.query(g.into(), &[("X", y)], TableKind::Ancestors)?);
    let excluded = oracle.query(
        g.into(),
        &[("Y", y), ("A", &a), ("Z", &zi), ("X", x)],
        TableKind::FrontdoorForbidden,
    )?;
    let zii: VertexSet = zi.iter().copied().filter(|v| !excluded.contains(v)).collect();

    if !i.iter().all(|v| zii.contains(v)) {
        tracing::debug!("front-door candidates lost a required vertex");
        return Ok(None);
    }
    let uncut = oracle.query(
        g.into(),
        &[("X", x), ("Z", &sorted(zii.clone()))],
        TableKind::InterceptedPaths,
    )?;
    if y.iter().any(|v| uncut.contains(v)) {
        return Ok(None);
    }
    Ok(Some(zii))
}
