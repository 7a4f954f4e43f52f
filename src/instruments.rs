//! Instrumental-variable discovery for ADMGs.

use crate::error::{ensure_in_range, CausalError, CausalResult};
use crate::graph::{sorted, EdgeMap, Vertex, VertexSet};
use crate::oracle::ReachOracle;
use crate::separators::nearest_separator_view;
use crate::tables::TableKind;

/// A discovered instrument: candidate instrumental variables and the
/// conditioning set to use with them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instrument {
    pub instruments: VertexSet,
    pub conditioning: VertexSet,
}

/// Closed-form optimal conditional instrument for `(x, y)`, strict form.
///
/// On top of [`optimal_instrument_lenient`], requires a parent or bidirected
/// sibling of `x` among the candidates; without one the criterion is vacuous
/// and the candidates are discarded.
pub fn optimal_instrument(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: Vertex,
    y: Vertex,
) -> CausalResult<Option<Instrument>> {
    let Some(found) = optimal_instrument_lenient(oracle, g, x, y)? else {
        return Ok(None);
    };
    let anchored = g
        .parents_of(x)
        .into_iter()
        .chain(g.siblings_of(x))
        .any(|v| found.instruments.contains(&v));
    if !anchored {
        tracing::debug!("candidates contain no parent or sibling of the treatment");
        return Ok(None);
    }
    Ok(Some(found))
}

/// Closed-form optimal conditional instrument for `(x, y)`, lenient form.
///
/// Two collider-closure queries: the conditioning side seeded at `y`, the
/// candidate side seeded at `x`, both excluding descendants of `x`. Sound
/// only; with no adjustment set between `x` and `y` the result is also
/// optimal.
pub fn optimal_instrument_lenient(
    oracle: &impl ReachOracle,
    g: &EdgeMap,
    x: Vertex,
    y: Vertex,
) -> CausalResult<Option<Instrument>> {
    if x == y {
        return Err(CausalError::InvalidArgument(
            "treatment and outcome must differ".to_owned(),
        ));
    }
    let de_x = oracle.query(g.into(), &[("X", &[x])], TableKind::Descendants)?;
    if !de_x.contains(&y) {
        // the instrument family only applies to downstream outcomes
        return Ok(None);
    }
    let de_x = sorted(de_x);

    let conditioning = oracle.query(
        g.into(),
        &[("S", &[y]), ("D", &de_x), ("F", &[x])],
        TableKind::OptimalInstrument,
    )?;
    let candidates: VertexSet = oracle
        .query(g.into(), &[("S", &[x]), ("D", &de_x)], TableKind::OptimalInstrument)?
        .difference(&conditioning)
        .copied()
        .collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    Ok(Some(Instrument {
        instruments: candidates,
        conditioning,
    }))
}

/// Sound and complete instrument search over the universe `0..p`.
///
/// Enumerates candidates in ascending vertex order and returns the first
/// that admits an ancestral witness: a nearest separator between `y` and the
/// candidate on the graph with the treatment's causal edges cut, plus
/// d-connection between candidate and treatment on the original graph.
/// Worst case, one separator search and one d-connection query per
/// candidate.
pub fn sound_and_complete_instrument(
    oracle: &impl ReachOracle,
    p: usize,
    g: &EdgeMap,
    x: Vertex,
    y: Vertex,
) -> CausalResult<Option<Instrument>> {
    ensure_in_range("x", &[x], p)?;
    ensure_in_range("y", &[y], p)?;
    if x == y {
        return Err(CausalError::InvalidArgument(
            "treatment and outcome must differ".to_owned(),
        ));
    }

    let anc_y = oracle.query(g.into(), &[("X", &[y])], TableKind::Ancestors)?;
    let de_x = oracle.query(g.into(), &[("X", &[x])], TableKind::Descendants)?;
    let causal: VertexSet = anc_y.intersection(&de_x).copied().collect();

    let proper: Vec<Vertex> = sorted(causal.clone()).into_iter().filter(|&v| v != x).collect();
    let mut forb = oracle.query(g.into(), &[("X", &proper)], TableKind::Descendants)?;
    forb.insert(x);
    let non_forb: Vec<Vertex> = (0..p).filter(|v| !forb.contains(v)).collect();

    // cut the treatment's edges into the causal vertices before separating
    let cut = g.removed_edges(&VertexSet::from_iter([x]), &causal, "-->");
    let cut_handle = oracle.parse(&cut, TableKind::Ancestors)?;

    for &z in &non_forb {
        if z == x || z == y {
            continue;
        }
        let Some(w) =
            nearest_separator_view(oracle, (&cut_handle).into(), &[y], &[z], &[], &non_forb)?
        else {
            continue;
        };
        let connected = oracle.query(
            g.into(),
            &[("X", &[x]), ("Z", &sorted(w.clone()))],
            TableKind::DConnected,
        )?;
        if connected.contains(&z) {
            tracing::debug!(instrument = z, "ancestral witness found");
            return Ok(Some(Instrument {
                instruments: VertexSet::from_iter([z]),
                conditioning: w,
            }));
        }
    }
    Ok(None)
}
