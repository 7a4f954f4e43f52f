//! Instrument discovery against published worked examples.
//!
//! The two discovery routes must agree on instrument validity: whenever both
//! return, the candidate is d-connected to the treatment given the
//! conditioning set.

use causalid::{
    optimal_instrument, optimal_instrument_lenient, sound_and_complete_instrument, EdgeMap,
    Instrument, ReachOracle, TableKind, Tables, VertexSet,
};

fn tables() -> Tables {
    Tables::builtin().expect("bundled tables should compile")
}

fn instrument_is_connected(t: &Tables, g: &EdgeMap, x: usize, found: &Instrument) -> bool {
    let mut w: Vec<usize> = found.conditioning.iter().copied().collect();
    w.sort_unstable();
    let connected = t
        .query(g.into(), &[("X", &[x]), ("Z", &w)], TableKind::DConnected)
        .unwrap();
    found.instruments.iter().all(|z| connected.contains(z))
}

fn ancestor_chain_admg() -> EdgeMap {
    // a -> b -> c alongside a -> x -> y, c and x confounded with y
    EdgeMap::from_iter([
        ("-->", vec![(0, 1), (0, 3), (1, 2), (3, 4)]),
        ("<->", vec![(2, 4), (3, 4)]),
    ])
}

fn shared_parent_admg() -> EdgeMap {
    EdgeMap::from_iter([
        ("-->", vec![(0, 3), (1, 0), (1, 2), (2, 0), (3, 4)]),
        ("<->", vec![(2, 4), (3, 4)]),
    ])
}

#[test]
fn test_optimal_instrument_ancestor_chain() {
    let t = tables();
    let g = ancestor_chain_admg();
    let found = optimal_instrument(&t, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::from_iter([1, 2]));
    assert!(instrument_is_connected(&t, &g, 3, &found));
}

#[test]
fn test_optimal_instrument_shared_parents() {
    let t = tables();
    let g = shared_parent_admg();
    let found = optimal_instrument(&t, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::from_iter([1, 2]));
}

#[test]
fn test_optimal_instrument_ignores_mediators_and_children() {
    let t = tables();
    let g = EdgeMap::from_iter([
        (
            "-->",
            vec![(0, 3), (1, 0), (1, 2), (2, 0), (3, 5), (5, 4), (3, 7), (4, 8), (5, 6)],
        ),
        ("<->", vec![(2, 4), (3, 4)]),
    ]);
    let found = optimal_instrument(&t, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::from_iter([1, 2]));
}

#[test]
fn test_optimal_instrument_candidates_swallowed_by_conditioning() {
    let t = tables();
    let g = EdgeMap::from_iter([
        ("-->", vec![(0, 1), (0, 2), (2, 3)]),
        ("<->", vec![(1, 3), (2, 3)]),
    ]);
    assert_eq!(optimal_instrument(&t, &g, 2, 3).unwrap(), None);
}

#[test]
fn test_optimal_instrument_unanchored_treatment() {
    let t = tables();
    let g = EdgeMap::from_iter([
        ("-->", vec![(0, 2), (2, 1), (3, 4)]),
        ("<->", vec![(1, 4), (2, 3), (3, 4)]),
    ]);
    // the strict form rejects, the lenient form reports the distant candidate
    assert_eq!(optimal_instrument(&t, &g, 3, 4).unwrap(), None);
    let lenient = optimal_instrument_lenient(&t, &g, 3, 4).unwrap().unwrap();
    assert_eq!(lenient.instruments, VertexSet::from_iter([0]));
}

#[test]
fn test_search_ancestor_chain() {
    let t = tables();
    let g = ancestor_chain_admg();
    let found = sound_and_complete_instrument(&t, 5, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::default());
    assert!(instrument_is_connected(&t, &g, 3, &found));
}

#[test]
fn test_search_shared_parents() {
    let t = tables();
    let g = shared_parent_admg();
    let found = sound_and_complete_instrument(&t, 5, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::from_iter([1, 2]));
    assert!(instrument_is_connected(&t, &g, 3, &found));
}

#[test]
fn test_search_ignores_mediators_and_children() {
    let t = tables();
    let g = EdgeMap::from_iter([
        (
            "-->",
            vec![(0, 3), (1, 0), (1, 2), (2, 0), (3, 5), (5, 4), (3, 7), (4, 8), (5, 6)],
        ),
        ("<->", vec![(2, 4), (3, 4)]),
    ]);
    let found = sound_and_complete_instrument(&t, 9, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::from_iter([1, 2]));
}

#[test]
fn test_search_succeeds_where_closed_form_fails() {
    let t = tables();
    let g = EdgeMap::from_iter([
        ("-->", vec![(0, 1), (0, 2), (2, 3)]),
        ("<->", vec![(1, 3), (2, 3)]),
    ]);
    let found = sound_and_complete_instrument(&t, 4, &g, 2, 3).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([0]));
    assert_eq!(found.conditioning, VertexSet::default());
}

#[test]
fn test_search_finds_sibling_anchored_instrument() {
    let t = tables();
    let g = EdgeMap::from_iter([
        ("-->", vec![(0, 2), (2, 1), (3, 4)]),
        ("<->", vec![(1, 4), (2, 3), (3, 4)]),
    ]);
    let found = sound_and_complete_instrument(&t, 5, &g, 3, 4).unwrap().unwrap();
    assert_eq!(found.instruments, VertexSet::from_iter([2]));
    assert_eq!(found.conditioning, VertexSet::default());
}
