//! Parent-adjustment intervention distance.

use causalid::{parent_aid, EdgeMap, Tables};

fn tables() -> Tables {
    Tables::builtin().expect("bundled tables should compile")
}

#[test]
fn test_dag_distance() {
    let t = tables();
    let truth = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (0, 3), (3, 2)])]);
    let guess = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (3, 0), (3, 2)])]);
    assert_eq!(parent_aid(&t, 4, &truth, &guess).unwrap(), 5);
}

#[test]
fn test_cpdag_distance() {
    let t = tables();
    let truth = EdgeMap::from_iter([("-->", vec![(0, 1), (2, 1), (3, 1)]), ("---", vec![(2, 3)])]);
    let guess = EdgeMap::from_iter([
        ("-->", vec![(0, 1), (2, 1), (0, 3), (2, 3)]),
        ("---", vec![(1, 3)]),
    ]);
    assert_eq!(parent_aid(&t, 4, &truth, &guess).unwrap(), 4);
}

#[test]
fn test_self_distance_is_zero() {
    let t = tables();
    let graphs = [
        EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (0, 3), (3, 2)])]),
        EdgeMap::from_iter([("-->", vec![(0, 1), (2, 1), (3, 1)]), ("---", vec![(2, 3)])]),
        EdgeMap::from_iter([("-->", vec![(0, 2), (1, 2), (2, 5), (3, 2), (3, 5), (4, 5)]), ("---", vec![(0, 1), (1, 3), (1, 4), (3, 4)])]),
        EdgeMap::new(),
    ];
    for g in &graphs {
        assert_eq!(parent_aid(&t, 6, g, g).unwrap(), 0);
    }
}

#[test]
fn test_distance_is_direction_sensitive() {
    let t = tables();
    let truth = EdgeMap::from_iter([("-->", vec![(0, 1)])]);
    let flipped = EdgeMap::from_iter([("-->", vec![(1, 0)])]);
    assert!(parent_aid(&t, 2, &truth, &flipped).unwrap() > 0);
}
