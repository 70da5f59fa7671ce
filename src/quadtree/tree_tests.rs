use approx::assert_relative_eq;

use crate::errors::BarnesHutError;
use crate::quadtree::{Body, OutOfBoundsPolicy, QuadTree, Quadrant};

fn bounds10() -> Quadrant {
    Quadrant { x: 0.0, y: 0.0, width: 10.0 }
}

#[test]
fn test_new_rejects_degenerate_bounds() {
    let flat = Quadrant { x: 0.0, y: 0.0, width: 0.0 };
    assert!(matches!(
        QuadTree::new(flat, 32),
        Err(BarnesHutError::InvalidQuadrant)
    ));
}

#[test]
fn test_single_body_becomes_leaf_root() {
    let mut tree = QuadTree::new(bounds10(), 32).unwrap();
    let body = Body { id: 0, x: 3.0, y: 4.0, mass: 2.5 };
    tree.insert(body).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.total_mass(), 2.5);
    assert_eq!(tree.center_of_mass(), Some((3.0, 4.0)));
}

#[test]
fn test_empty_tree_has_no_mass() {
    let tree = QuadTree::new(bounds10(), 32).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.total_mass(), 0.0);
    assert_eq!(tree.center_of_mass(), None);
}

#[test]
fn test_mass_conservation() {
    let bodies = [
        Body { id: 0, x: 1.0, y: 1.0, mass: 1.0 },
        Body { id: 1, x: 9.0, y: 1.0, mass: 2.0 },
        Body { id: 2, x: 1.0, y: 9.0, mass: 3.0 },
        Body { id: 3, x: 9.0, y: 9.0, mass: 4.0 },
        Body { id: 4, x: 4.5, y: 5.5, mass: 5.0 },
    ];
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 32).unwrap();

    let expected: f64 = bodies.iter().map(|b| b.mass).sum();
    crate::assert_float_eq(tree.total_mass(), expected, 1e-12, Some("root mass should equal the sum of inserted masses"));
}

#[test]
fn test_root_centroid_is_weighted_average() {
    let bodies = [
        Body { id: 0, x: 2.0, y: 3.0, mass: 1.0 },
        Body { id: 1, x: 8.0, y: 1.0, mass: 3.0 },
        Body { id: 2, x: 5.0, y: 7.0, mass: 6.0 },
    ];
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 32).unwrap();

    let total: f64 = bodies.iter().map(|b| b.mass).sum();
    let expected_x: f64 = bodies.iter().map(|b| b.mass * b.x).sum::<f64>() / total;
    let expected_y: f64 = bodies.iter().map(|b| b.mass * b.y).sum::<f64>() / total;

    let (cx, cy) = tree.center_of_mass().unwrap();
    assert_relative_eq!(cx, expected_x, epsilon = 1e-12);
    assert_relative_eq!(cy, expected_y, epsilon = 1e-12);
}

#[test]
fn test_three_body_scenario() {
    // A and C share the root's SW quarter and separate via recursive
    // subdivision; B sits alone in NE.
    let a = Body { id: 0, x: 1.0, y: 1.0, mass: 5.0 };
    let b = Body { id: 1, x: 8.0, y: 8.0, mass: 5.0 };
    let c = Body { id: 2, x: 1.0, y: 2.0, mass: 5.0 };
    let tree = QuadTree::build(bounds10(), &[a, b, c], OutOfBoundsPolicy::Reject, 32).unwrap();

    assert_eq!(tree.len(), 3);
    assert_relative_eq!(tree.total_mass(), 15.0, epsilon = 1e-12);

    let (cx, cy) = tree.center_of_mass().unwrap();
    assert_relative_eq!(cx, 10.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(cy, 11.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_out_of_bounds_insert_fails_without_mutation() {
    let mut tree = QuadTree::new(bounds10(), 32).unwrap();
    tree.insert(Body { id: 0, x: 5.0, y: 5.0, mass: 1.0 }).unwrap();

    let outside = Body { id: 1, x: 12.0, y: 5.0, mass: 1.0 };
    assert_eq!(
        tree.insert(outside),
        Err(BarnesHutError::OutOfBounds { x: 12.0, y: 5.0 })
    );

    // Nothing changed.
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.total_mass(), 1.0);
    assert_eq!(tree.center_of_mass(), Some((5.0, 5.0)));
}

#[test]
fn test_build_skip_policy_drops_out_of_bounds_bodies() {
    let bodies = [
        Body { id: 0, x: 5.0, y: 5.0, mass: 1.0 },
        Body { id: 1, x: -3.0, y: 5.0, mass: 1.0 },
        Body { id: 2, x: 5.0, y: 99.0, mass: 1.0 },
    ];
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Skip, 32).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.total_mass(), 1.0);
}

#[test]
fn test_build_reject_policy_fails_fast() {
    let bodies = [
        Body { id: 0, x: 5.0, y: 5.0, mass: 1.0 },
        Body { id: 1, x: -3.0, y: 5.0, mass: 1.0 },
    ];
    let err = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 32).unwrap_err();
    assert_eq!(err, BarnesHutError::OutOfBounds { x: -3.0, y: 5.0 });
}

#[test]
fn test_coincident_bodies_terminate() {
    // Two bodies at the exact same position can never separate into
    // different quarters; subdivision must stop at max depth instead of
    // recursing forever.
    let bodies = [
        Body { id: 0, x: 5.0, y: 5.0, mass: 1.0 },
        Body { id: 1, x: 5.0, y: 5.0, mass: 2.0 },
    ];
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 16).unwrap();

    assert_eq!(tree.len(), 2);
    assert_relative_eq!(tree.total_mass(), 3.0, epsilon = 1e-12);
    let (cx, cy) = tree.center_of_mass().unwrap();
    assert_relative_eq!(cx, 5.0, epsilon = 1e-12);
    assert_relative_eq!(cy, 5.0, epsilon = 1e-12);
}

#[test]
fn test_many_coincident_bodies_terminate() {
    let bodies: Vec<Body> = (0..8)
        .map(|id| Body { id, x: 2.5, y: 2.5, mass: 1.0 })
        .collect();
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 8).unwrap();
    assert_eq!(tree.len(), 8);
    assert_relative_eq!(tree.total_mass(), 8.0, epsilon = 1e-12);
}

#[test]
fn test_near_coincident_bodies_separate_eventually() {
    let bodies = [
        Body { id: 0, x: 5.0, y: 5.0, mass: 1.0 },
        Body { id: 1, x: 5.0 + 1e-6, y: 5.0, mass: 1.0 },
    ];
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 64).unwrap();
    assert_eq!(tree.len(), 2);
    assert_relative_eq!(tree.total_mass(), 2.0, epsilon = 1e-12);
}

#[test]
fn test_zero_mass_bodies_do_not_poison_centroid() {
    let bodies = [
        Body { id: 0, x: 2.0, y: 2.0, mass: 0.0 },
        Body { id: 1, x: 8.0, y: 8.0, mass: 4.0 },
    ];
    let tree = QuadTree::build(bounds10(), &bodies, OutOfBoundsPolicy::Reject, 32).unwrap();

    assert_relative_eq!(tree.total_mass(), 4.0, epsilon = 1e-12);
    let (cx, cy) = tree.center_of_mass().unwrap();
    // The massless tracer contributes nothing to the centroid.
    assert_relative_eq!(cx, 8.0, epsilon = 1e-12);
    assert_relative_eq!(cy, 8.0, epsilon = 1e-12);
}

#[test]
fn test_body_new_validation() {
    assert!(Body::new(0, 1.0, 1.0, 1.0).is_ok());
    assert!(Body::new(0, 1.0, 1.0, 0.0).is_ok());
    assert_eq!(Body::new(0, 1.0, 1.0, -1.0), Err(BarnesHutError::InvalidMass));
    assert_eq!(Body::new(0, 1.0, 1.0, f64::NAN), Err(BarnesHutError::InvalidMass));
    assert!(Body::new(0, f64::INFINITY, 1.0, 1.0).is_err());
}
