use rayon::prelude::*;

use super::tree::{Node, ROOT};
use super::{Body, NodeId, QuadTree};

/// Computes the gravitational force exerted on `target` by `source`.
///
/// Newton's law of universal gravitation, F = g * m1 * m2 / d^2, directed
/// along the line from `target` to `source`. Bodies sharing an id (the same
/// simulated entity) or an exact position contribute zero force; there is no
/// softening.
///
/// # Examples
///
/// ```
/// use barnes_hut::quadtree::{pairwise_force, Body};
///
/// let a = Body { id: 0, x: 0.0, y: 0.0, mass: 1.0 };
/// let b = Body { id: 1, x: 3.0, y: 0.0, mass: 2.0 };
/// let g = 1.0;
///
/// let (fx, fy) = pairwise_force(&a, &b, g);
/// assert!((fx - 2.0 / 9.0).abs() < 1e-12);
/// assert_eq!(fy, 0.0);
///
/// // A body exerts no force on itself.
/// assert_eq!(pairwise_force(&a, &a, g), (0.0, 0.0));
/// ```
pub fn pairwise_force(target: &Body, source: &Body, g: f64) -> (f64, f64) {
    if source.id == target.id {
        return (0.0, 0.0);
    }
    force_from_point(target, source.x, source.y, source.mass, g)
}

/// Force on `target` from a point mass at (sx, sy), real or aggregate.
fn force_from_point(target: &Body, sx: f64, sy: f64, smass: f64, g: f64) -> (f64, f64) {
    let dx = sx - target.x;
    let dy = sy - target.y;
    let dist_sq = dx * dx + dy * dy;
    if dist_sq == 0.0 {
        // Coincident positions; no direction to point the force along.
        return (0.0, 0.0);
    }
    let dist = dist_sq.sqrt();
    let f_mag = g * target.mass * smass / dist_sq;
    (f_mag * dx / dist, f_mag * dy / dist)
}

/// Computes the net force on `target` by direct O(n^2)-style pairwise
/// summation over `bodies`.
///
/// This is the exact reference the tree traversal approximates; it is mainly
/// useful for validating θ choices and in tests.
pub fn direct_net_force(bodies: &[Body], target: &Body, g: f64) -> (f64, f64) {
    let mut net_x = 0.0;
    let mut net_y = 0.0;
    for body in bodies {
        let (fx, fy) = pairwise_force(target, body, g);
        net_x += fx;
        net_y += fy;
    }
    (net_x, net_y)
}

impl QuadTree {
    /// Computes the net gravitational force on `target` from every body in
    /// the tree, using the Barnes-Hut approximation.
    ///
    /// For each internal node the traversal compares the node's quadrant
    /// width to its distance `d` from the target: if `width / d > theta` the
    /// node is too coarse an approximation and its children are visited,
    /// otherwise the whole subtree is treated as a single point mass at its
    /// aggregate center of mass. `theta` near 0 degrades to the exact
    /// pairwise sum; larger values trade accuracy for speed.
    ///
    /// Bodies carrying the target's id are skipped, so querying a body that
    /// is stored in the tree excludes its self-interaction. A degenerate
    /// overlap between the target and an aggregate (`d = 0`) contributes
    /// zero rather than dividing by zero.
    ///
    /// The traversal is read-only; once built, a tree can serve force
    /// queries from many threads at once (see [`QuadTree::net_forces`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::{Body, OutOfBoundsPolicy, QuadTree, Quadrant};
    ///
    /// let bounds = Quadrant { x: 0.0, y: 0.0, width: 4.0 };
    /// let bodies = vec![
    ///     Body { id: 0, x: 1.0, y: 2.0, mass: 1.0 },
    ///     Body { id: 1, x: 3.0, y: 2.0, mass: 1.0 },
    /// ];
    /// let tree = QuadTree::build(bounds, &bodies, OutOfBoundsPolicy::Reject, 32).unwrap();
    ///
    /// // Symmetric neighbors pull in opposite directions.
    /// let (fx0, _) = tree.net_force(&bodies[0], 0.5, 1.0);
    /// let (fx1, _) = tree.net_force(&bodies[1], 0.5, 1.0);
    /// assert!(fx0 > 0.0);
    /// assert!((fx0 + fx1).abs() < 1e-12);
    /// ```
    pub fn net_force(&self, target: &Body, theta: f64, g: f64) -> (f64, f64) {
        self.node_force(ROOT, target, theta, g)
    }

    fn node_force(&self, id: NodeId, target: &Body, theta: f64, g: f64) -> (f64, f64) {
        match &self.nodes[id] {
            Node::Empty(_) => (0.0, 0.0),
            Node::Leaf(_, body) => pairwise_force(target, body, g),
            Node::Cluster(_, bodies) => {
                // Max-depth leaf: the bodies are (near-)coincident, so sum
                // them exactly instead of approximating.
                let mut net_x = 0.0;
                let mut net_y = 0.0;
                for body in bodies {
                    let (fx, fy) = pairwise_force(target, body, g);
                    net_x += fx;
                    net_y += fy;
                }
                (net_x, net_y)
            }
            Node::Internal { quadrant, mass, com_x, com_y, children } => {
                let dx = *com_x - target.x;
                let dy = *com_y - target.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist == 0.0 {
                    // Target sits exactly on the aggregate; defined fallback.
                    return (0.0, 0.0);
                }
                if quadrant.width / dist > theta {
                    let mut net_x = 0.0;
                    let mut net_y = 0.0;
                    for &child in children {
                        let (fx, fy) = self.node_force(child, target, theta, g);
                        net_x += fx;
                        net_y += fy;
                    }
                    (net_x, net_y)
                } else {
                    force_from_point(target, *com_x, *com_y, *mass, g)
                }
            }
        }
    }

    /// Computes net forces for a batch of bodies against this (frozen) tree.
    ///
    /// Queries never mutate the tree, so the batch is dispatched across the
    /// rayon thread pool. The result is ordered to match `bodies`.
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::{Body, OutOfBoundsPolicy, QuadTree, Quadrant};
    /// use barnes_hut::utils::G_SI;
    ///
    /// let bounds = Quadrant { x: 0.0, y: 0.0, width: 10.0 };
    /// let bodies = vec![
    ///     Body { id: 0, x: 2.0, y: 2.0, mass: 1.0e6 },
    ///     Body { id: 1, x: 7.0, y: 7.0, mass: 2.0e6 },
    ///     Body { id: 2, x: 2.0, y: 7.0, mass: 3.0e6 },
    /// ];
    /// let tree = QuadTree::build(bounds, &bodies, OutOfBoundsPolicy::Reject, 32).unwrap();
    ///
    /// let forces = tree.net_forces(&bodies, 0.5, G_SI);
    /// assert_eq!(forces.len(), bodies.len());
    /// ```
    pub fn net_forces(&self, bodies: &[Body], theta: f64, g: f64) -> Vec<(f64, f64)> {
        bodies
            .par_iter()
            .map(|body| self.net_force(body, theta, g))
            .collect()
    }
}
