use log::{debug, warn};

use crate::errors::BarnesHutError;
use super::{Body, Quadrant};

/// Integer handle into the tree's node arena.
pub type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

/// A node in the Barnes-Hut quadtree.
///
/// Children are arena handles ordered [NW, NE, SW, SE]; a node is internal
/// if and only if it has children. `Cluster` is the bounded fallback for
/// bodies that fail to separate within the maximum subdivision depth.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    /// An empty region with no bodies.
    Empty(Quadrant),
    /// A region containing exactly one body.
    Leaf(Quadrant, Body),
    /// A maximum-depth region holding coincident or near-coincident bodies.
    Cluster(Quadrant, Vec<Body>),
    /// A subdivided region with aggregated mass and center of mass.
    Internal {
        quadrant: Quadrant,
        mass: f64,
        com_x: f64, // center of mass x
        com_y: f64, // center of mass y
        children: [NodeId; 4],
    },
}

impl Node {
    pub(crate) fn quadrant(&self) -> Quadrant {
        match self {
            Node::Empty(q) => *q,
            Node::Leaf(q, _) => *q,
            Node::Cluster(q, _) => *q,
            Node::Internal { quadrant, .. } => *quadrant,
        }
    }

    /// Returns the (mass, com_x, com_y) this node contributes to its parent,
    /// or `None` for empty nodes.
    pub(crate) fn mass_com(&self) -> Option<(f64, f64, f64)> {
        match self {
            Node::Empty(_) => None,
            Node::Leaf(_, b) => Some((b.mass, b.x, b.y)),
            Node::Cluster(_, bodies) => {
                let first = bodies.first()?;
                let total: f64 = bodies.iter().map(|b| b.mass).sum();
                if total > 0.0 {
                    let cx = bodies.iter().map(|b| b.mass * b.x).sum::<f64>() / total;
                    let cy = bodies.iter().map(|b| b.mass * b.y).sum::<f64>() / total;
                    Some((total, cx, cy))
                } else {
                    // All bodies massless; any of their (coincident) positions works.
                    Some((0.0, first.x, first.y))
                }
            }
            Node::Internal { mass, com_x, com_y, .. } => Some((*mass, *com_x, *com_y)),
        }
    }
}

/// Policy applied by [`QuadTree::build`] to bodies lying outside the root
/// quadrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfBoundsPolicy {
    /// Drop out-of-bounds bodies, logging how many were skipped.
    Skip,
    /// Fail the build on the first out-of-bounds body.
    Reject,
}

/// A Barnes-Hut quadtree over a bounded square region of 2D space.
///
/// The tree recursively partitions its root quadrant, storing at most one
/// body per leaf and aggregating subtree mass / center of mass into internal
/// nodes so that far-field forces can be approximated. It is intended to be
/// rebuilt from scratch every simulation step: build once, then run read-only
/// force queries against it.
///
/// Nodes live in an arena indexed by [`NodeId`]; dropping the tree disposes
/// of the whole arena at once.
///
/// # Examples
///
/// ```
/// use barnes_hut::quadtree::{Body, OutOfBoundsPolicy, QuadTree, Quadrant};
/// use barnes_hut::utils::G_SI;
///
/// let bounds = Quadrant { x: 0.0, y: 0.0, width: 10.0 };
/// let bodies = vec![
///     Body { id: 0, x: 1.0, y: 1.0, mass: 5.0 },
///     Body { id: 1, x: 8.0, y: 8.0, mass: 5.0 },
/// ];
/// let tree = QuadTree::build(bounds, &bodies, OutOfBoundsPolicy::Reject, 32)
///     .expect("Failed to build tree");
///
/// assert_eq!(tree.total_mass(), 10.0);
/// let (fx, fy) = tree.net_force(&bodies[0], 0.5, G_SI);
/// assert!(fx > 0.0 && fy > 0.0); // pulled toward the other body
/// ```
#[derive(Clone, Debug)]
pub struct QuadTree {
    pub(crate) nodes: Vec<Node>,
    max_depth: usize,
    count: usize,
}

impl QuadTree {
    /// Creates an empty tree over the given bounds.
    ///
    /// `max_depth` caps subdivision: once a leaf at that depth would have to
    /// split again, further bodies are stored alongside it in a bounded
    /// cluster instead. This converts the unbounded recursion that coincident
    /// points would otherwise cause into defined behavior.
    ///
    /// # Errors
    ///
    /// Returns `BarnesHutError::InvalidQuadrant` if the bounds have a
    /// non-positive or non-finite width.
    pub fn new(bounds: Quadrant, max_depth: usize) -> Result<Self, BarnesHutError> {
        if !bounds.width.is_finite() || bounds.width <= 0.0 {
            return Err(BarnesHutError::InvalidQuadrant);
        }
        Ok(QuadTree {
            nodes: vec![Node::Empty(bounds)],
            max_depth,
            count: 0,
        })
    }

    /// Builds a tree containing the given bodies.
    ///
    /// Bodies outside `bounds` are handled according to `policy`: with
    /// [`OutOfBoundsPolicy::Skip`] they are dropped (a warning is logged),
    /// with [`OutOfBoundsPolicy::Reject`] the build fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::{Body, OutOfBoundsPolicy, QuadTree, Quadrant};
    ///
    /// let bounds = Quadrant { x: 0.0, y: 0.0, width: 10.0 };
    /// let bodies = vec![
    ///     Body { id: 0, x: 5.0, y: 5.0, mass: 1.0 },
    ///     Body { id: 1, x: 42.0, y: 5.0, mass: 1.0 }, // outside
    /// ];
    ///
    /// let tree = QuadTree::build(bounds, &bodies, OutOfBoundsPolicy::Skip, 32).unwrap();
    /// assert_eq!(tree.len(), 1);
    ///
    /// assert!(QuadTree::build(bounds, &bodies, OutOfBoundsPolicy::Reject, 32).is_err());
    /// ```
    pub fn build(
        bounds: Quadrant,
        bodies: &[Body],
        policy: OutOfBoundsPolicy,
        max_depth: usize,
    ) -> Result<Self, BarnesHutError> {
        let mut tree = Self::new(bounds, max_depth)?;
        let mut skipped = 0usize;
        for body in bodies {
            if !bounds.contains(body.x, body.y) {
                match policy {
                    OutOfBoundsPolicy::Reject => {
                        return Err(BarnesHutError::OutOfBounds { x: body.x, y: body.y });
                    }
                    OutOfBoundsPolicy::Skip => {
                        skipped += 1;
                        continue;
                    }
                }
            }
            tree.insert(*body)?;
        }
        if skipped > 0 {
            warn!("Skipped {} out-of-bounds bodies while building the tree", skipped);
        }
        debug!("Built quadtree: {} bodies, {} nodes", tree.count, tree.nodes.len());
        Ok(tree)
    }

    /// Inserts a single body.
    ///
    /// # Errors
    ///
    /// Returns `BarnesHutError::OutOfBounds` without mutating the tree if the
    /// body lies outside the root quadrant. Callers should pre-filter, or use
    /// [`QuadTree::build`] with a skip policy.
    pub fn insert(&mut self, body: Body) -> Result<(), BarnesHutError> {
        let bounds = self.bounds();
        if !bounds.contains(body.x, body.y) {
            return Err(BarnesHutError::OutOfBounds { x: body.x, y: body.y });
        }
        self.insert_at(ROOT, body, 0)?;
        self.count += 1;
        Ok(())
    }

    fn insert_at(&mut self, id: NodeId, body: Body, depth: usize) -> Result<(), BarnesHutError> {
        match &self.nodes[id] {
            Node::Empty(quadrant) => {
                let quadrant = *quadrant;
                self.nodes[id] = Node::Leaf(quadrant, body);
                Ok(())
            }
            Node::Leaf(quadrant, existing) => {
                let (quadrant, existing) = (*quadrant, *existing);
                if depth >= self.max_depth {
                    self.nodes[id] = Node::Cluster(quadrant, vec![existing, body]);
                    return Ok(());
                }

                // Subdivide: the leaf becomes internal and both bodies move
                // down into its quarters.
                let quarters = quadrant.subdivide();
                let base = self.nodes.len();
                for quarter in quarters {
                    self.nodes.push(Node::Empty(quarter));
                }
                let children = [base, base + 1, base + 2, base + 3];
                self.nodes[id] = Node::Internal {
                    quadrant,
                    mass: 0.0,
                    com_x: 0.0,
                    com_y: 0.0,
                    children,
                };

                let old_child = quadrant.child_index(existing.x, existing.y)?;
                let new_child = quadrant.child_index(body.x, body.y)?;
                if old_child == new_child {
                    // Both bodies land in the same quarter; seed it with the
                    // existing body and recurse for the new one, subdividing
                    // further until they separate or max depth is hit.
                    self.nodes[children[old_child]] = Node::Leaf(quarters[old_child], existing);
                    self.insert_at(children[new_child], body, depth + 1)?;
                } else {
                    self.nodes[children[old_child]] = Node::Leaf(quarters[old_child], existing);
                    self.nodes[children[new_child]] = Node::Leaf(quarters[new_child], body);
                }
                self.reconcile(id);
                Ok(())
            }
            Node::Cluster(_, _) => {
                if let Node::Cluster(_, bodies) = &mut self.nodes[id] {
                    bodies.push(body);
                }
                Ok(())
            }
            Node::Internal { quadrant, children, .. } => {
                let (quadrant, children) = (*quadrant, *children);
                let child = quadrant.child_index(body.x, body.y)?;
                self.insert_at(children[child], body, depth + 1)?;
                self.reconcile(id);
                Ok(())
            }
        }
    }

    /// Recomputes an internal node's aggregate mass and center of mass from
    /// its children.
    ///
    /// Called bottom-up by the parent after any child subtree changes, so the
    /// invariant "aggregate = combination of children" holds after every
    /// insertion. A zero total mass keeps the previous centroid rather than
    /// dividing by zero.
    fn reconcile(&mut self, id: NodeId) {
        let children = match &self.nodes[id] {
            Node::Internal { children, .. } => *children,
            _ => return,
        };
        let mut total = 0.0;
        let mut weighted_x = 0.0;
        let mut weighted_y = 0.0;
        for child in children {
            if let Some((m, cx, cy)) = self.nodes[child].mass_com() {
                total += m;
                weighted_x += m * cx;
                weighted_y += m * cy;
            }
        }
        if let Node::Internal { mass, com_x, com_y, .. } = &mut self.nodes[id] {
            *mass = total;
            if total > 0.0 {
                *com_x = weighted_x / total;
                *com_y = weighted_y / total;
            }
        }
    }

    /// The root quadrant covered by this tree.
    pub fn bounds(&self) -> Quadrant {
        self.nodes[ROOT].quadrant()
    }

    /// Number of bodies stored.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Maximum subdivision depth this tree was created with.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Total mass of all stored bodies.
    pub fn total_mass(&self) -> f64 {
        self.nodes[ROOT].mass_com().map_or(0.0, |(m, _, _)| m)
    }

    /// Mass-weighted centroid of all stored bodies, or `None` for an empty
    /// tree.
    pub fn center_of_mass(&self) -> Option<(f64, f64)> {
        self.nodes[ROOT].mass_com().map(|(_, cx, cy)| (cx, cy))
    }
}
