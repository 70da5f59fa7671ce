use crate::errors::BarnesHutError;

/// A point mass in 2D space.
///
/// Each body carries an `id` used to exclude self-interaction during force
/// queries; two bodies with the same id are treated as the same simulated
/// entity. The tree never synthesizes bodies: the aggregate pseudo-masses
/// stored in internal nodes have no identity and are discarded when the tree
/// is rebuilt.
///
/// # Examples
///
/// ```
/// use barnes_hut::quadtree::Body;
///
/// let body = Body::new(0, 1.0, 2.0, 3.0).expect("Failed to create body");
/// assert_eq!(body.x, 1.0);
/// assert_eq!(body.y, 2.0);
/// assert_eq!(body.mass, 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Caller-assigned identity, used to skip self-interaction.
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Non-negative mass.
    pub mass: f64,
}

impl Body {
    /// Creates a new body.
    ///
    /// # Errors
    ///
    /// Returns `BarnesHutError::InvalidMass` if `mass` is negative or not
    /// finite, and `BarnesHutError::CalculationError` if the position is not
    /// finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::Body;
    ///
    /// assert!(Body::new(0, 0.0, 0.0, 1.0).is_ok());
    /// assert!(Body::new(0, 0.0, 0.0, 0.0).is_ok()); // massless tracer
    /// assert!(Body::new(0, 0.0, 0.0, -1.0).is_err());
    /// ```
    pub fn new(id: usize, x: f64, y: f64, mass: f64) -> Result<Self, BarnesHutError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(BarnesHutError::InvalidMass);
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(BarnesHutError::CalculationError(
                "Body position must be finite".to_string(),
            ));
        }
        Ok(Body { id, x, y, mass })
    }
}
