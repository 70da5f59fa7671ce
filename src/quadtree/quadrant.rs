use crate::errors::BarnesHutError;

/// Index of the northwest child quadrant.
pub const NW: usize = 0;
/// Index of the northeast child quadrant.
pub const NE: usize = 1;
/// Index of the southwest child quadrant.
pub const SW: usize = 2;
/// Index of the southeast child quadrant.
pub const SE: usize = 3;

/// Represents a square region in 2D space.
///
/// A `Quadrant` is defined by its lower-left corner (x, y) and the length
/// of one side. Each node in the Barnes-Hut tree covers exactly one quadrant,
/// and subdivision tiles a quadrant with four quarters of half the width.
///
/// # Examples
///
/// ```
/// use barnes_hut::quadtree::Quadrant;
///
/// // A square with corners at (0, 0) and (10, 10).
/// let quadrant = Quadrant { x: 0.0, y: 0.0, width: 10.0 };
///
/// // Check if a point is inside the quadrant
/// assert!(quadrant.contains(5.0, 5.0));
/// assert!(!quadrant.contains(10.0, 5.0)); // Upper bounds are exclusive
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadrant {
    pub x: f64,     // lower-left corner x-coordinate
    pub y: f64,     // lower-left corner y-coordinate
    pub width: f64, // length of one side
}

impl Quadrant {
    /// Creates a new quadrant, validating its width.
    ///
    /// # Errors
    ///
    /// Returns `BarnesHutError::InvalidQuadrant` if `width` is not positive
    /// and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::Quadrant;
    ///
    /// let quadrant = Quadrant::new(0.0, 0.0, 10.0).expect("Failed to create quadrant");
    /// assert_eq!(quadrant.width, 10.0);
    ///
    /// assert!(Quadrant::new(0.0, 0.0, 0.0).is_err());
    /// assert!(Quadrant::new(0.0, 0.0, -1.0).is_err());
    /// ```
    pub fn new(x: f64, y: f64, width: f64) -> Result<Self, BarnesHutError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(BarnesHutError::InvalidQuadrant);
        }
        Ok(Quadrant { x, y, width })
    }

    /// Returns true if the point (px, py) is inside this quadrant.
    ///
    /// The bounds are inclusive on the lower edges and exclusive on the upper
    /// edges, so a point on a shared edge between two quadrants belongs to
    /// exactly one of them.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x &&
            px < self.x + self.width &&
            py >= self.y &&
            py < self.y + self.width
    }

    /// Subdivides the quadrant into four quarters, ordered [NW, NE, SW, SE].
    ///
    /// The quarters have half the parent's width and tile it exactly, with
    /// no gaps or overlaps.
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::{Quadrant, NW, NE, SW, SE};
    ///
    /// let quadrant = Quadrant { x: 0.0, y: 0.0, width: 10.0 };
    /// let quarters = quadrant.subdivide();
    ///
    /// assert_eq!(quarters[NW], Quadrant { x: 0.0, y: 5.0, width: 5.0 });
    /// assert_eq!(quarters[NE], Quadrant { x: 5.0, y: 5.0, width: 5.0 });
    /// assert_eq!(quarters[SW], Quadrant { x: 0.0, y: 0.0, width: 5.0 });
    /// assert_eq!(quarters[SE], Quadrant { x: 5.0, y: 0.0, width: 5.0 });
    /// ```
    pub fn subdivide(&self) -> [Quadrant; 4] {
        let w = self.width / 2.0;
        let west_x = self.x;
        let east_x = self.x + w;
        let south_y = self.y;
        let north_y = self.y + w;
        [
            Quadrant { x: west_x, y: north_y, width: w }, // NW
            Quadrant { x: east_x, y: north_y, width: w }, // NE
            Quadrant { x: west_x, y: south_y, width: w }, // SW
            Quadrant { x: east_x, y: south_y, width: w }, // SE
        ]
    }

    /// Finds which child quarter contains the point (px, py).
    ///
    /// Returns one of [`NW`], [`NE`], [`SW`], [`SE`].
    ///
    /// # Errors
    ///
    /// Returns `BarnesHutError::OutOfBounds` if the point lies outside this
    /// quadrant. Callers are expected to bounds-check against the root
    /// quadrant before inserting, so this surfacing mid-tree indicates an
    /// invariant violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use barnes_hut::quadtree::{Quadrant, SW, NE};
    ///
    /// let quadrant = Quadrant { x: 0.0, y: 0.0, width: 10.0 };
    /// assert_eq!(quadrant.child_index(1.0, 1.0), Ok(SW));
    /// assert_eq!(quadrant.child_index(8.0, 8.0), Ok(NE));
    /// assert!(quadrant.child_index(11.0, 1.0).is_err());
    /// ```
    pub fn child_index(&self, px: f64, py: f64) -> Result<usize, BarnesHutError> {
        for (i, quarter) in self.subdivide().iter().enumerate() {
            if quarter.contains(px, py) {
                return Ok(i);
            }
        }
        Err(BarnesHutError::OutOfBounds { x: px, y: py })
    }
}
