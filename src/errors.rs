use std::error::Error;
use std::fmt;

/// Represents errors that can occur while building or querying a Barnes-Hut tree.
#[derive(Debug, Clone, PartialEq)]
pub enum BarnesHutError {
    /// Indicates an invalid quadrant (non-positive or non-finite width).
    InvalidQuadrant,
    /// Indicates an invalid mass value (negative or non-finite).
    InvalidMass,
    /// Indicates a position outside the quadrant being searched.
    OutOfBounds { x: f64, y: f64 },
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for BarnesHutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BarnesHutError::InvalidQuadrant => write!(f, "Invalid quadrant: width must be positive and finite"),
            BarnesHutError::InvalidMass => write!(f, "Invalid mass value"),
            BarnesHutError::OutOfBounds { x, y } => write!(f, "Position ({}, {}) is outside the quadrant", x, y),
            BarnesHutError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for BarnesHutError {}
