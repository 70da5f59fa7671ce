mod body;
mod force;
mod quadrant;
mod tree;

pub use body::*;
pub use force::*;
pub use quadrant::*;
pub use tree::*;

#[cfg(test)]
mod tree_tests;
