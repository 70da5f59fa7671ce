mod constants;

pub use constants::*;
