/// Newtonian gravitational constant in SI units (m^3 kg^-1 s^-2).
///
/// This is only a convenient default; every force entry point takes the
/// gravitational constant as an explicit parameter so the tree can be used
/// with scaled unit systems.
pub const G_SI: f64 = 6.67408e-11;

/// Tuning parameters for a Barnes-Hut simulation step.
#[derive(Clone, Copy, Debug)]
pub struct BarnesHutConfig {
    /// Accuracy threshold. Smaller values recurse more (exact at 0),
    /// larger values approximate more aggressively. Typically 0.5-1.0.
    pub theta: f64,
    /// Gravitational constant used in force calculations.
    pub g: f64,
    /// Maximum subdivision depth before coincident bodies are stored
    /// together in a single leaf.
    pub max_depth: usize,
}

pub const DEFAULT_BARNES_HUT_CONFIG: BarnesHutConfig = BarnesHutConfig {
    theta: 0.5,
    g: G_SI,
    max_depth: 32,
};

impl Default for BarnesHutConfig {
    fn default() -> Self {
        DEFAULT_BARNES_HUT_CONFIG
    }
}
