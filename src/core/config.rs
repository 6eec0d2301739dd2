//! Solver configuration with documented constants
//!
//! All magic numbers used by the solver, analysis and fitness function are
//! collected here. Values are in model units (the unit of the setups you
//! feed in); the defaults match centimetre-based hall models.

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Configuration for the tribune solver and its dependent engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    // === GEOMETRY ===
    /// Absolute tolerance for coincidence, zero-length and axis tests
    ///
    /// Used when joining stair flights, classifying treads and risers,
    /// deduplicating intersection hits and dropping degenerate pieces.
    pub tolerance: f64,

    /// Height of the vertical limit lines drawn above each row floor
    ///
    /// Purely a display aid; limit lines span floor Z to floor Z + overshoot.
    pub limit_line_overshoot: f64,

    // === SIGHTLINES ===
    /// Obstacles closer to the eye than this fraction of the eye→target
    /// horizontal distance are ignored (the viewer's own head, neighbours)
    pub c_value_near_cutoff: f64,

    /// Obstacles beyond this fraction are ignored (they sit at the target)
    pub c_value_far_cutoff: f64,

    /// C-value reported when no obstacle qualifies ("unobstructed")
    pub c_value_unobstructed: f64,

    // === OPTIMIZATION ===
    pub fitness: FitnessWeights,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            limit_line_overshoot: 50.0,

            c_value_near_cutoff: 0.05,
            c_value_far_cutoff: 0.99,
            c_value_unobstructed: 1000.0,

            fitness: FitnessWeights::default(),
        }
    }
}

impl SolverConfig {
    /// Parse a configuration from TOML; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Weights of the layout fitness function (higher fitness is better)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Penalty per unit of negative sightline clearance (blocked view)
    ///
    /// Two orders of magnitude above the clearance reward so that a single
    /// blocked row outweighs generous clearance elsewhere.
    pub blocked_penalty: f64,

    /// Reward per unit of non-negative sightline clearance
    pub clearance_reward: f64,

    /// Flat bonus for every compared row (capacity)
    pub row_bonus: f64,

    /// Eye points closer than this to the projector cone count as blocking
    /// the beam
    pub projector_clearance: f64,

    /// Penalty per eye point inside the projector beam
    pub projector_penalty: f64,

    /// Fitness returned for a layout that solves to zero rows
    pub invalid_layout: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            blocked_penalty: 1000.0,
            clearance_reward: 10.0,
            row_bonus: 100.0,
            projector_clearance: 0.05,
            projector_penalty: 50000.0,
            invalid_layout: -10000.0,
        }
    }
}
