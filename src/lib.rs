//! Tribune Layout - parametric solver for stepped spectator tribunes
//!
//! Given row, stair, railing and audience setups, the solver produces the
//! section profile, stair flights, railings, row anchors and chairs, and,
//! with a hall footprint, the plan lines clipped against aisles and tunnels.
//! Analysis, validation, fitness and renovation engines work on the result.

pub mod analysis;
pub mod core;
pub mod geometry;
pub mod interchange;
pub mod optimization;
pub mod renovation;
pub mod scenario;
pub mod setup;
pub mod solver;
pub mod validation;
