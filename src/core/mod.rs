pub mod config;
pub mod cyclic;
pub mod error;

pub use config::{FitnessWeights, SolverConfig};
pub use cyclic::Cyclic;
pub use error::{Result, TribuneError};
