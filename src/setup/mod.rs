//! Setup objects: the parametric description a solve starts from
//!
//! Constructors validate their arguments and return `TribuneError` for
//! non-positive or non-finite dimensions. Once built, setups are immutable.

mod audience;
mod hall;
mod tribune;

pub use audience::AudienceSetup;
pub use hall::{HallSetup, ProjectorSetup, ScreenSetup};
pub use tribune::{RailingSetup, StairSetup, TribuneSetup};
