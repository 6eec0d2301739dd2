//! Semantic validation of a solved tribune
//!
//! Each validator checks one concern and returns its findings; the
//! composite runs them all and accumulates, never stopping at the first
//! issue.

mod chairs;
mod clash;
mod composite;
mod stairs;

pub use chairs::ChairClearanceValidator;
pub use clash::ClashValidator;
pub use composite::{TribuneValidator, ValidationReport};
pub use stairs::StairLandingValidator;

use thiserror::Error;

/// Validation finding types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("Row {row} Stair Landing Negative: {landing:.1}")]
    NegativeLanding { row: usize, landing: f64 },

    #[error("Row {row} Chair Clearance Clash: {clearance:.1}")]
    ChairClearance { row: usize, clearance: f64 },

    #[error("Row {row} Clash detected between chair and existing tribune ({hits} points)")]
    TribuneClash { row: usize, hits: usize },
}

impl ValidationIssue {
    pub fn row(&self) -> usize {
        match self {
            ValidationIssue::NegativeLanding { row, .. }
            | ValidationIssue::ChairClearance { row, .. }
            | ValidationIssue::TribuneClash { row, .. } => *row,
        }
    }
}
