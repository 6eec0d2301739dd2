use serde::Serialize;

use crate::core::error::{positive, Result, TribuneError};
use crate::core::Cyclic;

/// Row width used when no widths are configured
pub const DEFAULT_ROW_WIDTH: f64 = 0.8;

/// Row structure of the tribune
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TribuneSetup {
    rows: usize,
    row_widths: Cyclic<f64>,
    elev_counts: Cyclic<u32>,
    stair_insets: Cyclic<bool>,
}

impl TribuneSetup {
    /// # Arguments
    /// * `rows` - Number of seating rows (0 yields an empty solve)
    /// * `row_widths` - Depth of each row, repeated cyclically
    /// * `elev_counts` - Riser count climbed at each row transition, repeated cyclically
    /// * `stair_insets` - Whether a transition's stair flight is pushed back by the rail width
    pub fn new(
        rows: usize,
        row_widths: Vec<f64>,
        elev_counts: Vec<u32>,
        stair_insets: Vec<bool>,
    ) -> Result<Self> {
        for (index, &value) in row_widths.iter().enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(TribuneError::InvalidRowWidth { index, value });
            }
        }
        Ok(Self {
            rows,
            row_widths: row_widths.into(),
            elev_counts: elev_counts.into(),
            stair_insets: stair_insets.into(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn row_width(&self, row: usize) -> f64 {
        self.row_widths.get_or(row, DEFAULT_ROW_WIDTH)
    }

    /// Risers climbed at `transition` (from row `transition` to the next); at least 1
    pub fn elev_count(&self, transition: usize) -> u32 {
        self.elev_counts.get_or(transition, 1).max(1)
    }

    pub fn stair_inset(&self, transition: usize) -> bool {
        self.stair_insets.get_or(transition, false)
    }

    pub fn row_widths(&self) -> &[f64] {
        self.row_widths.as_slice()
    }
}

/// Riser/tread dimensions of a stair step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StairSetup {
    tread_height: f64,
    tread_width: f64,
}

impl StairSetup {
    pub fn new(tread_height: f64, tread_width: f64) -> Result<Self> {
        Ok(Self {
            tread_height: positive("tread height", tread_height)?,
            tread_width: positive("tread width", tread_width)?,
        })
    }

    /// Riser height
    pub fn tread_height(&self) -> f64 {
        self.tread_height
    }

    /// Run of one step
    pub fn tread_width(&self) -> f64 {
        self.tread_width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RailingSetup {
    rail_height: f64,
    rail_width: f64,
}

impl RailingSetup {
    pub fn new(rail_height: f64, rail_width: f64) -> Result<Self> {
        Ok(Self {
            rail_height: positive("rail height", rail_height)?,
            rail_width: positive("rail width", rail_width)?,
        })
    }

    pub fn rail_height(&self) -> f64 {
        self.rail_height
    }

    pub fn rail_width(&self) -> f64 {
        self.rail_width
    }
}
