//! Chair clearance validation: front limit of a row against the hard-back
//! limit of the row in front

use super::ValidationIssue;
use crate::core::Cyclic;
use crate::setup::AudienceSetup;
use crate::solver::SerializedTribune;

pub struct ChairClearanceValidator;

impl ChairClearanceValidator {
    /// Clearance per seated row, measured on the local anchors.
    ///
    /// Row 0 (or a row behind an unseated one) is measured against X = 0.
    pub fn clearances(
        tribune: &SerializedTribune,
        audiences: &[Option<AudienceSetup>],
        offsets: &[f64],
    ) -> Vec<(usize, f64)> {
        let audiences = Cyclic::new(audiences.to_vec());
        let offsets = Cyclic::new(offsets.to_vec());
        if audiences.is_empty() {
            return Vec::new();
        }

        let points = &tribune.row_local_points;
        let mut clearances = Vec::with_capacity(points.len());
        for (i, point) in points.iter().enumerate() {
            let Some(audience) = audiences.resolve(i) else {
                continue;
            };
            let front = point.x + offsets.get_or(i, 0.0) + audience.front_limit();

            let obstacle = match i.checked_sub(1) {
                Some(prev) => match audiences.resolve(prev) {
                    Some(prev_audience) => {
                        points[prev].x + offsets.get_or(prev, 0.0) + prev_audience.hard_back_limit()
                    }
                    None => 0.0,
                },
                None => 0.0,
            };
            clearances.push((i, front - obstacle));
        }
        clearances
    }

    pub fn validate_clearances(clearances: &[(usize, f64)]) -> Vec<ValidationIssue> {
        clearances
            .iter()
            .filter(|(_, clearance)| *clearance < 0.0)
            .map(|&(row, clearance)| ValidationIssue::ChairClearance { row, clearance })
            .collect()
    }
}
