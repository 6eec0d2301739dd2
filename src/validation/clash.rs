//! Chair outlines against an existing tribune profile (section)

use glam::DVec3;

use super::ValidationIssue;
use crate::geometry::{curve_curve, Polyline, ProjectionPlane};

pub struct ClashValidator;

impl ClashValidator {
    /// Returns the clash issues and every hit point
    pub fn validate_chairs(
        chairs: &[Vec<Polyline>],
        existing: &Polyline,
        tolerance: f64,
    ) -> (Vec<ValidationIssue>, Vec<DVec3>) {
        let mut issues = Vec::new();
        let mut points = Vec::new();

        for (row, outlines) in chairs.iter().enumerate() {
            for outline in outlines {
                let hits = curve_curve(outline, existing, ProjectionPlane::Section, tolerance);
                if hits.is_empty() {
                    continue;
                }
                issues.push(ValidationIssue::TribuneClash {
                    row,
                    hits: hits.len(),
                });
                points.extend(hits.iter().map(|h| h.point));
            }
        }

        (issues, points)
    }
}
