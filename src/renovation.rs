//! Renovation: fit new seating onto an existing tribune
//!
//! Locates where the front and back limit curves meet the existing profile
//! and splits the profile into its treads and risers.

use glam::DVec3;
use serde::Serialize;

use crate::geometry::{curve_curve, Line, Polyline, ProjectionPlane};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenovationResult {
    pub front_origin: Option<DVec3>,
    pub back_origin: Option<DVec3>,
    /// Horizontal profile segments
    pub treads: Vec<Line>,
    /// Vertical profile segments
    pub risers: Vec<Line>,
}

pub struct Renovation;

impl Renovation {
    pub fn solve(
        front_limit: Option<&Polyline>,
        back_limit: Option<&Polyline>,
        existing: &Polyline,
        tolerance: f64,
    ) -> RenovationResult {
        let first_hit = |limit: Option<&Polyline>| {
            limit.and_then(|curve| {
                curve_curve(curve, existing, ProjectionPlane::Section, tolerance)
                    .first()
                    .map(|hit| hit.point)
            })
        };

        let mut result = RenovationResult {
            front_origin: first_hit(front_limit),
            back_origin: first_hit(back_limit),
            ..RenovationResult::default()
        };

        for segment in existing.segments() {
            let delta = segment.to - segment.from;
            if delta.z.abs() < tolerance {
                result.treads.push(segment);
            } else if delta.x.abs() < tolerance {
                result.risers.push(segment);
            }
        }

        if result.front_origin.is_none() || result.back_origin.is_none() {
            tracing::debug!(
                front = result.front_origin.is_some(),
                back = result.back_origin.is_some(),
                "Limit curve misses the existing tribune"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Polyline {
        Polyline::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(90.0, 0.0, 0.0),
            DVec3::new(90.0, 0.0, 30.0),
            DVec3::new(180.0, 0.0, 30.0),
            DVec3::new(200.0, 0.0, 60.0),
        ])
    }

    fn vertical(x: f64) -> Polyline {
        Polyline::new(vec![DVec3::new(x, 0.0, -10.0), DVec3::new(x, 0.0, 100.0)])
    }

    #[test]
    fn test_classifies_treads_and_risers() {
        let result = Renovation::solve(None, None, &existing(), 1e-3);
        assert_eq!(result.treads.len(), 2);
        assert_eq!(result.risers.len(), 1);
        // the sloped last segment is neither
        assert!(result.front_origin.is_none());
        assert!(result.back_origin.is_none());
    }

    #[test]
    fn test_limit_origins_at_first_hit() {
        let front = vertical(45.0);
        let back = vertical(120.0);
        let result = Renovation::solve(Some(&front), Some(&back), &existing(), 1e-3);
        let front_origin = result.front_origin.unwrap();
        let back_origin = result.back_origin.unwrap();
        assert!(front_origin.distance(DVec3::new(45.0, 0.0, 0.0)) < 1e-9);
        assert!(back_origin.distance(DVec3::new(120.0, 0.0, 30.0)) < 1e-9);
    }

    #[test]
    fn test_missing_intersection_leaves_origin_unset() {
        let far = vertical(500.0);
        let result = Renovation::solve(Some(&far), None, &existing(), 1e-3);
        assert!(result.front_origin.is_none());
    }
}
