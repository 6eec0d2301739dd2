//! Standalone per-seat C-value
//!
//! The C-value is the vertical clearance of a sightline over an obstacle
//! (usually the eye of the spectator in front). Positive means the view is
//! unobstructed.

use glam::{DVec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

use crate::core::SolverConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CValue {
    /// Minimum clearance over the qualifying obstacles
    pub value: f64,
    /// Obstacle that produced `value`; `None` when nothing qualified
    pub critical_obstacle: Option<DVec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SightlineAnalysis {
    eye: DVec3,
    target: DVec3,
    obstacles: Vec<DVec3>,
}

impl SightlineAnalysis {
    pub fn new(eye: DVec3, target: DVec3, obstacles: Vec<DVec3>) -> Self {
        Self {
            eye,
            target,
            obstacles,
        }
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    /// C-value with the default cut-offs
    pub fn c_value(&self) -> f64 {
        self.evaluate(&SolverConfig::default()).value
    }

    pub fn evaluate(&self, config: &SolverConfig) -> CValue {
        let reach = self.eye.xy().distance(self.target.xy());
        if reach < config.tolerance {
            // looking straight up or down: no meaningful horizontal ratio
            return CValue {
                value: 0.0,
                critical_obstacle: None,
            };
        }

        let mut result = CValue {
            value: config.c_value_unobstructed,
            critical_obstacle: None,
        };

        for &obstacle in &self.obstacles {
            let t = self.eye.xy().distance(obstacle.xy()) / reach;
            if t <= config.c_value_near_cutoff || t >= config.c_value_far_cutoff {
                continue;
            }
            let ray_z = self.eye.z + t * (self.target.z - self.eye.z);
            let clearance = ray_z - obstacle.z;
            if clearance < result.value {
                result = CValue {
                    value: clearance,
                    critical_obstacle: Some(obstacle),
                };
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_in_front_blocks_view() {
        let eye = DVec3::new(0.0, 0.0, 200.0);
        let target = DVec3::new(1000.0, 0.0, 100.0);
        // at t = 0.1 the ray is at 190
        let analysis = SightlineAnalysis::new(eye, target, vec![DVec3::new(100.0, 0.0, 195.0)]);
        let c = analysis.evaluate(&SolverConfig::default());
        assert!((c.value + 5.0).abs() < 1e-9);
        assert_eq!(c.critical_obstacle, Some(DVec3::new(100.0, 0.0, 195.0)));
    }

    #[test]
    fn test_minimum_over_obstacles() {
        let eye = DVec3::new(0.0, 0.0, 100.0);
        let target = DVec3::new(1000.0, 0.0, 100.0);
        let analysis = SightlineAnalysis::new(
            eye,
            target,
            vec![DVec3::new(200.0, 0.0, 80.0), DVec3::new(500.0, 0.0, 90.0)],
        );
        assert!((analysis.c_value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_obstacles_near_eye_or_target_ignored() {
        let eye = DVec3::new(0.0, 0.0, 100.0);
        let target = DVec3::new(1000.0, 0.0, 100.0);
        let analysis = SightlineAnalysis::new(
            eye,
            target,
            vec![DVec3::new(50.0, 0.0, 500.0), DVec3::new(995.0, 0.0, 500.0)],
        );
        let c = analysis.evaluate(&SolverConfig::default());
        assert_eq!(c.value, 1000.0);
        assert!(c.critical_obstacle.is_none());
    }

    #[test]
    fn test_vertical_sightline_is_zero() {
        let analysis = SightlineAnalysis::new(
            DVec3::new(10.0, 10.0, 0.0),
            DVec3::new(10.0, 10.0, 300.0),
            vec![DVec3::new(10.0, 10.0, 100.0)],
        );
        assert_eq!(analysis.c_value(), 0.0);
    }
}
