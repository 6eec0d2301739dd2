//! Sightline, limit-line and projector-cone analysis of a solved tribune
//!
//! Works from a `SerializedTribune` alone, so it can run standalone on a
//! layout solved earlier (or loaded from an interchange file).

mod sightline;

pub use sightline::{CValue, SightlineAnalysis};

use glam::DVec3;
use serde::Serialize;

use crate::core::{Cyclic, SolverConfig};
use crate::geometry::{Line, PlanarFace};
use crate::setup::{AudienceSetup, ProjectorSetup, ScreenSetup};
use crate::solver::{eye_point, limit_lines, SerializedTribune};

/// Eye point of one seated row and its sightline to the screen bottom
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowEye {
    pub row: usize,
    pub eye: DVec3,
    pub sightline: Option<Line>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisResult {
    /// One entry per seated row, in row order
    pub eyes: Vec<RowEye>,
    /// Front, hard-back and soft-back limit lines per row (empty when unseated)
    pub limit_lines: Vec<Vec<Line>>,
    pub projector_cone: Option<PlanarFace>,
}

impl AnalysisResult {
    pub fn eye(&self, row: usize) -> Option<&RowEye> {
        self.eyes.iter().find(|e| e.row == row)
    }

    pub fn sightlines(&self) -> impl Iterator<Item = &Line> {
        self.eyes.iter().filter_map(|e| e.sightline.as_ref())
    }

    pub fn eye_points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.eyes.iter().map(|e| e.eye)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    config: SolverConfig,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn calculate(
        &self,
        audiences: &[Option<AudienceSetup>],
        tribune: &SerializedTribune,
        screen: Option<&ScreenSetup>,
        projector: Option<&ProjectorSetup>,
        offsets: &[f64],
    ) -> AnalysisResult {
        let audiences = Cyclic::new(audiences.to_vec());
        let offsets = Cyclic::new(offsets.to_vec());
        let mut result = AnalysisResult::default();

        if !audiences.is_empty() {
            for (row, &row_point) in tribune.row_points.iter().enumerate() {
                let Some(audience) = audiences.resolve(row) else {
                    result.limit_lines.push(Vec::new());
                    continue;
                };
                let offset = offsets.get_or(row, 0.0);
                let eye = eye_point(row_point, audience, offset, tribune.flip);

                result.eyes.push(RowEye {
                    row,
                    eye,
                    sightline: screen.map(|s| Line::new(eye, s.bottom())),
                });
                result.limit_lines.push(limit_lines(
                    row_point,
                    audience,
                    offset,
                    tribune.flip,
                    self.config.limit_line_overshoot,
                ));
            }
        }

        if let (Some(projector), Some(screen)) = (projector, screen) {
            result.projector_cone = PlanarFace::from_loop(
                projector.location(),
                screen.top(),
                screen.bottom(),
                self.config.tolerance,
            );
            if result.projector_cone.is_none() {
                tracing::debug!("Projector cone is degenerate; skipped");
            }
        }

        result
    }
}
