use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::geometry::{Line, Plane, Polyline};
use crate::setup::{AudienceSetup, HallSetup, ScreenSetup};
use crate::validation::ValidationReport;

/// Row data of a solved tribune, as consumed by analysis and validation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerializedTribune {
    /// Row anchors in the world frame (after flip and origin)
    pub row_points: Vec<DVec3>,
    /// Row anchors in the local section frame
    pub row_local_points: Vec<DVec3>,
    /// One entry per row; entry 0 is always `true`
    pub railing_toggles: Vec<bool>,
    /// Chair alignment reference per row (world frame)
    pub row_spine: Vec<DVec3>,
    pub flight_start_x: Vec<f64>,
    pub flight_end_x: Vec<f64>,
    /// Landing length per row transition (`rows - 1` entries, may be negative)
    pub gaps: Vec<f64>,
    pub flip: bool,
}

impl SerializedTribune {
    pub fn rows(&self) -> usize {
        self.row_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_points.is_empty()
    }
}

/// Everything one solve produces.
///
/// Section curves live in the XZ plane, plan curves in the XY plane. The
/// inputs downstream engines need (audiences, offsets, hall) travel with the
/// solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TribuneSolution {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub base_plane: Plane,

    // Section
    pub section_tribune_profile: Option<Polyline>,
    pub section_stairs_profile: Option<Polyline>,
    pub section_railings: Vec<Polyline>,
    pub section_railing_spine: Vec<DVec3>,
    pub section_row_lines: Vec<Line>,
    pub section_chairs: Vec<Vec<Polyline>>,
    pub section_limit_lines: Vec<Vec<Line>>,
    /// One entry per row; `None` where the row is unseated
    pub section_chair_planes: Vec<Option<Plane>>,

    // Plan
    pub plan_tribune_lines: Vec<Line>,
    pub plan_stair_lines: Vec<Line>,
    pub plan_railings: Vec<Polyline>,
    pub plan_railing_spine: Vec<Line>,
    pub plan_chairs: Vec<Vec<Polyline>>,
    pub plan_row_spine: Vec<Vec<Line>>,
    pub plan_chair_planes: Vec<Vec<Plane>>,

    // Projection and clash
    pub section_projector: Option<DVec3>,
    pub section_screen: Option<ScreenSetup>,
    pub existing_tribune_profile: Option<Polyline>,
    pub clashes: Vec<DVec3>,

    pub tribune: SerializedTribune,
    pub audiences: Vec<Option<AudienceSetup>>,
    pub audience_offsets: Vec<f64>,
    pub hall: Option<HallSetup>,
}

impl Default for TribuneSolution {
    fn default() -> Self {
        Self {
            is_valid: false,
            errors: Vec::new(),
            base_plane: Plane::world_xy(),
            section_tribune_profile: None,
            section_stairs_profile: None,
            section_railings: Vec::new(),
            section_railing_spine: Vec::new(),
            section_row_lines: Vec::new(),
            section_chairs: Vec::new(),
            section_limit_lines: Vec::new(),
            section_chair_planes: Vec::new(),
            plan_tribune_lines: Vec::new(),
            plan_stair_lines: Vec::new(),
            plan_railings: Vec::new(),
            plan_railing_spine: Vec::new(),
            plan_chairs: Vec::new(),
            plan_row_spine: Vec::new(),
            plan_chair_planes: Vec::new(),
            section_projector: None,
            section_screen: None,
            existing_tribune_profile: None,
            clashes: Vec::new(),
            tribune: SerializedTribune::default(),
            audiences: Vec::new(),
            audience_offsets: Vec::new(),
            hall: None,
        }
    }
}

impl TribuneSolution {
    pub fn row_points(&self) -> &[DVec3] {
        &self.tribune.row_points
    }

    pub fn row_local_points(&self) -> &[DVec3] {
        &self.tribune.row_local_points
    }

    pub fn gaps(&self) -> &[f64] {
        &self.tribune.gaps
    }

    pub fn railing_toggles(&self) -> &[bool] {
        &self.tribune.railing_toggles
    }

    pub fn is_flipped(&self) -> bool {
        self.tribune.flip
    }

    /// Attach an existing tribune profile (section) for clash detection
    pub fn with_existing_tribune(mut self, profile: Polyline) -> Self {
        self.existing_tribune_profile = Some(profile);
        self
    }

    /// Copy a validation report's messages and clash points onto the solution
    pub fn record_validation(&mut self, report: &ValidationReport) {
        self.errors.extend(report.messages());
        self.clashes.extend(report.clash_points.iter().copied());
    }
}
