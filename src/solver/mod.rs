//! Tribune layout solver
//!
//! Turns the parametric setups into section and plan geometry. The pipeline
//! is fixed:
//!
//! 1. section stepping in the local frame (`section`)
//! 2. flip/origin frame pass (`frame`)
//! 3. section chair placement on world anchors (`placement`)
//! 4. plan projection and clipping when a hall is given (`plan`)

mod frame;
mod placement;
mod plan;
mod section;
mod solution;

pub use frame::FrameTransform;
pub use placement::{eye_point, limit_lines};
pub use solution::{SerializedTribune, TribuneSolution};

use glam::DVec3;

use crate::core::{Cyclic, SolverConfig};
use crate::setup::{AudienceSetup, HallSetup, RailingSetup, StairSetup, TribuneSetup};

/// Optional inputs of a solve. `Default` is a plain, unflipped tribune at the
/// world origin with railings on every row and no seating or plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolveRequest {
    /// Railing on/off per row, read cyclically (row 0 is always on)
    pub railing_toggles: Vec<bool>,
    /// Audience per row, read cyclically; `None` leaves that row unseated
    pub audiences: Vec<Option<AudienceSetup>>,
    /// Extra X offset of chairs and eyes per row, read cyclically
    pub audience_offsets: Vec<f64>,
    pub hall: Option<HallSetup>,
    pub flip: bool,
    pub origin: DVec3,
}

impl SolveRequest {
    pub fn with_railing_toggles(mut self, toggles: Vec<bool>) -> Self {
        self.railing_toggles = toggles;
        self
    }

    pub fn with_audiences(mut self, audiences: Vec<AudienceSetup>) -> Self {
        self.audiences = audiences.into_iter().map(Some).collect();
        self
    }

    pub fn with_audience_slots(mut self, audiences: Vec<Option<AudienceSetup>>) -> Self {
        self.audiences = audiences;
        self
    }

    pub fn with_audience_offsets(mut self, offsets: Vec<f64>) -> Self {
        self.audience_offsets = offsets;
        self
    }

    pub fn with_hall(mut self, hall: HallSetup) -> Self {
        self.hall = Some(hall);
        self
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    pub fn at_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }
}

pub struct TribuneSolver {
    tribune: TribuneSetup,
    stairs: StairSetup,
    railings: RailingSetup,
    config: SolverConfig,
}

impl TribuneSolver {
    pub fn new(tribune: TribuneSetup, stairs: StairSetup, railings: RailingSetup) -> Self {
        Self::with_config(tribune, stairs, railings, SolverConfig::default())
    }

    pub fn with_config(
        tribune: TribuneSetup,
        stairs: StairSetup,
        railings: RailingSetup,
        config: SolverConfig,
    ) -> Self {
        Self {
            tribune,
            stairs,
            railings,
            config,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn tribune(&self) -> &TribuneSetup {
        &self.tribune
    }

    /// Solve the layout. Never fails: missing optional inputs leave the
    /// dependent outputs empty, and a tribune without rows yields an empty,
    /// non-valid solution.
    pub fn solve(&self, request: &SolveRequest) -> TribuneSolution {
        if self.tribune.rows() == 0 {
            tracing::debug!("Tribune has no rows, returning empty solution");
            return TribuneSolution::default();
        }

        let tolerance = self.config.tolerance;
        let toggles = Cyclic::new(request.railing_toggles.clone());
        let audiences = Cyclic::new(request.audiences.clone());
        let offsets = Cyclic::new(request.audience_offsets.clone());

        let local = section::build(&section::SectionInputs {
            tribune: &self.tribune,
            stairs: &self.stairs,
            railings: &self.railings,
            toggles: &toggles,
            audiences: &audiences,
            tolerance,
        });

        let frame = FrameTransform::new(request.flip, request.origin);
        let world = frame.apply(&local);

        let seating = placement::place_section_chairs(
            &world.row_points,
            &audiences,
            &offsets,
            request.flip,
            self.config.limit_line_overshoot,
        );

        let plan = match &request.hall {
            Some(hall) => plan::build(&plan::PlanInputs {
                hall,
                tribune_profile: world.tribune_profile.as_ref(),
                stairs_profile: world.stairs_profile.as_ref(),
                railing_spine: &world.railing_spine,
                row_points: &world.row_points,
                row_spine: &world.row_spine,
                audiences: &audiences,
                offsets: &offsets,
                flipped: request.flip,
                rail_width: self.railings.rail_width(),
                tolerance,
            }),
            None => plan::PlanLayout::default(),
        };

        tracing::debug!(
            rows = world.row_points.len(),
            railings = world.railings.len(),
            plan_lines = plan.tribune_lines.len(),
            "Solved tribune"
        );

        let tribune = SerializedTribune {
            row_points: world.row_points,
            row_local_points: local.row_points,
            railing_toggles: world.railing_toggles,
            row_spine: world.row_spine,
            flight_start_x: world.flight_start_x,
            flight_end_x: world.flight_end_x,
            gaps: world.gaps,
            flip: request.flip,
        };

        TribuneSolution {
            is_valid: true,
            errors: plan.diagnostics,
            base_plane: frame.base_plane(),
            section_tribune_profile: world.tribune_profile,
            section_stairs_profile: world.stairs_profile,
            section_railings: world.railings,
            section_railing_spine: world.railing_spine,
            section_row_lines: world.row_lines,
            section_chairs: seating.chairs,
            section_limit_lines: seating.limit_lines,
            section_chair_planes: seating.planes,
            plan_tribune_lines: plan.tribune_lines,
            plan_stair_lines: plan.stair_lines,
            plan_railings: plan.railings,
            plan_railing_spine: plan.railing_spine,
            plan_chairs: plan.chairs,
            plan_row_spine: plan.row_spine,
            plan_chair_planes: plan.chair_planes,
            section_projector: request
                .hall
                .as_ref()
                .and_then(HallSetup::projector)
                .map(|p| p.location()),
            section_screen: request.hall.as_ref().and_then(HallSetup::screen).cloned(),
            existing_tribune_profile: None,
            clashes: Vec::new(),
            tribune,
            audiences: request.audiences.clone(),
            audience_offsets: request.audience_offsets.clone(),
            hall: request.hall.clone(),
        }
    }
}
