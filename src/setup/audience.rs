use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::error::{positive, Result, TribuneError};
use crate::geometry::{BoundingBox, Polyline};

/// Seated spectator ergonomics plus the chair outlines used to draw them.
///
/// Section quantities are measured from `origin`, the chair's reference
/// point that gets placed on a row anchor. Plan outlines have their own
/// origin and a nominal axial spacing along the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceSetup {
    eye: DVec3,
    origin: DVec3,
    front_limit: f64,
    hard_back_limit: f64,
    soft_back_limit: f64,
    section_chairs: Vec<Polyline>,
    plan_chairs: Vec<Polyline>,
    plan_origin: DVec3,
    plan_chair_width: f64,
}

impl AudienceSetup {
    pub const DEFAULT_FRONT_LIMIT: f64 = 45.0;
    pub const DEFAULT_HARD_BACK_LIMIT: f64 = 182.5;
    pub const DEFAULT_SOFT_BACK_LIMIT: f64 = 200.0;
    pub const DEFAULT_PLAN_CHAIR_WIDTH: f64 = 500.0;

    pub fn new(eye: DVec3, origin: DVec3) -> Self {
        Self {
            eye,
            origin,
            front_limit: Self::DEFAULT_FRONT_LIMIT,
            hard_back_limit: Self::DEFAULT_HARD_BACK_LIMIT,
            soft_back_limit: Self::DEFAULT_SOFT_BACK_LIMIT,
            section_chairs: Vec::new(),
            plan_chairs: Vec::new(),
            plan_origin: DVec3::ZERO,
            plan_chair_width: Self::DEFAULT_PLAN_CHAIR_WIDTH,
        }
    }

    /// Set the front, hard-back and soft-back limit distances
    pub fn with_limits(mut self, front: f64, hard_back: f64, soft_back: f64) -> Result<Self> {
        for (name, value) in [
            ("front limit", front),
            ("hard back limit", hard_back),
            ("soft back limit", soft_back),
        ] {
            if !value.is_finite() {
                return Err(TribuneError::InvalidLimit { name, value });
            }
        }
        self.front_limit = front;
        self.hard_back_limit = hard_back;
        self.soft_back_limit = soft_back;
        Ok(self)
    }

    pub fn with_section_chairs(mut self, chairs: Vec<Polyline>) -> Self {
        self.section_chairs = chairs;
        self
    }

    pub fn with_plan_chairs(
        mut self,
        chairs: Vec<Polyline>,
        origin: DVec3,
        axial_width: f64,
    ) -> Result<Self> {
        self.plan_chair_width = positive("plan chair width", axial_width)?;
        self.plan_chairs = chairs;
        self.plan_origin = origin;
        Ok(self)
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Eye position relative to the chair origin
    pub fn eye_offset(&self) -> DVec3 {
        self.eye - self.origin
    }

    pub fn front_limit(&self) -> f64 {
        self.front_limit
    }

    pub fn hard_back_limit(&self) -> f64 {
        self.hard_back_limit
    }

    pub fn soft_back_limit(&self) -> f64 {
        self.soft_back_limit
    }

    pub fn section_chairs(&self) -> &[Polyline] {
        &self.section_chairs
    }

    pub fn plan_chairs(&self) -> &[Polyline] {
        &self.plan_chairs
    }

    pub fn plan_origin(&self) -> DVec3 {
        self.plan_origin
    }

    /// Nominal centre-to-centre spacing of chairs along a row
    pub fn plan_chair_width(&self) -> f64 {
        self.plan_chair_width
    }

    /// Bounding box of all plan chair outlines
    pub fn plan_chair_bounds(&self) -> Option<BoundingBox> {
        self.plan_chairs
            .iter()
            .filter_map(Polyline::bounding_box)
            .reduce(|a, b| a.union(&b))
    }
}
