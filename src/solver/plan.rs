//! Plan geometry: section X positions projected onto the hall footprint
//!
//! Every plan line is a cut of the tribune boundary by the vertical plane
//! through a section X coordinate, clipped against the void (aisles and
//! tunnels) or the stair clip regions.

use glam::DVec3;

use crate::core::Cyclic;
use crate::geometry::{
    transform_all, translation, vertical_cut, ClipRegions, Line, Plane, Polyline, VerticalCut,
    VoidRegion,
};
use crate::setup::{AudienceSetup, HallSetup};

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct PlanLayout {
    pub tribune_lines: Vec<Line>,
    pub stair_lines: Vec<Line>,
    pub railings: Vec<Polyline>,
    pub railing_spine: Vec<Line>,
    pub chairs: Vec<Vec<Polyline>>,
    pub row_spine: Vec<Vec<Line>>,
    pub chair_planes: Vec<Vec<Plane>>,
    /// Human-readable notes about skipped cuts
    pub diagnostics: Vec<String>,
}

pub(crate) struct PlanInputs<'a> {
    pub hall: &'a HallSetup,
    pub tribune_profile: Option<&'a Polyline>,
    pub stairs_profile: Option<&'a Polyline>,
    pub railing_spine: &'a [DVec3],
    pub row_points: &'a [DVec3],
    pub row_spine: &'a [DVec3],
    pub audiences: &'a Cyclic<Option<AudienceSetup>>,
    pub offsets: &'a Cyclic<f64>,
    pub flipped: bool,
    pub rail_width: f64,
    pub tolerance: f64,
}

struct PlanContext<'a> {
    boundary: &'a Polyline,
    void: VoidRegion,
    tolerance: f64,
    diagnostics: Vec<String>,
}

impl PlanContext<'_> {
    /// Cross-section line of the footprint at section coordinate `x`
    fn plan_line(&mut self, x: f64) -> Option<Line> {
        match vertical_cut(self.boundary, x, self.tolerance) {
            VerticalCut::Line(line) => Some(line),
            VerticalCut::Miss => None,
            VerticalCut::Ambiguous(hits) => {
                tracing::debug!("Plan cut at x={:.3} has {} boundary hits", x, hits.len());
                self.diagnostics.push(format!(
                    "Plan cut at X={:.1} crosses the tribune boundary {} times; skipped",
                    x,
                    hits.len()
                ));
                None
            }
        }
    }

    fn outside_void(&mut self, x: f64) -> Vec<Line> {
        match self.plan_line(x) {
            Some(line) => self.void.trim_outside(&line, self.tolerance),
            None => Vec::new(),
        }
    }
}

pub(crate) fn build(inputs: &PlanInputs<'_>) -> PlanLayout {
    let hall = inputs.hall;
    let tol = inputs.tolerance;
    let mut ctx = PlanContext {
        boundary: hall.tribune_boundary(),
        void: VoidRegion::build(
            hall.aisle_boundaries()
                .iter()
                .chain(hall.tunnel_boundaries()),
            tol,
        ),
        tolerance: tol,
        diagnostics: Vec::new(),
    };
    let mut plan = PlanLayout::default();

    // Riser-top vertices of the profile: 1, 3, 5, ...
    if let Some(profile) = inputs.tribune_profile {
        for p in profile.points.iter().skip(1).step_by(2) {
            plan.tribune_lines.extend(ctx.outside_void(p.x));
        }
    }

    if !hall.aisle_boundaries().is_empty() {
        let clip = ClipRegions::build(
            hall.tribune_boundary(),
            hall.aisle_boundaries(),
            hall.tunnel_boundaries(),
            tol,
        );
        if let Some(stairs) = inputs.stairs_profile.filter(|_| !clip.is_empty()) {
            for p in stairs.points.iter().skip(1).step_by(2) {
                if let Some(line) = ctx.plan_line(p.x) {
                    plan.stair_lines.extend(clip.trim_inside(&line, tol));
                }
            }
        }
    }

    for spine in inputs.railing_spine {
        for piece in ctx.outside_void(spine.x) {
            // pieces are straight, so the local tangent is the chord direction
            let Some(tangent) = piece.unit_tangent() else {
                continue;
            };
            let half = DVec3::Z.cross(tangent) * (inputs.rail_width / 2.0);
            plan.railings.push(Polyline::closed(vec![
                piece.from + half,
                piece.to + half,
                piece.to - half,
                piece.from - half,
            ]));
            plan.railing_spine.push(piece);
        }
    }

    if !inputs.audiences.is_empty() {
        place_plan_chairs(inputs, &mut ctx, &mut plan);
    }

    plan.diagnostics = ctx.diagnostics;
    plan
}

fn place_plan_chairs(inputs: &PlanInputs<'_>, ctx: &mut PlanContext<'_>, plan: &mut PlanLayout) {
    let sign = if inputs.flipped { -1.0 } else { 1.0 };

    for (i, row_point) in inputs.row_points.iter().enumerate() {
        let mut row_chairs = Vec::new();
        let mut row_planes = Vec::new();
        let mut row_segments = Vec::new();

        if let Some(audience) = inputs.audiences.resolve(i) {
            let spine_x = inputs.row_spine.get(i).unwrap_or(row_point).x;
            let x = spine_x + sign * inputs.offsets.get_or(i, 0.0);
            row_segments = ctx.outside_void(x);

            for segment in &row_segments {
                let Some(tangent) = segment.unit_tangent() else {
                    continue;
                };
                for center in chair_centers(segment, audience, ctx.tolerance) {
                    let xform = translation(center - audience.plan_origin());
                    row_chairs.extend(transform_all(audience.plan_chairs(), &xform));
                    row_planes.push(Plane::from_x_and_normal(center, tangent, DVec3::Z));
                }
            }
        }

        plan.chairs.push(row_chairs);
        plan.chair_planes.push(row_planes);
        plan.row_spine.push(row_segments);
    }
}

/// Centres of the chairs fitted on `segment`, evenly spaced by the axial
/// width and centred with equal end margins.
///
/// The physical chair width is the extent of the plan outlines along the
/// row (plan Y).
pub(crate) fn chair_centers(segment: &Line, audience: &AudienceSetup, tolerance: f64) -> Vec<DVec3> {
    let Some(bounds) = audience.plan_chair_bounds() else {
        return Vec::new();
    };
    let Some(direction) = segment.unit_tangent() else {
        return Vec::new();
    };
    let actual = bounds.size().y;
    let axial = audience.plan_chair_width();
    let length = segment.length();
    if length + tolerance < actual {
        return Vec::new();
    }
    if actual > axial {
        tracing::debug!(
            "Chair outline width {:.1} exceeds axial spacing {:.1}; chairs overlap",
            actual,
            axial
        );
    }

    let count = ((length - actual).max(0.0) / axial).floor() as usize + 1;
    let span = (count - 1) as f64 * axial + actual;
    let margin = (length - span) / 2.0;

    (0..count)
        .map(|k| segment.from + direction * (margin + actual / 2.0 + k as f64 * axial))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seated(width: f64, axial: f64) -> AudienceSetup {
        let half = width / 2.0;
        AudienceSetup::new(DVec3::ZERO, DVec3::ZERO)
            .with_plan_chairs(
                vec![Polyline::closed(vec![
                    DVec3::new(-20.0, -half, 0.0),
                    DVec3::new(20.0, -half, 0.0),
                    DVec3::new(20.0, half, 0.0),
                    DVec3::new(-20.0, half, 0.0),
                ])],
                DVec3::ZERO,
                axial,
            )
            .unwrap()
    }

    #[test]
    fn test_chairs_centered_with_equal_margins() {
        let segment = Line::new(DVec3::new(100.0, 0.0, 0.0), DVec3::new(100.0, 250.0, 0.0));
        let centers = chair_centers(&segment, &seated(50.0, 55.0), 1e-3);
        // floor((250 - 50) / 55) + 1 = 4 chairs spanning 3 * 55 + 50 = 215
        assert_eq!(centers.len(), 4);
        let margin = (250.0 - 215.0) / 2.0;
        assert!((centers[0].y - (margin + 25.0)).abs() < 1e-9);
        assert!((250.0 - centers[3].y - (margin + 25.0)).abs() < 1e-9);
    }

    #[test]
    fn test_segment_shorter_than_chair_gets_none() {
        let segment = Line::new(DVec3::ZERO, DVec3::new(0.0, 40.0, 0.0));
        assert!(chair_centers(&segment, &seated(50.0, 55.0), 1e-3).is_empty());
    }

    #[test]
    fn test_exact_fit_gets_one_chair() {
        let segment = Line::new(DVec3::ZERO, DVec3::new(0.0, 50.0, 0.0));
        let centers = chair_centers(&segment, &seated(50.0, 55.0), 1e-3);
        assert_eq!(centers, vec![DVec3::new(0.0, 25.0, 0.0)]);
    }
}
