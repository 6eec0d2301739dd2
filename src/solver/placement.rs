//! Section chair placement and limit lines
//!
//! Runs on world-frame row anchors, after the frame pass. The eye and limit
//! helpers are shared with `analysis`, which works from a pre-solved tribune.

use glam::DVec3;

use crate::core::Cyclic;
use crate::geometry::{mirror_about_yz, transform_all, translation, Line, Plane, Polyline};
use crate::setup::AudienceSetup;

/// Eye point of a spectator seated on `row_point`
pub fn eye_point(row_point: DVec3, audience: &AudienceSetup, offset: f64, flipped: bool) -> DVec3 {
    let mut eye_offset = audience.eye_offset() + DVec3::new(offset, 0.0, 0.0);
    if flipped {
        eye_offset.x = -eye_offset.x;
    }
    row_point + eye_offset
}

/// Vertical front, hard-back and soft-back limit lines of one row, in that
/// order, from the row floor up by `overshoot`
pub fn limit_lines(
    row_point: DVec3,
    audience: &AudienceSetup,
    offset: f64,
    flipped: bool,
    overshoot: f64,
) -> Vec<Line> {
    let sign = if flipped { -1.0 } else { 1.0 };
    let z0 = row_point.z;
    let z1 = row_point.z + overshoot;

    [
        audience.front_limit(),
        audience.hard_back_limit(),
        audience.soft_back_limit(),
    ]
    .into_iter()
    .map(|limit| {
        let x = row_point.x + sign * limit + sign * offset;
        Line::new(
            DVec3::new(x, row_point.y, z0),
            DVec3::new(x, row_point.y, z1),
        )
    })
    .collect()
}

/// Chairs, limit lines and instancing planes of every row
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SectionSeating {
    pub chairs: Vec<Vec<Polyline>>,
    pub limit_lines: Vec<Vec<Line>>,
    /// Placement plane per row; `None` for unseated rows
    pub planes: Vec<Option<Plane>>,
}

pub(crate) fn place_section_chairs(
    row_points: &[DVec3],
    audiences: &Cyclic<Option<AudienceSetup>>,
    offsets: &Cyclic<f64>,
    flipped: bool,
    overshoot: f64,
) -> SectionSeating {
    let mut seating = SectionSeating::default();
    if audiences.is_empty() {
        return seating;
    }
    let sign = if flipped { -1.0 } else { 1.0 };

    for (i, &row_point) in row_points.iter().enumerate() {
        let Some(audience) = audiences.resolve(i) else {
            seating.chairs.push(Vec::new());
            seating.limit_lines.push(Vec::new());
            seating.planes.push(None);
            continue;
        };
        let offset = offsets.get_or(i, 0.0);

        seating
            .limit_lines
            .push(limit_lines(row_point, audience, offset, flipped, overshoot));

        let shift = DVec3::new(sign * offset, 0.0, 0.0);
        let mut xform = translation(row_point - audience.origin() + shift);
        if flipped {
            xform = xform * mirror_about_yz(audience.origin());
        }
        seating
            .chairs
            .push(transform_all(audience.section_chairs(), &xform));

        seating.planes.push(Some(Plane::from_x_and_normal(
            row_point + shift,
            DVec3::X * sign,
            DVec3::Z,
        )));
    }

    seating
}
