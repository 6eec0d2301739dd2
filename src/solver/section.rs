//! Section stepping: tribune profile, railings, row anchors and stair flights
//!
//! Everything here is built in the local section frame (row 0 front edge at
//! the origin, rows stacking towards +X). Flip and origin are applied later
//! by the frame pass.

use glam::DVec3;

use crate::core::Cyclic;
use crate::geometry::{Line, Polyline};
use crate::setup::{AudienceSetup, RailingSetup, StairSetup, TribuneSetup};

/// Section geometry and row bookkeeping of one solve
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct SectionLayout {
    pub tribune_profile: Option<Polyline>,
    pub stairs_profile: Option<Polyline>,
    pub railings: Vec<Polyline>,
    /// Top midline point of every emitted railing
    pub railing_spine: Vec<DVec3>,
    pub row_lines: Vec<Line>,
    /// Chair-line start of every row (near edge + rail width)
    pub row_points: Vec<DVec3>,
    pub row_spine: Vec<DVec3>,
    pub railing_toggles: Vec<bool>,
    pub gaps: Vec<f64>,
    pub flight_start_x: Vec<f64>,
    pub flight_end_x: Vec<f64>,
}

pub(crate) struct SectionInputs<'a> {
    pub tribune: &'a TribuneSetup,
    pub stairs: &'a StairSetup,
    pub railings: &'a RailingSetup,
    pub toggles: &'a Cyclic<bool>,
    pub audiences: &'a Cyclic<Option<AudienceSetup>>,
    pub tolerance: f64,
}

/// Rail block standing on the riser at `x`, from `bottom_z` to `top_z`
fn railing_rectangle(x: f64, width: f64, bottom_z: f64, top_z: f64) -> Polyline {
    Polyline::closed(vec![
        DVec3::new(x, 0.0, bottom_z),
        DVec3::new(x, 0.0, top_z),
        DVec3::new(x + width, 0.0, top_z),
        DVec3::new(x + width, 0.0, bottom_z),
    ])
}

pub(crate) fn build(inputs: &SectionInputs<'_>) -> SectionLayout {
    let mut layout = SectionLayout::default();
    let rows = inputs.tribune.rows();
    if rows == 0 {
        return layout;
    }

    build_rows(inputs, &mut layout);
    build_stairs(inputs, &mut layout);
    layout
}

fn build_rows(inputs: &SectionInputs<'_>, layout: &mut SectionLayout) {
    let tribune = inputs.tribune;
    let rail_w = inputs.railings.rail_width();
    let rail_h = inputs.railings.rail_height();

    let mut profile = vec![DVec3::ZERO];
    let mut x = 0.0;
    let mut z = 0.0;

    // Row 0 sits on the ground and always carries its front railing.
    let width0 = tribune.row_width(0);
    let anchor0 = DVec3::new(rail_w, 0.0, 0.0);
    layout.row_points.push(anchor0);
    layout.row_spine.push(anchor0);
    layout
        .row_lines
        .push(Line::new(DVec3::ZERO, DVec3::new(width0, 0.0, 0.0)));
    layout.railing_toggles.push(true);
    if rail_w < width0 {
        layout
            .railings
            .push(railing_rectangle(x, rail_w, 0.0, rail_h));
        layout
            .railing_spine
            .push(DVec3::new(x + rail_w / 2.0, 0.0, rail_h));
    }
    x += width0;
    profile.push(DVec3::new(x, 0.0, z));

    for r in 1..tribune.rows() {
        let rise = f64::from(tribune.elev_count(r - 1)) * inputs.stairs.tread_height();
        let width = tribune.row_width(r);

        // riser up
        z += rise;
        profile.push(DVec3::new(x, 0.0, z));

        let show_railing = inputs.toggles.get_or(r, true);
        layout.railing_toggles.push(show_railing);

        let anchor = DVec3::new(x + rail_w, 0.0, z);
        layout.row_points.push(anchor);
        layout
            .row_lines
            .push(Line::new(DVec3::new(x, 0.0, z), DVec3::new(x + width, 0.0, z)));

        // Without a railing, seats abut the hard-back limit of the row in front.
        let spine = if show_railing || inputs.audiences.is_empty() {
            anchor
        } else {
            let prev_hbl = inputs
                .audiences
                .resolve(r - 1)
                .map_or(0.0, AudienceSetup::hard_back_limit);
            DVec3::new(layout.row_points[r - 1].x + prev_hbl, 0.0, z)
        };
        layout.row_spine.push(spine);

        if show_railing && rail_w < width {
            layout
                .railings
                .push(railing_rectangle(x, rail_w, z - rise, z + rail_h));
            layout
                .railing_spine
                .push(DVec3::new(x + rail_w / 2.0, 0.0, z + rail_h));
        }

        // tread forward
        x += width;
        profile.push(DVec3::new(x, 0.0, z));
    }

    layout.tribune_profile = (profile.len() > 1).then(|| Polyline::new(profile));
}

fn build_stairs(inputs: &SectionInputs<'_>, layout: &mut SectionLayout) {
    let tribune = inputs.tribune;
    let rise = inputs.stairs.tread_height();
    let run = inputs.stairs.tread_width();
    let rail_w = inputs.railings.rail_width();
    let tol = inputs.tolerance;

    let mut points: Vec<DVec3> = Vec::new();
    let mut base_x = tribune.row_width(0);
    let mut base_z = 0.0;

    for r in 0..tribune.rows().saturating_sub(1) {
        let count = tribune.elev_count(r);
        let inset = if tribune.stair_inset(r) { rail_w } else { 0.0 };
        let landing_z = base_z + f64::from(count) * rise;
        let flight_run = f64::from(count - 1) * run;
        let start_x = base_x - flight_run + inset;

        let start = DVec3::new(start_x, 0.0, base_z);
        let joined = points
            .last()
            .is_some_and(|last| (last.x - start.x).abs() <= tol && (last.z - start.z).abs() <= tol);
        if !joined {
            points.push(start);
        }

        let mut cx = start_x;
        let mut cz = base_z;
        for step in 0..count {
            cz += rise;
            points.push(DVec3::new(cx, 0.0, cz));
            if step + 1 < count {
                cx += run;
                points.push(DVec3::new(cx, 0.0, cz));
            }
        }
        layout.flight_start_x.push(start_x);
        layout.flight_end_x.push(cx);

        // Landing measured from the rail's inner face, or from the hard-back
        // limit of the row when it has no railing.
        let reference_x = if r == 0 {
            0.0
        } else {
            let row_start = base_x - tribune.row_width(r);
            let back_offset = if layout.railing_toggles[r] {
                rail_w
            } else if inputs.audiences.is_empty() {
                0.0
            } else {
                inputs
                    .audiences
                    .resolve(r)
                    .map_or(rail_w, AudienceSetup::hard_back_limit)
            };
            row_start + back_offset
        };
        layout.gaps.push(start_x - reference_x);

        base_x += tribune.row_width(r + 1);
        base_z = landing_z;
    }

    layout.stairs_profile = (points.len() > 1).then(|| Polyline::new(points));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(tribune: TribuneSetup, toggles: Vec<bool>) -> SectionLayout {
        let stairs = StairSetup::new(15.0, 30.0).unwrap();
        let railings = RailingSetup::new(90.0, 5.0).unwrap();
        build(&SectionInputs {
            tribune: &tribune,
            stairs: &stairs,
            railings: &railings,
            toggles: &Cyclic::new(toggles),
            audiences: &Cyclic::default(),
            tolerance: 1e-3,
        })
    }

    #[test]
    fn test_profile_alternates_riser_and_tread() {
        let layout = layout_for(TribuneSetup::new(3, vec![80.0], vec![2], vec![]).unwrap(), vec![]);
        let profile = layout.tribune_profile.unwrap();
        let xz: Vec<(f64, f64)> = profile.points.iter().map(|p| (p.x, p.z)).collect();
        assert_eq!(
            xz,
            vec![
                (0.0, 0.0),
                (80.0, 0.0),
                (80.0, 30.0),
                (160.0, 30.0),
                (160.0, 60.0),
                (240.0, 60.0)
            ]
        );
    }

    #[test]
    fn test_stair_flight_lands_on_next_row() {
        let layout = layout_for(TribuneSetup::new(3, vec![80.0], vec![2], vec![]).unwrap(), vec![]);
        let stairs = layout.stairs_profile.unwrap();
        // Flight 0: starts one run before the row 0 far edge, two risers up.
        assert_eq!(layout.flight_start_x, vec![50.0, 130.0]);
        assert_eq!(layout.flight_end_x, vec![80.0, 160.0]);
        assert_eq!(stairs.first().unwrap(), DVec3::new(50.0, 0.0, 0.0));
        assert_eq!(stairs.last().unwrap(), DVec3::new(160.0, 0.0, 60.0));
        // Second flight: railing present on row 1, reference = 80 + 5.
        assert_eq!(layout.gaps, vec![50.0, 45.0]);
    }

    #[test]
    fn test_inset_pushes_flight_back_by_rail_width() {
        let layout = layout_for(
            TribuneSetup::new(2, vec![80.0], vec![1], vec![true]).unwrap(),
            vec![],
        );
        assert_eq!(layout.flight_start_x, vec![85.0]);
        assert_eq!(layout.gaps, vec![85.0]);
    }

    #[test]
    fn test_railing_rectangle_spans_riser_and_rail() {
        let layout = layout_for(TribuneSetup::new(2, vec![80.0], vec![2], vec![]).unwrap(), vec![]);
        assert_eq!(layout.railings.len(), 2);
        let bounds = layout.railings[1].bounding_box().unwrap();
        assert_eq!(bounds.min, DVec3::new(80.0, 0.0, 0.0));
        assert_eq!(bounds.max, DVec3::new(85.0, 0.0, 120.0));
        assert_eq!(layout.railing_spine[1], DVec3::new(82.5, 0.0, 120.0));
    }

    #[test]
    fn test_railing_skipped_when_wider_than_row() {
        let layout = layout_for(TribuneSetup::new(2, vec![4.0], vec![1], vec![]).unwrap(), vec![]);
        assert!(layout.railings.is_empty());
        assert!(layout.railing_spine.is_empty());
        assert_eq!(layout.railing_toggles, vec![true, true]);
    }
}
