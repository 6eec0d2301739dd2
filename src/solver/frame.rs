//! Flip and origin pass
//!
//! Produces a new section layout in the requested world frame. Scalar X
//! bookkeeping (flight start/end, gaps) stays in the local frame, where the
//! validator measures it.

use glam::{DAffine3, DVec3};

use super::section::SectionLayout;
use crate::geometry::{mirror_about_yz, translation, Plane, Transformable};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTransform {
    pub flip: bool,
    pub origin: DVec3,
}

impl FrameTransform {
    pub fn new(flip: bool, origin: DVec3) -> Self {
        Self { flip, origin }
    }

    /// Mirror about the world YZ plane (when flipped), then move to `origin`
    pub fn affine(&self) -> DAffine3 {
        let mirror = if self.flip {
            mirror_about_yz(DVec3::ZERO)
        } else {
            DAffine3::IDENTITY
        };
        translation(self.origin) * mirror
    }

    /// +1 for rows stacking towards +X, -1 when flipped
    pub fn direction(&self) -> f64 {
        if self.flip {
            -1.0
        } else {
            1.0
        }
    }

    /// Frame whose X axis points along the row stacking direction
    pub fn base_plane(&self) -> Plane {
        Plane::from_x_and_normal(self.origin, DVec3::X * self.direction(), DVec3::Z)
    }

    pub(crate) fn apply(&self, local: &SectionLayout) -> SectionLayout {
        let xform = self.affine();
        SectionLayout {
            tribune_profile: local.tribune_profile.transformed(&xform),
            stairs_profile: local.stairs_profile.transformed(&xform),
            railings: local.railings.transformed(&xform),
            railing_spine: local.railing_spine.transformed(&xform),
            row_lines: local.row_lines.transformed(&xform),
            row_points: local.row_points.transformed(&xform),
            row_spine: local.row_spine.transformed(&xform),
            railing_toggles: local.railing_toggles.clone(),
            gaps: local.gaps.clone(),
            flight_start_x: local.flight_start_x.clone(),
            flight_end_x: local.flight_end_x.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;

    #[test]
    fn test_apply_mirrors_then_translates_every_collection() {
        let local = SectionLayout {
            tribune_profile: Some(Polyline::new(vec![DVec3::ZERO, DVec3::new(80.0, 0.0, 0.0)])),
            row_points: vec![DVec3::new(5.0, 0.0, 0.0), DVec3::new(85.0, 0.0, 30.0)],
            row_spine: vec![DVec3::new(5.0, 0.0, 0.0)],
            railing_spine: vec![DVec3::new(2.5, 0.0, 90.0)],
            gaps: vec![50.0],
            ..SectionLayout::default()
        };
        let frame = FrameTransform::new(true, DVec3::new(1000.0, 0.0, 100.0));
        let world = frame.apply(&local);

        assert_eq!(world.row_points[1], DVec3::new(915.0, 0.0, 130.0));
        assert_eq!(world.row_spine[0], DVec3::new(995.0, 0.0, 100.0));
        assert_eq!(world.railing_spine[0], DVec3::new(997.5, 0.0, 190.0));
        assert_eq!(
            world.tribune_profile.unwrap().last().unwrap(),
            DVec3::new(920.0, 0.0, 100.0)
        );
        assert_eq!(world.gaps, vec![50.0]);
    }

    #[test]
    fn test_base_plane_reverses_on_flip() {
        let plane = FrameTransform::new(true, DVec3::ZERO).base_plane();
        assert!(plane.x_axis.x < 0.0);
        assert_eq!(plane.z_axis(), DVec3::Z);
    }
}
