//! Mirror and translation transforms over kernel types
//!
//! Transforms are plain `glam::DAffine3` values; every geometry type that can
//! be moved implements [`Transformable`] and returns a new value.

use glam::{DAffine3, DVec3};

use super::primitives::{Line, Plane, Polyline};

/// Mirror about the plane through `origin` whose normal is the world X axis
pub fn mirror_about_yz(origin: DVec3) -> DAffine3 {
    DAffine3::from_translation(origin)
        * DAffine3::from_scale(DVec3::new(-1.0, 1.0, 1.0))
        * DAffine3::from_translation(-origin)
}

pub fn translation(offset: DVec3) -> DAffine3 {
    DAffine3::from_translation(offset)
}

pub trait Transformable: Sized {
    fn transformed(&self, xform: &DAffine3) -> Self;
}

impl Transformable for DVec3 {
    fn transformed(&self, xform: &DAffine3) -> Self {
        xform.transform_point3(*self)
    }
}

impl Transformable for Line {
    fn transformed(&self, xform: &DAffine3) -> Self {
        Line::new(
            xform.transform_point3(self.from),
            xform.transform_point3(self.to),
        )
    }
}

impl Transformable for Polyline {
    fn transformed(&self, xform: &DAffine3) -> Self {
        Polyline::new(
            self.points
                .iter()
                .map(|p| xform.transform_point3(*p))
                .collect(),
        )
    }
}

impl Transformable for Plane {
    fn transformed(&self, xform: &DAffine3) -> Self {
        Plane {
            origin: xform.transform_point3(self.origin),
            x_axis: xform.transform_vector3(self.x_axis),
            y_axis: xform.transform_vector3(self.y_axis),
        }
    }
}

impl<T: Transformable> Transformable for Vec<T> {
    fn transformed(&self, xform: &DAffine3) -> Self {
        self.iter().map(|item| item.transformed(xform)).collect()
    }
}

/// Transformed copies of a borrowed slice
pub fn transform_all<T: Transformable>(items: &[T], xform: &DAffine3) -> Vec<T> {
    items.iter().map(|item| item.transformed(xform)).collect()
}

impl<T: Transformable> Transformable for Option<T> {
    fn transformed(&self, xform: &DAffine3) -> Self {
        self.as_ref().map(|item| item.transformed(xform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_about_offset_plane() {
        let mirror = mirror_about_yz(DVec3::new(10.0, 0.0, 0.0));
        let p = DVec3::new(12.0, 3.0, 4.0).transformed(&mirror);
        assert!((p - DVec3::new(8.0, 3.0, 4.0)).length() < 1e-12);
    }

    #[test]
    fn test_mirror_then_translate_order() {
        let xform = translation(DVec3::new(100.0, 0.0, 5.0)) * mirror_about_yz(DVec3::ZERO);
        let p = DVec3::new(85.0, 0.0, 30.0).transformed(&xform);
        assert!((p - DVec3::new(15.0, 0.0, 35.0)).length() < 1e-12);
    }

    #[test]
    fn test_transform_all_copies_borrowed_outlines() {
        let outlines = [
            Polyline::new(vec![DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)]),
            Polyline::new(vec![DVec3::new(0.0, 5.0, 0.0)]),
        ];
        let moved = transform_all(&outlines[..], &translation(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(moved.len(), 2);
        assert_eq!(moved[0].points[1], DVec3::new(11.0, 2.0, 3.0));
        assert_eq!(moved[1].points[0], DVec3::new(1.0, 7.0, 3.0));
        // source untouched
        assert_eq!(outlines[0].points[1], DVec3::new(10.0, 0.0, 0.0));
    }
}
