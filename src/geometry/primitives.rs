use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Straight segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: DVec3,
    pub to: DVec3,
}

impl Line {
    pub fn new(from: DVec3, to: DVec3) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    pub fn direction(&self) -> DVec3 {
        self.to - self.from
    }

    /// Unit tangent, or `None` for a degenerate segment
    pub fn unit_tangent(&self) -> Option<DVec3> {
        self.direction().try_normalize()
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        self.from.lerp(self.to, t)
    }

    pub fn midpoint(&self) -> DVec3 {
        self.point_at(0.5)
    }

    /// Parameter of the closest point on the infinite carrier line.
    ///
    /// Degenerate segments return 0.
    pub fn closest_parameter(&self, point: DVec3) -> f64 {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if len_sq <= f64::EPSILON {
            return 0.0;
        }
        (point - self.from).dot(dir) / len_sq
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points([self.from, self.to]).unwrap_or(BoundingBox {
            min: self.from,
            max: self.from,
        })
    }
}

/// Ordered vertex chain. Closed outlines repeat their first vertex at the end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<DVec3>,
}

impl Polyline {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Closed rectangle-like loop through the given corners
    pub fn closed(mut points: Vec<DVec3>) -> Self {
        if let Some(first) = points.first().copied() {
            if points.last().map_or(true, |last| *last != first) {
                points.push(first);
            }
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<DVec3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<DVec3> {
        self.points.last().copied()
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => self.points.len() >= 4 && a.distance(b) <= tolerance,
            _ => false,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().copied())
    }

    /// Drop consecutive vertices closer than `tolerance`
    pub fn simplified(&self, tolerance: f64) -> Self {
        let mut points: Vec<DVec3> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if points.last().map_or(true, |last| last.distance(*p) > tolerance) {
                points.push(*p);
            }
        }
        Self { points }
    }
}

impl From<Line> for Polyline {
    fn from(line: Line) -> Self {
        Self::new(vec![line.from, line.to])
    }
}

/// Oriented frame: origin plus orthonormal X and Y axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: DVec3,
    pub x_axis: DVec3,
    pub y_axis: DVec3,
}

impl Plane {
    pub fn world_xy() -> Self {
        Self {
            origin: DVec3::ZERO,
            x_axis: DVec3::X,
            y_axis: DVec3::Y,
        }
    }

    /// Section frame: X = run, Y = rise (world Z)
    pub fn world_xz() -> Self {
        Self {
            origin: DVec3::ZERO,
            x_axis: DVec3::X,
            y_axis: DVec3::Z,
        }
    }

    /// Frame with the given X axis and normal; Y completes a right-handed
    /// system (`y = normal × x`).
    pub fn from_x_and_normal(origin: DVec3, x_axis: DVec3, normal: DVec3) -> Self {
        let x_axis = x_axis.normalize_or_zero();
        let normal = normal.normalize_or_zero();
        Self {
            origin,
            x_axis,
            y_axis: normal.cross(x_axis),
        }
    }

    pub fn z_axis(&self) -> DVec3 {
        self.x_axis.cross(self.y_axis)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::world_xy()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self { min: p, max: p },
                Some(b) => Self {
                    min: b.min.min(p),
                    max: b.max.max(p),
                },
            })
        })
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}
