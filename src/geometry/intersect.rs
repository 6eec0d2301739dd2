//! Curve/curve and vertical-plane/curve intersection
//!
//! Intersections are computed in 2D on one of the two working planes and
//! lifted back to 3D by interpolating along the first curve's segment.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line as GeoLine};
use glam::DVec3;
use ordered_float::OrderedFloat;

use super::primitives::{Line, Polyline};

/// Working plane used to flatten curves before intersecting them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionPlane {
    /// XZ: section drawings (run, rise)
    Section,
    /// XY: plan drawings
    Plan,
}

impl ProjectionPlane {
    fn project(self, p: DVec3) -> Coord<f64> {
        match self {
            ProjectionPlane::Section => Coord { x: p.x, y: p.z },
            ProjectionPlane::Plan => Coord { x: p.x, y: p.y },
        }
    }

    fn project_line(self, line: &Line) -> GeoLine<f64> {
        GeoLine::new(self.project(line.from), self.project(line.to))
    }
}

/// One intersection event, located on the first curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    pub point: DVec3,
    /// Segment index on the first curve
    pub segment: usize,
    /// Normalized parameter along that segment
    pub parameter: f64,
}

/// Intersections of `a` with `b`, ordered along `a`.
///
/// Overlapping (collinear) pieces report their start point. Hits closer than
/// `tolerance` to the previous one are merged, so a crossing through a shared
/// vertex is reported once.
pub fn curve_curve(
    a: &Polyline,
    b: &Polyline,
    plane: ProjectionPlane,
    tolerance: f64,
) -> Vec<CurveHit> {
    let mut hits = Vec::new();

    for (segment, seg_a) in a.segments().enumerate() {
        let flat_a = plane.project_line(&seg_a);
        let delta = flat_a.delta();
        let len_sq = delta.x * delta.x + delta.y * delta.y;
        if len_sq <= tolerance * tolerance {
            continue;
        }

        let mut local: Vec<CurveHit> = Vec::new();
        for seg_b in b.segments() {
            let flat_b = plane.project_line(&seg_b);
            let coord = match line_intersection(flat_a, flat_b) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => intersection,
                Some(LineIntersection::Collinear { intersection }) => intersection.start,
                None => continue,
            };
            let rel = coord - flat_a.start;
            let parameter = ((rel.x * delta.x + rel.y * delta.y) / len_sq).clamp(0.0, 1.0);
            local.push(CurveHit {
                point: seg_a.point_at(parameter),
                segment,
                parameter,
            });
        }

        local.sort_by_key(|hit| OrderedFloat(hit.parameter));
        hits.extend(local);
    }

    hits.dedup_by(|next, prev| next.point.distance(prev.point) <= tolerance);
    hits
}

/// Outcome of cutting a plan boundary with the vertical plane `X = x`
#[derive(Debug, Clone, PartialEq)]
pub enum VerticalCut {
    /// Exactly two distinct hits, joined from low Y to high Y
    Line(Line),
    /// Fewer than two hits
    Miss,
    /// More than two distinct hits; the extreme pair would bridge a gap in
    /// the boundary, so no line is produced
    Ambiguous(Vec<DVec3>),
}

/// Cut a closed plan boundary with the vertical plane through `x`.
pub fn vertical_cut(boundary: &Polyline, x: f64, tolerance: f64) -> VerticalCut {
    let Some(bbox) = boundary.bounding_box() else {
        return VerticalCut::Miss;
    };
    if x < bbox.min.x - tolerance || x > bbox.max.x + tolerance {
        return VerticalCut::Miss;
    }

    let cutter = Polyline::new(vec![
        DVec3::new(x, bbox.min.y - 1.0, bbox.min.z),
        DVec3::new(x, bbox.max.y + 1.0, bbox.min.z),
    ]);

    // Hits are located on the boundary so they keep its elevation.
    let mut points: Vec<DVec3> = curve_curve(boundary, &cutter, ProjectionPlane::Plan, tolerance)
        .into_iter()
        .map(|hit| hit.point)
        .collect();

    // Collinear overlaps only report their start; pick up the far end too.
    for seg in boundary.segments() {
        if (seg.from.x - x).abs() <= tolerance && (seg.to.x - x).abs() <= tolerance {
            points.push(seg.from);
            points.push(seg.to);
        }
    }

    points.sort_by_key(|p| OrderedFloat(p.y));
    let mut distinct: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !distinct.iter().any(|q| q.distance(p) <= tolerance) {
            distinct.push(p);
        }
    }

    match distinct.len() {
        0 | 1 => VerticalCut::Miss,
        2 => VerticalCut::Line(Line::new(distinct[0], distinct[1])),
        _ => VerticalCut::Ambiguous(distinct),
    }
}
