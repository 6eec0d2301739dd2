//! Planar Boolean regions for plan clipping
//!
//! Built on `geo`'s `BooleanOps`. The sweep-line implementation can panic on
//! degenerate input, so every Boolean call goes through [`guarded`] and a
//! failure becomes an explicit fallback branch instead of an abort.

use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::{Area, BooleanOps, LineString, MultiLineString, MultiPolygon, Polygon};
use glam::DVec3;

use super::primitives::{Line, Polyline};

/// Result of a Boolean operation that may legitimately produce nothing
#[derive(Debug, Clone, PartialEq)]
pub enum RegionResult {
    Regions(MultiPolygon<f64>),
    Empty,
}

impl RegionResult {
    fn from_multi(multi: MultiPolygon<f64>) -> Self {
        if multi.0.is_empty() {
            RegionResult::Empty
        } else {
            RegionResult::Regions(multi)
        }
    }
}

fn guarded<T>(op: impl FnOnce() -> T) -> Option<T> {
    catch_unwind(AssertUnwindSafe(op)).ok()
}

/// Closed plan curve as a polygon; `None` for open or zero-area outlines.
pub(crate) fn polygon_xy(curve: &Polyline, tolerance: f64) -> Option<Polygon<f64>> {
    if !curve.is_closed(tolerance) {
        return None;
    }
    let ring: Vec<(f64, f64)> = curve.points.iter().map(|p| (p.x, p.y)).collect();
    let polygon = Polygon::new(LineString::from(ring), vec![]);
    if polygon.unsigned_area() <= tolerance * tolerance {
        return None;
    }
    Some(polygon)
}

fn single(polygon: &Polygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon::new(vec![polygon.clone()])
}

fn as_multi_line(line: &Line) -> MultiLineString<f64> {
    MultiLineString::new(vec![LineString::from(vec![
        (line.from.x, line.from.y),
        (line.to.x, line.to.y),
    ])])
}

/// Clipped pieces of a straight plan line, back at the line's elevation
fn collect_pieces(pieces: MultiLineString<f64>, z: f64, tolerance: f64) -> Vec<Line> {
    pieces
        .0
        .iter()
        .filter_map(|ls| {
            let first = ls.0.first()?;
            let last = ls.0.last()?;
            let line = Line::new(
                DVec3::new(first.x, first.y, z),
                DVec3::new(last.x, last.y, z),
            );
            (line.length() > tolerance).then_some(line)
        })
        .collect()
}

/// Union of aisle and tunnel boundaries that plan geometry must avoid
#[derive(Debug, Clone, PartialEq)]
pub enum VoidRegion {
    /// No usable boundaries; nothing is trimmed
    None,
    /// Boundaries merged into one region
    Unified(MultiPolygon<f64>),
    /// Union failed; the raw boundaries are applied one after another
    Raw(Vec<Polygon<f64>>),
}

impl VoidRegion {
    pub fn build<'a>(boundaries: impl IntoIterator<Item = &'a Polyline>, tolerance: f64) -> Self {
        let polygons: Vec<Polygon<f64>> = boundaries
            .into_iter()
            .filter_map(|curve| polygon_xy(curve, tolerance))
            .collect();
        let Some(first) = polygons.first() else {
            return VoidRegion::None;
        };

        let unioned = guarded(|| {
            polygons
                .iter()
                .skip(1)
                .fold(single(first), |acc, p| acc.union(&single(p)))
        });

        match unioned {
            Some(multi) if !multi.0.is_empty() => VoidRegion::Unified(multi),
            _ => {
                tracing::warn!(
                    "Void union failed for {} boundaries, using raw set",
                    polygons.len()
                );
                VoidRegion::Raw(polygons)
            }
        }
    }

    /// Pieces of `line` lying outside the void
    pub fn trim_outside(&self, line: &Line, tolerance: f64) -> Vec<Line> {
        let z = line.from.z;
        match self {
            VoidRegion::None => {
                if line.length() > tolerance {
                    vec![*line]
                } else {
                    Vec::new()
                }
            }
            VoidRegion::Unified(multi) => {
                match guarded(|| multi.clip(&as_multi_line(line), true)) {
                    Some(pieces) => collect_pieces(pieces, z, tolerance),
                    None => vec![*line],
                }
            }
            VoidRegion::Raw(polygons) => {
                let mut pieces = vec![*line];
                for polygon in polygons {
                    let mask = single(polygon);
                    pieces = pieces
                        .iter()
                        .flat_map(|piece| {
                            match guarded(|| mask.clip(&as_multi_line(piece), true)) {
                                Some(rest) => collect_pieces(rest, z, tolerance),
                                None => vec![*piece],
                            }
                        })
                        .collect();
                }
                pieces
            }
        }
    }
}

/// Areas of the tribune boundary that belong to aisles (stair zones),
/// with tunnels cut out
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClipRegions {
    pub pieces: Vec<Polygon<f64>>,
}

impl ClipRegions {
    pub fn build(
        boundary: &Polyline,
        aisles: &[Polyline],
        tunnels: &[Polyline],
        tolerance: f64,
    ) -> Self {
        let Some(boundary) = polygon_xy(boundary, tolerance) else {
            return Self::default();
        };
        let tunnels: Vec<Polygon<f64>> = tunnels
            .iter()
            .filter_map(|curve| polygon_xy(curve, tolerance))
            .collect();

        let mut pieces = Vec::new();
        for aisle in aisles.iter().filter_map(|curve| polygon_xy(curve, tolerance)) {
            let overlap = guarded(|| single(&boundary).intersection(&single(&aisle)))
                .map(RegionResult::from_multi)
                .unwrap_or(RegionResult::Empty);
            let RegionResult::Regions(overlap) = overlap else {
                continue;
            };

            for piece in overlap.0 {
                let mut remaining = RegionResult::Regions(MultiPolygon::new(vec![piece]));
                for tunnel in &tunnels {
                    remaining = match remaining {
                        RegionResult::Regions(current) => {
                            match guarded(|| current.difference(&single(tunnel))) {
                                Some(rest) => RegionResult::from_multi(rest),
                                // keep the piece untouched when the difference fails
                                None => RegionResult::Regions(current),
                            }
                        }
                        RegionResult::Empty => break,
                    };
                }
                if let RegionResult::Regions(rest) = remaining {
                    pieces.extend(rest.0);
                }
            }
        }

        Self { pieces }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces of `line` lying inside any clip region
    pub fn trim_inside(&self, line: &Line, tolerance: f64) -> Vec<Line> {
        let z = line.from.z;
        self.pieces
            .iter()
            .flat_map(|piece| {
                guarded(|| single(piece).clip(&as_multi_line(line), false))
                    .map(|inside| collect_pieces(inside, z, tolerance))
                    .unwrap_or_default()
            })
            .collect()
    }
}
