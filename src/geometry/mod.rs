//! Geometry kernel
//!
//! Everything the solver needs from a CAD kernel, reduced to piecewise-linear
//! curves: section geometry lives in the XZ plane (X = run, Z = rise) and plan
//! geometry in the XY plane (X = run, Y = along the row).

mod face;
mod intersect;
mod primitives;
mod region;
mod transform;

pub use face::PlanarFace;
pub use intersect::{curve_curve, vertical_cut, CurveHit, ProjectionPlane, VerticalCut};
pub use primitives::{BoundingBox, Line, Plane, Polyline};
pub use region::{ClipRegions, RegionResult, VoidRegion};
pub use transform::{mirror_about_yz, transform_all, translation, Transformable};
