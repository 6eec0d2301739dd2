use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Flat triangular face, e.g. a projector light cone seen in section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarFace {
    pub vertices: [DVec3; 3],
}

impl PlanarFace {
    /// Face bounded by the closed loop `a → b → c → a`.
    ///
    /// Returns `None` when the loop is degenerate (collinear or coincident
    /// corners), mirroring a failed planar-face construction.
    pub fn from_loop(a: DVec3, b: DVec3, c: DVec3, tolerance: f64) -> Option<Self> {
        let doubled_area = (b - a).cross(c - a).length();
        if doubled_area <= tolerance * tolerance {
            return None;
        }
        Some(Self {
            vertices: [a, b, c],
        })
    }

    pub fn normal(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Closest point on the face (interior or boundary) to `p`.
    ///
    /// Voronoi-region walk over the triangle's vertices, edges and interior.
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        let [a, b, c] = self.vertices;
        let ab = b - a;
        let ac = c - a;
        let ap = p - a;

        let d1 = ab.dot(ap);
        let d2 = ac.dot(ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(bp);
        let d4 = ac.dot(bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return a + ab * v;
        }

        let cp = p - c;
        let d5 = ab.dot(cp);
        let d6 = ac.dot(cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return a + ac * w;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return b + (c - b) * w;
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        a + ab * v + ac * w
    }

    pub fn distance_to(&self, p: DVec3) -> f64 {
        self.closest_point(p).distance(p)
    }
}
