use glam::DVec3;
use serde::Serialize;

use crate::core::error::{Result, TribuneError};
use crate::geometry::{Line, Plane, Polyline};

const CLOSURE_TOLERANCE: f64 = 1e-6;

/// Screen curve; only its endpoints matter, told apart by elevation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenSetup {
    curve: Polyline,
}

impl ScreenSetup {
    pub fn new(curve: Polyline) -> Result<Self> {
        if curve.len() < 2 {
            return Err(TribuneError::InsufficientPoints {
                name: "screen".into(),
                count: curve.len(),
                minimum: 2,
            });
        }
        Ok(Self { curve })
    }

    pub fn from_line(line: Line) -> Self {
        Self { curve: line.into() }
    }

    pub fn curve(&self) -> &Polyline {
        &self.curve
    }

    fn endpoints(&self) -> (DVec3, DVec3) {
        let start = self.curve.first().unwrap_or_default();
        let end = self.curve.last().unwrap_or_default();
        (start, end)
    }

    /// Lower endpoint (the sightline target)
    pub fn bottom(&self) -> DVec3 {
        let (a, b) = self.endpoints();
        if a.z < b.z {
            a
        } else {
            b
        }
    }

    pub fn top(&self) -> DVec3 {
        let (a, b) = self.endpoints();
        if a.z > b.z {
            a
        } else {
            b
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectorSetup {
    location: DVec3,
}

impl ProjectorSetup {
    pub fn new(location: DVec3) -> Self {
        Self { location }
    }

    pub fn location(&self) -> DVec3 {
        self.location
    }
}

/// Plan boundaries of the hall plus display frames and the projection setup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HallSetup {
    tribune_boundary: Polyline,
    aisle_boundaries: Vec<Polyline>,
    tunnel_boundaries: Vec<Polyline>,
    section_frame: Plane,
    plan_frame: Plane,
    projector: Option<ProjectorSetup>,
    screen: Option<ScreenSetup>,
}

impl HallSetup {
    /// Hall with a closed tribune footprint and no aisles, tunnels, screen
    /// or projector.
    pub fn new(tribune_boundary: Polyline) -> Result<Self> {
        if !tribune_boundary.is_closed(CLOSURE_TOLERANCE) {
            return Err(TribuneError::OpenBoundary {
                name: "tribune boundary".into(),
            });
        }
        Ok(Self {
            tribune_boundary,
            aisle_boundaries: Vec::new(),
            tunnel_boundaries: Vec::new(),
            section_frame: Plane::world_xz(),
            plan_frame: Plane::world_xy(),
            projector: None,
            screen: None,
        })
    }

    pub fn with_aisles(mut self, aisles: Vec<Polyline>) -> Result<Self> {
        Self::check_closed("aisle", &aisles)?;
        self.aisle_boundaries = aisles;
        Ok(self)
    }

    pub fn with_tunnels(mut self, tunnels: Vec<Polyline>) -> Result<Self> {
        Self::check_closed("tunnel", &tunnels)?;
        self.tunnel_boundaries = tunnels;
        Ok(self)
    }

    pub fn with_frames(mut self, section_frame: Plane, plan_frame: Plane) -> Self {
        self.section_frame = section_frame;
        self.plan_frame = plan_frame;
        self
    }

    pub fn with_projector(mut self, projector: ProjectorSetup) -> Self {
        self.projector = Some(projector);
        self
    }

    pub fn with_screen(mut self, screen: ScreenSetup) -> Self {
        self.screen = Some(screen);
        self
    }

    fn check_closed(kind: &str, curves: &[Polyline]) -> Result<()> {
        for (i, curve) in curves.iter().enumerate() {
            if !curve.is_closed(CLOSURE_TOLERANCE) {
                return Err(TribuneError::OpenBoundary {
                    name: format!("{} {}", kind, i),
                });
            }
        }
        Ok(())
    }

    pub fn tribune_boundary(&self) -> &Polyline {
        &self.tribune_boundary
    }

    pub fn aisle_boundaries(&self) -> &[Polyline] {
        &self.aisle_boundaries
    }

    pub fn tunnel_boundaries(&self) -> &[Polyline] {
        &self.tunnel_boundaries
    }

    pub fn section_frame(&self) -> Plane {
        self.section_frame
    }

    pub fn plan_frame(&self) -> Plane {
        self.plan_frame
    }

    pub fn projector(&self) -> Option<&ProjectorSetup> {
        self.projector.as_ref()
    }

    pub fn screen(&self) -> Option<&ScreenSetup> {
        self.screen.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_boundary_rejected() {
        let open = Polyline::new(vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)]);
        assert!(matches!(
            HallSetup::new(open),
            Err(TribuneError::OpenBoundary { .. })
        ));
    }

    #[test]
    fn test_screen_endpoints_by_elevation() {
        let screen = ScreenSetup::from_line(Line::new(
            DVec3::new(-500.0, 0.0, 400.0),
            DVec3::new(-500.0, 0.0, 100.0),
        ));
        assert_eq!(screen.bottom().z, 100.0);
        assert_eq!(screen.top().z, 400.0);
    }
}
