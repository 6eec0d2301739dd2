//! Load solve scenarios from TOML files
//!
//! A scenario holds the tribune, stair and railing setups, the per-row
//! audiences, an optional hall and the solver configuration. The file format
//! is a plain data mirror; every setup is still built through its validating
//! constructor.

use std::path::Path;

use glam::DVec3;
use serde::Deserialize;

use crate::core::{Result, SolverConfig, TribuneError};
use crate::geometry::Polyline;
use crate::optimization::Candidate;
use crate::setup::{
    AudienceSetup, HallSetup, ProjectorSetup, RailingSetup, ScreenSetup, StairSetup, TribuneSetup,
};
use crate::solver::{SolveRequest, TribuneSolver};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    railing_toggles: Vec<bool>,
    #[serde(default)]
    audience_offsets: Vec<f64>,
    #[serde(default)]
    flip: bool,
    #[serde(default)]
    origin: Option<DVec3>,
    tribune: TribuneTable,
    stairs: StairTable,
    railings: RailingTable,
    #[serde(default)]
    audiences: Vec<AudienceTable>,
    hall: Option<HallTable>,
    existing_tribune: Option<Vec<DVec3>>,
    #[serde(default)]
    config: SolverConfig,
}

#[derive(Debug, Deserialize)]
struct TribuneTable {
    rows: usize,
    #[serde(default)]
    row_widths: Vec<f64>,
    #[serde(default)]
    elev_counts: Vec<u32>,
    #[serde(default)]
    stair_insets: Vec<bool>,
}

#[derive(Debug, Deserialize)]
struct StairTable {
    tread_height: f64,
    tread_width: f64,
}

#[derive(Debug, Deserialize)]
struct RailingTable {
    height: f64,
    width: f64,
}

#[derive(Debug, Deserialize)]
struct AudienceTable {
    /// `false` leaves the rows this entry maps to unseated
    #[serde(default = "seated_default")]
    seated: bool,
    eye: DVec3,
    #[serde(default)]
    origin: DVec3,
    front_limit: Option<f64>,
    hard_back_limit: Option<f64>,
    soft_back_limit: Option<f64>,
    #[serde(default)]
    section_chairs: Vec<Vec<DVec3>>,
    #[serde(default)]
    plan_chairs: Vec<Vec<DVec3>>,
    #[serde(default)]
    plan_origin: DVec3,
    plan_chair_width: Option<f64>,
}

fn seated_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct HallTable {
    boundary: Vec<DVec3>,
    #[serde(default)]
    aisles: Vec<Vec<DVec3>>,
    #[serde(default)]
    tunnels: Vec<Vec<DVec3>>,
    screen: Option<Vec<DVec3>>,
    projector: Option<DVec3>,
}

impl AudienceTable {
    fn to_setup(&self) -> Result<Option<AudienceSetup>> {
        if !self.seated {
            return Ok(None);
        }
        let audience = AudienceSetup::new(self.eye, self.origin)
            .with_limits(
                self.front_limit.unwrap_or(AudienceSetup::DEFAULT_FRONT_LIMIT),
                self.hard_back_limit
                    .unwrap_or(AudienceSetup::DEFAULT_HARD_BACK_LIMIT),
                self.soft_back_limit
                    .unwrap_or(AudienceSetup::DEFAULT_SOFT_BACK_LIMIT),
            )?
            .with_section_chairs(polylines(&self.section_chairs))
            .with_plan_chairs(
                polylines(&self.plan_chairs),
                self.plan_origin,
                self.plan_chair_width
                    .unwrap_or(AudienceSetup::DEFAULT_PLAN_CHAIR_WIDTH),
            )?;
        Ok(Some(audience))
    }
}

impl HallTable {
    fn to_setup(&self) -> Result<HallSetup> {
        let mut hall = HallSetup::new(Polyline::new(self.boundary.clone()))?
            .with_aisles(polylines(&self.aisles))?
            .with_tunnels(polylines(&self.tunnels))?;
        if let Some(screen) = &self.screen {
            hall = hall.with_screen(ScreenSetup::new(Polyline::new(screen.clone()))?);
        }
        if let Some(projector) = self.projector {
            hall = hall.with_projector(ProjectorSetup::new(projector));
        }
        Ok(hall)
    }
}

fn polylines(points: &[Vec<DVec3>]) -> Vec<Polyline> {
    points.iter().cloned().map(Polyline::new).collect()
}

/// Everything needed to run one solve, built from a scenario file
#[derive(Debug, Clone)]
pub struct Scenario {
    pub tribune: TribuneSetup,
    pub stairs: StairSetup,
    pub railings: RailingSetup,
    pub request: SolveRequest,
    pub existing_tribune: Option<Polyline>,
    pub config: SolverConfig,
}

impl Scenario {
    /// Parse a scenario from a TOML string
    pub fn load_from_toml(content: &str) -> Result<Self> {
        let file: ScenarioFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    /// Load a scenario from a TOML file on disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_toml(&content)
    }

    fn from_file(file: ScenarioFile) -> Result<Self> {
        let table = &file.tribune;
        let tribune = TribuneSetup::new(
            table.rows,
            table.row_widths.clone(),
            table.elev_counts.clone(),
            table.stair_insets.clone(),
        )?;
        let stairs = StairSetup::new(file.stairs.tread_height, file.stairs.tread_width)?;
        let railings = RailingSetup::new(file.railings.height, file.railings.width)?;

        let audiences = file
            .audiences
            .iter()
            .map(AudienceTable::to_setup)
            .collect::<Result<Vec<_>>>()?;
        if !audiences.is_empty() && audiences.iter().all(Option::is_none) {
            tracing::debug!("All {} audience entries are unseated", audiences.len());
        }

        let mut request = SolveRequest::default()
            .with_railing_toggles(file.railing_toggles)
            .with_audience_slots(audiences)
            .with_audience_offsets(file.audience_offsets)
            .flipped(file.flip)
            .at_origin(file.origin.unwrap_or(DVec3::ZERO));
        if let Some(hall) = &file.hall {
            request = request.with_hall(hall.to_setup()?);
        }

        let existing_tribune = match file.existing_tribune {
            Some(points) if points.len() < 2 => {
                return Err(TribuneError::InsufficientPoints {
                    name: "existing_tribune".into(),
                    count: points.len(),
                    minimum: 2,
                })
            }
            Some(points) => Some(Polyline::new(points)),
            None => None,
        };

        tracing::debug!(
            rows = tribune.rows(),
            audiences = request.audiences.len(),
            hall = request.hall.is_some(),
            "Loaded scenario"
        );

        Ok(Self {
            tribune,
            stairs,
            railings,
            request,
            existing_tribune,
            config: file.config,
        })
    }

    pub fn solver(&self) -> TribuneSolver {
        TribuneSolver::with_config(
            self.tribune.clone(),
            self.stairs,
            self.railings,
            self.config.clone(),
        )
    }

    pub fn screen(&self) -> Option<&ScreenSetup> {
        self.request.hall.as_ref().and_then(HallSetup::screen)
    }

    pub fn projector(&self) -> Option<&ProjectorSetup> {
        self.request.hall.as_ref().and_then(HallSetup::projector)
    }

    /// The scenario as an optimization candidate
    pub fn candidate(&self) -> Candidate {
        let mut candidate = Candidate::new(self.tribune.clone(), self.stairs, self.railings);
        candidate.audiences = self.request.audiences.clone();
        candidate.screen = self.screen().cloned();
        candidate.projector = self.projector().copied();
        candidate.flip = self.request.flip;
        candidate.origin = self.request.origin;
        candidate.railing_toggles = self.request.railing_toggles.clone();
        candidate.audience_offsets = self.request.audience_offsets.clone();
        candidate.config = self.config.clone();
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
railing_toggles = [true, false]

[tribune]
rows = 4
row_widths = [80.0]
elev_counts = [2]

[stairs]
tread_height = 15.0
tread_width = 30.0

[railings]
height = 90.0
width = 5.0

[[audiences]]
eye = [40.0, 0.0, 110.0]
front_limit = 30.0

[config]
tolerance = 0.01
"#;

    #[test]
    fn test_load_minimal_scenario() {
        let scenario = Scenario::load_from_toml(MINIMAL).unwrap();
        assert_eq!(scenario.tribune.rows(), 4);
        assert_eq!(scenario.request.railing_toggles, vec![true, false]);
        assert_eq!(scenario.config.tolerance, 0.01);
        // untouched config keys keep their defaults
        assert_eq!(scenario.config.limit_line_overshoot, 50.0);

        let audience = scenario.request.audiences[0].as_ref().unwrap();
        assert_eq!(audience.front_limit(), 30.0);
        assert_eq!(
            audience.hard_back_limit(),
            AudienceSetup::DEFAULT_HARD_BACK_LIMIT
        );
        assert!(scenario.request.hall.is_none());
    }

    #[test]
    fn test_invalid_dimension_is_reported() {
        let broken = MINIMAL.replace("tread_height = 15.0", "tread_height = -1.0");
        assert!(matches!(
            Scenario::load_from_toml(&broken),
            Err(TribuneError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_open_hall_boundary_rejected() {
        let with_hall = format!(
            "{MINIMAL}\n[hall]\nboundary = [[0.0, 0.0, 0.0], [100.0, 0.0, 0.0], [100.0, 100.0, 0.0]]\n"
        );
        assert!(matches!(
            Scenario::load_from_toml(&with_hall),
            Err(TribuneError::OpenBoundary { .. })
        ));
    }

    #[test]
    fn test_all_unseated_scenario_solves_without_chairs() {
        let empty_hall = MINIMAL.replace("front_limit = 30.0", "front_limit = 30.0\nseated = false");
        let scenario = Scenario::load_from_toml(&empty_hall).unwrap();
        assert!(scenario.request.audiences.iter().all(Option::is_none));

        let solution = scenario.solver().solve(&scenario.request);
        assert_eq!(solution.section_chairs.len(), 4);
        assert!(solution.section_chairs.iter().all(Vec::is_empty));
        assert!(solution.section_chair_planes.iter().all(Option::is_none));
    }

    #[test]
    fn test_unknown_key_is_a_toml_error() {
        let typo = MINIMAL.replace("railing_toggles", "railing_toggle");
        assert!(matches!(
            Scenario::load_from_toml(&typo),
            Err(TribuneError::TomlError(_))
        ));
    }
}
