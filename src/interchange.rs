//! JSON interchange records
//!
//! `PlanRecord` carries a hall footprint between tool invocations;
//! `SerializedAnalysis` bundles a solved tribune with what is needed to
//! re-run the analysis on it later.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::analysis::{Analysis, AnalysisResult};
use crate::core::{Result, SolverConfig, TribuneError};
use crate::geometry::{Line, Polyline};
use crate::setup::{AudienceSetup, HallSetup, ProjectorSetup, ScreenSetup};
use crate::solver::{SerializedTribune, TribuneSolution};

pub const PLAN_SCHEMA_VERSION: &str = "1.0";

/// Plan boundaries of a hall, positioned at `origin_plan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub schema_version: String,
    pub origin_plan: DVec3,
    pub tolerance: f64,
    pub boundary_tribune: Polyline,
    #[serde(default)]
    pub boundaries_aisles: Vec<Polyline>,
    #[serde(default)]
    pub boundaries_tunnels: Vec<Polyline>,
}

impl PlanRecord {
    pub fn from_hall(origin: DVec3, hall: &HallSetup, tolerance: f64) -> Self {
        Self {
            schema_version: PLAN_SCHEMA_VERSION.to_string(),
            origin_plan: origin,
            tolerance,
            boundary_tribune: hall.tribune_boundary().clone(),
            boundaries_aisles: hall.aisle_boundaries().to_vec(),
            boundaries_tunnels: hall.tunnel_boundaries().to_vec(),
        }
    }

    /// Rebuild a hall setup; boundaries go through the usual closure checks
    pub fn to_hall(&self) -> Result<HallSetup> {
        HallSetup::new(self.boundary_tribune.clone())?
            .with_aisles(self.boundaries_aisles.clone())?
            .with_tunnels(self.boundaries_tunnels.clone())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let record: PlanRecord = serde_json::from_str(json)?;
        if record.schema_version != PLAN_SCHEMA_VERSION {
            return Err(TribuneError::UnsupportedSchema(record.schema_version));
        }
        Ok(record)
    }
}

/// A solved tribune plus the audiences, sightlines and offsets it was
/// analysed with
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerializedAnalysis {
    pub tribune: SerializedTribune,
    #[serde(default)]
    pub audiences: Vec<Option<AudienceSetup>>,
    #[serde(default)]
    pub sightlines: Vec<Line>,
    #[serde(default)]
    pub offsets: Vec<f64>,
}

impl SerializedAnalysis {
    pub fn new(solution: &TribuneSolution, analysis: &AnalysisResult) -> Self {
        Self {
            tribune: solution.tribune.clone(),
            audiences: solution.audiences.clone(),
            sightlines: analysis.sightlines().copied().collect(),
            offsets: solution.audience_offsets.clone(),
        }
    }

    /// Run the analysis again on the stored tribune
    pub fn reanalyse(
        &self,
        screen: Option<&ScreenSetup>,
        projector: Option<&ProjectorSetup>,
        config: &SolverConfig,
    ) -> AnalysisResult {
        Analysis::with_config(config.clone()).calculate(
            &self.audiences,
            &self.tribune,
            screen,
            projector,
            &self.offsets,
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hall() -> HallSetup {
        let square = |x0: f64, y0: f64, size: f64| {
            Polyline::closed(vec![
                DVec3::new(x0, y0, 0.0),
                DVec3::new(x0 + size, y0, 0.0),
                DVec3::new(x0 + size, y0 + size, 0.0),
                DVec3::new(x0, y0 + size, 0.0),
            ])
        };
        HallSetup::new(square(0.0, 0.0, 1000.0))
            .unwrap()
            .with_aisles(vec![square(0.0, 400.0, 200.0)])
            .unwrap()
    }

    #[test]
    fn test_plan_record_json_keeps_boundaries() {
        let record = PlanRecord::from_hall(DVec3::new(10.0, 20.0, 0.0), &hall(), 0.001);
        let json = record.to_json().unwrap();
        assert!(json.contains("\"schema_version\": \"1.0\""));

        let parsed = PlanRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
        let rebuilt = parsed.to_hall().unwrap();
        assert_eq!(rebuilt.aisle_boundaries().len(), 1);
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let mut record = PlanRecord::from_hall(DVec3::ZERO, &hall(), 0.001);
        record.schema_version = "2.0".into();
        let json = serde_json::to_string(&record).unwrap();
        assert!(matches!(
            PlanRecord::from_json(&json),
            Err(TribuneError::UnsupportedSchema(v)) if v == "2.0"
        ));
    }
}
