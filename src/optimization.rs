//! Layout fitness for external optimizer loops
//!
//! `evaluate` solves and analyses one parameter set and folds sightline
//! clearances and projector interference into a single score. Higher is
//! better. Every call is independent; nothing is cached between candidates.

use glam::DVec3;

use crate::analysis::{Analysis, AnalysisResult};
use crate::core::{FitnessWeights, SolverConfig};
use crate::setup::{AudienceSetup, ProjectorSetup, RailingSetup, ScreenSetup, StairSetup, TribuneSetup};
use crate::solver::{SolveRequest, TribuneSolver};

/// One point of the parameter space
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub tribune: TribuneSetup,
    pub stairs: StairSetup,
    pub railings: RailingSetup,
    pub audiences: Vec<Option<AudienceSetup>>,
    pub screen: Option<ScreenSetup>,
    pub projector: Option<ProjectorSetup>,
    pub flip: bool,
    pub origin: DVec3,
    pub railing_toggles: Vec<bool>,
    pub audience_offsets: Vec<f64>,
    pub config: SolverConfig,
}

impl Candidate {
    pub fn new(tribune: TribuneSetup, stairs: StairSetup, railings: RailingSetup) -> Self {
        Self {
            tribune,
            stairs,
            railings,
            audiences: Vec::new(),
            screen: None,
            projector: None,
            flip: false,
            origin: DVec3::ZERO,
            railing_toggles: Vec::new(),
            audience_offsets: Vec::new(),
            config: SolverConfig::default(),
        }
    }

    pub fn with_audiences(mut self, audiences: Vec<AudienceSetup>) -> Self {
        self.audiences = audiences.into_iter().map(Some).collect();
        self
    }

    pub fn with_screen(mut self, screen: ScreenSetup) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn with_projector(mut self, projector: ProjectorSetup) -> Self {
        self.projector = Some(projector);
        self
    }

    fn request(&self) -> SolveRequest {
        SolveRequest::default()
            .with_railing_toggles(self.railing_toggles.clone())
            .with_audience_slots(self.audiences.clone())
            .with_audience_offsets(self.audience_offsets.clone())
            .flipped(self.flip)
            .at_origin(self.origin)
    }
}

/// Fitness of `candidate` (higher is better)
pub fn evaluate(candidate: &Candidate) -> f64 {
    let weights = &candidate.config.fitness;
    let solver = TribuneSolver::with_config(
        candidate.tribune.clone(),
        candidate.stairs,
        candidate.railings,
        candidate.config.clone(),
    );
    let solution = solver.solve(&candidate.request());
    if solution.tribune.is_empty() {
        return weights.invalid_layout;
    }

    let analysis = Analysis::with_config(candidate.config.clone()).calculate(
        &candidate.audiences,
        &solution.tribune,
        candidate.screen.as_ref(),
        candidate.projector.as_ref(),
        &candidate.audience_offsets,
    );

    let fitness = score(&analysis, solution.tribune.rows(), weights);
    tracing::debug!(fitness, rows = solution.tribune.rows(), "Evaluated candidate");
    fitness
}

/// Score an analysed layout of `rows` rows.
///
/// Row `i`'s sightline is compared against row `i - 1`'s eye; rows missing
/// either are skipped and earn no bonus.
pub fn score(analysis: &AnalysisResult, rows: usize, weights: &FitnessWeights) -> f64 {
    if rows == 0 {
        return weights.invalid_layout;
    }

    let mut fitness = 0.0;
    for row in 1..rows {
        let (Some(front), Some(current)) = (analysis.eye(row - 1), analysis.eye(row)) else {
            continue;
        };
        let Some(sightline) = current.sightline else {
            continue;
        };

        let t = sightline.closest_parameter(front.eye);
        let clearance = sightline.point_at(t).z - front.eye.z;
        if clearance < 0.0 {
            fitness -= weights.blocked_penalty * clearance.abs();
        } else {
            fitness += weights.clearance_reward * clearance;
        }
        fitness += weights.row_bonus;
    }

    if let Some(cone) = &analysis.projector_cone {
        for eye in analysis.eye_points() {
            if cone.distance_to(eye) < weights.projector_clearance {
                fitness -= weights.projector_penalty;
            }
        }
    }

    fitness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RowEye;
    use crate::geometry::{Line, PlanarFace};

    fn row_eye(row: usize, eye: DVec3, target: DVec3) -> RowEye {
        RowEye {
            row,
            eye,
            sightline: Some(Line::new(eye, target)),
        }
    }

    #[test]
    fn test_clear_and_blocked_rows() {
        let target = DVec3::new(-1000.0, 0.0, 0.0);
        let analysis = AnalysisResult {
            eyes: vec![
                row_eye(0, DVec3::new(0.0, 0.0, 100.0), target),
                // passes 10 above row 0's eye: 0.1 of the way at 110 -> z=110
                row_eye(1, DVec3::new(100.0, 0.0, 121.0), target),
            ],
            ..AnalysisResult::default()
        };
        let fitness = score(&analysis, 2, &FitnessWeights::default());
        assert!(fitness > 100.0);

        let blocked = AnalysisResult {
            eyes: vec![
                row_eye(0, DVec3::new(0.0, 0.0, 100.0), target),
                row_eye(1, DVec3::new(100.0, 0.0, 100.0), target),
            ],
            ..AnalysisResult::default()
        };
        assert!(score(&blocked, 2, &FitnessWeights::default()) < 100.0);
    }

    #[test]
    fn test_zero_rows_is_invalid() {
        let weights = FitnessWeights::default();
        assert_eq!(score(&AnalysisResult::default(), 0, &weights), -10000.0);
    }

    #[test]
    fn test_eye_in_projector_beam_penalized() {
        let eye = DVec3::new(50.0, 0.0, 50.0);
        let analysis = AnalysisResult {
            eyes: vec![RowEye {
                row: 0,
                eye,
                sightline: None,
            }],
            projector_cone: PlanarFace::from_loop(
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(100.0, 0.0, 100.0),
                DVec3::new(100.0, 0.0, 0.0),
                1e-3,
            ),
            ..AnalysisResult::default()
        };
        assert_eq!(score(&analysis, 1, &FitnessWeights::default()), -50000.0);
    }
}
