//! Composite validator that runs every tribune check

use glam::DVec3;
use serde::Serialize;

use super::{ChairClearanceValidator, ClashValidator, StairLandingValidator, ValidationIssue};
use crate::core::SolverConfig;
use crate::solver::TribuneSolution;

/// Result of running all validators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub landing_lengths: Vec<f64>,
    /// `(row, clearance)` for every seated row
    pub chair_clearances: Vec<(usize, f64)>,
    /// Per-row C-values; `None` means the check was not evaluated
    pub c_values: Option<Vec<f64>>,
    #[serde(skip)]
    pub issues: Vec<ValidationIssue>,
    pub clash_points: Vec<DVec3>,
    pub passed_landings: bool,
    pub passed_clearances: bool,
    pub passed_clash: bool,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            landing_lengths: Vec::new(),
            chair_clearances: Vec::new(),
            c_values: None,
            issues: Vec::new(),
            clash_points: Vec::new(),
            passed_landings: true,
            passed_clearances: true,
            passed_clash: true,
        }
    }

    pub fn add_landing_issues(&mut self, issues: Vec<ValidationIssue>) {
        if !issues.is_empty() {
            self.passed_landings = false;
            self.is_valid = false;
            self.issues.extend(issues);
        }
    }

    pub fn add_clearance_issues(&mut self, issues: Vec<ValidationIssue>) {
        if !issues.is_empty() {
            self.passed_clearances = false;
            self.is_valid = false;
            self.issues.extend(issues);
        }
    }

    pub fn add_clash_issues(&mut self, issues: Vec<ValidationIssue>) {
        if !issues.is_empty() {
            self.passed_clash = false;
            self.is_valid = false;
            self.issues.extend(issues);
        }
    }

    /// Human-readable form of every issue, in check order
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    pub fn c_values_evaluated(&self) -> bool {
        self.c_values.is_some()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TribuneValidator {
    config: SolverConfig,
}

impl TribuneValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn validate(&self, solution: &TribuneSolution) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.landing_lengths = StairLandingValidator::landing_lengths(&solution.tribune);
        report.add_landing_issues(StairLandingValidator::validate_landings(
            &report.landing_lengths,
        ));

        report.chair_clearances = ChairClearanceValidator::clearances(
            &solution.tribune,
            &solution.audiences,
            &solution.audience_offsets,
        );
        report.add_clearance_issues(ChairClearanceValidator::validate_clearances(
            &report.chair_clearances,
        ));

        if let Some(existing) = &solution.existing_tribune_profile {
            let (issues, points) = ClashValidator::validate_chairs(
                &solution.section_chairs,
                existing,
                self.config.tolerance,
            );
            report.clash_points = points;
            report.add_clash_issues(issues);
        }

        // No per-row C-value criterion is defined for whole layouts; the
        // standalone SightlineAnalysis covers individual seats.
        report.c_values = None;

        tracing::debug!(
            issues = report.issues.len(),
            clash_points = report.clash_points.len(),
            "Validated tribune"
        );
        report
    }
}
