//! Stair landing validation

use super::ValidationIssue;
use crate::solver::SerializedTribune;

pub struct StairLandingValidator;

impl StairLandingValidator {
    /// Landing length in front of every flight: flight start X minus the
    /// previous flight's end X (0 for the first flight). Local frame.
    pub fn landing_lengths(tribune: &SerializedTribune) -> Vec<f64> {
        tribune
            .flight_start_x
            .iter()
            .enumerate()
            .map(|(r, &start)| {
                let reference = match r {
                    0 => 0.0,
                    _ => tribune.flight_end_x.get(r - 1).copied().unwrap_or(0.0),
                };
                start - reference
            })
            .collect()
    }

    pub fn validate_landings(landings: &[f64]) -> Vec<ValidationIssue> {
        landings
            .iter()
            .enumerate()
            .filter(|(_, &landing)| landing < 0.0)
            .map(|(row, &landing)| ValidationIssue::NegativeLanding { row, landing })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landings_from_flight_positions() {
        let tribune = SerializedTribune {
            flight_start_x: vec![50.0, 130.0, 150.0],
            flight_end_x: vec![80.0, 160.0, 180.0],
            ..SerializedTribune::default()
        };
        let landings = StairLandingValidator::landing_lengths(&tribune);
        assert_eq!(landings, vec![50.0, 50.0, -10.0]);

        let issues = StairLandingValidator::validate_landings(&landings);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "Row 2 Stair Landing Negative: -10.0");
    }

    #[test]
    fn test_no_flights_no_landings() {
        let landings = StairLandingValidator::landing_lengths(&SerializedTribune::default());
        assert!(landings.is_empty());
        assert!(StairLandingValidator::validate_landings(&landings).is_empty());
    }
}
