//! Stateless calculator: solve a tally from partial information.

use serde::{Deserialize, Serialize};

use crate::{ProjectionError, ProjectionResult, Tally};

/// A calculator question, tagged by `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculatorQuery {
    /// Known classes and leaves.
    Percentage { total_classes: u32, leaves_taken: u32 },
    /// Known leaves and current percentage; solve for classes held.
    TotalClasses { leaves_taken: u32, percentage: f64 },
    /// Known classes and current percentage; solve for leaves.
    Leaves { total_classes: u32, percentage: f64 },
}

/// Solves a calculator query into a tally.
pub fn solve(query: CalculatorQuery) -> ProjectionResult<Tally> {
    match query {
        CalculatorQuery::Percentage {
            total_classes,
            leaves_taken,
        } => Tally::new(total_classes, leaves_taken),
        CalculatorQuery::TotalClasses {
            leaves_taken,
            percentage,
        } => {
            if !(0.0..100.0).contains(&percentage) {
                return Err(ProjectionError::InvalidPercentage(percentage));
            }
            let total = (100.0 * f64::from(leaves_taken) / (100.0 - percentage)).ceil();
            if total > f64::from(u32::MAX) {
                return Err(ProjectionError::Overflow);
            }
            Tally::new(total as u32, leaves_taken)
        }
        CalculatorQuery::Leaves {
            total_classes,
            percentage,
        } => {
            if !(0.0..=100.0).contains(&percentage) {
                return Err(ProjectionError::InvalidPercentage(percentage));
            }
            let attended = (f64::from(total_classes) * percentage / 100.0).round() as u32;
            Tally::new(total_classes, total_classes - attended.min(total_classes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_percentage_mode() {
        let tally = solve(CalculatorQuery::Percentage {
            total_classes: 40,
            leaves_taken: 10,
        })
        .unwrap();
        assert_eq!(tally.attended(), 30);
    }

    #[test]
    fn test_solve_total_classes() {
        // 10 leaves at 75% means 40 classes held.
        let tally = solve(CalculatorQuery::TotalClasses {
            leaves_taken: 10,
            percentage: 75.0,
        })
        .unwrap();
        assert_eq!(tally.total_classes(), 40);
        assert_eq!(tally.attended(), 30);
    }

    #[test]
    fn test_solve_total_classes_rejects_full() {
        let result = solve(CalculatorQuery::TotalClasses {
            leaves_taken: 1,
            percentage: 100.0,
        });
        assert_eq!(result, Err(ProjectionError::InvalidPercentage(100.0)));
    }

    #[test]
    fn test_solve_leaves() {
        let tally = solve(CalculatorQuery::Leaves {
            total_classes: 40,
            percentage: 80.0,
        })
        .unwrap();
        assert_eq!(tally.leaves_taken(), 8);
    }

    #[test]
    fn test_solve_leaves_rounds_attended() {
        // 7 * 0.5 = 3.5 attended rounds to 4.
        let tally = solve(CalculatorQuery::Leaves {
            total_classes: 7,
            percentage: 50.0,
        })
        .unwrap();
        assert_eq!(tally.attended(), 4);
    }

    #[test]
    fn test_query_deserialization() {
        let query: CalculatorQuery =
            serde_json::from_str(r#"{"mode":"leaves","total_classes":20,"percentage":90}"#)
                .unwrap();
        assert_eq!(
            query,
            CalculatorQuery::Leaves {
                total_classes: 20,
                percentage: 90.0
            }
        );
    }
}
