//! Class tallies and their derived statistics.

use serde::{Deserialize, Serialize};

use crate::{
    needed_classes, percentage, Needed, ProjectionError, ProjectionResult, Target,
    LOWER_THRESHOLD, UPPER_THRESHOLD,
};

/// Classes held and classes missed for one subject.
///
/// Invariant: `leaves_taken <= total_classes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    total_classes: u32,
    leaves_taken: u32,
}

impl Tally {
    /// Creates a tally, rejecting more leaves than classes.
    pub fn new(total_classes: u32, leaves_taken: u32) -> ProjectionResult<Self> {
        if leaves_taken > total_classes {
            return Err(ProjectionError::LeavesExceedTotal {
                total_classes,
                leaves_taken,
            });
        }
        Ok(Self {
            total_classes,
            leaves_taken,
        })
    }

    /// Total classes held.
    pub fn total_classes(&self) -> u32 {
        self.total_classes
    }

    /// Classes missed.
    pub fn leaves_taken(&self) -> u32 {
        self.leaves_taken
    }

    /// Classes attended.
    pub fn attended(&self) -> u32 {
        self.total_classes - self.leaves_taken
    }

    /// Records one more held class, counted as missed when `present` is false.
    pub fn record(&mut self, present: bool) -> ProjectionResult<()> {
        let total_classes = self
            .total_classes
            .checked_add(1)
            .ok_or(ProjectionError::Overflow)?;
        let leaves_taken = if present {
            self.leaves_taken
        } else {
            self.leaves_taken + 1
        };

        self.total_classes = total_classes;
        self.leaves_taken = leaves_taken;
        Ok(())
    }

    /// Current attendance percentage.
    pub fn percentage(&self) -> f64 {
        percentage(self.total_classes, self.attended())
    }

    /// Classes needed to reach an arbitrary target.
    pub fn needed_for(&self, target: Target) -> Needed {
        needed_classes(self.total_classes, self.attended(), target)
    }

    /// Computes every derived statistic for this tally.
    pub fn summary(&self) -> AttendanceSummary {
        let percentage = self.percentage();
        AttendanceSummary {
            total_classes: self.total_classes,
            leaves_taken: self.leaves_taken,
            classes_attended: self.attended(),
            percentage,
            needed_for_75: self.needed_for(Target::SEVENTY_FIVE),
            needed_for_85: self.needed_for(Target::EIGHTY_FIVE),
            standing: Standing::from_percentage(percentage),
        }
    }
}

/// How a percentage compares to the two fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Below 75%.
    Critical,
    /// At least 75% but below 85%.
    Warning,
    /// 85% or above.
    Safe,
}

impl Standing {
    /// Classifies a percentage.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= f64::from(UPPER_THRESHOLD) {
            Standing::Safe
        } else if percentage >= f64::from(LOWER_THRESHOLD) {
            Standing::Warning
        } else {
            Standing::Critical
        }
    }
}

/// Derived statistics for a tally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_classes: u32,
    pub leaves_taken: u32,
    pub classes_attended: u32,
    #[serde(rename = "current_attendance_percentage")]
    pub percentage: f64,
    #[serde(rename = "neededFor75")]
    pub needed_for_75: Needed,
    #[serde(rename = "neededFor85")]
    pub needed_for_85: Needed,
    pub standing: Standing,
}
