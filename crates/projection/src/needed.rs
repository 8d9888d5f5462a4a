//! Percentage and needed-classes computation.

use serde::{Deserialize, Serialize};

use crate::{ProjectionError, ProjectionResult, LOWER_THRESHOLD, UPPER_THRESHOLD};

/// A validated target percentage in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(u8);

impl Target {
    /// The 75% threshold.
    pub const SEVENTY_FIVE: Target = Target(LOWER_THRESHOLD);
    /// The 85% threshold.
    pub const EIGHTY_FIVE: Target = Target(UPPER_THRESHOLD);
    /// Full attendance; never reachable once a leave has been taken.
    pub const FULL: Target = Target(100);

    /// Creates a target, rejecting `0` and anything above `100`.
    pub fn new(percent: u32) -> ProjectionResult<Self> {
        match percent {
            1..=100 => Ok(Self(percent as u8)),
            _ => Err(ProjectionError::InvalidTarget(percent)),
        }
    }

    /// Returns the target as a whole percentage.
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Target {
    type Error = ProjectionError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

/// Outcome of a needed-classes projection.
///
/// Serializes as `{"status": "reached"}`, `{"status": "unreachable"}` or
/// `{"status": "needs", "classes": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "classes", rename_all = "snake_case")]
pub enum Needed {
    /// Current attendance already meets the target.
    Reached,
    /// The target cannot be met by attending more classes.
    Unreachable,
    /// Minimum number of consecutive attended classes to meet the target.
    Needs(u64),
}

/// Attendance percentage, `0.0` when no classes have been held.
pub fn percentage(total: u32, attended: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * f64::from(attended) / f64::from(total)
}

/// Minimum number of additional attended classes required to reach `target`.
///
/// Each additional class counts as both held and attended. The result is
/// minimal: attending `n` classes meets the target and `n - 1` does not.
/// `attended` is clamped to `total`.
pub fn needed_classes(total: u32, attended: u32, target: Target) -> Needed {
    let attended = u64::from(attended.min(total));
    let total = u64::from(total);
    let target = u64::from(target.percent());

    if total > 0 && attended * 100 >= target * total {
        return Needed::Reached;
    }
    if target == 100 {
        return Needed::Unreachable;
    }
    // One attended class on an empty tally gives 100%.
    if total == 0 {
        return Needed::Needs(1);
    }

    let deficit = target * total - 100 * attended;
    let gain = 100 - target;
    Needed::Needs(deficit.div_ceil(gain))
}
