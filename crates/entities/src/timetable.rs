//! Weekly timetable grid.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Day of the week, serialized lowercase (`"monday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Every day, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        f.write_str(name)
    }
}

/// Errors raised when building or editing a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// A day has the wrong number of slots.
    #[error("{day} has {actual} periods, expected {expected}")]
    DayLength {
        day: Weekday,
        expected: usize,
        actual: usize,
    },

    /// A period index past the end of the day.
    #[error("Period {period} is out of range (periods per day: {periods_per_day})")]
    PeriodOutOfRange { period: usize, periods_per_day: usize },
}

/// Wire form of a timetable: weekday name to slot array.
pub type TimetableDays = BTreeMap<Weekday, Vec<Option<Uuid>>>;

/// Fixed-size grid mapping `(weekday, period)` to an optional record ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TimetableDays", try_from = "TimetableDays")]
pub struct Timetable {
    periods_per_day: usize,
    slots: Vec<Option<Uuid>>,
}

impl Timetable {
    /// Creates a timetable with every slot empty.
    pub fn empty(periods_per_day: usize) -> Self {
        Self {
            periods_per_day,
            slots: vec![None; periods_per_day * Weekday::ALL.len()],
        }
    }

    /// Builds a timetable from per-day slot arrays.
    ///
    /// Days that are absent stay empty. Days that are present must have
    /// exactly `periods_per_day` slots.
    pub fn from_days(days: TimetableDays, periods_per_day: usize) -> Result<Self, TimetableError> {
        let mut timetable = Self::empty(periods_per_day);

        for (day, slots) in days {
            if slots.len() != periods_per_day {
                return Err(TimetableError::DayLength {
                    day,
                    expected: periods_per_day,
                    actual: slots.len(),
                });
            }
            let start = day.index() * periods_per_day;
            timetable.slots[start..start + periods_per_day].copy_from_slice(&slots);
        }

        Ok(timetable)
    }

    /// Number of periods in each day.
    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }

    /// Slots for one day.
    pub fn day(&self, day: Weekday) -> &[Option<Uuid>] {
        let start = day.index() * self.periods_per_day;
        &self.slots[start..start + self.periods_per_day]
    }

    /// Assigns or clears a slot.
    pub fn set(
        &mut self,
        day: Weekday,
        period: usize,
        record_id: Option<Uuid>,
    ) -> Result<(), TimetableError> {
        if period >= self.periods_per_day {
            return Err(TimetableError::PeriodOutOfRange {
                period,
                periods_per_day: self.periods_per_day,
            });
        }
        self.slots[day.index() * self.periods_per_day + period] = record_id;
        Ok(())
    }

    /// Every record ID referenced by the grid, in slot order.
    pub fn record_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Empties every slot pointing at `record_id`, returning how many changed.
    pub fn clear_record(&mut self, record_id: Uuid) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut().filter(|slot| **slot == Some(record_id)) {
            *slot = None;
            cleared += 1;
        }
        cleared
    }

    /// Returns a copy resized to `periods_per_day`, truncating or padding each day.
    pub fn conform(&self, periods_per_day: usize) -> Self {
        if periods_per_day == self.periods_per_day {
            return self.clone();
        }

        let mut resized = Self::empty(periods_per_day);
        for day in Weekday::ALL {
            let start = day.index() * periods_per_day;
            for (offset, slot) in self.day(day).iter().take(periods_per_day).enumerate() {
                resized.slots[start + offset] = *slot;
            }
        }
        resized
    }
}

impl From<Timetable> for TimetableDays {
    fn from(timetable: Timetable) -> Self {
        Weekday::ALL
            .into_iter()
            .map(|day| (day, timetable.day(day).to_vec()))
            .collect()
    }
}

impl TryFrom<TimetableDays> for Timetable {
    type Error = TimetableError;

    fn try_from(days: TimetableDays) -> Result<Self, Self::Error> {
        let periods_per_day = days.values().map(Vec::len).max().unwrap_or(0);
        Self::from_days(days, periods_per_day)
    }
}
