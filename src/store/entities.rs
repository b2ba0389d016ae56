use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::time::day_of;

/// One drink of water. Immutable once written; events are only ever appended
/// or deleted in bulk by calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeEvent {
    pub id: Uuid,
    /// Volume in the unit configured in [Settings::units].
    pub amount: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl IntakeEvent {
    pub fn new(amount: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            timestamp,
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Day file this event belongs to.
    pub fn day(&self) -> NaiveDate {
        day_of(self.timestamp_ms())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Oz,
    Ml,
}

impl Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Oz => write!(f, "oz"),
            Units::Ml => write!(f, "ml"),
        }
    }
}

pub const MIN_REMINDER_INTERVAL_HOURS: u8 = 1;
pub const MAX_REMINDER_INTERVAL_HOURS: u8 = 6;

/// The singleton user preferences record. Saved wholesale; fields that are
/// absent in the stored document fall back to the defaults below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub daily_goal: u32,
    pub units: Units,
    pub reminders_enabled: bool,
    pub reminder_interval_hours: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: 2000,
            units: Units::Oz,
            reminders_enabled: true,
            reminder_interval_hours: 2,
        }
    }
}

impl Settings {
    /// Forces the reminder interval into its supported range. Applied both on
    /// load and on save so an edited document can't take the daemon outside
    /// [1, 6] hours.
    pub fn clamped(mut self) -> Self {
        self.reminder_interval_hours = self
            .reminder_interval_hours
            .clamp(MIN_REMINDER_INTERVAL_HOURS, MAX_REMINDER_INTERVAL_HOURS);
        self
    }
}
