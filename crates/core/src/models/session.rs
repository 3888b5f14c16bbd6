use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::hhmm;
use crate::errors::CareError;
use crate::scheduling::calendar::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        }
    }

    /// Cancelled sessions are the only ones not charged.
    pub fn is_billable(&self) -> bool {
        !matches!(self, SessionStatus::Cancelled)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            "no_show" => Ok(SessionStatus::NoShow),
            other => Err(CareError::Validation(format!(
                "Unknown session status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub subscription_id: i64,
    pub session_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub session_time: NaiveTime,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A session produced by the generator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub subscription_id: i64,
    pub session_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub session_time: NaiveTime,
    pub status: SessionStatus,
}

/// Outcome of persisting a batch of drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub subscription_id: i64,
    pub drafted: usize,
    pub inserted: usize,
    /// Months left untouched because sessions already existed for them.
    pub skipped_months: Vec<YearMonth>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceUpdateRequest {
    pub status: SessionStatus,
    pub notes: Option<String>,
}

/// One line of the daily attendance roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub session_id: i64,
    pub subscription_id: i64,
    #[serde(with = "hhmm")]
    pub session_time: NaiveTime,
    pub status: SessionStatus,
    pub child_id: i64,
    pub child_name: String,
    pub service_name: String,
    pub notes: Option<String>,
}
