use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{hhmm, parse_clock};
use crate::errors::{CareError, CareResult};
use crate::scheduling::conflict::SlotCandidate;

/// A recurring weekly time window, optionally restricted to one service.
///
/// `service_id = None` means the slot applies to every service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: i64,
    pub day_of_week: u8,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub service_id: Option<i64>,
    pub max_capacity: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_capacity() -> u32 {
    1
}

fn default_active() -> bool {
    true
}

/// Body of `POST /api/slots` and `PUT /api/slots/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub service_id: Option<i64>,
    #[serde(default = "default_capacity")]
    pub max_capacity: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SlotRequest {
    /// Validates the request and turns it into a conflict-check candidate.
    pub fn to_candidate(&self) -> CareResult<SlotCandidate> {
        if self.max_capacity < 1 {
            return Err(CareError::Validation(
                "max_capacity must be at least 1".to_string(),
            ));
        }
        let start_time = parse_clock(&self.start_time)?;
        let end_time = parse_clock(&self.end_time)?;
        SlotCandidate::new(self.day_of_week, start_time, end_time, self.service_id)
    }
}

/// Body of `POST /api/slots/check`: a dry-run conflict check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub service_id: Option<i64>,
    /// Slot being edited, ignored during the check.
    pub exclude_id: Option<i64>,
}

impl ConflictCheckRequest {
    pub fn to_candidate(&self) -> CareResult<SlotCandidate> {
        let candidate = SlotCandidate::new(
            self.day_of_week,
            parse_clock(&self.start_time)?,
            parse_clock(&self.end_time)?,
            self.service_id,
        )?;
        Ok(match self.exclude_id {
            Some(id) => candidate.excluding(id),
            None => candidate,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotFilter {
    pub day_of_week: Option<u8>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub conflict: bool,
    pub conflicting_slot_id: Option<i64>,
}
