//! Weekly slot conflict detection.
//!
//! Two slots conflict when all of the following hold:
//!
//! - both are active and fall on the same `day_of_week`
//! - their half-open intervals overlap: `s1 < e2 && s2 < e1`
//! - their service scopes overlap: same service, or either side has no service
//!
//! A slot ending at 10:00 and another starting at 10:00 do not conflict.

use chrono::NaiveTime;

use crate::clock::{format_clock, validate_day_of_week};
use crate::errors::{CareError, CareResult};
use crate::models::slot::ScheduleSlot;

/// A proposed slot, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCandidate {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service_id: Option<i64>,
    /// Slot being edited; it never conflicts with itself.
    pub exclude_id: Option<i64>,
}

impl SlotCandidate {
    pub fn new(
        day_of_week: u8,
        start_time: NaiveTime,
        end_time: NaiveTime,
        service_id: Option<i64>,
    ) -> CareResult<Self> {
        let day_of_week = validate_day_of_week(day_of_week)?;
        if start_time >= end_time {
            return Err(CareError::Validation(format!(
                "start_time {} must be before end_time {}",
                format_clock(start_time),
                format_clock(end_time)
            )));
        }
        Ok(Self {
            day_of_week,
            start_time,
            end_time,
            service_id,
            exclude_id: None,
        })
    }

    pub fn excluding(mut self, slot_id: i64) -> Self {
        self.exclude_id = Some(slot_id);
        self
    }

    /// The candidate describing an existing slot's own window.
    pub fn from_slot(slot: &ScheduleSlot) -> Self {
        Self {
            day_of_week: slot.day_of_week,
            start_time: slot.start_time,
            end_time: slot.end_time,
            service_id: slot.service_id,
            exclude_id: Some(slot.id),
        }
    }
}

pub fn intervals_overlap(
    start_a: NaiveTime,
    end_a: NaiveTime,
    start_b: NaiveTime,
    end_b: NaiveTime,
) -> bool {
    start_a < end_b && start_b < end_a
}

/// `None` is a wildcard scope and overlaps every service.
pub fn scopes_overlap(service_a: Option<i64>, service_b: Option<i64>) -> bool {
    match (service_a, service_b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

pub fn conflicts_with(candidate: &SlotCandidate, slot: &ScheduleSlot) -> bool {
    slot.is_active
        && candidate.exclude_id != Some(slot.id)
        && slot.day_of_week == candidate.day_of_week
        && scopes_overlap(candidate.service_id, slot.service_id)
        && intervals_overlap(
            candidate.start_time,
            candidate.end_time,
            slot.start_time,
            slot.end_time,
        )
}

/// First existing slot the candidate collides with, if any.
pub fn find_conflict<'a>(
    candidate: &SlotCandidate,
    existing: &'a [ScheduleSlot],
) -> Option<&'a ScheduleSlot> {
    existing.iter().find(|slot| conflicts_with(candidate, slot))
}

pub fn has_conflict(candidate: &SlotCandidate, existing: &[ScheduleSlot]) -> bool {
    find_conflict(candidate, existing).is_some()
}
