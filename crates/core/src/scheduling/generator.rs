//! Expands a subscription's weekly schedule into dated sessions.
//!
//! For each month of the generation window every day of the month is walked; a day
//! whose weekday has a slot assigned yields one [`SessionDraft`]. The session time is
//! the assigned slot's start time, or the injected [`DefaultTimeTable`] entry for that
//! weekday when the slot is unknown.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::clock::{day_of_week, format_clock, parse_clock};
use crate::errors::{CareError, CareResult};
use crate::models::session::{SessionDraft, SessionStatus};
use crate::models::slot::ScheduleSlot;
use crate::models::subscription::Subscription;
use crate::scheduling::calendar::month_window;

pub const DEFAULT_MONTHS_TO_GENERATE: u32 = 3;

/// Fallback session start time per weekday, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTimeTable([NaiveTime; 7]);

impl DefaultTimeTable {
    pub fn new(times: [NaiveTime; 7]) -> Self {
        Self(times)
    }

    /// Parses seven comma-separated `HH:MM` values, Sunday first.
    pub fn parse(raw: &str) -> CareResult<Self> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        if parts.len() != 7 {
            return Err(CareError::Validation(format!(
                "expected 7 default session times, got {}",
                parts.len()
            )));
        }
        let mut times = [NaiveTime::MIN; 7];
        for (slot, part) in times.iter_mut().zip(parts) {
            *slot = parse_clock(part)?;
        }
        Ok(Self(times))
    }

    pub fn time_for(&self, day_of_week: u8) -> NaiveTime {
        self.0[(day_of_week % 7) as usize]
    }

    pub fn to_config_string(&self) -> String {
        self.0
            .iter()
            .map(|time| format_clock(*time))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for DefaultTimeTable {
    fn default() -> Self {
        let at = |hour, minute| NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        Self([
            at(9, 0),
            at(7, 0),
            at(7, 30),
            at(8, 0),
            at(8, 30),
            at(7, 0),
            at(9, 0),
        ])
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionGenerator {
    defaults: DefaultTimeTable,
}

impl SessionGenerator {
    pub fn new(defaults: DefaultTimeTable) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &DefaultTimeTable {
        &self.defaults
    }

    /// Drafts for `months` consecutive months starting at the subscription's start month.
    ///
    /// A schedule with no assignment yields no drafts regardless of the window.
    /// `slots` only needs to contain the slots the schedule references; missing ones
    /// fall back to the default time.
    pub fn generate_sessions(
        &self,
        subscription: &Subscription,
        slots: &[ScheduleSlot],
        months: u32,
    ) -> CareResult<Vec<SessionDraft>> {
        let schedule = &subscription.weekly_schedule;
        if !schedule.has_any_assignment() {
            return Ok(Vec::new());
        }

        let slot_times: HashMap<i64, NaiveTime> =
            slots.iter().map(|slot| (slot.id, slot.start_time)).collect();

        let mut drafts = Vec::new();
        for period in month_window(subscription.start_month, subscription.start_year, months)? {
            for date in period.days()? {
                let day = day_of_week(date);
                let Some(slot_id) = schedule.slot_for(day) else {
                    continue;
                };
                let session_time = slot_times
                    .get(&slot_id)
                    .copied()
                    .unwrap_or_else(|| self.defaults.time_for(day));
                drafts.push(SessionDraft {
                    subscription_id: subscription.id,
                    session_date: date,
                    session_time,
                    status: SessionStatus::Scheduled,
                });
            }
        }
        Ok(drafts)
    }
}
