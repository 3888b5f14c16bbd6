use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};
use crate::models::weekly_schedule::WeeklySchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "paused" => Ok(SubscriptionStatus::Paused),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            other => Err(CareError::Validation(format!(
                "Unknown subscription status '{}'",
                other
            ))),
        }
    }
}

/// A child's enrolment in one service with a weekly slot pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub child_id: i64,
    pub service_id: i64,
    pub weekly_schedule: WeeklySchedule,
    pub start_month: u32,
    pub start_year: i32,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub child_id: i64,
    pub service_id: i64,
    pub weekly_schedule: WeeklySchedule,
    pub start_month: u32,
    pub start_year: i32,
}

impl CreateSubscriptionRequest {
    pub fn validate(&self) -> CareResult<()> {
        validate_start(self.start_month, self.start_year)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWeeklyScheduleRequest {
    pub weekly_schedule: WeeklySchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionStatusRequest {
    pub status: SubscriptionStatus,
}

pub fn validate_start(start_month: u32, start_year: i32) -> CareResult<()> {
    if !(1..=12).contains(&start_month) {
        return Err(CareError::Validation(format!(
            "start_month must be between 1 and 12, got {}",
            start_month
        )));
    }
    if !(2000..=2100).contains(&start_year) {
        return Err(CareError::Validation(format!(
            "start_year {} is out of range",
            start_year
        )));
    }
    Ok(())
}
