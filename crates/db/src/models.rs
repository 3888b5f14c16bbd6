//! Row types as stored in SQLite, and their conversion into domain models.
//!
//! Times are `HH:MM` text, dates ISO text, and small integers are read as `i64`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use daycare_core::{
    clock::parse_clock,
    errors::CareError,
    models::{
        child::Child,
        service::Service,
        session::{RosterEntry, Session},
        slot::ScheduleSlot,
        subscription::Subscription,
        weekly_schedule::WeeklySchedule,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub session_rate_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbChild {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub guardian_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleSlot {
    pub id: i64,
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    pub service_id: Option<i64>,
    pub max_capacity: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubscription {
    pub id: i64,
    pub child_id: i64,
    pub service_id: i64,
    pub weekly_schedule: String,
    pub start_month: i64,
    pub start_year: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub id: i64,
    pub subscription_id: i64,
    pub session_date: NaiveDate,
    pub session_time: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRosterEntry {
    pub session_id: i64,
    pub subscription_id: i64,
    pub session_time: String,
    pub status: String,
    pub notes: Option<String>,
    pub child_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub service_name: String,
}

fn narrow<T: TryFrom<i64>>(field: &str, value: i64) -> Result<T, CareError> {
    T::try_from(value)
        .map_err(|_| CareError::Validation(format!("stored {} {} is out of range", field, value)))
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            description: row.description,
            session_rate_cents: row.session_rate_cents,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

impl From<DbChild> for Child {
    fn from(row: DbChild) -> Self {
        Child {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            birthdate: row.birthdate,
            guardian_email: row.guardian_email,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbScheduleSlot> for ScheduleSlot {
    type Error = CareError;

    fn try_from(row: DbScheduleSlot) -> Result<Self, Self::Error> {
        Ok(ScheduleSlot {
            id: row.id,
            day_of_week: narrow("day_of_week", row.day_of_week)?,
            start_time: parse_clock(&row.start_time)?,
            end_time: parse_clock(&row.end_time)?,
            service_id: row.service_id,
            max_capacity: narrow("max_capacity", row.max_capacity)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbSubscription> for Subscription {
    type Error = CareError;

    /// Fails with [`CareError::MalformedSchedule`] when the stored JSON is invalid.
    fn try_from(row: DbSubscription) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: row.id,
            child_id: row.child_id,
            service_id: row.service_id,
            weekly_schedule: WeeklySchedule::from_json(&row.weekly_schedule)?,
            start_month: narrow("start_month", row.start_month)?,
            start_year: narrow("start_year", row.start_year)?,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbSession> for Session {
    type Error = CareError;

    fn try_from(row: DbSession) -> Result<Self, Self::Error> {
        Ok(Session {
            id: row.id,
            subscription_id: row.subscription_id,
            session_date: row.session_date,
            session_time: parse_clock(&row.session_time)?,
            status: row.status.parse()?,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbRosterEntry> for RosterEntry {
    type Error = CareError;

    fn try_from(row: DbRosterEntry) -> Result<Self, Self::Error> {
        Ok(RosterEntry {
            session_id: row.session_id,
            subscription_id: row.subscription_id,
            session_time: parse_clock(&row.session_time)?,
            status: row.status.parse()?,
            child_id: row.child_id,
            child_name: format!("{} {}", row.first_name, row.last_name),
            service_name: row.service_name,
            notes: row.notes,
        })
    }
}
