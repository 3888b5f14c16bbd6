//! Monthly statements: billable sessions multiplied by the service's per-session rate.

use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};
use crate::models::session::{Session, SessionStatus};
use crate::scheduling::calendar::YearMonth;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatement {
    pub subscription_id: i64,
    pub period: YearMonth,
    pub scheduled: usize,
    pub completed: usize,
    pub no_show: usize,
    pub cancelled: usize,
    pub billable_sessions: usize,
    pub rate_cents: i64,
    pub total_cents: i64,
}

impl MonthlyStatement {
    /// Sessions outside `period` or belonging to another subscription are ignored.
    /// A total that does not fit in `i64` cents is a [`CareError::Validation`].
    pub fn compute(
        subscription_id: i64,
        period: YearMonth,
        rate_cents: i64,
        sessions: &[Session],
    ) -> CareResult<Self> {
        let mut statement = Self {
            subscription_id,
            period,
            scheduled: 0,
            completed: 0,
            no_show: 0,
            cancelled: 0,
            billable_sessions: 0,
            rate_cents,
            total_cents: 0,
        };

        for session in sessions
            .iter()
            .filter(|s| s.subscription_id == subscription_id && period.contains(s.session_date))
        {
            match session.status {
                SessionStatus::Scheduled => statement.scheduled += 1,
                SessionStatus::Completed => statement.completed += 1,
                SessionStatus::NoShow => statement.no_show += 1,
                SessionStatus::Cancelled => statement.cancelled += 1,
            }
            if session.status.is_billable() {
                statement.billable_sessions += 1;
            }
        }

        statement.total_cents = i64::try_from(statement.billable_sessions)
            .ok()
            .and_then(|count| count.checked_mul(rate_cents))
            .ok_or_else(|| {
                CareError::Validation(format!(
                    "{} sessions at {} cents overflow the statement total for subscription {}",
                    statement.billable_sessions, rate_cents, subscription_id
                ))
            })?;
        Ok(statement)
    }
}

/// Center-wide totals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSummary {
    pub period: YearMonth,
    pub statements: Vec<MonthlyStatement>,
    pub billable_sessions: usize,
    pub total_cents: i64,
}

impl BillingSummary {
    pub fn from_statements(
        period: YearMonth,
        mut statements: Vec<MonthlyStatement>,
    ) -> CareResult<Self> {
        statements.retain(|s| s.period == period);
        statements.sort_by_key(|s| s.subscription_id);
        let billable_sessions = statements.iter().map(|s| s.billable_sessions).sum();
        let total_cents = statements
            .iter()
            .try_fold(0i64, |total, s| total.checked_add(s.total_cents))
            .ok_or_else(|| {
                CareError::Validation(format!("Billing total for {} overflows", period))
            })?;
        Ok(Self {
            period,
            statements,
            billable_sessions,
            total_cents,
        })
    }
}
