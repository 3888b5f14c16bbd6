//! Persistence collaborator for session generation.
//!
//! The generator in `daycare-core` is pure; this trait is what the API layer talks
//! to when it needs a subscription snapshot, the slots it references, and a place
//! to put the resulting drafts.

use std::collections::BTreeMap;

use async_trait::async_trait;
use daycare_core::{
    errors::{CareError, CareResult},
    models::{
        session::{GenerationReport, SessionDraft},
        slot::ScheduleSlot,
        subscription::Subscription,
    },
    scheduling::calendar::YearMonth,
};
use tracing::{debug, warn};

use crate::{
    repositories::{session, slot, subscription},
    DbPool,
};

#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Loads a subscription, parsing its stored weekly schedule.
    ///
    /// A stored schedule that is not valid JSON of the expected shape yields
    /// [`CareError::MalformedSchedule`].
    async fn find_subscription(&self, id: i64) -> CareResult<Option<Subscription>>;

    /// Slots with the given ids. Unknown ids are left out.
    async fn find_slots(&self, ids: &[i64]) -> CareResult<Vec<ScheduleSlot>>;

    /// Persists drafts for one subscription in a single transaction.
    ///
    /// Months that already hold at least one session for the subscription are
    /// skipped and listed in the report. A duplicate row racing in from another
    /// writer rolls everything back with [`CareError::AlreadyGenerated`].
    async fn insert_sessions(
        &self,
        subscription_id: i64,
        drafts: &[SessionDraft],
    ) -> CareResult<GenerationReport>;
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn classify_insert_error(subscription_id: i64, draft: &SessionDraft, err: sqlx::Error) -> CareError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            CareError::AlreadyGenerated(format!(
                "subscription {} already has a session on {}",
                subscription_id, draft.session_date
            ))
        }
        // SQLITE_BUSY_SNAPSHOT: another writer committed after this transaction read.
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("517") => {
            CareError::AlreadyGenerated(format!(
                "subscription {} was generated concurrently",
                subscription_id
            ))
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            CareError::NotFound(format!("Subscription with ID {} not found", subscription_id))
        }
        _ => CareError::Database(err.into()),
    }
}

fn transaction_error(err: sqlx::Error) -> CareError {
    CareError::Database(err.into())
}

#[async_trait]
impl GenerationStore for SqliteStore {
    async fn find_subscription(&self, id: i64) -> CareResult<Option<Subscription>> {
        subscription::get_subscription_by_id(&self.pool, id)
            .await?
            .map(Subscription::try_from)
            .transpose()
    }

    async fn find_slots(&self, ids: &[i64]) -> CareResult<Vec<ScheduleSlot>> {
        slot::get_slots_by_ids(&self.pool, ids)
            .await?
            .into_iter()
            .map(ScheduleSlot::try_from)
            .collect()
    }

    async fn insert_sessions(
        &self,
        subscription_id: i64,
        drafts: &[SessionDraft],
    ) -> CareResult<GenerationReport> {
        if let Some(stray) = drafts.iter().find(|d| d.subscription_id != subscription_id) {
            return Err(CareError::Validation(format!(
                "draft for subscription {} passed to subscription {}",
                stray.subscription_id, subscription_id
            )));
        }

        let mut by_month: BTreeMap<YearMonth, Vec<&SessionDraft>> = BTreeMap::new();
        for draft in drafts {
            by_month
                .entry(YearMonth::of(draft.session_date))
                .or_default()
                .push(draft);
        }

        let mut report = GenerationReport {
            subscription_id,
            drafted: drafts.len(),
            ..GenerationReport::default()
        };

        let mut tx = self.pool.begin().await.map_err(transaction_error)?;

        // Write lock first, so a concurrent run for the same subscription waits and
        // then sees this run's months as already generated.
        if !subscription::lock_subscription(&mut *tx, subscription_id).await? {
            return Err(CareError::NotFound(format!(
                "Subscription with ID {} not found",
                subscription_id
            )));
        }

        for (period, batch) in by_month {
            let existing = session::count_sessions_in_period(
                &mut *tx,
                subscription_id,
                period.first_day()?,
                period.last_day()?,
            )
            .await?;

            if existing > 0 {
                warn!(
                    "Subscription {} already has {} sessions in {}, skipping month",
                    subscription_id, existing, period
                );
                report.skipped_months.push(period);
                continue;
            }

            for draft in batch {
                session::insert_session(&mut *tx, draft)
                    .await
                    .map_err(|e| classify_insert_error(subscription_id, draft, e))?;
                report.inserted += 1;
            }
        }

        tx.commit().await.map_err(transaction_error)?;

        debug!(
            "Persisted {} of {} drafted sessions for subscription {}",
            report.inserted, report.drafted, subscription_id
        );
        Ok(report)
    }
}
