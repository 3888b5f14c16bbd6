use crate::models::{DbRosterEntry, DbSession};
use chrono::{NaiveDate, Utc};
use daycare_core::{
    clock::format_clock,
    models::session::{SessionDraft, SessionStatus},
    scheduling::calendar::YearMonth,
};
use eyre::Result;
use sqlx::{Executor, Pool, Sqlite};

const SESSION_COLUMNS: &str =
    "id, subscription_id, session_date, session_time, status, notes, created_at";

/// Inserts one generated session.
///
/// Returns the raw `sqlx::Error` so callers can tell a duplicate
/// `(subscription_id, session_date)` apart from other failures.
pub async fn insert_session<'e, E>(executor: E, draft: &SessionDraft) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO sessions (subscription_id, session_date, session_time, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id
        "#,
    )
    .bind(draft.subscription_id)
    .bind(draft.session_date)
    .bind(format_clock(draft.session_time))
    .bind(draft.status.as_str())
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(id)
}

pub async fn count_sessions_in_period<'e, E>(
    executor: E,
    subscription_id: i64,
    first_day: NaiveDate,
    last_day: NaiveDate,
) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM sessions
        WHERE subscription_id = ?1 AND session_date BETWEEN ?2 AND ?3
        "#,
    )
    .bind(subscription_id)
    .bind(first_day)
    .bind(last_day)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub async fn get_session_by_id(pool: &Pool<Sqlite>, id: i64) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(&format!(
        "SELECT {} FROM sessions WHERE id = ?1",
        SESSION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn get_sessions_by_subscription(
    pool: &Pool<Sqlite>,
    subscription_id: i64,
) -> Result<Vec<DbSession>> {
    let sessions = sqlx::query_as::<_, DbSession>(&format!(
        r#"
        SELECT {}
        FROM sessions
        WHERE subscription_id = ?1
        ORDER BY session_date ASC
        "#,
        SESSION_COLUMNS
    ))
    .bind(subscription_id)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Every session of every subscription within `period`.
pub async fn get_sessions_in_period(
    pool: &Pool<Sqlite>,
    period: YearMonth,
) -> Result<Vec<DbSession>> {
    let (first_day, last_day) = (period.first_day()?, period.last_day()?);

    let sessions = sqlx::query_as::<_, DbSession>(&format!(
        r#"
        SELECT {}
        FROM sessions
        WHERE session_date BETWEEN ?1 AND ?2
        ORDER BY subscription_id ASC, session_date ASC
        "#,
        SESSION_COLUMNS
    ))
    .bind(first_day)
    .bind(last_day)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// `(subscription_id, session_rate_cents)` for subscriptions with sessions in `period`.
pub async fn get_rates_for_period(
    pool: &Pool<Sqlite>,
    period: YearMonth,
) -> Result<Vec<(i64, i64)>> {
    let (first_day, last_day) = (period.first_day()?, period.last_day()?);

    let rates = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT DISTINCT sub.id, sv.session_rate_cents
        FROM sessions s
        JOIN subscriptions sub ON sub.id = s.subscription_id
        JOIN services sv ON sv.id = sub.service_id
        WHERE s.session_date BETWEEN ?1 AND ?2
        ORDER BY sub.id ASC
        "#,
    )
    .bind(first_day)
    .bind(last_day)
    .fetch_all(pool)
    .await?;

    Ok(rates)
}

pub async fn update_attendance(
    pool: &Pool<Sqlite>,
    id: i64,
    status: SessionStatus,
    notes: Option<&str>,
) -> Result<Option<DbSession>> {
    tracing::debug!("Updating attendance: session={}, status={}", id, status);

    let session = sqlx::query_as::<_, DbSession>(&format!(
        r#"
        UPDATE sessions
        SET status = ?2, notes = COALESCE(?3, notes)
        WHERE id = ?1
        RETURNING {}
        "#,
        SESSION_COLUMNS
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(notes)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Sessions on `date` with child and service names, ordered by time.
pub async fn get_roster_for_date(
    pool: &Pool<Sqlite>,
    date: NaiveDate,
) -> Result<Vec<DbRosterEntry>> {
    let roster = sqlx::query_as::<_, DbRosterEntry>(
        r#"
        SELECT s.id AS session_id, s.subscription_id, s.session_time, s.status, s.notes,
               c.id AS child_id, c.first_name, c.last_name, sv.name AS service_name
        FROM sessions s
        JOIN subscriptions sub ON sub.id = s.subscription_id
        JOIN children c ON c.id = sub.child_id
        JOIN services sv ON sv.id = sub.service_id
        WHERE s.session_date = ?1
        ORDER BY s.session_time ASC, c.last_name ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(roster)
}
