use crate::models::DbSubscription;
use chrono::Utc;
use daycare_core::models::{subscription::SubscriptionStatus, weekly_schedule::WeeklySchedule};
use eyre::Result;
use sqlx::{Executor, Pool, Sqlite};

const SUBSCRIPTION_COLUMNS: &str = "id, child_id, service_id, weekly_schedule, start_month, \
                                    start_year, status, created_at, updated_at";

pub async fn create_subscription(
    pool: &Pool<Sqlite>,
    child_id: i64,
    service_id: i64,
    weekly_schedule: &WeeklySchedule,
    start_month: u32,
    start_year: i32,
) -> Result<DbSubscription> {
    let now = Utc::now();

    tracing::debug!(
        "Creating subscription: child_id={}, service_id={}, start={}-{:02}, schedule={}",
        child_id,
        service_id,
        start_year,
        start_month,
        weekly_schedule
    );

    let subscription = sqlx::query_as::<_, DbSubscription>(&format!(
        r#"
        INSERT INTO subscriptions
            (child_id, service_id, weekly_schedule, start_month, start_year, status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6, ?6)
        RETURNING {}
        "#,
        SUBSCRIPTION_COLUMNS
    ))
    .bind(child_id)
    .bind(service_id)
    .bind(weekly_schedule.to_json())
    .bind(i64::from(start_month))
    .bind(i64::from(start_year))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(subscription)
}

pub async fn get_subscription_by_id(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<Option<DbSubscription>> {
    tracing::debug!("Getting subscription by id: {}", id);

    let subscription = sqlx::query_as::<_, DbSubscription>(&format!(
        "SELECT {} FROM subscriptions WHERE id = ?1",
        SUBSCRIPTION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

pub async fn list_subscriptions(pool: &Pool<Sqlite>) -> Result<Vec<DbSubscription>> {
    let subscriptions = sqlx::query_as::<_, DbSubscription>(&format!(
        "SELECT {} FROM subscriptions ORDER BY id ASC",
        SUBSCRIPTION_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(subscriptions)
}

/// Takes the database write lock for session generation on subscription `id`.
///
/// Must be the first statement of the transaction: SQLite waits on `busy_timeout`
/// for the write lock only while the transaction has not read yet. Returns false
/// when the subscription does not exist. Touches no column values.
pub async fn lock_subscription<'e, E>(executor: E, id: i64) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE subscriptions SET updated_at = updated_at WHERE id = ?1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_weekly_schedule(
    pool: &Pool<Sqlite>,
    id: i64,
    weekly_schedule: &WeeklySchedule,
) -> Result<Option<DbSubscription>> {
    let subscription = sqlx::query_as::<_, DbSubscription>(&format!(
        r#"
        UPDATE subscriptions
        SET weekly_schedule = ?2, updated_at = ?3
        WHERE id = ?1
        RETURNING {}
        "#,
        SUBSCRIPTION_COLUMNS
    ))
    .bind(id)
    .bind(weekly_schedule.to_json())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

pub async fn update_status(
    pool: &Pool<Sqlite>,
    id: i64,
    status: SubscriptionStatus,
) -> Result<Option<DbSubscription>> {
    let subscription = sqlx::query_as::<_, DbSubscription>(&format!(
        r#"
        UPDATE subscriptions
        SET status = ?2, updated_at = ?3
        WHERE id = ?1
        RETURNING {}
        "#,
        SUBSCRIPTION_COLUMNS
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}
