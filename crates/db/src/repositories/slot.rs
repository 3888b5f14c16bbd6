use crate::models::DbScheduleSlot;
use chrono::Utc;
use daycare_core::{
    clock::format_clock, models::slot::SlotFilter, scheduling::conflict::SlotCandidate,
};
use eyre::Result;
use sqlx::{Executor, Pool, QueryBuilder, Sqlite};

const SLOT_COLUMNS: &str = "id, day_of_week, start_time, end_time, service_id, max_capacity, \
                            is_active, created_at, updated_at";

pub async fn create_slot<'e, E>(
    executor: E,
    candidate: &SlotCandidate,
    max_capacity: u32,
    is_active: bool,
) -> Result<DbScheduleSlot>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    tracing::debug!(
        "Creating slot: day={}, {}-{}, service_id={:?}",
        candidate.day_of_week,
        format_clock(candidate.start_time),
        format_clock(candidate.end_time),
        candidate.service_id
    );

    let slot = sqlx::query_as::<_, DbScheduleSlot>(&format!(
        r#"
        INSERT INTO schedule_slots
            (day_of_week, start_time, end_time, service_id, max_capacity, is_active, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        RETURNING {}
        "#,
        SLOT_COLUMNS
    ))
    .bind(i64::from(candidate.day_of_week))
    .bind(format_clock(candidate.start_time))
    .bind(format_clock(candidate.end_time))
    .bind(candidate.service_id)
    .bind(i64::from(max_capacity))
    .bind(is_active)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(slot)
}

pub async fn get_slot_by_id<'e, E>(executor: E, id: i64) -> Result<Option<DbScheduleSlot>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let slot = sqlx::query_as::<_, DbScheduleSlot>(&format!(
        "SELECT {} FROM schedule_slots WHERE id = ?1",
        SLOT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(slot)
}

/// Slots matching the given ids, in id order. Unknown ids are simply absent.
pub async fn get_slots_by_ids(pool: &Pool<Sqlite>, ids: &[i64]) -> Result<Vec<DbScheduleSlot>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM schedule_slots WHERE id IN (", SLOT_COLUMNS));
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id ASC");

    let slots = builder
        .build_query_as::<DbScheduleSlot>()
        .fetch_all(pool)
        .await?;

    Ok(slots)
}

/// Takes the database write lock for a slot write on `day_of_week`.
///
/// Must be the first statement of the transaction. SQLite only waits on
/// `busy_timeout` for the write lock while the transaction has not read yet, so
/// taking it up front serializes concurrent slot writers instead of failing them
/// with a stale snapshot. Touches no column values.
pub async fn lock_day<'e, E>(executor: E, day_of_week: u8) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE schedule_slots SET is_active = is_active WHERE day_of_week = ?1")
        .bind(i64::from(day_of_week))
        .execute(executor)
        .await?;

    Ok(())
}

/// Every active slot on `day_of_week`, the input of the conflict check.
pub async fn get_active_slots_for_day<'e, E>(
    executor: E,
    day_of_week: u8,
) -> Result<Vec<DbScheduleSlot>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let slots = sqlx::query_as::<_, DbScheduleSlot>(&format!(
        r#"
        SELECT {}
        FROM schedule_slots
        WHERE day_of_week = ?1 AND is_active = 1
        ORDER BY start_time ASC
        "#,
        SLOT_COLUMNS
    ))
    .bind(i64::from(day_of_week))
    .fetch_all(executor)
    .await?;

    Ok(slots)
}

/// Active slots, optionally narrowed by day and service. Filtering by service
/// includes the all-services slots.
pub async fn list_slots(pool: &Pool<Sqlite>, filter: &SlotFilter) -> Result<Vec<DbScheduleSlot>> {
    let slots = sqlx::query_as::<_, DbScheduleSlot>(&format!(
        r#"
        SELECT {}
        FROM schedule_slots
        WHERE is_active = 1
          AND (?1 IS NULL OR day_of_week = ?1)
          AND (?2 IS NULL OR service_id = ?2 OR service_id IS NULL)
        ORDER BY day_of_week ASC, start_time ASC
        "#,
        SLOT_COLUMNS
    ))
    .bind(filter.day_of_week.map(i64::from))
    .bind(filter.service_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn update_slot<'e, E>(
    executor: E,
    id: i64,
    candidate: &SlotCandidate,
    max_capacity: u32,
    is_active: bool,
) -> Result<Option<DbScheduleSlot>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let slot = sqlx::query_as::<_, DbScheduleSlot>(&format!(
        r#"
        UPDATE schedule_slots
        SET day_of_week = ?2, start_time = ?3, end_time = ?4, service_id = ?5,
            max_capacity = ?6, is_active = ?7, updated_at = ?8
        WHERE id = ?1
        RETURNING {}
        "#,
        SLOT_COLUMNS
    ))
    .bind(id)
    .bind(i64::from(candidate.day_of_week))
    .bind(format_clock(candidate.start_time))
    .bind(format_clock(candidate.end_time))
    .bind(candidate.service_id)
    .bind(i64::from(max_capacity))
    .bind(is_active)
    .bind(Utc::now())
    .fetch_optional(executor)
    .await?;

    Ok(slot)
}

/// Marks a slot inactive. Returns false when no slot has that id.
pub async fn deactivate_slot(pool: &Pool<Sqlite>, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE schedule_slots
        SET is_active = 0, updated_at = ?2
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
