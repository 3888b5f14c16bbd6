//! Conflict-checked slot writes.
//!
//! The day's active slots are read and the row is written inside one write
//! transaction, so two overlapping requests cannot both pass the check.

use daycare_core::{
    clock::{day_name, format_clock},
    errors::{CareError, CareResult},
    models::slot::ScheduleSlot,
    scheduling::conflict::{find_conflict, SlotCandidate},
};
use tracing::debug;

use crate::{repositories::slot, DbPool};

fn transaction_error(err: sqlx::Error) -> CareError {
    CareError::Database(err.into())
}

fn not_found(slot_id: i64) -> CareError {
    CareError::NotFound(format!("Slot with ID {} not found", slot_id))
}

/// Creates a slot (`slot_id == None`) or replaces slot `slot_id`.
///
/// Active slots are checked against the other active slots of the target day;
/// an overlap in an overlapping service scope fails with [`CareError::Conflict`]
/// and writes nothing. An inactive slot is stored without a check.
pub async fn save_slot(
    pool: &DbPool,
    slot_id: Option<i64>,
    candidate: &SlotCandidate,
    max_capacity: u32,
    is_active: bool,
) -> CareResult<ScheduleSlot> {
    let candidate = match slot_id {
        Some(id) => candidate.clone().excluding(id),
        None => candidate.clone(),
    };

    let mut tx = pool.begin().await.map_err(transaction_error)?;
    slot::lock_day(&mut *tx, candidate.day_of_week).await?;

    if let Some(id) = slot_id {
        if slot::get_slot_by_id(&mut *tx, id).await?.is_none() {
            return Err(not_found(id));
        }
    }

    if is_active {
        let existing = slot::get_active_slots_for_day(&mut *tx, candidate.day_of_week)
            .await?
            .into_iter()
            .map(ScheduleSlot::try_from)
            .collect::<CareResult<Vec<_>>>()?;

        if let Some(conflict) = find_conflict(&candidate, &existing) {
            return Err(CareError::Conflict(format!(
                "{} {}-{} overlaps slot {} ({}-{})",
                day_name(candidate.day_of_week),
                format_clock(candidate.start_time),
                format_clock(candidate.end_time),
                conflict.id,
                format_clock(conflict.start_time),
                format_clock(conflict.end_time)
            )));
        }
    }

    let row = match slot_id {
        Some(id) => slot::update_slot(&mut *tx, id, &candidate, max_capacity, is_active)
            .await?
            .ok_or_else(|| not_found(id))?,
        None => slot::create_slot(&mut *tx, &candidate, max_capacity, is_active).await?,
    };

    tx.commit().await.map_err(transaction_error)?;

    debug!("Saved slot {} on {}", row.id, day_name(candidate.day_of_week));
    ScheduleSlot::try_from(row)
}
