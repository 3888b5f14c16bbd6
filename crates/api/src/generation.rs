//! # Session Generation
//!
//! Orchestrates one generation run for a subscription:
//!
//! 1. Load the subscription snapshot through the [`GenerationStore`]
//! 2. Refuse subscriptions that are not active
//! 3. Short-circuit when the weekly schedule has no assignment
//! 4. Resolve the referenced slots (unknown slots fall back to default times)
//! 5. Expand the schedule with the [`SessionGenerator`]
//! 6. Hand the drafts back to the store, which skips months already generated

use daycare_core::{
    clock::{day_name, format_clock},
    errors::{CareError, CareResult},
    models::{
        session::GenerationReport, subscription::SubscriptionStatus,
        weekly_schedule::has_any_assignment,
    },
    scheduling::generator::SessionGenerator,
};
use daycare_db::store::GenerationStore;
use tracing::{info, warn};

pub async fn generate_for_subscription(
    store: &dyn GenerationStore,
    generator: &SessionGenerator,
    subscription_id: i64,
    months: u32,
) -> CareResult<GenerationReport> {
    let subscription = store
        .find_subscription(subscription_id)
        .await?
        .ok_or_else(|| {
            CareError::NotFound(format!("Subscription with ID {} not found", subscription_id))
        })?;

    if subscription.status != SubscriptionStatus::Active {
        return Err(CareError::Validation(format!(
            "Subscription {} is {}, sessions are only generated for active subscriptions",
            subscription_id, subscription.status
        )));
    }

    if !has_any_assignment(&subscription.weekly_schedule) {
        info!("Subscription {} has no weekly assignment, nothing to generate", subscription_id);
        return Ok(GenerationReport {
            subscription_id,
            ..GenerationReport::default()
        });
    }

    let slots = store
        .find_slots(&subscription.weekly_schedule.slot_ids())
        .await?;

    for (day, slot_id) in subscription.weekly_schedule.assignments() {
        if !slots.iter().any(|slot| slot.id == slot_id) {
            warn!(
                "Subscription {}: slot {} assigned on {} no longer exists, using default time {}",
                subscription_id,
                slot_id,
                day_name(day),
                format_clock(generator.defaults().time_for(day))
            );
        }
    }

    let drafts = generator.generate_sessions(&subscription, &slots, months)?;
    let report = store.insert_sessions(subscription_id, &drafts).await?;

    info!(
        "Generated sessions for subscription {}: {} drafted, {} inserted, {} month(s) skipped",
        subscription_id,
        report.drafted,
        report.inserted,
        report.skipped_months.len()
    );

    Ok(report)
}
