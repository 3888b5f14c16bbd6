use async_trait::async_trait;
use daycare_core::{
    errors::CareResult,
    models::{
        session::{GenerationReport, SessionDraft},
        slot::ScheduleSlot,
        subscription::Subscription,
    },
};
use mockall::mock;

use crate::store::GenerationStore;

// Mock persistence collaborator for testing
mock! {
    pub GenerationStore {}

    #[async_trait]
    impl GenerationStore for GenerationStore {
        async fn find_subscription(&self, id: i64) -> CareResult<Option<Subscription>>;

        async fn find_slots(&self, ids: &[i64]) -> CareResult<Vec<ScheduleSlot>>;

        async fn insert_sessions(
            &self,
            subscription_id: i64,
            drafts: &[SessionDraft],
        ) -> CareResult<GenerationReport>;
    }
}
