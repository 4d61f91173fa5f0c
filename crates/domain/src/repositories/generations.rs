use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::value_objects::schedule::GenerationPersistOutcome;

#[automock]
#[async_trait]
pub trait GenerationRepository {
    /// Persists one successful generation in a single transaction: when
    /// `charge_credit` is set, the caller's balance is decremented only if
    /// still positive (zero affected rows aborts with `CreditsExhausted` and
    /// nothing is written); the serialized schedule is appended to the
    /// response log and `last_active_at` is touched.
    async fn record_success(
        &self,
        user_id: Uuid,
        content: String,
        charge_credit: bool,
    ) -> Result<GenerationPersistOutcome>;

    async fn count_total(&self) -> Result<i64>;
}
