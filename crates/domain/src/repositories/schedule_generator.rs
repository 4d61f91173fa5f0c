use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::value_objects::schedule::{SchedulePrompt, ScheduledTaskModel};

/// Boundary to the hosted completion API. Single attempt, fail-fast: any
/// transport failure, absent tool call or schema mismatch is an error.
#[automock]
#[async_trait]
pub trait ScheduleGenerator {
    async fn generate(&self, prompt: SchedulePrompt) -> Result<Vec<ScheduledTaskModel>>;
}
