use async_trait::async_trait;

use crate::{ApiError, EntityType};

#[async_trait]
pub trait EntityTypesClient: Send + Sync {
    /// Short client name for log output.
    fn name(&self) -> &str;

    /// Create `entity_type` under the agent at `parent`
    /// (e.g. `projects/my-project/agent`).
    ///
    /// Returns the entity type as stored by the server, including its
    /// assigned resource name.  Implementations issue exactly one request
    /// per call and never retry.
    async fn create_entity_type(
        &self,
        parent: &str,
        entity_type: &EntityType,
    ) -> Result<EntityType, ApiError>;
}
