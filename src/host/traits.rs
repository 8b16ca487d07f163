use crate::model::{Capability, ContentStatus, MetaValue, UserId};
use async_trait::async_trait;

/// Failure reported by a host collaborator
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Metadata store unavailable: {0}")]
    Unavailable(String),
    #[error("Host error: {0}")]
    Other(String),
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Per-user key/value metadata owned by the host
///
/// Keys are strings and values are scalars. An absent key reads as `None`.
#[async_trait]
pub trait UserMetaStore: Send + Sync {
    /// Reads a single value
    async fn get_meta(&self, user: UserId, key: &str) -> HostResult<Option<MetaValue>>;

    /// Writes a value, replacing any previous one
    async fn set_meta(&self, user: UserId, key: &str, value: MetaValue) -> HostResult<()>;

    /// Removes a value; removing an absent key is not an error
    async fn delete_meta(&self, user: UserId, key: &str) -> HostResult<()>;

    /// Writes a value only if the key is absent, returns whether it was written
    async fn add_meta_once(&self, user: UserId, key: &str, value: MetaValue) -> HostResult<bool>;
}

/// Read access to the host's content index
#[async_trait]
pub trait ContentIndex: Send + Sync {
    /// Counts items by `author` of `content_type`, skipping `exclude` statuses
    async fn count_items(
        &self,
        author: UserId,
        content_type: &str,
        exclude: &[ContentStatus],
    ) -> HostResult<u64>;
}

/// Authentication context and permission model of the current request
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// User on whose behalf the request runs
    async fn current_actor_id(&self) -> HostResult<UserId>;

    /// Whether the actor holds `capability`, optionally scoped to `target`
    async fn current_actor_can(
        &self,
        capability: Capability,
        target: Option<UserId>,
    ) -> HostResult<bool>;
}

/// Everything the enforcer needs from its host
pub trait Host: UserMetaStore + ContentIndex + AccessControl {}

impl<T> Host for T where T: UserMetaStore + ContentIndex + AccessControl {}
