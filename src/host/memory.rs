use super::traits::{AccessControl, ContentIndex, HostResult, UserMetaStore};
use crate::model::{Capability, ContentStatus, MetaValue, UserId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredItem {
    id: u64,
    author: UserId,
    content_type: String,
    status: ContentStatus,
}

#[derive(Debug, Default)]
struct State {
    actor: Option<UserId>,
    meta: HashMap<(UserId, String), MetaValue>,
    items: Vec<StoredItem>,
    grants: HashMap<UserId, HashSet<Capability>>,
    forbidden_targets: HashMap<UserId, HashSet<UserId>>,
}

/// In-memory host
///
/// Holds user metadata, content items, the current actor and granted
/// capabilities. Useful for embedding the enforcer in tools and for tests.
///
/// # Examples
///
/// ```
/// use postquota::host::{MemoryHost, UserMetaStore};
/// use postquota::{MetaValue, UserId};
///
/// # tokio_test::block_on(async {
/// let host = MemoryHost::with_actor(UserId(7));
/// host.set_meta(UserId(7), "post_limit", MetaValue::Int(2)).await.unwrap();
/// assert_eq!(
///     host.get_meta(UserId(7), "post_limit").await.unwrap(),
///     Some(MetaValue::Int(2))
/// );
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: RwLock<State>,
    next_item_id: AtomicU64,
    count_queries: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host whose requests run on behalf of `actor`
    pub fn with_actor(actor: UserId) -> Self {
        Self {
            state: RwLock::new(State {
                actor: Some(actor),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Switches the user the following requests run as
    pub async fn set_actor(&self, actor: UserId) {
        self.state.write().await.actor = Some(actor);
    }

    /// Grants `capability` to `user` for every target
    pub async fn grant(&self, user: UserId, capability: Capability) {
        self.state
            .write()
            .await
            .grants
            .entry(user)
            .or_default()
            .insert(capability);
    }

    /// Grants the capabilities an administrator holds
    pub async fn grant_admin(&self, user: UserId) {
        self.grant(user, Capability::EditUsers).await;
        self.grant(user, Capability::EditUser).await;
    }

    /// Denies `user` the right to edit `target` even when `EditUser` is granted
    pub async fn forbid_target(&self, user: UserId, target: UserId) {
        self.state
            .write()
            .await
            .forbidden_targets
            .entry(user)
            .or_default()
            .insert(target);
    }

    /// Stores a new content item and returns its ID
    pub async fn add_item(
        &self,
        author: UserId,
        content_type: &str,
        status: ContentStatus,
    ) -> u64 {
        let id = self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.items.push(StoredItem {
            id,
            author,
            content_type: content_type.to_string(),
            status,
        });
        id
    }

    /// Moves an item to the trash, returns false if it doesn't exist
    pub async fn trash_item(&self, id: u64) -> bool {
        let mut state = self.state.write().await;
        match state.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.status = ContentStatus::Trash;
                true
            }
            None => false,
        }
    }

    /// Number of `count_items` calls served so far
    pub fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserMetaStore for MemoryHost {
    async fn get_meta(&self, user: UserId, key: &str) -> HostResult<Option<MetaValue>> {
        Ok(self
            .state
            .read()
            .await
            .meta
            .get(&(user, key.to_string()))
            .cloned())
    }

    async fn set_meta(&self, user: UserId, key: &str, value: MetaValue) -> HostResult<()> {
        self.state
            .write()
            .await
            .meta
            .insert((user, key.to_string()), value);
        Ok(())
    }

    async fn delete_meta(&self, user: UserId, key: &str) -> HostResult<()> {
        self.state.write().await.meta.remove(&(user, key.to_string()));
        Ok(())
    }

    async fn add_meta_once(&self, user: UserId, key: &str, value: MetaValue) -> HostResult<bool> {
        let mut state = self.state.write().await;
        let slot = (user, key.to_string());
        if state.meta.contains_key(&slot) {
            return Ok(false);
        }
        state.meta.insert(slot, value);
        Ok(true)
    }
}

#[async_trait]
impl ContentIndex for MemoryHost {
    async fn count_items(
        &self,
        author: UserId,
        content_type: &str,
        exclude: &[ContentStatus],
    ) -> HostResult<u64> {
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        let count = state
            .items
            .iter()
            .filter(|item| item.author == author && item.content_type == content_type)
            .filter(|item| !exclude.contains(&item.status))
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl AccessControl for MemoryHost {
    async fn current_actor_id(&self) -> HostResult<UserId> {
        // Anonymous requests run as user 0, like most hosts do
        Ok(self.state.read().await.actor.unwrap_or(UserId(0)))
    }

    async fn current_actor_can(
        &self,
        capability: Capability,
        target: Option<UserId>,
    ) -> HostResult<bool> {
        let state = self.state.read().await;
        let Some(actor) = state.actor else {
            return Ok(false);
        };
        let granted = state
            .grants
            .get(&actor)
            .is_some_and(|caps| caps.contains(&capability));
        let forbidden = target.is_some_and(|target| {
            state
                .forbidden_targets
                .get(&actor)
                .is_some_and(|targets| targets.contains(&target))
        });
        Ok(granted && !forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_meta_once_keeps_first_value() {
        let host = MemoryHost::new();
        let user = UserId(1);

        assert!(host.add_meta_once(user, "flag", MetaValue::Bool(true)).await.unwrap());
        assert!(!host.add_meta_once(user, "flag", MetaValue::Int(5)).await.unwrap());
        assert_eq!(
            host.get_meta(user, "flag").await.unwrap(),
            Some(MetaValue::Bool(true))
        );
    }

    #[tokio::test]
    async fn test_count_skips_excluded_statuses_and_other_types() {
        let host = MemoryHost::new();
        let author = UserId(3);
        host.add_item(author, "post", ContentStatus::Publish).await;
        host.add_item(author, "post", ContentStatus::Draft).await;
        let trashed = host.add_item(author, "post", ContentStatus::Publish).await;
        host.add_item(author, "page", ContentStatus::Publish).await;
        host.add_item(UserId(4), "post", ContentStatus::Publish).await;
        assert!(host.trash_item(trashed).await);

        let count = host
            .count_items(author, "post", &[ContentStatus::Trash])
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(host.count_queries(), 1);
    }

    #[tokio::test]
    async fn test_permissions_respect_forbidden_targets() {
        let host = MemoryHost::with_actor(UserId(1));
        host.grant_admin(UserId(1)).await;
        host.forbid_target(UserId(1), UserId(9)).await;

        assert!(host.current_actor_can(Capability::EditUsers, None).await.unwrap());
        assert!(host
            .current_actor_can(Capability::EditUser, Some(UserId(2)))
            .await
            .unwrap());
        assert!(!host
            .current_actor_can(Capability::EditUser, Some(UserId(9)))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_anonymous_actor_has_no_capabilities() {
        let host = MemoryHost::new();
        assert_eq!(host.current_actor_id().await.unwrap(), UserId(0));
        assert!(!host.current_actor_can(Capability::EditUsers, None).await.unwrap());
    }
}
