//! Helpers for building seeded hosts in tests and benchmarks

use crate::host::{MemoryHost, UserMetaStore};
use crate::model::{ContentStatus, MetaValue, UserId};
use crate::{QuotaConfig, Result};
use std::sync::Arc;

/// Creates a host acting as `author`, with `limit` stored and `published`
/// items of the default content type already authored
pub async fn seeded_host(
    author: UserId,
    limit: Option<u64>,
    published: u64,
) -> Result<Arc<MemoryHost>> {
    let host = Arc::new(MemoryHost::with_actor(author));
    if let Some(limit) = limit {
        let key = QuotaConfig::default().limit_key;
        host.set_meta(author, &key, MetaValue::Int(limit as i64)).await?;
    }
    for _ in 0..published {
        host.add_item(author, "post", ContentStatus::Publish).await;
    }
    Ok(host)
}
