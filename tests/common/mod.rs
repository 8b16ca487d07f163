use postquota::{HookDispatcher, MemoryHost, QuotaEnforcer, UserId};
use std::sync::Arc;

pub const ADMIN: UserId = UserId(1);
pub const AUTHOR: UserId = UserId(42);

/// Installs a test subscriber once, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postquota=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Host with an administrator and an author, acting as the author
pub async fn site() -> (Arc<MemoryHost>, HookDispatcher) {
    init_tracing();
    let host = Arc::new(MemoryHost::with_actor(AUTHOR));
    host.grant_admin(ADMIN).await;
    let enforcer = Arc::new(QuotaEnforcer::new(host.clone()));
    (host, HookDispatcher::for_enforcer(enforcer))
}
