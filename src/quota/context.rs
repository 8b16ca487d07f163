use crate::model::UserId;
use std::collections::HashMap;

/// Request-scoped memo of quota lookups
///
/// Built once per inbound request and dropped with it. Entries are keyed by
/// user so evaluating a target user never reuses the actor's numbers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    actor: UserId,
    limits: HashMap<UserId, Option<u64>>,
    counts: HashMap<UserId, u64>,
}

impl RequestContext {
    pub fn new(actor: UserId) -> Self {
        Self {
            actor,
            limits: HashMap::new(),
            counts: HashMap::new(),
        }
    }

    /// User the request runs on behalf of
    pub fn actor(&self) -> UserId {
        self.actor
    }

    pub fn cached_limit(&self, user: UserId) -> Option<Option<u64>> {
        self.limits.get(&user).copied()
    }

    pub fn remember_limit(&mut self, user: UserId, limit: Option<u64>) {
        self.limits.insert(user, limit);
    }

    pub fn cached_count(&self, user: UserId) -> Option<u64> {
        self.counts.get(&user).copied()
    }

    pub fn remember_count(&mut self, user: UserId, count: u64) {
        self.counts.insert(user, count);
    }

    /// Bumps the memoized count of `user` after a new item was approved
    ///
    /// Does nothing when no count is memoized, the next lookup reads the host.
    pub fn record_created(&mut self, user: UserId) {
        if let Some(count) = self.counts.get_mut(&user) {
            *count += 1;
        }
    }

    /// Drops everything memoized for `user`
    pub fn invalidate(&mut self, user: UserId) {
        self.limits.remove(&user);
        self.counts.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_per_user() {
        let mut ctx = RequestContext::new(UserId(1));
        ctx.remember_limit(UserId(1), Some(3));
        ctx.remember_count(UserId(1), 2);

        assert_eq!(ctx.cached_limit(UserId(1)), Some(Some(3)));
        assert_eq!(ctx.cached_limit(UserId(2)), None);
        assert_eq!(ctx.cached_count(UserId(2)), None);

        ctx.invalidate(UserId(1));
        assert_eq!(ctx.cached_limit(UserId(1)), None);
        assert_eq!(ctx.cached_count(UserId(1)), None);
        assert_eq!(ctx.actor(), UserId(1));
    }

    #[test]
    fn test_record_created_bumps_only_memoized_counts() {
        let mut ctx = RequestContext::new(UserId(1));
        ctx.remember_count(UserId(1), 2);

        ctx.record_created(UserId(1));
        ctx.record_created(UserId(2));

        assert_eq!(ctx.cached_count(UserId(1)), Some(3));
        assert_eq!(ctx.cached_count(UserId(2)), None);
    }

    #[test]
    fn test_unlimited_is_cached_distinctly_from_missing() {
        let mut ctx = RequestContext::new(UserId(1));
        ctx.remember_limit(UserId(1), None);
        assert_eq!(ctx.cached_limit(UserId(1)), Some(None));
    }
}
