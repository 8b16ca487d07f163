use crate::model::UserId;

/// Quota state of one user at one point of a request
///
/// Never persisted. A limit of `None` means the user is unlimited, which
/// covers both an absent limit and a stored `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSnapshot {
    pub user: UserId,
    pub limit: Option<u64>,
    pub count: u64,
}

impl QuotaSnapshot {
    pub fn new(user: UserId, limit: Option<u64>, count: u64) -> Self {
        Self {
            user,
            limit: limit.filter(|&l| l != 0),
            count,
        }
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    /// True only when the count equals the limit exactly
    pub fn is_at_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.count == limit)
    }

    pub fn is_at_or_over_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.count >= limit)
    }

    /// Items the user may still create, `None` when unlimited
    pub fn remaining(&self) -> Option<u64> {
        self.limit.map(|limit| limit.saturating_sub(self.count))
    }
}
