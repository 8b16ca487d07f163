//! Quota state and its per-request memo

pub mod context;
pub mod input;
pub mod snapshot;

pub use context::RequestContext;
pub use input::{LimitInputError, decode_stored_limit, parse_limit_input};
pub use snapshot::QuotaSnapshot;
