use crate::host::HostError;
use thiserror::Error;

/// Error types for the postquota library
#[derive(Error, Debug)]
pub enum QuotaError {
    /// A content save was attempted while the user is at or over their limit
    #[error("{message}")]
    QuotaExceeded {
        user: UserId,
        limit: u64,
        count: u64,
        message: String,
    },

    /// A host collaborator failed
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Rendering a view model failed
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for the postquota library
pub type Result<T> = std::result::Result<T, QuotaError>;

pub mod config;
pub mod enforcer;
pub mod hooks;
pub mod host;
pub mod model;
pub mod profile;
pub mod quota;
pub mod render;
pub mod testing;

// Re-export main types for convenience
pub use config::QuotaConfig;
pub use enforcer::QuotaEnforcer;
pub use hooks::{
    CapabilityFilter, ContentGatekeeper, HookDispatcher, HookOutcome, HostEvent, NoticeProvider,
    ProfileRenderer, ProfileUpdater,
};
pub use host::{Host, MemoryHost};
pub use model::{Capability, CapabilitySet, ContentDraft, ContentStatus, MetaValue, UserId};
pub use profile::{IssueKind, ProfileErrors, ProfileForm, ProfileIssue};
pub use quota::{QuotaSnapshot, RequestContext};
pub use render::{LimitNotice, ProfileSection};
