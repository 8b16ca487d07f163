//! Host collaborators
//!
//! The enforcer owns no storage. Everything it reads or writes goes through
//! the traits in this module, which a host implements over its own user
//! metadata, content index and permission model.

pub mod memory;
pub mod traits;

pub use memory::MemoryHost;
pub use traits::{AccessControl, ContentIndex, Host, HostError, HostResult, UserMetaStore};
