//! Host lifecycle events
//!
//! Each event the host fires has its own handler trait. The
//! [`HookDispatcher`] holds the registered handlers and invokes them when the
//! host reports an event, replacing name-based global hook registration with
//! statically checked interfaces.

pub mod dispatcher;
pub mod enforcer;
pub mod traits;

#[cfg(test)]
mod tests;

pub use dispatcher::{HookDispatcher, HookOutcome, HostEvent};
pub use traits::{
    CapabilityFilter, ContentGatekeeper, NoticeProvider, ProfileRenderer, ProfileUpdater,
};
