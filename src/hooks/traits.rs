use crate::Result;
use crate::model::{CapabilitySet, ContentDraft, UserId};
use crate::profile::{ProfileErrors, ProfileForm};
use crate::quota::RequestContext;
use crate::render::{LimitNotice, ProfileSection};
use async_trait::async_trait;

/// Reacts to the host rendering a user's profile screen
///
/// Fired both when users view their own profile and when an administrator
/// edits someone else's.
#[async_trait]
pub trait ProfileRenderer: Send + Sync {
    /// Returns a section to add to the screen, if any
    async fn render_profile(
        &self,
        ctx: &mut RequestContext,
        target: UserId,
    ) -> Result<Option<ProfileSection>>;
}

/// Reacts to a submitted profile form
#[async_trait]
pub trait ProfileUpdater: Send + Sync {
    /// Applies the submitted fields, reporting problems through `errors`
    async fn update_profile(
        &self,
        ctx: &mut RequestContext,
        target: UserId,
        form: &ProfileForm,
        errors: &mut ProfileErrors,
    ) -> Result<()>;
}

/// Inspects content right before the host persists it
#[async_trait]
pub trait ContentGatekeeper: Send + Sync {
    /// Returns the record to persist, or an error that halts the save
    async fn gate_content(
        &self,
        ctx: &mut RequestContext,
        draft: ContentDraft,
    ) -> Result<ContentDraft>;
}

/// Adjusts a content type's capabilities for the current request
#[async_trait]
pub trait CapabilityFilter: Send + Sync {
    async fn restrict_capabilities(
        &self,
        ctx: &mut RequestContext,
        caps: &mut CapabilitySet,
    ) -> Result<()>;
}

/// Supplies notices for the host's admin notice area
#[async_trait]
pub trait NoticeProvider: Send + Sync {
    async fn admin_notice(&self, ctx: &mut RequestContext) -> Result<Option<LimitNotice>>;
}
