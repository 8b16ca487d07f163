use super::traits::{
    CapabilityFilter, ContentGatekeeper, NoticeProvider, ProfileRenderer, ProfileUpdater,
};
use crate::Result;
use crate::enforcer::QuotaEnforcer;
use crate::host::Host;
use crate::model::{CapabilitySet, ContentDraft, UserId};
use crate::profile::{ProfileErrors, ProfileForm};
use crate::quota::RequestContext;
use crate::render::{LimitNotice, ProfileSection};
use async_trait::async_trait;

#[async_trait]
impl<H: Host> ProfileRenderer for QuotaEnforcer<H> {
    async fn render_profile(
        &self,
        ctx: &mut RequestContext,
        target: UserId,
    ) -> Result<Option<ProfileSection>> {
        self.render_profile_section(ctx, target).await
    }
}

#[async_trait]
impl<H: Host> ProfileUpdater for QuotaEnforcer<H> {
    async fn update_profile(
        &self,
        ctx: &mut RequestContext,
        target: UserId,
        form: &ProfileForm,
        errors: &mut ProfileErrors,
    ) -> Result<()> {
        self.save_profile(ctx, target, form, errors).await
    }
}

#[async_trait]
impl<H: Host> ContentGatekeeper for QuotaEnforcer<H> {
    async fn gate_content(
        &self,
        ctx: &mut RequestContext,
        draft: ContentDraft,
    ) -> Result<ContentDraft> {
        self.check_content(ctx, draft).await
    }
}

#[async_trait]
impl<H: Host> CapabilityFilter for QuotaEnforcer<H> {
    async fn restrict_capabilities(
        &self,
        ctx: &mut RequestContext,
        caps: &mut CapabilitySet,
    ) -> Result<()> {
        self.filter_capabilities(ctx, caps).await
    }
}

#[async_trait]
impl<H: Host> NoticeProvider for QuotaEnforcer<H> {
    async fn admin_notice(&self, ctx: &mut RequestContext) -> Result<Option<LimitNotice>> {
        self.take_limit_notice(ctx).await
    }
}
