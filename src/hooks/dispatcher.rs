use super::traits::{
    CapabilityFilter, ContentGatekeeper, NoticeProvider, ProfileRenderer, ProfileUpdater,
};
use crate::Result;
use crate::enforcer::QuotaEnforcer;
use crate::host::{AccessControl, Host};
use crate::model::{CapabilitySet, ContentDraft, UserId};
use crate::profile::{ProfileErrors, ProfileForm};
use crate::quota::RequestContext;
use crate::render::{LimitNotice, ProfileSection};
use std::sync::Arc;
use tracing::{Instrument, debug, info_span};

/// Lifecycle event fired by the host
pub enum HostEvent<'a> {
    /// A profile screen is being rendered for `target`
    ProfileRender { target: UserId },
    /// A profile form for `target` was submitted
    ProfileSave {
        target: UserId,
        form: &'a ProfileForm,
        errors: &'a mut ProfileErrors,
    },
    /// A content item is about to be persisted
    ContentPreSave(ContentDraft),
    /// Request initialization, capabilities of one content type are resolved
    Init(&'a mut CapabilitySet),
    /// The admin notice area is being rendered
    AdminNotices,
}

impl HostEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::ProfileRender { .. } => "profile_render",
            HostEvent::ProfileSave { .. } => "profile_save",
            HostEvent::ContentPreSave(_) => "content_pre_save",
            HostEvent::Init(_) => "init",
            HostEvent::AdminNotices => "admin_notices",
        }
    }
}

/// What the handlers of one event produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    ProfileSections(Vec<ProfileSection>),
    ProfileSaved,
    Content(ContentDraft),
    CapabilitiesResolved,
    Notices(Vec<LimitNotice>),
}

/// Routes host events to the handlers registered for them
///
/// Handlers of one event run in registration order. Content and capability
/// handlers are chained, each one seeing what the previous returned. The
/// first content handler error halts the save.
pub struct HookDispatcher {
    access: Arc<dyn AccessControl>,
    profile_renderers: Vec<Arc<dyn ProfileRenderer>>,
    profile_updaters: Vec<Arc<dyn ProfileUpdater>>,
    gatekeepers: Vec<Arc<dyn ContentGatekeeper>>,
    capability_filters: Vec<Arc<dyn CapabilityFilter>>,
    notice_providers: Vec<Arc<dyn NoticeProvider>>,
}

impl HookDispatcher {
    /// Creates a dispatcher with no handlers
    pub fn new(access: Arc<dyn AccessControl>) -> Self {
        Self {
            access,
            profile_renderers: Vec::new(),
            profile_updaters: Vec::new(),
            gatekeepers: Vec::new(),
            capability_filters: Vec::new(),
            notice_providers: Vec::new(),
        }
    }

    /// Creates a dispatcher with `enforcer` registered for every event
    pub fn for_enforcer<H: Host + 'static>(enforcer: Arc<QuotaEnforcer<H>>) -> Self {
        let access: Arc<dyn AccessControl> = enforcer.host().clone();
        Self::new(access)
            .with_profile_renderer(enforcer.clone())
            .with_profile_updater(enforcer.clone())
            .with_gatekeeper(enforcer.clone())
            .with_capability_filter(enforcer.clone())
            .with_notice_provider(enforcer)
    }

    pub fn with_profile_renderer(mut self, handler: Arc<dyn ProfileRenderer>) -> Self {
        self.profile_renderers.push(handler);
        self
    }

    pub fn with_profile_updater(mut self, handler: Arc<dyn ProfileUpdater>) -> Self {
        self.profile_updaters.push(handler);
        self
    }

    pub fn with_gatekeeper(mut self, handler: Arc<dyn ContentGatekeeper>) -> Self {
        self.gatekeepers.push(handler);
        self
    }

    pub fn with_capability_filter(mut self, handler: Arc<dyn CapabilityFilter>) -> Self {
        self.capability_filters.push(handler);
        self
    }

    pub fn with_notice_provider(mut self, handler: Arc<dyn NoticeProvider>) -> Self {
        self.notice_providers.push(handler);
        self
    }

    /// Opens the context shared by all events of one inbound request
    pub async fn begin_request(&self) -> Result<RequestContext> {
        let actor = self.access.current_actor_id().await?;
        Ok(RequestContext::new(actor))
    }

    /// Runs every handler registered for `event`
    pub async fn dispatch(
        &self,
        ctx: &mut RequestContext,
        event: HostEvent<'_>,
    ) -> Result<HookOutcome> {
        let span = info_span!("hook", event = event.name(), actor = %ctx.actor());
        self.run(ctx, event).instrument(span).await
    }

    async fn run(&self, ctx: &mut RequestContext, event: HostEvent<'_>) -> Result<HookOutcome> {
        match event {
            HostEvent::ProfileRender { target } => {
                let mut sections = Vec::new();
                for handler in &self.profile_renderers {
                    if let Some(section) = handler.render_profile(ctx, target).await? {
                        sections.push(section);
                    }
                }
                Ok(HookOutcome::ProfileSections(sections))
            }
            HostEvent::ProfileSave {
                target,
                form,
                errors,
            } => {
                for handler in &self.profile_updaters {
                    handler.update_profile(ctx, target, form, errors).await?;
                }
                Ok(HookOutcome::ProfileSaved)
            }
            HostEvent::ContentPreSave(mut draft) => {
                for handler in &self.gatekeepers {
                    draft = handler.gate_content(ctx, draft).await?;
                }
                Ok(HookOutcome::Content(draft))
            }
            HostEvent::Init(caps) => {
                for handler in &self.capability_filters {
                    handler.restrict_capabilities(ctx, caps).await?;
                }
                debug!(create = caps.create, publish = caps.publish, "Capabilities resolved");
                Ok(HookOutcome::CapabilitiesResolved)
            }
            HostEvent::AdminNotices => {
                let mut notices = Vec::new();
                for handler in &self.notice_providers {
                    if let Some(notice) = handler.admin_notice(ctx).await? {
                        notices.push(notice);
                    }
                }
                Ok(HookOutcome::Notices(notices))
            }
        }
    }
}
