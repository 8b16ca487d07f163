use crate::config::QuotaConfig;
use crate::host::Host;
use crate::model::{Capability, CapabilitySet, ContentDraft, MetaValue, UserId};
use crate::profile::{IssueKind, ProfileErrors, ProfileForm};
use crate::quota::{QuotaSnapshot, RequestContext, decode_stored_limit, parse_limit_input};
use crate::render::{LimitNotice, ProfileSection};
use crate::{QuotaError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-user content quota enforcer
///
/// Reads limits and counts through the host, derives the quota predicates and
/// reacts to the host's lifecycle events. All memoized state lives in the
/// [`RequestContext`] passed to each call, so one enforcer serves any number
/// of requests.
///
/// # Examples
///
/// ```
/// use postquota::{ContentDraft, ContentStatus, MemoryHost, MetaValue, QuotaEnforcer, UserId};
/// use postquota::host::UserMetaStore;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let author = UserId(2);
/// let host = Arc::new(MemoryHost::with_actor(author));
/// host.set_meta(author, "post_limit", MetaValue::Int(1)).await.unwrap();
/// host.add_item(author, "post", ContentStatus::Publish).await;
///
/// let enforcer = QuotaEnforcer::new(host);
/// let mut ctx = enforcer.begin_request().await.unwrap();
/// assert!(enforcer.is_at_limit(&mut ctx, author).await.unwrap());
///
/// let draft = ContentDraft::new("post", ContentStatus::Publish);
/// assert!(enforcer.check_content(&mut ctx, draft).await.is_err());
/// # });
/// ```
pub struct QuotaEnforcer<H: Host> {
    config: QuotaConfig,
    host: Arc<H>,
}

impl<H: Host> QuotaEnforcer<H> {
    /// Creates an enforcer limiting the host's primary content type
    pub fn new(host: Arc<H>) -> Self {
        Self {
            config: QuotaConfig::default(),
            host,
        }
    }

    /// Creates an enforcer with a custom configuration
    pub fn with_config(host: Arc<H>, config: QuotaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, host })
    }

    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Resolves the actor and opens the memo for one inbound request
    pub async fn begin_request(&self) -> Result<RequestContext> {
        let actor = self.host.current_actor_id().await?;
        debug!(actor = %actor, "Quota request context created");
        Ok(RequestContext::new(actor))
    }

    /// Configured limit of `user`, `None` when unlimited
    pub async fn limit(&self, ctx: &mut RequestContext, user: UserId) -> Result<Option<u64>> {
        if let Some(limit) = ctx.cached_limit(user) {
            return Ok(limit);
        }
        let limit = self.read_limit(user).await?;
        ctx.remember_limit(user, limit);
        Ok(limit)
    }

    async fn read_limit(&self, user: UserId) -> Result<Option<u64>> {
        let Some(value) = self.host.get_meta(user, &self.config.limit_key).await? else {
            return Ok(None);
        };
        match decode_stored_limit(&value) {
            Ok(limit) => Ok(limit),
            Err(raw) => {
                warn!(user = %user, value = %raw, "Ignoring malformed stored post limit");
                Ok(None)
            }
        }
    }

    /// Number of non-excluded items `user` authored of the configured type
    pub async fn post_count(&self, ctx: &mut RequestContext, user: UserId) -> Result<u64> {
        if let Some(count) = ctx.cached_count(user) {
            return Ok(count);
        }
        let count = self
            .host
            .count_items(user, &self.config.content_type, &self.config.excluded_statuses)
            .await?;
        ctx.remember_count(user, count);
        Ok(count)
    }

    pub async fn snapshot(&self, ctx: &mut RequestContext, user: UserId) -> Result<QuotaSnapshot> {
        let limit = self.limit(ctx, user).await?;
        let count = self.post_count(ctx, user).await?;
        Ok(QuotaSnapshot::new(user, limit, count))
    }

    pub async fn has_limit(&self, ctx: &mut RequestContext, user: UserId) -> Result<bool> {
        Ok(self.limit(ctx, user).await?.is_some())
    }

    pub async fn is_at_limit(&self, ctx: &mut RequestContext, user: UserId) -> Result<bool> {
        if !self.has_limit(ctx, user).await? {
            return Ok(false);
        }
        Ok(self.snapshot(ctx, user).await?.is_at_limit())
    }

    pub async fn is_at_or_over_limit(&self, ctx: &mut RequestContext, user: UserId) -> Result<bool> {
        // Unlimited users never need a count query
        if !self.has_limit(ctx, user).await? {
            return Ok(false);
        }
        Ok(self.snapshot(ctx, user).await?.is_at_or_over_limit())
    }

    /// Whether the one-time notice has already been shown to `user`
    pub async fn notice_shown(&self, user: UserId) -> Result<bool> {
        let flag = self.host.get_meta(user, &self.config.notice_key).await?;
        Ok(flag.is_some_and(|value| !value.is_empty()))
    }

    /// Clears the notice flag so the warning can fire again
    pub async fn rearm_notice(&self, user: UserId) -> Result<()> {
        self.host.delete_meta(user, &self.config.notice_key).await?;
        debug!(user = %user, "Limit notice re-armed");
        Ok(())
    }

    /// Profile screen section for `target`, `None` for non-administrators
    pub async fn render_profile_section(
        &self,
        ctx: &mut RequestContext,
        target: UserId,
    ) -> Result<Option<ProfileSection>> {
        if !self.host.current_actor_can(Capability::EditUsers, None).await? {
            return Ok(None);
        }
        let current = self.limit(ctx, target).await?.unwrap_or(0);
        Ok(Some(ProfileSection::new(&self.config.form_field, current)))
    }

    /// Applies the limit submitted with a profile save
    ///
    /// Problems are reported through `errors`, not as `Err`; `Err` only
    /// carries host failures.
    pub async fn save_profile(
        &self,
        ctx: &mut RequestContext,
        target: UserId,
        form: &ProfileForm,
        errors: &mut ProfileErrors,
    ) -> Result<()> {
        // Non-administrators must not raise their own limit
        if !self.host.current_actor_can(Capability::EditUsers, None).await? {
            return Ok(());
        }
        let Some(raw) = form.get(&self.config.form_field) else {
            debug!(target_user = %target, "Profile save carries no post limit field");
            return Ok(());
        };

        let can_edit_target = self
            .host
            .current_actor_can(Capability::EditUser, Some(target))
            .await?;

        let limit = match parse_limit_input(raw) {
            Ok(limit) if can_edit_target => limit,
            Ok(_) => {
                warn!(actor = %ctx.actor(), target_user = %target, "Actor may not edit this user's post limit");
                errors.add(
                    IssueKind::Validation,
                    "post_limit_error",
                    "ERROR: The post limit isn't correct.",
                );
                return Ok(());
            }
            Err(e) => {
                warn!(target_user = %target, error = %e, "Rejected post limit input");
                errors.add(
                    IssueKind::Validation,
                    "post_limit_error",
                    "ERROR: The post limit isn't correct.",
                );
                return Ok(());
            }
        };

        self.host
            .set_meta(target, &self.config.limit_key, MetaValue::Int(limit as i64))
            .await?;
        self.rearm_notice(target).await?;
        ctx.invalidate(target);
        info!(actor = %ctx.actor(), target_user = %target, limit, "Post limit updated");

        if limit != 0 {
            let count = self.post_count(ctx, target).await?;
            if count > limit {
                info!(target_user = %target, limit, count, "User is already over the new limit");
                errors.add(
                    IssueKind::Advisory,
                    "post_limit_notice",
                    "Notice: User is already over the limit",
                );
            }
        }
        Ok(())
    }

    /// Gates a content save
    ///
    /// Returns the draft unchanged when the save may go ahead.
    pub async fn check_content(
        &self,
        ctx: &mut RequestContext,
        draft: ContentDraft,
    ) -> Result<ContentDraft> {
        if draft.content_type != self.config.content_type {
            return Ok(draft);
        }

        if draft.status.is_trash() {
            let owner = draft.author.unwrap_or(ctx.actor());
            self.rearm_notice(owner).await?;
            ctx.invalidate(owner);
            debug!(user = %owner, item = ?draft.id, "Trashing allowed regardless of quota");
            return Ok(draft);
        }

        let actor = ctx.actor();
        if !self.has_limit(ctx, actor).await? {
            return Ok(draft);
        }
        let snapshot = self.snapshot(ctx, actor).await?;
        if snapshot.is_at_or_over_limit() {
            info!(
                user = %actor,
                limit = snapshot.limit.unwrap_or(0),
                count = snapshot.count,
                status = %draft.status,
                "Content save rejected, user is over the post limit"
            );
            return Err(QuotaError::QuotaExceeded {
                user: actor,
                limit: snapshot.limit.unwrap_or(0),
                count: snapshot.count,
                message: self.config.over_limit_message.clone(),
            });
        }
        // An approved new item counts against later saves of this request
        if draft.id.is_none() {
            ctx.record_created(actor);
        }
        debug!(
            user = %actor,
            remaining = snapshot.remaining().unwrap_or(0),
            "Content save allowed"
        );
        Ok(draft)
    }

    /// Hides creation affordances for the rest of the request
    pub async fn filter_capabilities(
        &self,
        ctx: &mut RequestContext,
        caps: &mut CapabilitySet,
    ) -> Result<()> {
        if caps.content_type != self.config.content_type {
            return Ok(());
        }
        let actor = ctx.actor();
        if self.is_at_or_over_limit(ctx, actor).await? {
            caps.create = false;
            caps.publish = false;
            debug!(user = %actor, content_type = %caps.content_type, "Create and publish capabilities removed");
        }
        Ok(())
    }

    /// Returns the one-time limit warning if it is due, marking it shown
    pub async fn take_limit_notice(&self, ctx: &mut RequestContext) -> Result<Option<LimitNotice>> {
        let actor = ctx.actor();
        if self.notice_shown(actor).await? {
            return Ok(None);
        }
        if !self.is_at_or_over_limit(ctx, actor).await? {
            return Ok(None);
        }

        let key = &self.config.notice_key;
        if !self.host.add_meta_once(actor, key, MetaValue::Bool(true)).await? {
            // An empty flag is still present; overwrite it
            self.host.set_meta(actor, key, MetaValue::Bool(true)).await?;
        }
        info!(user = %actor, "Limit notice shown");
        Ok(Some(LimitNotice::warning(&self.config.notice_message)))
    }
}
