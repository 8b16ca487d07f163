use super::{ContentGatekeeper, HookDispatcher, HookOutcome, HostEvent};
use crate::model::{CapabilitySet, ContentDraft, ContentStatus, UserId};
use crate::profile::{ProfileErrors, ProfileForm};
use crate::quota::RequestContext;
use crate::testing::seeded_host;
use crate::{QuotaEnforcer, QuotaError, Result};
use async_trait::async_trait;
use std::sync::Arc;

const AUTHOR: UserId = UserId(5);

/// Tags every draft it sees, to check chaining order
struct Tagger(&'static str);

#[async_trait]
impl ContentGatekeeper for Tagger {
    async fn gate_content(
        &self,
        _ctx: &mut RequestContext,
        draft: ContentDraft,
    ) -> Result<ContentDraft> {
        let seen = draft.fields.get("seen").cloned().unwrap_or_default();
        Ok(draft.with_field("seen", format!("{seen}{}", self.0)))
    }
}

async fn dispatcher(limit: Option<u64>, published: u64) -> HookDispatcher {
    let host = seeded_host(AUTHOR, limit, published).await.unwrap();
    HookDispatcher::for_enforcer(Arc::new(QuotaEnforcer::new(host)))
}

#[tokio::test]
async fn test_begin_request_resolves_actor() {
    let dispatcher = dispatcher(None, 0).await;
    let ctx = dispatcher.begin_request().await.unwrap();
    assert_eq!(ctx.actor(), AUTHOR);
}

#[tokio::test]
async fn test_content_event_halts_when_over_limit() {
    let dispatcher = dispatcher(Some(1), 1).await;
    let mut ctx = dispatcher.begin_request().await.unwrap();

    let draft = ContentDraft::new("post", ContentStatus::Draft);
    let result = dispatcher
        .dispatch(&mut ctx, HostEvent::ContentPreSave(draft))
        .await;
    assert!(matches!(result, Err(QuotaError::QuotaExceeded { .. })));
}

#[tokio::test]
async fn test_gatekeepers_chain_in_registration_order() {
    let host = seeded_host(AUTHOR, None, 0).await.unwrap();
    let dispatcher = HookDispatcher::new(host)
        .with_gatekeeper(Arc::new(Tagger("a")))
        .with_gatekeeper(Arc::new(Tagger("b")));
    let mut ctx = dispatcher.begin_request().await.unwrap();

    let draft = ContentDraft::new("post", ContentStatus::Publish);
    let outcome = dispatcher
        .dispatch(&mut ctx, HostEvent::ContentPreSave(draft))
        .await
        .unwrap();
    match outcome {
        HookOutcome::Content(draft) => {
            assert_eq!(draft.fields.get("seen").map(String::as_str), Some("ab"))
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_init_and_notice_share_request_context() {
    let dispatcher = dispatcher(Some(2), 2).await;
    let mut ctx = dispatcher.begin_request().await.unwrap();

    let mut caps = CapabilitySet::granted("post");
    dispatcher
        .dispatch(&mut ctx, HostEvent::Init(&mut caps))
        .await
        .unwrap();
    assert!(!caps.create && !caps.publish);
    assert_eq!(ctx.cached_count(AUTHOR), Some(2));

    let outcome = dispatcher
        .dispatch(&mut ctx, HostEvent::AdminNotices)
        .await
        .unwrap();
    assert!(matches!(outcome, HookOutcome::Notices(ref n) if n.len() == 1));

    let again = dispatcher
        .dispatch(&mut ctx, HostEvent::AdminNotices)
        .await
        .unwrap();
    assert_eq!(again, HookOutcome::Notices(Vec::new()));
}

#[tokio::test]
async fn test_profile_events_for_non_admin_do_nothing() {
    let dispatcher = dispatcher(Some(2), 0).await;
    let mut ctx = dispatcher.begin_request().await.unwrap();

    let outcome = dispatcher
        .dispatch(&mut ctx, HostEvent::ProfileRender { target: AUTHOR })
        .await
        .unwrap();
    assert_eq!(outcome, HookOutcome::ProfileSections(Vec::new()));

    let form = ProfileForm::new().with_field("post-limit", "50");
    let mut errors = ProfileErrors::new();
    let outcome = dispatcher
        .dispatch(
            &mut ctx,
            HostEvent::ProfileSave {
                target: AUTHOR,
                form: &form,
                errors: &mut errors,
            },
        )
        .await
        .unwrap();
    assert_eq!(outcome, HookOutcome::ProfileSaved);
    assert!(errors.is_empty());
}
