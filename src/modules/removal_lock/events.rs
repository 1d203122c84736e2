use crate::modules::BoxFuture;
use crate::services::event_manager::TriggerEvent;
use crate::services::event_manager::events::{ModAction, ModActionEvent};
use crate::services::settings::Settings;
use crate::services::{actions, ignore, nuke};
use crate::{Data, Error};
use tracing::{debug, info};

pub fn handler<'a>(
    data: &'a Data,
    event: &'a TriggerEvent,
    settings: &'a Settings,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        match event {
            TriggerEvent::ModAction(action) => {
                handle_removal(data, action, settings).await?;
            }
            _ => {}
        }
        Ok(())
    })
}

pub async fn handle_removal(
    data: &Data,
    event: &ModActionEvent,
    settings: &Settings,
) -> Result<(), Error> {
    // Check action type first to avoid unnecessary lookups
    if !matches!(event.action, ModAction::RemoveLink | ModAction::SpamLink) {
        return Ok(());
    }

    if !settings.enable_post_lock {
        return Ok(());
    }

    let target = match &event.target_post {
        Some(t) => t,
        None => return Ok(()),
    };

    if target.is_locked {
        debug!("Post {} is already locked", target.id);
        return Ok(());
    }

    let moderator = event.moderator.as_deref();
    if ignore::resolve(moderator, &settings.ignore, data.client.as_ref()).await? {
        info!(
            "Ignoring removal of {} by {}",
            target.id,
            moderator.unwrap_or("<unknown>")
        );
        return Ok(());
    }

    let Some(post) = actions::lock_post(data.client.as_ref(), &target.id).await? else {
        return Ok(());
    };

    if event.action == ModAction::SpamLink && settings.nuke_comments {
        nuke::nuke_comments(data.client.as_ref(), &post).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_support::{run_with, setup};
    use crate::services::client::{CommentId, PostId};
    use crate::services::platform::PlatformAction;
    use crate::services::settings::{
        ENABLE_POST_LOCK, IGNORE_AUTOMOD, MOD_BLACKLIST, MOD_WHITELIST, MemorySettings,
        NUKE_COMMENTS,
    };

    async fn run(data: &Data, event: &TriggerEvent) {
        run_with(handler, data, event).await;
    }

    fn event(action: &str, post: &str, locked: bool, moderator: &str) -> TriggerEvent {
        serde_json::from_value(serde_json::json!({
            "type": "mod_action",
            "action": action,
            "moderator": moderator,
            "target_post": {"id": post, "is_locked": locked}
        }))
        .unwrap()
    }

    fn locked(id: &str) -> PlatformAction {
        PlatformAction::LockPost {
            post_id: PostId::new(id),
        }
    }

    #[tokio::test]
    async fn test_removal_locks_post() {
        let (platform, data) = setup(MemorySettings::new());

        run(&data, &event("removelink", "t3_open", false, "alice")).await;

        assert_eq!(platform.actions(), vec![locked("t3_open")]);
        assert_eq!(platform.is_locked(&PostId::new("t3_open")), Some(true));
    }

    #[tokio::test]
    async fn test_skips_when_disabled_or_already_locked() {
        let (platform, data) = setup(MemorySettings::new().with(ENABLE_POST_LOCK, false));
        run(&data, &event("removelink", "t3_open", false, "alice")).await;
        assert!(platform.actions().is_empty());

        let (platform, data) = setup(MemorySettings::new());
        run(&data, &event("removelink", "t3_open", true, "alice")).await;
        assert!(platform.actions().is_empty());
    }

    #[tokio::test]
    async fn test_ignored_moderators() {
        let (platform, data) = setup(MemorySettings::new().with(MOD_BLACKLIST, "alice"));
        run(&data, &event("removelink", "t3_open", false, "alice")).await;
        // ignore-automod defaults to on
        run(&data, &event("removelink", "t3_open", false, "AutoModerator")).await;
        assert!(platform.actions().is_empty());

        let (platform, data) = setup(
            MemorySettings::new()
                .with(IGNORE_AUTOMOD, false)
                .with(MOD_WHITELIST, "bob")
                .with(MOD_BLACKLIST, "alice"),
        );
        run(&data, &event("removelink", "t3_open", false, "AutoModerator")).await;
        run(&data, &event("removelink", "t3_open", false, "alice")).await;
        assert_eq!(
            platform.actions(),
            vec![locked("t3_open"), locked("t3_open")]
        );
    }

    #[tokio::test]
    async fn test_spam_nukes_comments_when_enabled() {
        let (platform, data) = setup(MemorySettings::new().with(NUKE_COMMENTS, true));

        run(&data, &event("spamlink", "t3_open", false, "alice")).await;

        assert_eq!(
            platform.removals(),
            vec![CommentId::new("t1_spam"), CommentId::new("t1_reply")]
        );
        assert_eq!(platform.is_removed(&CommentId::new("t1_mod")), Some(false));
        assert_eq!(platform.actions()[0], locked("t3_open"));
    }

    #[tokio::test]
    async fn test_nuke_only_for_spam() {
        let (platform, data) = setup(MemorySettings::new().with(NUKE_COMMENTS, true));
        run(&data, &event("removelink", "t3_open", false, "alice")).await;
        assert!(platform.removals().is_empty());

        let (platform, data) = setup(MemorySettings::new());
        run(&data, &event("spamlink", "t3_open", false, "alice")).await;
        assert!(platform.removals().is_empty());
        assert_eq!(platform.actions(), vec![locked("t3_open")]);
    }

    #[tokio::test]
    async fn test_missing_post_and_other_actions_are_noops() {
        let (platform, data) = setup(MemorySettings::new().with(NUKE_COMMENTS, true));

        run(&data, &event("spamlink", "t3_gone", false, "alice")).await;
        run(&data, &event("approvelink", "t3_open", false, "alice")).await;
        run(&data, &event("lock", "t3_open", false, "alice")).await;

        assert!(platform.actions().is_empty());
    }
}
