use crate::modules::BoxFuture;
use crate::services::actions;
use crate::services::event_manager::TriggerEvent;
use crate::services::event_manager::events::{ModAction, ModActionEvent};
use crate::services::settings::Settings;
use crate::{Data, Error};
use tracing::debug;

pub fn handler<'a>(
    data: &'a Data,
    event: &'a TriggerEvent,
    settings: &'a Settings,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        match event {
            TriggerEvent::ModAction(action) => {
                handle_approval(data, action, settings).await?;
            }
            _ => {}
        }
        Ok(())
    })
}

/// Approvals unlock regardless of which moderator approved.
pub async fn handle_approval(
    data: &Data,
    event: &ModActionEvent,
    settings: &Settings,
) -> Result<(), Error> {
    if event.action != ModAction::ApproveLink || !settings.enable_post_unlock {
        return Ok(());
    }

    let target = match &event.target_post {
        Some(t) => t,
        None => return Ok(()),
    };

    if !target.is_locked {
        debug!("Post {} is already unlocked", target.id);
        return Ok(());
    }

    actions::unlock_post(data.client.as_ref(), &target.id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::test_support::{run_with, setup};
    use crate::services::client::PostId;
    use crate::services::platform::PlatformAction;
    use crate::services::settings::{ENABLE_POST_UNLOCK, IGNORE_ADMINS, MemorySettings};

    fn approval(post: &str, locked: bool) -> TriggerEvent {
        serde_json::from_value(serde_json::json!({
            "type": "mod_action",
            "action": "approvelink",
            "moderator": "admin1",
            "target_post": {"id": post, "is_locked": locked}
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_approval_unlocks_when_enabled() {
        let (platform, data) = setup(
            MemorySettings::new()
                .with(ENABLE_POST_UNLOCK, true)
                .with(IGNORE_ADMINS, true),
        );

        run_with(handler, &data, &approval("t3_locked", true)).await;

        assert_eq!(
            platform.actions(),
            vec![PlatformAction::UnlockPost {
                post_id: PostId::new("t3_locked")
            }]
        );
        assert_eq!(platform.is_locked(&PostId::new("t3_locked")), Some(false));
        // The ignore rules are not consulted for approvals
        assert_eq!(platform.user_lookups(), 0);
    }

    #[tokio::test]
    async fn test_approval_skips() {
        // Off by default
        let (platform, data) = setup(MemorySettings::new());
        run_with(handler, &data, &approval("t3_locked", true)).await;
        assert!(platform.actions().is_empty());

        let (platform, data) = setup(MemorySettings::new().with(ENABLE_POST_UNLOCK, true));
        run_with(handler, &data, &approval("t3_open", false)).await;
        run_with(handler, &data, &approval("t3_gone", true)).await;
        assert!(platform.actions().is_empty());
    }
}
