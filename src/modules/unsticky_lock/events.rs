use crate::modules::BoxFuture;
use crate::services::event_manager::TriggerEvent;
use crate::services::event_manager::events::{ModAction, ModActionEvent};
use crate::services::settings::Settings;
use crate::services::{actions, ignore};
use crate::{Data, Error};
use tracing::info;

pub fn handler<'a>(
    data: &'a Data,
    event: &'a TriggerEvent,
    settings: &'a Settings,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        match event {
            TriggerEvent::ModAction(action) => {
                handle_unsticky(data, action, settings).await?;
            }
            _ => {}
        }
        Ok(())
    })
}

pub async fn handle_unsticky(
    data: &Data,
    event: &ModActionEvent,
    settings: &Settings,
) -> Result<(), Error> {
    if event.action != ModAction::Unsticky || !settings.enable_unsticky_lock {
        return Ok(());
    }

    let target = match &event.target_post {
        Some(t) if !t.is_locked => t,
        _ => return Ok(()),
    };

    let moderator = event.moderator.as_deref();
    if ignore::resolve(moderator, &settings.ignore, data.client.as_ref()).await? {
        info!(
            "Ignoring unsticky of {} by {}",
            target.id,
            moderator.unwrap_or("<unknown>")
        );
        return Ok(());
    }

    actions::lock_post(data.client.as_ref(), &target.id).await?;
    Ok(())
}
