use crate::modules::BoxFuture;
use crate::services::actions;
use crate::services::event_manager::TriggerEvent;
use crate::services::event_manager::events::{DeletionSource, PostDeleteEvent};
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
            TriggerEvent::PostDelete(delete) => {
                handle_post_delete(data, delete, settings).await?;
            }
            _ => {}
        }
        Ok(())
    })
}

/// Only deletions by the post's author lock; moderator and admin removals are
/// reported as mod actions instead.
pub async fn handle_post_delete(
    data: &Data,
    event: &PostDeleteEvent,
    settings: &Settings,
) -> Result<(), Error> {
    if event.source != DeletionSource::User {
        debug!("Ignoring post deletion from {:?}", event.source);
        return Ok(());
    }

    if !settings.enable_lock_deleted {
        return Ok(());
    }

    if let Some(post_id) = &event.post_id {
        actions::lock_post(data.client.as_ref(), post_id).await?;
    }

    Ok(())
}
