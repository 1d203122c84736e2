use crate::modules::BoxFuture;
use crate::services::actions;
use crate::services::event_manager::TriggerEvent;
use crate::services::event_manager::events::AutomodFilterEvent;
use crate::services::settings::Settings;
use crate::{Data, Error};

pub fn handler<'a>(
    data: &'a Data,
    event: &'a TriggerEvent,
    settings: &'a Settings,
) -> BoxFuture<'a, Result<(), Error>> {
    Box::pin(async move {
        match event {
            TriggerEvent::AutomoderatorFilterPost(filter) => {
                handle_filter(data, filter, settings).await?;
            }
            _ => {}
        }
        Ok(())
    })
}

/// Filtered posts are gated only by `ignore-automod`, not by `enable-post-lock`.
pub async fn handle_filter(
    data: &Data,
    event: &AutomodFilterEvent,
    settings: &Settings,
) -> Result<(), Error> {
    if settings.ignore.ignore_automod {
        return Ok(());
    }

    if let Some(post) = &event.post {
        actions::lock_post(data.client.as_ref(), &post.id).await?;
    }

    Ok(())
}
