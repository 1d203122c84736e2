use crate::Error;
use crate::services::client::{ModerationClient, Post, PostId};
use tracing::{debug, info};

/// Fetches the post fresh and locks it. A post the platform no longer knows
/// about is skipped. Returns the post that was locked.
pub async fn lock_post(client: &dyn ModerationClient, id: &PostId) -> Result<Option<Post>, Error> {
    let Some(post) = client.get_post_by_id(id).await? else {
        debug!("Post {} not found, nothing to lock", id);
        return Ok(None);
    };

    client.lock_post(&post.id).await?;
    info!("Locked post {}", post.id);
    Ok(Some(post))
}

/// Fetches the post fresh and unlocks it. Returns the post that was unlocked.
pub async fn unlock_post(client: &dyn ModerationClient, id: &PostId) -> Result<Option<Post>, Error> {
    let Some(post) = client.get_post_by_id(id).await? else {
        debug!("Post {} not found, nothing to unlock", id);
        return Ok(None);
    };

    client.unlock_post(&post.id).await?;
    info!("Unlocked post {}", post.id);
    Ok(Some(post))
}
