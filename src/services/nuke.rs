use crate::Error;
use crate::services::client::{Comment, ModerationClient, Post};
use tracing::{debug, info};

/// Removes every comment on `post` except distinguished top-level comments.
///
/// Below the top level the distinguished marker is not checked, so a
/// distinguished reply is removed like any other. Replies are walked depth
/// first, parents before children, one remote call at a time. Comments that
/// are already removed are skipped, which makes a second run a no-op apart
/// from the listing fetches.
///
/// The first failing fetch or removal aborts the walk. Returns the number of
/// comments removed.
pub async fn nuke_comments(client: &dyn ModerationClient, post: &Post) -> Result<usize, Error> {
    let mut removed = 0;

    for comment in client.post_comments(&post.id).await? {
        if !comment.removed && !comment.distinguished {
            client.remove_comment(&comment.id).await?;
            removed += 1;
        } else if comment.distinguished {
            debug!(comment_id = %comment.id, "Keeping distinguished top-level comment");
        }

        removed += remove_replies(client, &comment).await?;
    }

    info!(post_id = %post.id, removed, "Nuked comments");
    Ok(removed)
}

async fn remove_replies(client: &dyn ModerationClient, root: &Comment) -> Result<usize, Error> {
    let mut removed = 0;

    // Pushed in reverse so siblings pop in listing order
    let mut pending: Vec<Comment> = client.comment_replies(&root.id).await?;
    pending.reverse();

    while let Some(reply) = pending.pop() {
        if !reply.removed {
            client.remove_comment(&reply.id).await?;
            removed += 1;
        }

        let children = client.comment_replies(&reply.id).await?;
        pending.extend(children.into_iter().rev());
    }

    Ok(removed)
}
