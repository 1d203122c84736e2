use crate::Error;
use crate::services::client::{Comment, CommentId, ModerationClient, Post, PostId, User};
use anyhow::anyhow;
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// A mutation applied to the platform, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlatformAction {
    LockPost { post_id: PostId },
    UnlockPost { post_id: PostId },
    RemoveComment { comment_id: CommentId },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSnapshot {
    #[serde(default)]
    pub posts: Vec<PostSnapshot>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSnapshot {
    pub id: PostId,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub comments: Vec<CommentSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentSnapshot {
    pub id: CommentId,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub distinguished: bool,
    #[serde(default)]
    pub replies: Vec<CommentSnapshot>,
}

struct PostRecord {
    locked: bool,
    comments: Vec<CommentId>,
}

struct CommentRecord {
    removed: bool,
    distinguished: bool,
    replies: Vec<CommentId>,
}

/// In-process stand-in for the remote platform. Holds posts, comment trees and
/// users from a snapshot and records every mutation made through it.
pub struct MemoryPlatform {
    post_order: Vec<PostId>,
    posts: DashMap<PostId, PostRecord>,
    comments: DashMap<CommentId, CommentRecord>,
    users: DashMap<String, User>,
    failing_removals: DashSet<CommentId>,
    failing_replies: DashSet<CommentId>,
    actions: Mutex<Vec<PlatformAction>>,
    comment_fetches: AtomicUsize,
    user_lookups: AtomicUsize,
}

impl MemoryPlatform {
    pub fn from_snapshot(snapshot: PlatformSnapshot) -> Self {
        let platform = Self {
            post_order: snapshot.posts.iter().map(|p| p.id.clone()).collect(),
            posts: DashMap::new(),
            comments: DashMap::new(),
            users: DashMap::new(),
            failing_removals: DashSet::new(),
            failing_replies: DashSet::new(),
            actions: Mutex::new(Vec::new()),
            comment_fetches: AtomicUsize::new(0),
            user_lookups: AtomicUsize::new(0),
        };

        for post in snapshot.posts {
            let comments = post
                .comments
                .into_iter()
                .map(|c| platform.insert_comment(c))
                .collect();
            platform.posts.insert(
                post.id,
                PostRecord {
                    locked: post.locked,
                    comments,
                },
            );
        }

        for user in snapshot.users {
            platform.users.insert(user.username.clone(), user);
        }

        platform
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let snapshot: PlatformSnapshot = serde_json::from_str(raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    fn insert_comment(&self, comment: CommentSnapshot) -> CommentId {
        let replies = comment
            .replies
            .into_iter()
            .map(|r| self.insert_comment(r))
            .collect();
        self.comments.insert(
            comment.id.clone(),
            CommentRecord {
                removed: comment.removed,
                distinguished: comment.distinguished,
                replies,
            },
        );
        comment.id
    }

    /// Current state of every post and comment tree, in snapshot order.
    pub fn snapshot(&self) -> PlatformSnapshot {
        let posts = self
            .post_order
            .iter()
            .filter_map(|id| {
                let record = self.posts.get(id)?;
                Some(PostSnapshot {
                    id: id.clone(),
                    locked: record.locked,
                    comments: record
                        .comments
                        .iter()
                        .filter_map(|c| self.export_comment(c))
                        .collect(),
                })
            })
            .collect();

        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));

        PlatformSnapshot { posts, users }
    }

    fn export_comment(&self, id: &CommentId) -> Option<CommentSnapshot> {
        let (removed, distinguished, reply_ids) = {
            let record = self.comments.get(id)?;
            (record.removed, record.distinguished, record.replies.clone())
        };

        Some(CommentSnapshot {
            id: id.clone(),
            removed,
            distinguished,
            replies: reply_ids
                .iter()
                .filter_map(|r| self.export_comment(r))
                .collect(),
        })
    }

    /// Makes every later removal of `id` fail.
    pub fn fail_removal_of(&self, id: CommentId) {
        self.failing_removals.insert(id);
    }

    /// Makes every later reply fetch for `id` fail.
    pub fn fail_replies_of(&self, id: CommentId) {
        self.failing_replies.insert(id);
    }

    pub fn actions(&self) -> Vec<PlatformAction> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removals recorded so far.
    pub fn removals(&self) -> Vec<CommentId> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                PlatformAction::RemoveComment { comment_id } => Some(comment_id),
                _ => None,
            })
            .collect()
    }

    pub fn is_locked(&self, id: &PostId) -> Option<bool> {
        self.posts.get(id).map(|p| p.locked)
    }

    pub fn is_removed(&self, id: &CommentId) -> Option<bool> {
        self.comments.get(id).map(|c| c.removed)
    }

    /// Number of comment or reply listings served.
    pub fn comment_fetches(&self) -> usize {
        self.comment_fetches.load(Ordering::Relaxed)
    }

    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::Relaxed)
    }

    fn record(&self, action: PlatformAction) {
        debug!(?action, "Platform mutation");
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
    }

    fn set_locked(&self, id: &PostId, locked: bool) -> Result<(), Error> {
        let mut post = self
            .posts
            .get_mut(id)
            .ok_or_else(|| anyhow!("post {} not found", id))?;
        post.locked = locked;
        Ok(())
    }

    fn listing(&self, ids: &[CommentId]) -> Vec<Comment> {
        self.comment_fetches.fetch_add(1, Ordering::Relaxed);
        ids.iter()
            .filter_map(|id| {
                self.comments.get(id).map(|c| Comment {
                    id: id.clone(),
                    removed: c.removed,
                    distinguished: c.distinguished,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ModerationClient for MemoryPlatform {
    async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>, Error> {
        Ok(self.posts.get(id).map(|p| Post {
            id: id.clone(),
            locked: p.locked,
        }))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.user_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn lock_post(&self, id: &PostId) -> Result<(), Error> {
        self.set_locked(id, true)?;
        self.record(PlatformAction::LockPost {
            post_id: id.clone(),
        });
        Ok(())
    }

    async fn unlock_post(&self, id: &PostId) -> Result<(), Error> {
        self.set_locked(id, false)?;
        self.record(PlatformAction::UnlockPost {
            post_id: id.clone(),
        });
        Ok(())
    }

    async fn post_comments(&self, id: &PostId) -> Result<Vec<Comment>, Error> {
        let ids = self
            .posts
            .get(id)
            .map(|p| p.comments.clone())
            .ok_or_else(|| anyhow!("post {} not found", id))?;
        Ok(self.listing(&ids))
    }

    async fn comment_replies(&self, id: &CommentId) -> Result<Vec<Comment>, Error> {
        if self.failing_replies.contains(id) {
            return Err(anyhow!("failed to fetch replies of {}", id));
        }

        let ids = self
            .comments
            .get(id)
            .map(|c| c.replies.clone())
            .ok_or_else(|| anyhow!("comment {} not found", id))?;
        Ok(self.listing(&ids))
    }

    async fn remove_comment(&self, id: &CommentId) -> Result<(), Error> {
        if self.failing_removals.contains(id) {
            return Err(anyhow!("platform rejected removal of {}", id));
        }

        self.comments
            .get_mut(id)
            .ok_or_else(|| anyhow!("comment {} not found", id))?
            .removed = true;
        self.record(PlatformAction::RemoveComment {
            comment_id: id.clone(),
        });
        Ok(())
    }
}
