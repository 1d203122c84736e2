use crate::services::client::{CommentId, PostId};
use serde::{Deserialize, Serialize};

/// Inbound trigger delivered by the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerEvent {
    ModAction(ModActionEvent),
    PostDelete(PostDeleteEvent),
    AutomoderatorFilterPost(AutomodFilterEvent),
}

impl TriggerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerEvent::ModAction(_) => "ModAction",
            TriggerEvent::PostDelete(_) => "PostDelete",
            TriggerEvent::AutomoderatorFilterPost(_) => "AutomoderatorFilterPost",
        }
    }
}

/// Moderation log action tag. Tags this crate does not act on are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModAction {
    RemoveLink,
    SpamLink,
    ApproveLink,
    Unsticky,
    Other(String),
}

impl From<String> for ModAction {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "removelink" => ModAction::RemoveLink,
            "spamlink" => ModAction::SpamLink,
            "approvelink" => ModAction::ApproveLink,
            "unsticky" => ModAction::Unsticky,
            _ => ModAction::Other(tag),
        }
    }
}

impl From<ModAction> for String {
    fn from(action: ModAction) -> Self {
        match action {
            ModAction::RemoveLink => "removelink".to_string(),
            ModAction::SpamLink => "spamlink".to_string(),
            ModAction::ApproveLink => "approvelink".to_string(),
            ModAction::Unsticky => "unsticky".to_string(),
            ModAction::Other(tag) => tag,
        }
    }
}

/// Post as described by the event payload. `is_locked` reflects the state when
/// the event was emitted, not a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPost {
    pub id: PostId,
    #[serde(default)]
    pub is_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModActionEvent {
    pub action: ModAction,
    #[serde(default)]
    pub target_post: Option<TargetPost>,
    #[serde(default)]
    pub target_comment: Option<CommentId>,
    /// Username of the acting moderator.
    #[serde(default)]
    pub moderator: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionSource {
    Unknown,
    User,
    Admin,
    Moderator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDeleteEvent {
    #[serde(default)]
    pub post_id: Option<PostId>,
    pub source: DeletionSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomodFilterEvent {
    #[serde(default)]
    pub post: Option<TargetPost>,
}
