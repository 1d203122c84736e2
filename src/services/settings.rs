use crate::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ENABLE_POST_LOCK: &str = "enable-post-lock";
pub const ENABLE_LOCK_DELETED: &str = "enable-lock-deleted";
pub const ENABLE_POST_UNLOCK: &str = "enable-post-unlock";
pub const ENABLE_UNSTICKY_LOCK: &str = "enable-unsticky-lock";
pub const IGNORE_UREDDIT: &str = "ignore-ureddit";
pub const IGNORE_AUTOMOD: &str = "ignore-automod";
pub const IGNORE_ADMINS: &str = "ignore-admins";
pub const MOD_BLACKLIST: &str = "mod-blacklist";
pub const MOD_WHITELIST: &str = "mod-whitelist";
pub const NUKE_COMMENTS: &str = "nuke-comments";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingError {
    #[error("setting `{key}` must be a boolean, got {value:?}")]
    ExpectedBool { key: &'static str, value: SettingValue },
    #[error("setting `{key}` must be text, got {value:?}")]
    ExpectedText { key: &'static str, value: SettingValue },
}

/// Installation-scoped key/value settings owned by the hosting runtime.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<SettingValue>, Error>;
}

/// Comma separated moderator usernames, as typed into a paragraph setting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsernameList {
    entries: Vec<String>,
}

impl UsernameList {
    /// Blank input yields an empty list. Otherwise every comma separated entry
    /// is kept trimmed, including blank ones.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        Self {
            entries: raw.split(',').map(|e| e.trim().to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.entries.iter().any(|e| e == username)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Toggles and lists that decide whose moderation actions are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnorePolicy {
    pub ignore_platform: bool,
    pub ignore_automod: bool,
    pub ignore_admins: bool,
    pub allow_list: UsernameList,
    pub block_list: UsernameList,
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self {
            ignore_platform: true,
            ignore_automod: true,
            ignore_admins: false,
            allow_list: UsernameList::default(),
            block_list: UsernameList::default(),
        }
    }
}

/// Snapshot of every setting, read once per inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub enable_post_lock: bool,
    pub enable_lock_deleted: bool,
    pub enable_post_unlock: bool,
    pub enable_unsticky_lock: bool,
    pub nuke_comments: bool,
    pub ignore: IgnorePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_post_lock: true,
            enable_lock_deleted: true,
            enable_post_unlock: false,
            enable_unsticky_lock: false,
            nuke_comments: false,
            ignore: IgnorePolicy::default(),
        }
    }
}

impl Settings {
    pub async fn load(store: &dyn SettingsStore) -> Result<Self, Error> {
        let defaults = Settings::default();

        let settings = Settings {
            enable_post_lock: get_bool(store, ENABLE_POST_LOCK, defaults.enable_post_lock).await?,
            enable_lock_deleted: get_bool(store, ENABLE_LOCK_DELETED, defaults.enable_lock_deleted)
                .await?,
            enable_post_unlock: get_bool(store, ENABLE_POST_UNLOCK, defaults.enable_post_unlock)
                .await?,
            enable_unsticky_lock: get_bool(
                store,
                ENABLE_UNSTICKY_LOCK,
                defaults.enable_unsticky_lock,
            )
            .await?,
            nuke_comments: get_bool(store, NUKE_COMMENTS, defaults.nuke_comments).await?,
            ignore: IgnorePolicy {
                ignore_platform: get_bool(store, IGNORE_UREDDIT, defaults.ignore.ignore_platform)
                    .await?,
                ignore_automod: get_bool(store, IGNORE_AUTOMOD, defaults.ignore.ignore_automod)
                    .await?,
                ignore_admins: get_bool(store, IGNORE_ADMINS, defaults.ignore.ignore_admins)
                    .await?,
                allow_list: UsernameList::parse(&get_text(store, MOD_WHITELIST).await?),
                block_list: UsernameList::parse(&get_text(store, MOD_BLACKLIST).await?),
            },
        };

        Ok(settings)
    }
}

async fn get_bool(store: &dyn SettingsStore, key: &'static str, default: bool) -> Result<bool, Error> {
    match store.get(key).await? {
        None => Ok(default),
        Some(SettingValue::Bool(v)) => Ok(v),
        Some(value) => Err(SettingError::ExpectedBool { key, value }.into()),
    }
}

async fn get_text(store: &dyn SettingsStore, key: &'static str) -> Result<String, Error> {
    match store.get(key).await? {
        None => Ok(String::new()),
        Some(SettingValue::Text(v)) => Ok(v),
        Some(value) => Err(SettingError::ExpectedText { key, value }.into()),
    }
}

/// Settings held in memory, e.g. loaded from a JSON object on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MemorySettings {
    values: HashMap<String, SettingValue>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<SettingValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Result<Option<SettingValue>, Error> {
        Ok(self.values.get(key).cloned())
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Text(v.to_string())
    }
}
