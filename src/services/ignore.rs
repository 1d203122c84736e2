use crate::Error;
use crate::services::client::ModerationClient;
use crate::services::settings::IgnorePolicy;
use tracing::debug;

/// Account the platform itself acts as when it filters or removes content.
pub const PLATFORM_USERNAME: &str = "reddit";
/// Account the automated filter acts as.
pub const AUTOMOD_USERNAME: &str = "AutoModerator";

/// One step of the ignore decision. Rules are evaluated in [`RULES`] order and
/// the first one that decides wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreRule {
    MissingName,
    Platform,
    Automod,
    AdminGated,
    ListGated,
}

pub const RULES: [IgnoreRule; 5] = [
    IgnoreRule::MissingName,
    IgnoreRule::Platform,
    IgnoreRule::Automod,
    IgnoreRule::AdminGated,
    IgnoreRule::ListGated,
];

impl IgnoreRule {
    /// Returns `Some(ignored)` if this rule decides for `username`, `None` to
    /// fall through to the next rule.
    pub async fn evaluate(
        self,
        username: &str,
        policy: &IgnorePolicy,
        client: &dyn ModerationClient,
    ) -> Result<Option<bool>, Error> {
        let decision = match self {
            IgnoreRule::MissingName => username.is_empty().then_some(true),
            IgnoreRule::Platform => (username == PLATFORM_USERNAME).then_some(policy.ignore_platform),
            IgnoreRule::Automod => (username == AUTOMOD_USERNAME).then_some(policy.ignore_automod),
            IgnoreRule::AdminGated => {
                if !policy.ignore_admins {
                    return Ok(None);
                }
                // Lists are never consulted once admin gating is on.
                Some(is_admin(client, username).await?)
            }
            IgnoreRule::ListGated => Some(list_decision(username, policy)),
        };

        Ok(decision)
    }
}

/// Decides whether the moderation action performed by `username` is ignored,
/// i.e. must not trigger a lock.
pub async fn resolve(
    username: Option<&str>,
    policy: &IgnorePolicy,
    client: &dyn ModerationClient,
) -> Result<bool, Error> {
    let username = username.unwrap_or_default();

    for rule in RULES {
        if let Some(ignored) = rule.evaluate(username, policy, client).await? {
            debug!(?rule, username, ignored, "Moderator ignore rule matched");
            return Ok(ignored);
        }
    }

    Ok(false)
}

/// Allow-list mode never ignores anyone, listed or not. The block-list is only
/// consulted when the allow-list is empty.
fn list_decision(username: &str, policy: &IgnorePolicy) -> bool {
    if !policy.allow_list.is_empty() {
        if !policy.allow_list.contains(username) {
            debug!(username, "Moderator not on allowlist, acting anyway");
        }
        return false;
    }

    policy.block_list.contains(username)
}

async fn is_admin(client: &dyn ModerationClient, username: &str) -> Result<bool, Error> {
    if username.is_empty() {
        return Ok(false);
    }

    let user = client.get_user_by_username(username).await?;
    Ok(user.is_some_and(|u| u.is_admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::client::User;
    use crate::services::platform::{MemoryPlatform, PlatformSnapshot};
    use crate::services::settings::UsernameList;

    fn platform() -> MemoryPlatform {
        MemoryPlatform::from_snapshot(PlatformSnapshot {
            posts: vec![],
            users: vec![
                User {
                    username: "admin1".into(),
                    is_admin: true,
                },
                User {
                    username: "spammer1".into(),
                    is_admin: false,
                },
            ],
        })
    }

    fn policy(allow: &str, block: &str) -> IgnorePolicy {
        IgnorePolicy {
            ignore_platform: false,
            ignore_automod: false,
            ignore_admins: false,
            allow_list: UsernameList::parse(allow),
            block_list: UsernameList::parse(block),
        }
    }

    #[tokio::test]
    async fn test_missing_name_is_ignored() {
        let client = platform();
        let policy = policy("", "");
        assert!(resolve(None, &policy, &client).await.unwrap());
        assert!(resolve(Some(""), &policy, &client).await.unwrap());
    }

    #[tokio::test]
    async fn test_special_identities_follow_toggles() {
        let client = platform();
        // Lists naming the special accounts must not matter
        let mut policy = policy("", "reddit, AutoModerator");

        assert!(!resolve(Some(PLATFORM_USERNAME), &policy, &client).await.unwrap());
        assert!(!resolve(Some(AUTOMOD_USERNAME), &policy, &client).await.unwrap());

        policy.ignore_platform = true;
        policy.ignore_automod = true;
        policy.ignore_admins = true;
        assert!(resolve(Some(PLATFORM_USERNAME), &policy, &client).await.unwrap());
        assert!(resolve(Some(AUTOMOD_USERNAME), &policy, &client).await.unwrap());
        assert_eq!(client.user_lookups(), 0);
    }

    #[tokio::test]
    async fn test_admin_gate_short_circuits_lists() {
        let client = platform();
        let mut policy = policy("", "spammer1");
        policy.ignore_admins = true;

        assert!(resolve(Some("admin1"), &policy, &client).await.unwrap());
        // Block-listed but not an admin
        assert!(!resolve(Some("spammer1"), &policy, &client).await.unwrap());
        // Unknown user
        assert!(!resolve(Some("ghost"), &policy, &client).await.unwrap());
        assert_eq!(client.user_lookups(), 3);
    }

    #[tokio::test]
    async fn test_allow_list_never_ignores() {
        let client = platform();
        let policy = policy("alice, bob", "carol");

        assert!(!resolve(Some("alice"), &policy, &client).await.unwrap());
        assert!(!resolve(Some("zed"), &policy, &client).await.unwrap());
        // Allow-list present overrides block-list entirely
        assert!(!resolve(Some("carol"), &policy, &client).await.unwrap());
        assert_eq!(client.user_lookups(), 0);
    }

    #[tokio::test]
    async fn test_block_list() {
        let client = platform();
        let policy = policy("", "spammer1");

        assert!(resolve(Some("spammer1"), &policy, &client).await.unwrap());
        assert!(!resolve(Some("other"), &policy, &client).await.unwrap());
        // Exact, case-sensitive match
        assert!(!resolve(Some("Spammer1"), &policy, &client).await.unwrap());
        assert!(!resolve(Some(" spammer1"), &policy, &client).await.unwrap());
    }

    #[tokio::test]
    async fn test_rules_decide_independently() {
        let client = platform();
        let policy = policy("", "");

        assert_eq!(
            IgnoreRule::Platform.evaluate("someone", &policy, &client).await.unwrap(),
            None
        );
        assert_eq!(
            IgnoreRule::AdminGated.evaluate("admin1", &policy, &client).await.unwrap(),
            None
        );
        assert_eq!(
            IgnoreRule::ListGated.evaluate("someone", &policy, &client).await.unwrap(),
            Some(false)
        );
    }
}
