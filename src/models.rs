use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Dashboard Record Models
// ============================================================================
//
// Records as the events REST API returns them. Only `id` is load-bearing for
// this service (it is the display ordering key); every other field is carried
// through untouched for whatever renders the list.
//
// ============================================================================

/// Common interface for records shown in a "recent items" list
pub trait DisplayRecord {
    /// Ordering key for the displayed list (ascending)
    fn display_id(&self) -> i64;

    /// Short human-readable form for log rendering
    fn label(&self) -> String;
}

/// An actor that appeared in a recent event
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ActorRecord {
    pub id: i64,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub display_login: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Anything else the backend sends, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DisplayRecord for ActorRecord {
    fn display_id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        match &self.login {
            Some(login) => login.clone(),
            None => format!("actor #{}", self.id),
        }
    }
}

/// A repository that appeared in a recent event
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RepositoryRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stars: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DisplayRecord for RepositoryRecord {
    fn display_id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("repository #{}", self.id),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_record_deserializes_with_extra_fields() {
        let json = r#"{"id": 42, "login": "octocat", "gravatar_id": "", "url": "https://api.github.com/users/octocat"}"#;
        let actor: ActorRecord = serde_json::from_str(json).unwrap();

        assert_eq!(actor.id, 42);
        assert_eq!(actor.login.as_deref(), Some("octocat"));
        assert!(actor.extra.contains_key("gravatar_id"));
        assert!(actor.extra.contains_key("url"));
    }

    #[test]
    fn test_actor_record_requires_only_id() {
        let actor: ActorRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(actor.id, 7);
        assert_eq!(actor.label(), "actor #7");
    }

    #[test]
    fn test_actor_record_roundtrip_keeps_extras() {
        let json = r#"{"id": 1, "login": "a", "node_id": "MDQ6VXNlcjE="}"#;
        let actor: ActorRecord = serde_json::from_str(json).unwrap();
        let value: Value = serde_json::to_value(&actor).unwrap();

        assert_eq!(value["node_id"], "MDQ6VXNlcjE=");
    }

    #[test]
    fn test_repository_record_label() {
        let repo: RepositoryRecord =
            serde_json::from_str(r#"{"id": 3, "name": "octocat/hello-world", "stars": 12}"#).unwrap();
        assert_eq!(repo.display_id(), 3);
        assert_eq!(repo.label(), "octocat/hello-world");
        assert_eq!(repo.stars, Some(12));
    }
}
