//! User records and the injected session identity.

use serde::{Deserialize, Serialize};

use crate::service::{non_empty, RecordId};

/// Role assumed when a user record carries none.
pub const DEFAULT_ROLE: &str = "user";
/// Role required for moderation commands.
pub const ADMIN_ROLE: &str = "admin";
/// Provider name recorded on listings when the session has no display name.
pub const ANONYMOUS_PROVIDER: &str = "Anonymous Provider";

/// A user as returned by the `users` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", default)]
    pub object_id: Option<RecordId>,
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl UserRecord {
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.object_id
            .as_ref()
            .or(self.id.as_ref())
            .map(RecordId::to_text)
    }

    /// Stored role, `"user"` when absent or empty.
    #[must_use]
    pub fn effective_role(&self) -> &str {
        non_empty(&self.role).unwrap_or(DEFAULT_ROLE)
    }

    /// Name shown in user tables: `name`, else `displayName`, else empty.
    #[must_use]
    pub fn name_label(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.display_name))
            .unwrap_or("")
    }
}

/// The signed-in identity, resolved once at startup and passed explicitly to
/// the handlers that need it.
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub display_name: Option<String>,
    /// Stored role from the API; `"user"` when the lookup fails.
    pub role: String,
}

impl Session {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Provider name recorded on listings created by this session.
    #[must_use]
    pub fn provider_label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(ANONYMOUS_PROVIDER)
    }
}

/// Capitalizes the first letter of a role name for display.
#[must_use]
pub fn display_role(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Payload for `PATCH /users/{email}` when changing a role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleUpdate {
    pub role: String,
}

/// Payload for `PATCH /users/{email}` when updating profile fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(value: serde_json::Value) -> UserRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn role_defaults_to_user() {
        assert_eq!(user(json!({"email": "a@b.c"})).effective_role(), DEFAULT_ROLE);
        assert_eq!(user(json!({"role": ""})).effective_role(), DEFAULT_ROLE);
        assert_eq!(user(json!({"role": "admin"})).effective_role(), ADMIN_ROLE);
    }

    #[test]
    fn name_label_prefers_name_then_display_name() {
        assert_eq!(user(json!({"name": "Ada", "displayName": "A."})).name_label(), "Ada");
        assert_eq!(user(json!({"displayName": "A."})).name_label(), "A.");
        assert_eq!(user(json!({})).name_label(), "");
    }

    #[test]
    fn display_role_capitalizes_first_letter() {
        assert_eq!(display_role("user"), "User");
        assert_eq!(display_role("admin"), "Admin");
        assert_eq!(display_role(""), "");
    }

    #[test]
    fn session_admin_check_and_provider_label() {
        let mut session = Session {
            email: "p@x.io".to_string(),
            display_name: None,
            role: "admin".to_string(),
        };
        assert!(session.is_admin());
        assert_eq!(session.provider_label(), ANONYMOUS_PROVIDER);
        session.display_name = Some("Pat".to_string());
        assert_eq!(session.provider_label(), "Pat");
        session.role = "user".to_string();
        assert!(!session.is_admin());
    }
}
