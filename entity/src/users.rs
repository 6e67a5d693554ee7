use crate::{timestamp, Id, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub email: String,
    pub full_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

fn default_active() -> bool {
    true
}

/// Response of the password login endpoint.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// The access token never shows up in logs.
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"[redacted]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults_is_active() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.io","full_name":"Ada","created_at":"2025-01-02T03:04:05+00:00"}"#,
        )
        .unwrap();
        assert!(user.is_active);
    }

    #[test]
    fn test_auth_token_debug_is_redacted() {
        let token = AuthToken {
            access_token: "secret-jwt".to_string(),
            token_type: "bearer".to_string(),
        };
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret-jwt"));
    }
}
