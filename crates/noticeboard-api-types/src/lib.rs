//! Request and response shapes exchanged with the announcement backend.
//!
//! The backend answers every failure with `{"message": "..."}` and every
//! success with either a bare acknowledgement or the documents below.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub mod timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: UserId,
    pub role: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// User identifiers are integers on the wire today; strings are accepted so a
/// backend switching to opaque ids does not break sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub class_id: u64,
}

/// Body of every error response, and of most acknowledgements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Present on the admin feed only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub class_name: String,
    #[serde(with = "timestamp")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_post_carries_id_and_http_date() {
        let raw = r#"{
            "id": 7,
            "title": "Field trip",
            "content": "Bring a packed lunch.",
            "author_first_name": "Ada",
            "author_last_name": "Lovelace",
            "class_name": "Year 5",
            "created_at": "Sun, 18 Oct 2026 15:04:00 GMT"
        }"#;

        let post: Post = serde_json::from_str(raw).expect("post");
        assert_eq!(post.id, Some(7));
        assert_eq!(post.created_at.unix_timestamp(), 1_792_335_840);
    }

    #[test]
    fn feed_posts_without_id_are_accepted() {
        let raw = r#"{
            "title": "Spelling test",
            "content": "Friday.",
            "author_first_name": "Grace",
            "author_last_name": "Hopper",
            "class_name": "Year 3",
            "created_at": "2026-10-18T15:04:00Z"
        }"#;

        let post: Post = serde_json::from_str(raw).expect("post");
        assert_eq!(post.id, None);
    }

    #[test]
    fn login_response_tolerates_extra_user_fields() {
        let raw = r#"{
            "message": "Login successful",
            "access_token": "jwt",
            "user": {"id": 3, "first_name": "Sam", "last_name": "Lee", "email": "s@x.org", "role": "parent"}
        }"#;

        let response: LoginResponse = serde_json::from_str(raw).expect("login");
        assert_eq!(response.user.id.to_string(), "3");
        assert_eq!(response.user.role, "parent");
        assert_eq!(response.user.last_name.as_deref(), Some("Lee"));
    }

    #[test]
    fn message_body_defaults_when_absent() {
        let body: MessageBody = serde_json::from_str("{}").expect("body");
        assert_eq!(body.message, None);
    }
}
