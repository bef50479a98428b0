//! The backend as the application layer sees it.

use async_trait::async_trait;
use noticeboard_api_types::LoginResponse;
use thiserror::Error;

use crate::domain::posts::{Post, PostDraft};
use crate::domain::role::PostFeed;
use crate::domain::session::{BearerToken, Credentials};

/// Failure of a single backend call.
///
/// `Rejected` means the backend answered and refused; `Transport` means no
/// answer arrived at all. Callers surface them differently and must never
/// merge the two.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

pub type LoginGrant = LoginResponse;

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, GatewayError>;

    async fn create_post(&self, token: &BearerToken, draft: &PostDraft)
    -> Result<(), GatewayError>;

    async fn delete_post(&self, token: &BearerToken, post_id: i64) -> Result<(), GatewayError>;

    async fn fetch_posts(
        &self,
        token: &BearerToken,
        feed: PostFeed,
    ) -> Result<Vec<Post>, GatewayError>;
}
