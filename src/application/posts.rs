//! Post list rendering.
//!
//! A render cycle puts the list region into `Loading`, fetches the feed, then
//! replaces the region with exactly one of `Populated`, `Empty` or `Error`.

use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::posts::{Post, author_name};
use crate::domain::role::PostFeed;
use crate::domain::session::BearerToken;
use crate::util::timezone;

use super::gateway::{Gateway, GatewayError};
use super::page::Page;

pub const LOADING_NOTICE: &str = "Loading posts...";
pub const EMPTY_NOTICE: &str = "No posts to display.";
pub const NETWORK_NOTICE: &str = "Network error fetching posts.";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server.";
pub const DELETE_LABEL: &str = "Delete";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PostListState {
    Loading,
    Populated { cards: Vec<PostCard> },
    Empty,
    Error { message: String },
}

impl PostListState {
    /// The single line shown in place of cards, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            PostListState::Loading => Some(LOADING_NOTICE),
            PostListState::Populated { .. } => None,
            PostListState::Empty => Some(EMPTY_NOTICE),
            PostListState::Error { message } => Some(message.as_str()),
        }
    }

    pub fn cards(&self) -> &[PostCard] {
        match self {
            PostListState::Populated { cards } => cards.as_slice(),
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PostListState::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub title: String,
    pub content: String,
    pub author: String,
    pub class_name: String,
    pub posted_at: String,
    pub delete: Option<DeleteControl>,
}

impl PostCard {
    pub fn byline(&self) -> String {
        format!(
            "Posted by {} in {} on {}",
            self.author, self.class_name, self.posted_at
        )
    }
}

/// Button that dispatches a delete for `post_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteControl {
    pub post_id: i64,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PostListRenderer {
    timezone: Tz,
}

impl PostListRenderer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn card(&self, post: &Post, feed: PostFeed) -> PostCard {
        let delete = post
            .id
            .filter(|_| feed.allows_delete())
            .map(|post_id| DeleteControl {
                post_id,
                label: DELETE_LABEL,
            });

        PostCard {
            title: post.title.clone(),
            content: post.content.clone(),
            author: author_name(post),
            class_name: post.class_name.clone(),
            posted_at: timezone::long_form(post.created_at, self.timezone),
            delete,
        }
    }

    pub fn populated(&self, posts: &[Post], feed: PostFeed) -> PostListState {
        if posts.is_empty() {
            return PostListState::Empty;
        }
        PostListState::Populated {
            cards: posts.iter().map(|post| self.card(post, feed)).collect(),
        }
    }

    pub fn failed(error: &GatewayError) -> PostListState {
        let message = match error {
            GatewayError::Rejected { message, .. } => format!("Error fetching posts: {message}"),
            GatewayError::Transport(_) => NETWORK_NOTICE.to_string(),
            GatewayError::Decode(_) => UNEXPECTED_RESPONSE.to_string(),
        };
        PostListState::Error { message }
    }

    /// Fetch `feed` and render it into its list region, returning the number
    /// of posts shown.
    pub async fn render<G>(
        &self,
        page: &mut Page,
        gateway: &G,
        token: &BearerToken,
        feed: PostFeed,
    ) -> Result<usize, GatewayError>
    where
        G: Gateway + ?Sized,
    {
        let list = feed.list();
        page.set_list(list, PostListState::Loading);

        match gateway.fetch_posts(token, feed).await {
            Ok(posts) => {
                debug!(
                    target = "noticeboard::posts",
                    list = list.element_id(),
                    count = posts.len(),
                    "posts rendered"
                );
                page.set_list(list, self.populated(&posts, feed));
                Ok(posts.len())
            }
            Err(err) => {
                warn!(
                    target = "noticeboard::posts",
                    list = list.element_id(),
                    error = %err,
                    "fetching posts failed"
                );
                page.set_list(list, Self::failed(&err));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post(id: Option<i64>) -> Post {
        Post {
            id,
            title: "Sports day".into(),
            content: "Wear trainers.".into(),
            author_first_name: "Ada".into(),
            author_last_name: "Lovelace".into(),
            class_name: "Year 5".into(),
            created_at: datetime!(2026-10-18 15:04 UTC),
        }
    }

    #[test]
    fn admin_cards_carry_delete_control() {
        let renderer = PostListRenderer::new(Tz::UTC);
        let card = renderer.card(&post(Some(3)), PostFeed::Admin);
        assert_eq!(
            card.delete,
            Some(DeleteControl {
                post_id: 3,
                label: DELETE_LABEL
            })
        );
        assert_eq!(
            card.byline(),
            "Posted by Ada Lovelace in Year 5 on October 18, 2026 at 03:04 PM"
        );
    }

    #[test]
    fn non_admin_cards_never_delete() {
        let renderer = PostListRenderer::new(Tz::UTC);
        assert_eq!(renderer.card(&post(Some(3)), PostFeed::Student).delete, None);
        assert_eq!(renderer.card(&post(None), PostFeed::Parent).delete, None);
    }

    #[test]
    fn admin_post_without_id_has_no_control() {
        let renderer = PostListRenderer::new(Tz::UTC);
        assert_eq!(renderer.card(&post(None), PostFeed::Admin).delete, None);
    }

    #[test]
    fn empty_feed_is_empty_state() {
        let renderer = PostListRenderer::new(Tz::UTC);
        let state = renderer.populated(&[], PostFeed::Parent);
        assert_eq!(state, PostListState::Empty);
        assert_eq!(state.notice(), Some(EMPTY_NOTICE));
        assert!(state.cards().is_empty());
    }

    #[test]
    fn failures_map_to_distinct_notices() {
        let rejected = PostListRenderer::failed(&GatewayError::rejected(403, "Unauthorized access."));
        assert_eq!(
            rejected.notice(),
            Some("Error fetching posts: Unauthorized access.")
        );

        let transport = PostListRenderer::failed(&GatewayError::transport("refused"));
        assert_eq!(transport.notice(), Some(NETWORK_NOTICE));

        let decode = PostListRenderer::failed(&GatewayError::decode("expected array"));
        assert_eq!(decode.notice(), Some(UNEXPECTED_RESPONSE));
    }
}
