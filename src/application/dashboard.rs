use tracing::info;

use crate::domain::session::Session;

use super::gateway::{Gateway, GatewayError};
use super::page::Page;
use super::posts::PostListRenderer;

/// Switches the page to a role's dashboard and loads that role's feed.
#[derive(Debug, Clone, Copy)]
pub struct DashboardRenderer {
    posts: PostListRenderer,
}

impl DashboardRenderer {
    pub fn new(posts: PostListRenderer) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &PostListRenderer {
        &self.posts
    }

    /// A failed fetch is already shown in the list region; the error is
    /// returned so callers can report it.
    pub async fn render<G>(
        &self,
        page: &mut Page,
        session: &Session,
        gateway: &G,
    ) -> Result<(), GatewayError>
    where
        G: Gateway + ?Sized,
    {
        let section = session.role.section();
        page.show_only(section);
        page.header_visible = true;
        page.logout_visible = true;
        page.welcome = Some(session.welcome_message());

        info!(
            target = "noticeboard::dashboard",
            role = %session.role,
            section = section.element_id(),
            "dashboard shown"
        );

        match session.role.feed() {
            Some(feed) => self
                .posts
                .render(page, gateway, &session.token, feed)
                .await
                .map(|_| ()),
            None => Ok(()),
        }
    }
}
