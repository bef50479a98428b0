//! Bootstrap and event dispatch.
//!
//! [`App::bootstrap`] plays the part of a page load: it restores the theme and
//! the stored session, then shows either the login section or the dashboard.
//! User actions arrive as [`Event`]s; every variant has exactly one handler.

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::domain::posts::PostDraft;
use crate::domain::role::{PostFeed, Role, SectionId};
use crate::domain::session::{BearerToken, Credentials, Session};
use crate::infra::storage::KeyValueStore;

use super::dashboard::DashboardRenderer;
use super::error::AppError;
use super::gateway::{Gateway, GatewayError};
use super::page::{Page, PostForm};
use super::posts::{PostListRenderer, UNEXPECTED_RESPONSE};
use super::session::SessionStore;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_NETWORK_ERROR: &str = "Network error. Is the backend server running?";
pub const POST_CREATED: &str = "Post created successfully!";
pub const POST_NETWORK_ERROR: &str = "Network error.";
pub const POST_DELETED: &str = "Post deleted successfully.";
pub const DELETE_NETWORK_ERROR: &str = "Network error during deletion.";
pub const LOGIN_REQUIRED: &str = "Please log in first.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SubmitLogin(Credentials),
    SubmitPost {
        title: String,
        content: String,
        class_id: u64,
    },
    DeletePost {
        post_id: i64,
    },
    Logout,
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    Failed,
}

pub struct App<G, S> {
    gateway: G,
    sessions: SessionStore<S>,
    dashboard: DashboardRenderer,
    page: Page,
    session: Option<Session>,
}

impl<G, S> App<G, S>
where
    G: Gateway,
    S: KeyValueStore,
{
    pub async fn bootstrap(gateway: G, store: S, timezone: Tz) -> Result<Self, AppError> {
        let sessions = SessionStore::new(store);
        let mut app = Self {
            gateway,
            dashboard: DashboardRenderer::new(PostListRenderer::new(timezone)),
            page: Page::new(sessions.theme()?),
            sessions,
            session: None,
        };
        app.restore().await?;
        Ok(app)
    }

    /// Throw the page away and load it again from persisted state.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        self.restore().await
    }

    async fn restore(&mut self) -> Result<(), AppError> {
        self.page = Page::new(self.sessions.theme()?);
        self.session = self.sessions.load()?;

        // The stored token is trusted as-is; a revoked one shows up on the
        // first authenticated call.
        match &self.session {
            Some(session) => {
                info!(
                    target = "noticeboard::app",
                    role = %session.role,
                    "session restored"
                );
                let _ = self
                    .dashboard
                    .render(&mut self.page, session, &self.gateway)
                    .await;
            }
            None => self.page.show_only(SectionId::Login),
        }
        Ok(())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub async fn dispatch(&mut self, event: Event) -> Result<DispatchOutcome, AppError> {
        match event {
            Event::SubmitLogin(credentials) => self.login(credentials).await,
            Event::SubmitPost {
                title,
                content,
                class_id,
            } => self.create_post(title, content, class_id).await,
            Event::DeletePost { post_id } => self.delete_post(post_id).await,
            Event::Logout => self.logout().await,
            Event::ToggleTheme => self.toggle_theme(),
        }
    }

    async fn login(&mut self, credentials: Credentials) -> Result<DispatchOutcome, AppError> {
        let grant = match self.gateway.login(&credentials).await {
            Ok(grant) => grant,
            Err(err) => {
                return Ok(self.fail("login", &err, str::to_string, LOGIN_NETWORK_ERROR));
            }
        };

        let role = match grant.user.role.parse::<Role>() {
            Ok(role) => role,
            Err(err) => {
                warn!(target = "noticeboard::app", error = %err, "login refused");
                self.page
                    .toasts
                    .error(format!("Unsupported role \"{}\".", grant.user.role));
                return Ok(DispatchOutcome::Failed);
            }
        };

        let session = Session {
            token: BearerToken::new(grant.access_token),
            role,
            user_id: grant.user.id.to_string(),
            display_name: grant.user.first_name,
        };
        self.sessions.save(&session)?;

        info!(
            target = "noticeboard::app",
            role = %session.role,
            user_id = %session.user_id,
            "signed in"
        );
        self.page.toasts.success(LOGIN_SUCCESS);
        let _ = self
            .dashboard
            .render(&mut self.page, &session, &self.gateway)
            .await;
        self.session = Some(session);

        Ok(DispatchOutcome::Completed)
    }

    async fn create_post(
        &mut self,
        title: String,
        content: String,
        class_id: u64,
    ) -> Result<DispatchOutcome, AppError> {
        self.page.post_form = PostForm {
            title: title.clone(),
            content: content.clone(),
            class_id: Some(class_id),
        };

        let Some(session) = &self.session else {
            self.page.toasts.error(LOGIN_REQUIRED);
            return Ok(DispatchOutcome::Failed);
        };

        let draft = match PostDraft::new(title, content, class_id) {
            Ok(draft) => draft,
            Err(err) => {
                self.page.toasts.error(err.to_string());
                return Ok(DispatchOutcome::Failed);
            }
        };

        match self.gateway.create_post(&session.token, &draft).await {
            Ok(()) => {
                info!(
                    target = "noticeboard::app",
                    class_id = draft.class_id,
                    "post created"
                );
                self.page.toasts.success(POST_CREATED);
                self.page.post_form.reset();
                Ok(DispatchOutcome::Completed)
            }
            Err(err) => Ok(self.fail("create post", &err, str::to_string, POST_NETWORK_ERROR)),
        }
    }

    async fn delete_post(&mut self, post_id: i64) -> Result<DispatchOutcome, AppError> {
        let Some(session) = &self.session else {
            self.page.toasts.error(LOGIN_REQUIRED);
            return Ok(DispatchOutcome::Failed);
        };

        match self.gateway.delete_post(&session.token, post_id).await {
            Ok(()) => {
                info!(target = "noticeboard::app", post_id, "post deleted");
                self.page.toasts.success(POST_DELETED);
                // The list is refetched; cards are never removed locally. Only
                // the admin dashboard shows deletable posts.
                if session.role.feed() == Some(PostFeed::Admin) {
                    let _ = self
                        .dashboard
                        .posts()
                        .render(&mut self.page, &self.gateway, &session.token, PostFeed::Admin)
                        .await;
                }
                Ok(DispatchOutcome::Completed)
            }
            Err(err) => Ok(self.fail(
                "delete post",
                &err,
                |message| format!("Failed to delete post: {message}"),
                DELETE_NETWORK_ERROR,
            )),
        }
    }

    async fn logout(&mut self) -> Result<DispatchOutcome, AppError> {
        self.sessions.clear()?;
        info!(target = "noticeboard::app", "signed out");
        self.reload().await?;
        Ok(DispatchOutcome::Completed)
    }

    fn toggle_theme(&mut self) -> Result<DispatchOutcome, AppError> {
        let theme = self.page.theme.toggled();
        self.sessions.set_theme(theme)?;
        self.page.set_theme(theme);
        Ok(DispatchOutcome::Completed)
    }

    /// Turn a gateway failure into an error toast. The page is otherwise left
    /// as it was before the action.
    fn fail(
        &mut self,
        action: &'static str,
        err: &GatewayError,
        on_rejected: impl FnOnce(&str) -> String,
        on_transport: &str,
    ) -> DispatchOutcome {
        warn!(target = "noticeboard::app", action, error = %err, "action failed");
        let text = match err {
            GatewayError::Rejected { message, .. } => on_rejected(message),
            GatewayError::Transport(_) => on_transport.to_string(),
            GatewayError::Decode(_) => UNEXPECTED_RESPONSE.to_string(),
        };
        self.page.toasts.error(text);
        DispatchOutcome::Failed
    }
}
