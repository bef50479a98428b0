//! Persisted session record and theme preference.

use tracing::warn;

use crate::domain::role::Role;
use crate::domain::session::{BearerToken, Session};
use crate::domain::theme::Theme;
use crate::infra::storage::{KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "accessToken";
pub const ROLE_KEY: &str = "userRole";
pub const USER_ID_KEY: &str = "userId";
pub const DISPLAY_NAME_KEY: &str = "userName";
pub const THEME_KEY: &str = "theme";

pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, ROLE_KEY, USER_ID_KEY, DISPLAY_NAME_KEY];

/// Reads and writes the session as one unit. A record with any field missing
/// or empty, or with a role this client does not know, is no session at all.
#[derive(Debug)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        self.store.set_many(&[
            (TOKEN_KEY, session.token.expose()),
            (ROLE_KEY, session.role.as_str()),
            (USER_ID_KEY, session.user_id.as_str()),
            (DISPLAY_NAME_KEY, session.display_name.as_str()),
        ])
    }

    pub fn load(&self) -> Result<Option<Session>, StorageError> {
        let token = self.non_empty(TOKEN_KEY)?;
        let role = self.non_empty(ROLE_KEY)?;
        let user_id = self.non_empty(USER_ID_KEY)?;
        let display_name = self.non_empty(DISPLAY_NAME_KEY)?;

        let (Some(token), Some(role), Some(user_id), Some(display_name)) =
            (token, role, user_id, display_name)
        else {
            return Ok(None);
        };

        let role = match role.parse::<Role>() {
            Ok(role) => role,
            Err(err) => {
                warn!(
                    target = "noticeboard::session",
                    error = %err,
                    "stored session ignored"
                );
                return Ok(None);
            }
        };

        Ok(Some(Session {
            token: BearerToken::new(token),
            role,
            user_id,
            display_name,
        }))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_many(&SESSION_KEYS)
    }

    pub fn theme(&self) -> Result<Theme, StorageError> {
        Ok(Theme::from_stored(self.store.get(THEME_KEY)?.as_deref()))
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.store.set_many(&[(THEME_KEY, theme.as_str())])
    }

    fn non_empty(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(key)?.filter(|value| !value.is_empty()))
    }
}
