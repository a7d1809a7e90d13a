//! Session and role gate
//!
//! The session is checked once against `/auth/me` and the resulting user,
//! role included, is shared by every page. Admin-only actions ask this gate
//! rather than fetching the role themselves.

mod session;
mod types;

use reqwest::Client;

use crate::error::Error;
use crate::fetch::Fetch;
use crate::views::View;

pub use session::*;
pub use types::*;

/// Client for the session endpoints
#[derive(Debug, Clone)]
pub struct Auth {
    /// The API base URL
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// The shared session
    session: Session,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
            session: Session::new(),
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth{}", self.url, path)
    }

    /// Ask the backend who is signed in.
    ///
    /// Stores the user on success and clears it on any failure, returning the
    /// error to the caller.
    pub async fn refresh(&self) -> Result<User, Error> {
        self.session.begin_check();

        let result = Fetch::get(&self.client, &self.get_auth_url("/me"))
            .execute::<User>()
            .await;

        match result {
            Ok(user) => {
                tracing::debug!(user = %user.email, role = %user.role, "session is valid");
                self.session.finish_check(Some(user.clone()));
                Ok(user)
            }
            Err(e) => {
                self.session.finish_check(None);
                Err(e)
            }
        }
    }

    /// Check the session status, returning whether a user is signed in.
    ///
    /// Failures, network errors included, leave the session signed out.
    pub async fn check_auth(&self) -> bool {
        match self.refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, "authentication check failed");
                false
            }
        }
    }

    /// Check the session only if nobody is signed in and no check is running
    pub async fn ensure_authenticated(&self) -> bool {
        if !self.session.is_authenticated() && !self.session.is_loading() {
            return self.check_auth().await;
        }
        self.session.is_authenticated()
    }

    /// Sign out.
    ///
    /// On success the local session is cleared and the login view is
    /// returned. On failure the session is left as it was.
    pub async fn logout(&self) -> Result<View, Error> {
        Fetch::post(&self.client, &self.get_auth_url("/logout"))
            .execute_checked()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "logout failed");
                e
            })?;

        self.session.clear();
        tracing::info!("logged out");
        Ok(View::Login)
    }

    /// The shared session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The signed-in user
    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    /// Whether a user is signed in
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether a status check is in flight
    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    /// Whether the signed-in user holds the admin role.
    ///
    /// Unknown users are never admins.
    pub fn is_admin(&self) -> bool {
        self.session
            .user()
            .map(|u| u.role.is_admin())
            .unwrap_or(false)
    }

    /// Refuse `action` unless the signed-in user is an admin.
    ///
    /// `action` completes the sentence "Only admin users can ...".
    pub fn require_admin(&self, action: &str) -> Result<(), Error> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(action, "admin role required");
            Err(Error::access_denied(format!("Only admin users can {}.", action)))
        }
    }
}
