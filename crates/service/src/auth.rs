//! Session-driven auth state.
//!
//! Each session change re-resolves the signed-in user's profile. A lookup
//! failure is logged and leaves the user unresolved; it never tears down the
//! session itself.

use cdm_admin_core::{AuthSession, UserProfile};

use crate::profile_service::ProfileService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub is_loading: bool,
    pub session: Option<AuthSession>,
    pub current_user: Option<UserProfile>,
}

impl Default for AuthState {
    /// Loading until the first session event arrives.
    fn default() -> Self {
        Self { is_loading: true, session: None, current_user: None }
    }
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Handles a session event (sign-in, sign-out, token refresh).
    pub async fn apply_session(&mut self, session: Option<AuthSession>, profiles: &ProfileService) {
        self.is_loading = true;
        self.current_user = match &session {
            Some(session) => match profiles.get_profile(&session.user_id).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!(user_id = %session.user_id, error = %e, "failed to load profile");
                    None
                },
            },
            None => None,
        };
        self.session = session;
        self.is_loading = false;
    }
}
