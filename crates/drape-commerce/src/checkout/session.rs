//! The signed-in user, as reported by the authentication provider.

use crate::ids::UserId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// "First Last", falling back to the email address.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Authentication collaborator.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<UserProfile>;

    fn sign_out(&self);
}

/// Session with a fixed user, for hosts without an auth provider.
#[derive(Debug, Default)]
pub struct StaticSession {
    user: RwLock<Option<UserProfile>>,
}

impl StaticSession {
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.read().clone()
    }

    fn sign_out(&self) {
        if let Some(user) = self.user.write().take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
    }
}
