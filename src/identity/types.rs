use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A user record as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// An established session. The access token is opaque to this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub expires_at: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[schema(value_type = Object)]
    pub user: IdentityUser,
}

fn bearer() -> String {
    "bearer".to_string()
}

/// Result of a sign-up. Without a session the account awaits e-mail verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: IdentityUser,
    pub session: Option<Session>,
}

impl SignUpOutcome {
    #[must_use]
    pub const fn pending_verification(&self) -> bool {
        self.session.is_none()
    }
}

/// The user fields exposed to the pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<&IdentityUser> for UserProfile {
    fn from(user: &IdentityUser) -> Self {
        // Accounts created through OAuth often carry no name; use the mailbox.
        let name = user.user_metadata.name.clone().or_else(|| {
            user.email
                .as_deref()
                .and_then(|email| email.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        });

        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name,
        }
    }
}
