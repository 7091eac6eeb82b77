use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a principal. Always derived from the admin allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Identity as verified by the authentication provider, before any role is
/// attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// An authenticated principal with its live role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User entity - the stored profile of someone who has signed in.
///
/// `role` is a display copy of the last resolved role. Authorization never
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: DateTime<Utc>,
}

impl User {
    /// Create the record for a first sign-in.
    pub fn new(principal: &Principal) -> Self {
        let now = Utc::now();
        Self {
            uid: principal.uid.clone(),
            email: principal.email.clone(),
            display_name: principal.display_name.clone(),
            photo_url: principal.photo_url.clone(),
            role: principal.role,
            created_at: now,
            last_sign_in_at: now,
        }
    }

    /// Refresh profile fields and the informational role on a later sign-in.
    pub fn refresh(&mut self, principal: &Principal) {
        self.email = principal.email.clone();
        self.display_name = principal.display_name.clone();
        if principal.photo_url.is_some() {
            self.photo_url = principal.photo_url.clone();
        }
        self.role = principal.role;
        self.last_sign_in_at = Utc::now();
    }
}
