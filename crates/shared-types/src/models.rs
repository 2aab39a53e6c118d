use serde::{Deserialize, Serialize};

/// Principal role controlling which dashboard a session lands on.
///
/// - `Admin` — manages regular users and the full project pool.
/// - `Manager` — manages admin accounts, read access to all projects.
/// - `User` — manages only their own projects. Default for unknown roles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    User,
}

impl Role {
    /// Parse a role string. Unknown values default to `User`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            _ => Role::User,
        }
    }

    /// Lowercase string for session storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }
}

/// An authenticated session: the bearer token plus the role derived from
/// the login response. Persisted as two key-value entries in browser
/// storage; created at login, destroyed at logout. No expiry, no refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

/// One entry of a principal's role list as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleEntry {
    pub name: String,
}

/// A user account. Passwords are write-only and never appear here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
}

impl User {
    /// Role derived from the first element of the role list.
    /// Principals with no roles (or only unknown ones) count as `User`.
    pub fn primary_role(&self) -> Role {
        self.roles
            .first()
            .map(|r| Role::from_str_or_default(&r.name))
            .unwrap_or_default()
    }
}

/// Admin accounts are structurally identical to users; only the managing
/// view and the REST endpoints differ.
pub type Admin = User;

/// Successful login payload: the bearer token and the authenticated user
/// (whose role list decides the dashboard).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// `{ "user": ... }` envelope returned by user create/update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// `{ "admin": ... }` envelope returned by admin create/update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminEnvelope {
    pub admin: Admin,
}

/// Plain message acknowledgement (logout, register, deletes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
