//! User and session domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use penny_black_core::{Email, Role, UserId};

/// A marketplace account.
///
/// Authorization is role-based: `role` is the single source of truth for
/// what an account may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique account id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique across the registry.
    pub email: Email,
    /// Authorization role.
    pub role: Role,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

/// A registry entry: the account plus its credential hash.
///
/// Stored under the `users` key; the hash never leaves the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// The account.
    pub user: User,
    /// Argon2 password hash.
    pub password_hash: String,
}

/// The active sign-in, stored under the `token` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random token.
    pub token: String,
    /// Account the session belongs to.
    pub user_id: UserId,
    /// When the session was minted.
    pub issued_at: DateTime<Utc>,
}
