//! Authentication and account service.
//!
//! Accounts live in a local registry under the `users` key; there is no
//! auth server. Signing in verifies the argon2 password hash and writes
//! an opaque random session token plus the profile under the `token` and
//! `user` keys, which is all "being signed in" means to the rest of the
//! library.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand::RngCore;
use tracing::info;

use penny_black_core::{Email, EmailError, Role, UserId};

use crate::error::Result;
use crate::models::user::{Session, User, UserRecord};
use crate::storage::{KeyValueStore, keys};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Display name missing or blank.
    #[error("name cannot be empty")]
    EmptyName,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// No active session.
    #[error("not signed in")]
    NotSignedIn,

    /// The operation requires the admin role.
    #[error("admin access required")]
    Forbidden,
}

/// Registration, sign-in, and the active session.
pub struct AuthService<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> AuthService<'a> {
    /// Create an auth service over a store.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All registered accounts (without credential hashes).
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub fn users(&self) -> Result<Vec<User>> {
        Ok(self
            .records()?
            .into_iter()
            .map(|record| record.user)
            .collect())
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`], [`AuthError::WeakPassword`],
    /// or [`AuthError::UserAlreadyExists`].
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        self.create_user(name, email, password, Role::Customer)
    }

    /// Create an account with an explicit role (seeding and admin use).
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::register`].
    pub fn create_user(&self, name: &str, email: &str, password: &str, role: Role) -> Result<User> {
        let email = Email::parse(email).map_err(AuthError::InvalidEmail)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName.into());
        }
        validate_password(password)?;

        let mut records = self.records()?;
        if records.iter().any(|record| record.user.email == email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let next_id = records
            .iter()
            .map(|record| record.user.id.as_i32())
            .max()
            .unwrap_or(0)
            + 1;
        let user = User {
            id: UserId::new(next_id),
            name: name.to_owned(),
            email,
            role,
            created_at: Utc::now(),
        };

        records.push(UserRecord {
            user: user.clone(),
            password_hash: hash_password(password)?,
        });
        self.store.put(keys::USERS, &records)?;

        info!(user = %user.id, %role, "account created");
        Ok(user)
    }

    /// Sign in with email and password, replacing any active session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for a wrong password or
    /// unknown account - the two are indistinguishable on purpose.
    pub fn login(&self, email: &str, password: &str) -> Result<(User, Session)> {
        let email = Email::parse(email).map_err(AuthError::InvalidEmail)?;

        let records = self.records()?;
        let record = records
            .iter()
            .find(|record| record.user.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &record.password_hash)?;

        let session = Session {
            token: mint_token(),
            user_id: record.user.id,
            issued_at: Utc::now(),
        };
        self.store.put(keys::TOKEN, &session)?;
        self.store.put(keys::CURRENT_USER, &record.user)?;

        info!(user = %record.user.id, "signed in");
        Ok((record.user.clone(), session))
    }

    /// The signed-in user, if both the token and profile are present
    /// and agree.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] when there is no coherent
    /// session.
    pub fn current_user(&self) -> Result<User> {
        let session: Option<Session> = self.store.get(keys::TOKEN)?;
        let user: Option<User> = self.store.get(keys::CURRENT_USER)?;
        match (session, user) {
            (Some(session), Some(user)) if session.user_id == user.id => Ok(user),
            _ => Err(AuthError::NotSignedIn.into()),
        }
    }

    /// Drop the active session. Signing out while signed out is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the session keys cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.store.delete(keys::TOKEN)?;
        self.store.delete(keys::CURRENT_USER)?;
        Ok(())
    }

    /// Rename the signed-in user, in both the profile and the registry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] or [`AuthError::EmptyName`].
    pub fn update_profile(&self, name: &str) -> Result<User> {
        let mut user = self.current_user()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::EmptyName.into());
        }
        user.name = name.to_owned();

        let mut records = self.records()?;
        if let Some(record) = records
            .iter_mut()
            .find(|record| record.user.id == user.id)
        {
            record.user.name = user.name.clone();
        }
        self.store.put(keys::USERS, &records)?;
        self.store.put(keys::CURRENT_USER, &user)?;
        Ok(user)
    }

    /// Gate for the admin surface.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Forbidden`] for non-admin roles.
    pub fn require_admin(user: &User) -> std::result::Result<(), AuthError> {
        if user.role.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    fn records(&self) -> Result<Vec<UserRecord>> {
        Ok(self.store.get(keys::USERS)?.unwrap_or_default())
    }
}

/// Validate password strength requirements.
fn validate_password(password: &str) -> std::result::Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password for storage.
fn hash_password(password: &str) -> std::result::Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?
        .to_string())
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> std::result::Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Mint an opaque session token: 32 random bytes, base64url.
fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
