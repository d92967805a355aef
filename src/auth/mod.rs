//! Credential checks: SHA-256 hash-compare against the users table.
//!
//! This is deliberately thin. There is no session or token machinery here;
//! callers get back the user row (minus any trust decisions) or a typed
//! failure.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::db::{DbUser, RoomDb, StoreError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("An account with that email already exists")]
    DuplicateEmail,

    #[error("User not found")]
    UserNotFound,

    /// Wrong password. Same message as an unknown account on login so the
    /// response does not reveal which half was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Hex SHA-256 digest of a password.
pub fn hash_password(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Creates a regular user account.
pub fn register(
    db: &RoomDb,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<DbUser, AuthError> {
    if full_name.trim().is_empty() {
        return Err(AuthError::MissingField("full name"));
    }
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }

    if db.user_by_email(email)?.is_some() {
        return Err(AuthError::DuplicateEmail);
    }

    let id = db.insert_user(full_name, email, &hash_password(password), "user")?;
    db.user_by_id(id)?.ok_or(AuthError::UserNotFound)
}

/// Verifies an email/password pair and returns the matching user.
pub fn login(db: &RoomDb, email: &str, password: &str) -> Result<DbUser, AuthError> {
    let user = db
        .user_by_email(email)?
        .ok_or(AuthError::InvalidCredentials)?;

    if hash_password(password) != user.password {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Updates a user's profile; the password is only re-hashed when a new one
/// is supplied.
pub fn update_profile(
    db: &RoomDb,
    id: i64,
    full_name: &str,
    email: &str,
    new_password: Option<&str>,
) -> Result<DbUser, AuthError> {
    if full_name.trim().is_empty() {
        return Err(AuthError::MissingField("full name"));
    }
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }

    if let Some(other) = db.user_by_email(email)? {
        if other.id != id {
            return Err(AuthError::DuplicateEmail);
        }
    }

    let hash = new_password
        .filter(|p| !p.is_empty())
        .map(hash_password);
    db.update_user_row(id, full_name, email, hash.as_deref())
        .map_err(|e| {
            if e.is_not_found() {
                AuthError::UserNotFound
            } else {
                AuthError::Store(e)
            }
        })?;

    db.user_by_id(id)?.ok_or(AuthError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_hex() {
        let a = hash_password("admin123");
        let b = hash_password("admin123");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, hash_password("admin124"));
    }

    #[test]
    fn test_register_then_login() {
        let db = RoomDb::open_in_memory().unwrap();
        let user = register(&db, "Ada Lovelace", "ada@example.edu", "secret").unwrap();
        assert_eq!(user.role, "user");
        assert_ne!(user.password, "secret");

        let back = login(&db, "ada@example.edu", "secret").unwrap();
        assert_eq!(back.id, user.id);
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_alike() {
        let db = RoomDb::open_in_memory().unwrap();
        register(&db, "Ada Lovelace", "ada@example.edu", "secret").unwrap();

        let wrong = login(&db, "ada@example.edu", "guess").unwrap_err();
        let missing = login(&db, "nobody@example.edu", "guess").unwrap_err();
        assert_eq!(wrong.to_string(), missing.to_string());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let db = RoomDb::open_in_memory().unwrap();
        register(&db, "Ada", "ada@example.edu", "secret").unwrap();
        assert!(matches!(
            register(&db, "Ada Again", "ada@example.edu", "other"),
            Err(AuthError::DuplicateEmail)
        ));
    }

    #[test]
    fn test_seeded_admin_can_log_in() {
        let db = RoomDb::open_in_memory().unwrap();
        let admin = login(&db, "admin", "admin123").unwrap();
        assert_eq!(admin.role, "admin");
    }

    #[test]
    fn test_profile_update_keeps_password_when_omitted() {
        let db = RoomDb::open_in_memory().unwrap();
        let user = register(&db, "Ada", "ada@example.edu", "secret").unwrap();

        update_profile(&db, user.id, "Ada L.", "ada@example.edu", None).unwrap();
        login(&db, "ada@example.edu", "secret").unwrap();

        update_profile(&db, user.id, "Ada L.", "ada@example.edu", Some("newpass")).unwrap();
        assert!(login(&db, "ada@example.edu", "secret").is_err());
        login(&db, "ada@example.edu", "newpass").unwrap();
    }
}
