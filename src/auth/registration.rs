//! User registration.

use sqlx::SqlitePool;

use super::password::hash_password;
use crate::db::{NewUser, User, UserRepository};
use crate::{DepotError, Result};

/// Register a new user.
///
/// Validates inputs, hashes the password, and inserts the account. A
/// duplicate email fails with `Conflict` and leaves the existing account
/// untouched.
pub async fn register(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    if email.trim().is_empty() {
        return Err(DepotError::Validation("email is required".to_string()));
    }
    if password.is_empty() {
        return Err(DepotError::Validation("password is required".to_string()));
    }

    let password_hash = hash_password(password)?;

    let repo = UserRepository::new(pool);
    repo.create(&NewUser::new(email, password_hash)).await
}
