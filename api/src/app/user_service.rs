//! User service
//!
//! Handles user registration and API key authentication.

use std::sync::Arc;

use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::{NewUser, User, UserId, UserRole};
use crate::domain::ports::UserRepository;
use crate::error::AppError;

const MAX_NAME_LEN: usize = 50;

/// Service for managing users
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    admin_token: Option<String>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, admin_token: Option<String>) -> Self {
        Self { users, admin_token }
    }

    /// Register a new user
    ///
    /// Returns (user, api_key). The key is only shown once; just its hash is stored.
    pub async fn register(
        &self,
        firstname: &str,
        lastname: &str,
        admin_token: Option<&str>,
    ) -> Result<(User, String), AppError> {
        let firstname = validate_name("firstname", firstname)?;
        let lastname = validate_name("lastname", lastname)?;

        let role = match (self.admin_token.as_deref(), admin_token) {
            (Some(expected), Some(given)) if tokens_match(expected, given) => UserRole::Admin,
            _ => UserRole::Member,
        };

        let api_key = generate_api_key();
        let new_user = NewUser {
            username: format!("{}-{}-{}", firstname, lastname, Uuid::new_v4()),
            api_key_hash: hash_api_key(&api_key),
            role,
        };

        let user = self.users.create(&new_user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok((user, api_key))
    }

    /// Find a user by their API key hash
    pub async fn find_by_api_key(&self, api_key_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_api_key_hash(api_key_hash).await?)
    }

    /// Update user's last seen timestamp
    pub async fn touch(&self, id: &UserId) -> Result<(), AppError> {
        self.users.update_last_seen(id).await?;
        Ok(())
    }
}

fn validate_name<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    let len = value.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "{} must be between 1 and {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(value)
}

/// Compare digests so the comparison time does not depend on the secret
fn tokens_match(expected: &str, given: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let given = Sha256::digest(given.as_bytes());
    expected
        .iter()
        .zip(given.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("cb-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
