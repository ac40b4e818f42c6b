//! User service - business logic layer

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{FieldIssue, UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

/// User service providing the business logic behind the HTTP surface.
///
/// Validates input, hashes passwords before they reach the repository, and
/// strips the stored hash from everything it returns.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with a hashed password
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input.validate().map_err(UserError::from)?;

        // Both fields are Some once validation has passed
        let email = input.email.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let password_hash = hash_password(&password)?;
        let user = User::new(email, password_hash);

        let created = self.repository.create(user).await?;
        Ok(created.into())
    }

    /// Fetch a user by id, None if no such user exists
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: ObjectId) -> UserResult<Option<UserResponse>> {
        let user = self.repository.get_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }

    /// List all users
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Apply a partial update to an existing user, None if no such user
    /// exists.
    ///
    /// Existence is resolved before the payload is validated, so an
    /// unknown id answers "not found" rather than complaining about the
    /// body.
    #[instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        id: ObjectId,
        input: UpdateUser,
    ) -> UserResult<Option<UserResponse>> {
        let Some(mut user) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        input.validate().map_err(UserError::from)?;
        if input.is_empty() {
            return Err(UserError::Validation(vec![FieldIssue::new(
                ["email", "password"],
                "At least one field must be provided",
            )]));
        }

        let password_hash = match input.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        user.apply_update(input, password_hash);

        let updated = self.repository.update(user).await?;
        Ok(Some(updated.into()))
    }

    /// Delete a user by id, returning whether a user was removed
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: ObjectId) -> UserResult<bool> {
        self.repository.delete(id).await
    }
}

/// One-way transform from plaintext to an argon2 hash with a fresh salt.
/// Plaintext does not survive past this call on any code path.
fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
