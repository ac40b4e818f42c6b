use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// Absence is an explicit `None`/`false`, never an error: "not found" is a
/// control-flow concern of the callers, not a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user document
    async fn create(&self, user: User) -> UserResult<User>;

    /// Fetch a user by id
    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>>;

    /// Fetch all users
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Replace an existing user document, matched by its id
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by id, returning whether a document was removed
    async fn delete(&self, id: ObjectId) -> UserResult<bool>;
}
