use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity - the document stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Email address, unique across the collection
    pub email: String,
    /// Argon2 hash; the document field keeps the `password` name
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl User {
    /// Create a new user from an email and an already-hashed password
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            email,
            password_hash,
        }
    }

    /// Apply a partial update. The password arrives pre-hashed; fields
    /// left unset in the patch keep their current value.
    pub fn apply_update(&mut self, update: UpdateUser, password_hash: Option<String>) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
    }
}

/// User response DTO.
///
/// Every entity-bearing response goes through this type; the stored hash
/// is stripped here rather than by store projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Hex form of the ObjectId
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
        }
    }
}

/// DTO for creating a new user.
///
/// Fields are `Option` at the type level so a missing JSON key surfaces as
/// a `Required` validation issue rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(required(message = "Required"), email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(required(message = "Required"))]
    pub password: Option<String>,
}

/// Patch for updating a user: `None` means "leave unchanged". At least one
/// field must be set; the service checks that before dispatch.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Body returned by a successful delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}
