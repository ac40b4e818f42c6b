use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// MongoDB server code for a unique-index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// A single validation issue: the offending field path(s) and a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub fields: Vec<String>,
    pub message: String,
}

impl FieldIssue {
    pub fn new<I, S>(fields: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    /// Request payload failed schema validation
    #[error("validation failed")]
    Validation(Vec<FieldIssue>),

    /// A unique index rejected the write
    #[error("duplicate key")]
    DuplicateKey,

    /// Password hashing failed
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// Any other storage-layer failure
    #[error("database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// JSON body carried by every normalized error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    pub message: String,
}

impl UserError {
    /// Collapse any failure into the single `(status, message)` pair
    /// exposed to clients.
    ///
    /// Exactly one branch fires per call, and the order matters: a
    /// duplicate-key failure must be recognized before falling through to
    /// the terminal catch-all, which maps everything else to a detail-free
    /// 500.
    pub fn normalize(&self) -> (StatusCode, String) {
        match self {
            UserError::Validation(issues) => (StatusCode::BAD_REQUEST, join_issues(issues)),
            UserError::DuplicateKey => (StatusCode::BAD_REQUEST, "Duplicated key.".to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_string(),
            ),
        }
    }
}

/// Concatenate issues into one message: field names within an issue are
/// joined with ", ", issues with "; ", and the final issue ends with ".".
fn join_issues(issues: &[FieldIssue]) -> String {
    let mut message = String::new();
    for (index, issue) in issues.iter().enumerate() {
        message.push_str(&issue.fields.join(", "));
        message.push_str(": ");
        message.push_str(&issue.message);
        message.push_str(if index + 1 == issues.len() { "." } else { "; " });
    }
    message
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, message) = self.normalize();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorMessage { message })).into_response()
    }
}

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        // validator keeps field errors in a HashMap; sort by field name so
        // the joined message is deterministic.
        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| (field.to_string(), field_errors))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let issues = fields
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(|error| {
                        let message = error
                            .message
                            .clone()
                            .unwrap_or_else(|| error.code.clone())
                            .into_owned();
                        FieldIssue::new([field.clone()], message)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        UserError::Validation(issues)
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            UserError::DuplicateKey
        } else {
            UserError::Database(err.to_string())
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUser, UpdateUser};
    use validator::Validate;

    #[test]
    fn test_single_issue_ends_with_period() {
        let error = UserError::Validation(vec![FieldIssue::new(["email"], "Invalid email")]);

        let (status, message) = error.normalize();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email: Invalid email.");
    }

    #[test]
    fn test_issues_join_with_semicolon_and_terminal_period() {
        let error = UserError::Validation(vec![
            FieldIssue::new(["email"], "Required"),
            FieldIssue::new(["password"], "Required"),
        ]);

        let (status, message) = error.normalize();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email: Required; password: Required.");
    }

    #[test]
    fn test_issue_segments_match_issue_count() {
        let issues = vec![
            FieldIssue::new(["a"], "one"),
            FieldIssue::new(["b"], "two"),
            FieldIssue::new(["c"], "three"),
        ];
        let (_, message) = UserError::Validation(issues).normalize();

        assert_eq!(message.matches("; ").count(), 2);
        assert!(message.ends_with('.'));
        assert_eq!(message, "a: one; b: two; c: three.");
    }

    #[test]
    fn test_fields_within_one_issue_join_with_comma() {
        let error = UserError::Validation(vec![FieldIssue::new(
            ["email", "password"],
            "At least one field must be provided",
        )]);

        let (status, message) = error.normalize();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email, password: At least one field must be provided.");
    }

    #[test]
    fn test_duplicate_key_is_fixed_message() {
        let (status, message) = UserError::DuplicateKey.normalize();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Duplicated key.");
    }

    #[test]
    fn test_database_failure_never_leaks_details() {
        let error = UserError::Database("E11001 socket reset at 10.0.0.3:27017".to_string());

        let (status, message) = error.normalize();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error.");
    }

    #[test]
    fn test_hashing_failure_is_internal_error() {
        let (status, message) = UserError::PasswordHash("salt invalid".to_string()).normalize();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error.");
    }

    #[test]
    fn test_missing_create_fields_produce_required_issues() {
        let input = CreateUser {
            email: None,
            password: None,
        };

        let error: UserError = input.validate().unwrap_err().into();
        let (status, message) = error.normalize();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email: Required; password: Required.");
    }

    #[test]
    fn test_malformed_email_produces_invalid_email_issue() {
        let input = CreateUser {
            email: Some("not-an-email".to_string()),
            password: Some("secret".to_string()),
        };

        let error: UserError = input.validate().unwrap_err().into();
        let (_, message) = error.normalize();

        assert_eq!(message, "email: Invalid email.");
    }

    #[test]
    fn test_malformed_email_on_update_produces_invalid_email_issue() {
        let input = UpdateUser {
            email: Some("broken@".to_string()),
            password: None,
        };

        let error: UserError = input.validate().unwrap_err().into();
        let (status, message) = error.normalize();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "email: Invalid email.");
    }
}
