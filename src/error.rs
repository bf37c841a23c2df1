use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// PortalError
///
/// The application-wide error taxonomy. Every fallible operation in the session
/// and authorization path surfaces one of these variants, and the `IntoResponse`
/// implementation gives each a stable HTTP mapping so handlers can simply
/// return `Result<_, PortalError>`.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A role string outside the closed admin/teacher/student set. Surfaced
    /// immediately and blocks navigation; never coerced to a default role.
    #[error("unrecognized role: {0}")]
    InvalidRole(String),

    /// No identity record matched the submitted (email, role) pair. Any
    /// pre-existing session is left untouched.
    #[error("invalid credentials or role")]
    Authentication,

    /// The persisted session record could not be read or parsed. Callers treat
    /// this as "no session"; it is logged but never fatal.
    #[error("persisted session unreadable: {0}")]
    StorageRead(String),

    /// A login attempt was submitted while another is still in flight. The
    /// store admits at most one pending attempt at a time.
    #[error("a login attempt is already in progress")]
    LoginPending,

    /// A logout occurred while this login attempt was pending. Logout always
    /// wins, so the attempt's result is discarded rather than installed.
    #[error("login attempt superseded by logout")]
    LoginSuperseded,
}

impl PortalError {
    /// The HTTP status each variant maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            PortalError::InvalidRole(_) => StatusCode::BAD_REQUEST,
            PortalError::Authentication => StatusCode::UNAUTHORIZED,
            PortalError::StorageRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PortalError::LoginPending => StatusCode::CONFLICT,
            PortalError::LoginSuperseded => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for PortalError {
    /// Renders the error as a small JSON body. The front-end shows
    /// authentication failures as a dismissible banner, so the message text
    /// is part of the contract.
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
