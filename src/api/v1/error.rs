use crate::application_port::*;
use crate::domain_model::TokenErrorBody;
use serde::Serialize;
use std::convert::Infallible;
use tracing::{debug, warn};
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, json) = if let Some(err) = err.find::<ApiError>() {
        match err {
            ApiError::Token(body) => (StatusCode::UNAUTHORIZED, warp::reply::json(body)),
            ApiError::Status { status, message } => {
                (*status, warp::reply::json(&ErrorBody::new(*status, message)))
            }
        }
    } else if err.is_not_found() {
        let status = StatusCode::NOT_FOUND;
        (status, warp::reply::json(&ErrorBody::new(status, "Not Found")))
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        let status = StatusCode::UNPROCESSABLE_ENTITY;
        (status, warp::reply::json(&ErrorBody::new(status, &e.to_string())))
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        let status = StatusCode::METHOD_NOT_ALLOWED;
        (status, warp::reply::json(&ErrorBody::new(status, "Method Not Allowed")))
    } else {
        warn!("Unhandled rejection: {:?}", err);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, warp::reply::json(&ErrorBody::new(status, "Internal Server Error")))
    };

    Ok(warp::reply::with_status(json, status))
}

/// Error body of every non-token failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    fn new(status: StatusCode, message: &str) -> Self {
        ErrorBody {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Token rejected by the guard; sent as-is with a 401.
    Token(TokenErrorBody),
    Status { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(status: StatusCode, message: impl Into<String>) -> ApiError {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }

    pub fn internal<E: std::fmt::Display>(error: E) -> ApiError {
        warn!("Internal error: {}", error);
        ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred.")
    }
}

impl reject::Reject for ApiError {}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        debug!(%error, "auth error");
        match error {
            AuthError::InvalidCredentials => {
                ApiError::status(StatusCode::UNAUTHORIZED, "Invalid credentials.")
            }
            AuthError::UserExists => ApiError::status(
                StatusCode::CONFLICT,
                "A user with that username already exists.",
            ),
            AuthError::UserNotFound => ApiError::status(StatusCode::NOT_FOUND, "User not found."),
            AuthError::Rejected(body) => ApiError::Token(body),
            AuthError::AdminRequired => {
                ApiError::status(StatusCode::UNAUTHORIZED, "Admin privilege required.")
            }
            AuthError::InvalidInput(message) => {
                ApiError::status(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            AuthError::Store(e) => ApiError::internal(e),
            AuthError::InternalError(e) => ApiError::internal(e),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound(what) => {
                ApiError::status(StatusCode::NOT_FOUND, format!("{what} not found."))
            }
            CatalogError::Conflict(message) => ApiError::status(StatusCode::BAD_REQUEST, message),
            CatalogError::InvalidInput(message) => {
                ApiError::status(StatusCode::BAD_REQUEST, message)
            }
            CatalogError::Validation(message) => {
                ApiError::status(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            CatalogError::Store(e) => ApiError::internal(e),
        }
    }
}
