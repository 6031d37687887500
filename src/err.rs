#![allow(non_snake_case)]

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

use serde::Serialize;

use crate::repo::StoreError;

pub async fn handler404(path: Uri) -> (StatusCode, Json<Error>) {
    (
        StatusCode::NOT_FOUND,
        Json(Error::NotFound {
            message: format!("Invalid path: {}", path),
        }),
    )
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Maybe<T> {
    Nothing(Error),
    Fine(Success<T>),
}

pub fn Fine<V>(v: V) -> Maybe<V>
where
    V: Serialize,
{
    Maybe::Fine(Success::of(v))
}

pub fn Created<V>(v: V) -> Maybe<V>
where
    V: Serialize,
{
    Maybe::Fine(Success::created(v))
}

pub fn Nothing<V>(err: Error) -> Maybe<V> {
    Maybe::Nothing(err)
}

#[derive(Debug, Clone, Serialize)]
pub struct Success<V> {
    success: bool,
    #[serde(skip)]
    status: StatusCode,
    #[serde(flatten)]
    value: V,
}

impl<T> IntoResponse for Maybe<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match self {
            Maybe::Nothing(err) => err.into_response(),
            Maybe::Fine(success) => {
                let status = success.status;
                (status, Json(success)).into_response()
            }
        }
    }
}

impl<V: Serialize> Success<V> {
    pub fn of(value: V) -> Self {
        Self {
            success: true,
            status: StatusCode::OK,
            value,
        }
    }

    pub fn created(value: V) -> Self {
        Self {
            success: true,
            status: StatusCode::CREATED,
            value,
        }
    }
}

/// Every failure the service reports to a client. The `error` tag is the
/// machine-readable category, `message` the human-readable detail. Internal
/// driver or hashing errors never reach this type with their original detail.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "error")]
pub enum Error {
    ValidationFailed { message: String },
    InvalidEmailFormat { message: String },
    InvalidId { message: String },
    InvalidUsername { message: String },
    DuplicateRegistration { message: String },
    NotFound { message: String },
    HashingFailure { message: String },
    StorageFailure { message: String },
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::ValidationFailed { .. }
            | Error::InvalidEmailFormat { .. }
            | Error::InvalidId { .. }
            | Error::InvalidUsername { .. }
            | Error::DuplicateRegistration { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::HashingFailure { .. } | Error::StorageFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => Error::DuplicateRegistration {
                message: "Username or email is already registered".to_string(),
            },
            StoreError::Failure(inner) => {
                log::error!("Storage failure: {:?}", inner);
                Error::StorageFailure {
                    message: "Could not access student storage".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_carries_category_and_message() {
        let err = Error::DuplicateRegistration {
            message: "Username or email is already registered".to_string(),
        };
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["error"], "DuplicateRegistration");
        assert_eq!(body["message"], "Username or email is already registered");
    }

    #[test]
    fn success_envelope_flattens_payload() {
        #[derive(Serialize)]
        struct Out {
            id: i64,
        }
        let body = serde_json::to_value(Success::of(Out { id: 7 })).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["id"], 7);
        assert!(body.get("status").is_none());
    }

    #[test]
    fn client_faults_map_to_400() {
        for err in [
            Error::ValidationFailed {
                message: String::new(),
            },
            Error::InvalidEmailFormat {
                message: String::new(),
            },
            Error::InvalidId {
                message: String::new(),
            },
            Error::InvalidUsername {
                message: String::new(),
            },
            Error::DuplicateRegistration {
                message: String::new(),
            },
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn server_faults_map_to_500_and_missing_to_404() {
        assert_eq!(
            Error::NotFound {
                message: String::new()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::HashingFailure {
                message: String::new()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::StorageFailure {
                message: String::new()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_key_translates_to_duplicate_registration() {
        let err = Error::from(StoreError::DuplicateKey);
        assert!(matches!(err, Error::DuplicateRegistration { .. }));
    }

    #[test]
    fn storage_failure_detail_is_not_exposed() {
        let err = Error::from(StoreError::Failure(sqlx::Error::RowNotFound));
        match err {
            Error::StorageFailure { message } => {
                assert!(!message.to_lowercase().contains("row"));
            }
            other => panic!("expected StorageFailure, got {:?}", other),
        }
    }
}
