use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use uuid::Uuid;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    AthleteNotFound(Uuid),
}

impl WebError {
    /// Attach the requested id to a lookup miss so the response can name it.
    pub fn for_athlete(id: Uuid, error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::AthleteNotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::AthleteNotFound(id) => write!(f, "Athlete not found with id: {}", id),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::ReferenceNotFound { .. }) => StatusCode::BAD_REQUEST,
            // Preserved from the source behavior; a 409 would be the
            // conventional choice.
            Self::Storage(StorageError::DuplicateCpf(_)) => StatusCode::SEE_OTHER,
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::AthleteNotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = match &self {
            Self::Storage(e @ StorageError::ReferenceNotFound { .. }) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Storage(e @ StorageError::DuplicateCpf(_)) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An error occurred while persisting the data"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::AthleteNotFound(id) => {
                json!({
                    "error": format!("Athlete not found with id: {}", id)
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storage::error::ReferenceKind;

    #[test]
    fn unresolved_reference_is_a_bad_request() {
        let response = WebError::Storage(StorageError::ReferenceNotFound {
            kind: ReferenceKind::Category,
            name: "Scale".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_cpf_is_a_see_other() {
        let response =
            WebError::Storage(StorageError::DuplicateCpf("12345678900".to_string()))
                .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[test]
    fn unknown_id_is_a_not_found() {
        let id = Uuid::new_v4();
        let response = WebError::for_athlete(id, StorageError::NotFound).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unclassified_storage_failure_is_a_server_error() {
        let response =
            WebError::Storage(StorageError::Database(sqlx::Error::PoolClosed)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn for_athlete_passes_through_other_storage_errors() {
        let id = Uuid::new_v4();
        let error = WebError::for_athlete(
            id,
            StorageError::DuplicateCpf("12345678900".to_string()),
        );

        assert!(matches!(
            error,
            WebError::Storage(StorageError::DuplicateCpf(_))
        ));
    }
}
