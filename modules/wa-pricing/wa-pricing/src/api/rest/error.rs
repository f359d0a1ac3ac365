use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::error::DomainError;

use super::problem::{Problem, ValidationViolation};

pub type ApiResult<T> = Result<T, Problem>;

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        match &e {
            DomainError::Validation { field, message } => Problem::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
                format!("Validation error on '{field}': {message}"),
            )
            .with_code("VALIDATION_ERROR")
            .with_errors(vec![ValidationViolation {
                field: field.clone(),
                message: message.clone(),
                code: None,
            }])
            .with_current_trace(),
            DomainError::Unauthenticated => Problem::unauthenticated(),
            DomainError::Database(cause) => {
                tracing::error!(error = ?cause, "Database error occurred");
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An internal error occurred",
                )
                .with_code("INTERNAL")
                .with_current_trace()
            }
        }
    }
}

impl From<JsonRejection> for Problem {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let code = match status {
            StatusCode::UNPROCESSABLE_ENTITY => "INVALID_BODY",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
            _ => "MALFORMED_BODY",
        };
        let title = status.canonical_reason().unwrap_or("Bad Request");
        tracing::debug!(%status, error = %rejection.body_text(), "request body rejected");
        Problem::new(status, title, rejection.body_text())
            .with_code(code)
            .with_current_trace()
    }
}

/// Fill the `instance` of problem responses with the request path.
pub async fn with_problem_instance(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    let problem = response
        .extensions()
        .get::<Problem>()
        .filter(|p| p.instance.is_empty())
        .cloned();
    match problem {
        Some(problem) => problem.with_instance(path).into_response(),
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_422_with_field_list() {
        let p: Problem = DomainError::validation("volume", "must be a positive integer").into();
        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, "VALIDATION_ERROR");
        let errors = p.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "volume");
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        let p: Problem = DomainError::Unauthenticated.into();
        assert_eq!(p.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_error_detail_is_generic() {
        let p: Problem = DomainError::Database(anyhow::anyhow!("no such table: leads")).into();
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("leads"));
    }
}
