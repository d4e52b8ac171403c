use std::time::Duration;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::entities::envelope::ProjectResponse;

#[derive(Debug, Display)]
pub enum AppError {
    #[display("Bad request: {_0}")]
    BadRequest(String),

    #[display("validation error: {}", join_field_errors(_0))]
    ValidationError(Vec<FieldError>),

    #[display("Not found: {_0}")]
    NotFound(String),

    #[display("Store operation timed out after {}", humantime::format_duration(*_0))]
    Timeout(Duration),

    #[display("Store error: {_0}")]
    StoreError(String),

    #[display("Internal server error: {_0}")]
    InternalError(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors.iter()
        .map(|e| format!("{}:{}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .json(ProjectResponse::error(status, self.to_string()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = Vec::new();
        collect_field_errors(&errors, None, &mut field_errors);
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

/// Flattens nested and list validation errors into `posts[0].title` style
/// paths, using the camelCase names clients send on the wire.
fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = wire_name(field);
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field,
        };

        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(nested, Some(&path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

/// `project_name` → `projectName`; names without underscores pass through.
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;

    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }

    name
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StoreError(format!("Database error: {}", err))
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use validator::Validate;

    use crate::entities::project::NewProjectRequest;

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ValidationError(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Timeout(Duration::from_secs(10)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::StoreError("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::InternalError("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn nested_post_errors_get_indexed_paths() {
        let request: NewProjectRequest = serde_json::from_value(serde_json::json!({
            "projectName": "",
            "posts": [{ "title": "ok", "content": "ok" }, { "content": "body" }]
        }))
        .unwrap();

        let err = AppError::from(request.validate().unwrap_err());

        let AppError::ValidationError(fields) = &err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "posts[1].title");
        assert_eq!(fields[1].field, "projectName");
        assert_eq!(
            err.to_string(),
            "validation error: posts[1].title:Post title is required, projectName:Project name is required"
        );
    }

    #[test]
    fn wire_name_camel_cases_snake_keys() {
        assert_eq!(wire_name("project_name"), "projectName");
        assert_eq!(wire_name("projectName"), "projectName");
        assert_eq!(wire_name("title"), "title");
    }

    #[actix_web::test]
    async fn error_response_uses_envelope() {
        let response = AppError::NotFound("Project not found".into()).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["message"], "error");
        assert_eq!(json["data"]["data"], "Not found: Project not found");
    }
}
