use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload<T> {
    pub data: T,
}

/// Uniform wrapper for every `/project` response:
/// `{ "status": 200, "message": "success", "data": { "data": ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse<T> {
    pub status: u16,
    pub message: Outcome,
    pub data: Payload<T>,
}

impl<T: Serialize> ProjectResponse<T> {
    pub fn success(status: StatusCode, data: T) -> Self {
        ProjectResponse {
            status: status.as_u16(),
            message: Outcome::Success,
            data: Payload { data },
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

impl ProjectResponse<String> {
    pub fn error(status: StatusCode, detail: impl Into<String>) -> Self {
        ProjectResponse {
            status: status.as_u16(),
            message: Outcome::Error,
            data: Payload { data: detail.into() },
        }
    }
}
