use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

/// Malformed bodies are answered with the same envelope as every other error.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        AppError::BadRequest(format!("JSON payload error: {}", err))
    }
}
