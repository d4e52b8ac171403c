use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::errors::AppError;

/// Runs a store call, failing with [`AppError::Timeout`] once `limit` elapses.
/// The inner future is dropped (cancelled) on timeout.
pub async fn with_timeout<F, T>(limit: Duration, future: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(limit)),
    }
}
