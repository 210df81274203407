//! Bounded wait for the completion call
//!
//! The provider call is the only blocking step of a run. It gets one attempt
//! inside a bounded wait; when the bound elapses the run ends with a
//! `ProviderError` of category `Timeout`.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let reply = with_timeout(
//!     Duration::from_secs(300),
//!     provider.complete(&request),
//!     "completion request",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::ProviderError;

/// Execute a provider future with a timeout
///
/// # Arguments
///
/// * `timeout` - Maximum duration to wait
/// * `future` - The provider call
/// * `operation_name` - Description of the operation (for error messages)
pub async fn with_timeout<T, F>(
    timeout: Duration,
    future: F,
    operation_name: &str,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorCategory;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, ProviderError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, ProviderError>(42)
            },
            "slow operation",
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert!(err.message.contains("slow operation"));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_timeout(
            Duration::from_secs(1),
            async { Err(ProviderError::new(ErrorCategory::Auth, "bad key")) },
            "auth",
        )
        .await;
        assert_eq!(result.unwrap_err().category, ErrorCategory::Auth);
    }
}
