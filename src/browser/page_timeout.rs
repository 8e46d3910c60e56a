//! Timeout wrapper for browser operations

use std::future::Future;
use std::time::Duration;

use crate::error::TransportError;

/// Run `operation` with an explicit time budget
///
/// Distinguishes a timeout from the operation's own failure so callers can
/// log which one happened.
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout_secs: u64,
    operation_name: &str,
) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    match tokio::time::timeout(Duration::from_secs(timeout_secs), operation).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::Timeout {
            operation: operation_name.to_string(),
            secs: timeout_secs,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_timeout_with_operation_name() {
        let result: Result<(), _> = with_page_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            1,
            "Page navigation",
        )
        .await;

        match result {
            Err(TransportError::Timeout { operation, secs }) => {
                assert_eq!(operation, "Page navigation");
                assert_eq!(secs, 1);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn passes_through_inner_result() {
        let value = with_page_timeout(async { Ok(7) }, 1, "noop").await.unwrap();
        assert_eq!(value, 7);
    }
}
