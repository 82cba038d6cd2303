use kanban_core::{ClientConfig, KanbanResult};
use std::future::Future;
use std::time::Duration;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Retry rule for reads. Mutations never go through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// First backoff; doubles after each failure up to 30 seconds
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.query_retries,
            ..Self::default()
        }
    }

    pub fn no_delay(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::ZERO,
        }
    }

    /// `failure_count` is the number of failures before the current one.
    pub fn should_retry(&self, failure_count: u32, error: &kanban_core::KanbanError) -> bool {
        !error.is_unauthorized() && failure_count < self.max_retries
    }

    fn delay_for(&self, failure_count: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(failure_count))
            .min(MAX_BACKOFF)
    }
}

/// Runs a read, retrying per `policy`.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> KanbanResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = KanbanResult<T>>,
{
    let mut failures = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if policy.should_retry(failures, &e) => {
                let delay = policy.delay_for(failures);
                failures += 1;
                tracing::debug!("Query failed ({}), retry {} in {:?}", e, failures, delay);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_core::KanbanError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_twice_then_fails() {
        let attempts = AtomicU32::new(0);
        let result: KanbanResult<()> = with_retry(RetryPolicy::no_delay(2), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(KanbanError::RequestFailed { status: 500 }) }
        })
        .await;

        assert!(matches!(result, Err(KanbanError::RequestFailed { status: 500 })));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_never_retries_unauthorized() {
        let attempts = AtomicU32::new(0);
        let result: KanbanResult<()> = with_retry(RetryPolicy::no_delay(2), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(KanbanError::Unauthorized) }
        })
        .await;

        assert!(result.unwrap_err().is_unauthorized());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let attempts = AtomicU32::new(0);
        let result = with_retry(RetryPolicy::no_delay(2), || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(KanbanError::Network("connection reset".into()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(10), MAX_BACKOFF);
    }
}
