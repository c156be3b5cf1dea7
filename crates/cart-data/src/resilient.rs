//! Timeout and retry decorator for collaborators.

use std::future::Future;

use async_trait::async_trait;
use cart_core::prelude::*;

use crate::{DependencyTag, FetchError, FetchPolicy, ProductCatalog, StockService};

/// Wraps a catalog and/or stock service with per-dependency fetch policies.
///
/// Each attempt is bounded by the policy timeout; transient failures are
/// retried with backoff. Missing records fail immediately.
#[derive(Debug, Clone)]
pub struct Resilient<T> {
    inner: T,
    catalog_policy: FetchPolicy,
    stock_policy: FetchPolicy,
}

impl<T> Resilient<T> {
    /// Wrap `inner` with the default policy for each dependency tag.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            catalog_policy: FetchPolicy::from_tag(DependencyTag::Catalog),
            stock_policy: FetchPolicy::from_tag(DependencyTag::Inventory),
        }
    }

    /// Set the policy for catalog lookups.
    pub fn with_catalog_policy(mut self, policy: FetchPolicy) -> Self {
        self.catalog_policy = policy;
        self
    }

    /// Set the policy for stock lookups.
    pub fn with_stock_policy(mut self, policy: FetchPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// Get the wrapped collaborator.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

async fn with_policy<R, F, Fut>(
    tag: DependencyTag,
    policy: &FetchPolicy,
    product_id: ProductId,
    attempt_fn: F,
) -> Result<R, FetchError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<R, FetchError>>,
{
    let mut attempt = 0;
    loop {
        let result = match tokio::time::timeout(policy.timeout, attempt_fn()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(policy.timeout)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(error) if policy.retry.should_retry(&error, attempt) => {
                let delay = policy.retry.backoff.delay_for_attempt(attempt);
                tracing::warn!(
                    dependency = %tag,
                    %product_id,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "lookup failed, retrying"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[async_trait]
impl<T: ProductCatalog> ProductCatalog for Resilient<T> {
    async fn product(&self, id: ProductId) -> Result<ProductMetadata, FetchError> {
        let inner = &self.inner;
        with_policy(DependencyTag::Catalog, &self.catalog_policy, id, move || {
            inner.product(id)
        })
        .await
    }
}

#[async_trait]
impl<T: StockService> StockService for Resilient<T> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        let inner = &self.inner;
        with_policy(DependencyTag::Inventory, &self.stock_policy, id, move || {
            inner.stock(id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackoffStrategy, RetryPolicy};
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Stock service that replays scripted outcomes.
    struct Flaky {
        outcomes: Mutex<VecDeque<Result<i64, FetchError>>>,
        calls: Mutex<u32>,
    }

    impl Flaky {
        fn new(outcomes: Vec<Result<i64, FetchError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock()
        }
    }

    #[async_trait]
    impl StockService for Flaky {
        async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
            *self.calls.lock() += 1;
            let next = self
                .outcomes
                .lock()
                .pop_front()
                .unwrap_or(Err(FetchError::Connection("exhausted".into())));
            next.map(|amount| StockRecord::new(id, amount))
        }
    }

    struct Hanging;

    #[async_trait]
    impl StockService for Hanging {
        async fn stock(&self, _id: ProductId) -> Result<StockRecord, FetchError> {
            std::future::pending().await
        }
    }

    fn quick(max_attempts: u32) -> FetchPolicy {
        FetchPolicy::new(
            Duration::from_millis(50),
            RetryPolicy::new(max_attempts).with_backoff(BackoffStrategy::None),
        )
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let service = Resilient::new(Flaky::new(vec![
            Err(FetchError::Connection("reset".into())),
            Err(FetchError::Http {
                status: 502,
                url: "stock/1".into(),
            }),
            Ok(4),
        ]))
        .with_stock_policy(quick(2));

        let record = service.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(record.amount, 4);
        assert_eq!(service.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let service = Resilient::new(Flaky::new(vec![
            Err(FetchError::Connection("reset".into())),
            Err(FetchError::Connection("reset".into())),
        ]))
        .with_stock_policy(quick(1));

        let result = service.stock(ProductId::new(1)).await;
        assert_eq!(result, Err(FetchError::Connection("reset".into())));
        assert_eq!(service.inner().calls(), 2);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_retried() {
        let missing = FetchError::not_found(DependencyTag::Inventory, ProductId::new(8));
        let service = Resilient::new(Flaky::new(vec![Err(missing.clone()), Ok(1)]))
            .with_stock_policy(quick(3));

        assert_eq!(service.stock(ProductId::new(8)).await, Err(missing));
        assert_eq!(service.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_attempt_timeout() {
        let service = Resilient::new(Hanging).with_stock_policy(quick(0));
        let result = service.stock(ProductId::new(1)).await;
        assert_eq!(result, Err(FetchError::Timeout(Duration::from_millis(50))));
    }
}
