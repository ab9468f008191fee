use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::sleep;
use tracing::debug;
use url::Url;

use crate::{
    error::NetError,
    limiter::HostLimiter,
    traits::Net,
    types::{Headers, RateLimitOptions},
};

/// Pacing and retry decorator for [`Net`] implementations.
///
/// Every request first takes a token from its destination host's bucket,
/// then goes to the inner transport. A "too many requests" response is
/// retried after `base_backoff × attempt_number`, up to `max_attempts`
/// total attempts; exhausting the budget yields
/// [`NetError::RetryExhausted`] wrapping the last cause. Any other failure
/// propagates immediately.
pub struct RateLimitNet<N> {
    inner: N,
    limiter: HostLimiter,
    max_attempts: u32,
    base_backoff: std::time::Duration,
}

impl<N: Net> RateLimitNet<N> {
    pub fn new(inner: N, options: RateLimitOptions) -> Self {
        let max_attempts = options.max_attempts.max(1);
        let base_backoff = options.base_backoff;
        Self {
            inner,
            limiter: HostLimiter::new(options),
            max_attempts,
            base_backoff,
        }
    }

    async fn pace(&self, url: &Url) {
        // Hosts are the pacing unit; URLs without one (e.g. file://) share
        // a bucket under the empty key.
        let host = url.host_str().unwrap_or_default();
        self.limiter.bucket_for(host).acquire().await;
    }

    async fn backoff(&self, url: &Url, attempt: u32) {
        let wait = self.base_backoff * attempt;
        debug!(%url, attempt, wait_ms = wait.as_millis() as u64, "throttled by origin, backing off");
        sleep(wait).await;
    }
}

#[async_trait]
impl<N: Net> Net for RateLimitNet<N> {
    async fn get_bytes(&self, url: Url, headers: Option<Headers>) -> Result<Bytes, NetError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            self.pace(&url).await;
            match self.inner.get_bytes(url.clone(), headers.clone()).await {
                Ok(bytes) => return Ok(bytes),
                Err(error) if error.is_too_many_requests() => {
                    last_error = Some(error);
                    if attempt < self.max_attempts {
                        self.backoff(&url, attempt).await;
                    }
                }
                Err(error) => return Err(error),
            }
        }

        Err(NetError::RetryExhausted {
            attempts: self.max_attempts,
            source: Box::new(last_error.unwrap_or(NetError::Timeout)),
        })
    }

    async fn head(&self, url: Url, headers: Option<Headers>) -> Result<Headers, NetError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            self.pace(&url).await;
            match self.inner.head(url.clone(), headers.clone()).await {
                Ok(out) => return Ok(out),
                Err(error) if error.is_too_many_requests() => {
                    last_error = Some(error);
                    if attempt < self.max_attempts {
                        self.backoff(&url, attempt).await;
                    }
                }
                Err(error) => return Err(error),
            }
        }

        Err(NetError::RetryExhausted {
            attempts: self.max_attempts,
            source: Box::new(last_error.unwrap_or(NetError::Timeout)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::*;
    use tokio::time::Instant;
    use unimock::{matching, MockFn, Unimock};

    use super::*;
    use crate::{
        traits::NetMock,
        types::{BucketConfig, RateLimitOptions},
    };

    fn lax_options() -> RateLimitOptions {
        // Big bucket so pacing never interferes with retry tests.
        RateLimitOptions::default()
            .with_default_bucket(BucketConfig::new(100, Duration::from_secs(1)))
            .with_base_backoff(Duration::from_secs(5))
    }

    fn url() -> Url {
        Url::parse("https://media.example.com/track/1").unwrap()
    }

    fn throttled() -> NetError {
        NetError::http_status(429, "https://media.example.com/track/1".into())
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn success_on_first_attempt_passes_through() {
        let mock = Unimock::new(
            NetMock::get_bytes
                .some_call(matching!(_, _))
                .returns(Ok(Bytes::from("payload"))),
        );
        let net = RateLimitNet::new(mock, lax_options());

        let result = net.get_bytes(url(), None).await;
        assert_eq!(result.unwrap(), Bytes::from("payload"));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn throttled_twice_then_success_waits_twice() {
        let mock = Unimock::new((
            NetMock::get_bytes
                .next_call(matching!(_, _))
                .returns(Err(throttled())),
            NetMock::get_bytes
                .next_call(matching!(_, _))
                .returns(Err(throttled())),
            NetMock::get_bytes
                .next_call(matching!(_, _))
                .returns(Ok(Bytes::from("payload"))),
        ));
        let net = RateLimitNet::new(mock, lax_options());

        let started = Instant::now();
        let result = net.get_bytes(url(), None).await;
        assert!(result.is_ok());
        // Exactly two backoff waits: 5s × 1 + 5s × 2.
        assert_eq!(started.elapsed(), Duration::from_secs(15));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn persistent_throttling_exhausts_after_three_attempts() {
        let mock = Unimock::new(
            NetMock::get_bytes
                .each_call(matching!(_, _))
                .returns(Err(throttled())),
        );
        let net = RateLimitNet::new(mock, lax_options());

        let error = net.get_bytes(url(), None).await.unwrap_err();
        match error {
            NetError::RetryExhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(source.is_too_many_requests());
            }
            other => panic!("expected RetryExhausted, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn non_throttle_error_propagates_immediately() {
        let mock = Unimock::new(
            NetMock::get_bytes
                .some_call(matching!(_, _))
                .returns(Err(NetError::http_status(404, "https://a".into()))),
        );
        let net = RateLimitNet::new(mock, lax_options());

        let started = Instant::now();
        let error = net.get_bytes(url(), None).await.unwrap_err();
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn pacing_delays_request_beyond_bucket_capacity() {
        let mock = Unimock::new(
            NetMock::head
                .each_call(matching!(_, _))
                .returns(Ok(Headers::new())),
        );
        let options = RateLimitOptions::default()
            .with_default_bucket(BucketConfig::new(5, Duration::from_secs(3)));
        let net = RateLimitNet::new(mock, options);

        let started = Instant::now();
        for _ in 0..6 {
            net.head(url(), None).await.unwrap();
        }
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn head_retry_budget_matches_get() {
        let mock = Unimock::new(
            NetMock::head
                .each_call(matching!(_, _))
                .returns(Err(throttled())),
        );
        let net = RateLimitNet::new(mock, lax_options());

        let error = net.head(url(), None).await.unwrap_err();
        assert!(matches!(error, NetError::RetryExhausted { attempts: 3, .. }));
    }
}
