use std::{collections::HashMap, sync::Arc};

use tokio::time::{sleep, Instant};
use tracing::trace;

use crate::types::{BucketConfig, RateLimitOptions};

struct BucketState {
    available: u32,
    last_refill: Instant,
}

/// Capped, periodically replenished permit counter.
///
/// All `capacity` permits come back at once every `refill_interval`; the
/// available count never leaves `[0, capacity]`. Waiters are admitted by
/// capacity, not arrival order: concurrent callers blocked on the same
/// refill race for the fresh permits.
pub struct TokenBucket {
    config: BucketConfig,
    state: tokio::sync::Mutex<BucketState>,
}

impl TokenBucket {
    #[must_use]
    pub fn new(config: BucketConfig) -> Self {
        Self {
            config,
            state: tokio::sync::Mutex::new(BucketState {
                available: config.capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Takes one permit, waiting for the next refill when the bucket is
    /// empty. The wait is bounded by the refill schedule.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                if now.duration_since(state.last_refill) >= self.config.refill_interval {
                    state.available = self.config.capacity;
                    state.last_refill = now;
                }
                if state.available > 0 {
                    state.available -= 1;
                    return;
                }
                (state.last_refill + self.config.refill_interval).duration_since(now)
            };
            trace!(wait_ms = wait.as_millis() as u64, "token bucket empty, waiting for refill");
            sleep(wait).await;
        }
    }

    #[must_use]
    pub fn config(&self) -> BucketConfig {
        self.config
    }
}

/// Per-host bucket table, populated lazily on first request to a host.
///
/// Hosts matching an override in [`RateLimitOptions`] get that override's
/// bucket; everything else shares the default parameters (each host still
/// gets its own bucket instance).
pub struct HostLimiter {
    options: RateLimitOptions,
    buckets: parking_lot::Mutex<HashMap<String, Arc<TokenBucket>>>,
}

impl HostLimiter {
    #[must_use]
    pub fn new(options: RateLimitOptions) -> Self {
        Self {
            options,
            buckets: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// The bucket governing `host`, creating it on first use.
    pub fn bucket_for(&self, host: &str) -> Arc<TokenBucket> {
        let mut buckets = self.buckets.lock();
        if let Some(bucket) = buckets.get(host) {
            return Arc::clone(bucket);
        }
        let config = self.options.bucket_for_host(host);
        let bucket = Arc::new(TokenBucket::new(config));
        buckets.insert(host.to_owned(), Arc::clone(&bucket));
        bucket
    }

    #[must_use]
    pub fn options(&self) -> &RateLimitOptions {
        &self.options
    }
}
