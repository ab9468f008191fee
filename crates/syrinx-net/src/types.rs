use std::{collections::HashMap, time::Duration};

#[derive(Clone, Debug, PartialEq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.inner.insert(key.into().to_ascii_lowercase(), value.into());
    }

    /// Lookup by header name, case-insensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(&key.to_ascii_lowercase()).map(String::as_str)
    }

    /// Parsed `Content-Length`, if present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.get("content-length")?.trim().parse().ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for Headers {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, String>> for Headers {
    fn from(map: HashMap<String, String>) -> Self {
        let mut headers = Self::new();
        for (k, v) in map {
            headers.insert(k, v);
        }
        headers
    }
}

/// One token bucket's parameters: `capacity` permits, all replenished every
/// `refill_interval`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BucketConfig {
    pub capacity: u32,
    pub refill_interval: Duration,
}

impl BucketConfig {
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        Self {
            capacity,
            refill_interval,
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            refill_interval: Duration::from_secs(5),
        }
    }
}

/// Stricter bucket for hosts known to throttle aggressively. Matches any
/// host ending in `host_suffix`.
#[derive(Clone, Debug)]
pub struct HostOverride {
    pub host_suffix: String,
    pub bucket: BucketConfig,
}

impl HostOverride {
    pub fn new<S: Into<String>>(host_suffix: S, bucket: BucketConfig) -> Self {
        Self {
            host_suffix: host_suffix.into(),
            bucket,
        }
    }

    pub fn matches(&self, host: &str) -> bool {
        host.ends_with(self.host_suffix.as_str())
    }
}

/// Pacing and retry configuration for [`crate::RateLimitNet`].
#[derive(Clone, Debug)]
pub struct RateLimitOptions {
    /// Bucket used for any host without an override.
    pub default_bucket: BucketConfig,
    /// Per-host overrides, first match wins.
    pub overrides: Vec<HostOverride>,
    /// Total attempts per request, including the first one.
    pub max_attempts: u32,
    /// Backoff after a "too many requests" response is
    /// `base_backoff × attempt_number`.
    pub base_backoff: Duration,
}

impl Default for RateLimitOptions {
    fn default() -> Self {
        Self {
            default_bucket: BucketConfig::default(),
            overrides: Vec::new(),
            max_attempts: 3,
            base_backoff: Duration::from_secs(5),
        }
    }
}

impl RateLimitOptions {
    pub fn with_default_bucket(mut self, bucket: BucketConfig) -> Self {
        self.default_bucket = bucket;
        self
    }

    pub fn with_override(mut self, host_override: HostOverride) -> Self {
        self.overrides.push(host_override);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_backoff(mut self, base_backoff: Duration) -> Self {
        self.base_backoff = base_backoff;
        self
    }

    /// Bucket parameters for `host`: the first matching override, or the
    /// default bucket.
    pub fn bucket_for_host(&self, host: &str) -> BucketConfig {
        self.overrides
            .iter()
            .find(|o| o.matches(host))
            .map_or(self.default_bucket, |o| o.bucket)
    }
}

#[derive(Clone, Debug)]
pub struct NetOptions {
    pub request_timeout: Duration,
    /// Max idle connections per host. Set to 0 to disable pooling and reduce memory.
    pub pool_max_idle_per_host: usize,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 0,
        }
    }
}

impl NetOptions {
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}
