use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use unimock::unimock;
use url::Url;

use crate::{
    error::NetError,
    rate_limit::RateLimitNet,
    types::{Headers, RateLimitOptions},
};

/// Transport seam. Implemented by the real [`crate::HttpClient`] and by
/// decorators layered on top of it; consumers only ever see this trait.
#[cfg_attr(test, unimock(api = NetMock))]
#[async_trait]
pub trait Net: Send + Sync {
    /// Get all bytes from a URL.
    async fn get_bytes(&self, url: Url, headers: Option<Headers>) -> Result<Bytes, NetError>;

    /// Issue a HEAD request and return the response headers.
    async fn head(&self, url: Url, headers: Option<Headers>) -> Result<Headers, NetError>;
}

pub trait NetExt: Net + Sized {
    /// Add per-host pacing and bounded 429 retry.
    fn with_rate_limit(self, options: RateLimitOptions) -> RateLimitNet<Self> {
        RateLimitNet::new(self, options)
    }
}

impl<T: Net> NetExt for T {}

#[async_trait]
impl<T: Net + ?Sized> Net for std::sync::Arc<T> {
    async fn get_bytes(&self, url: Url, headers: Option<Headers>) -> Result<Bytes, NetError> {
        (**self).get_bytes(url, headers).await
    }

    async fn head(&self, url: Url, headers: Option<Headers>) -> Result<Headers, NetError> {
        (**self).head(url, headers).await
    }
}
