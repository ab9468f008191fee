#![forbid(unsafe_code)]

mod client;
mod error;
mod limiter;
mod rate_limit;
mod traits;
mod types;

pub use crate::{
    client::HttpClient,
    error::{NetError, NetResult},
    limiter::{HostLimiter, TokenBucket},
    rate_limit::RateLimitNet,
    traits::{Net, NetExt},
    types::{BucketConfig, Headers, HostOverride, NetOptions, RateLimitOptions},
};
