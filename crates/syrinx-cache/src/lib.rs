#![forbid(unsafe_code)]

mod recency;

pub use crate::recency::{CacheError, CacheResult, RecencyCache};
