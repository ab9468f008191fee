#![forbid(unsafe_code)]

//! syrinx resolves raw, per-format stream records scraped from
//! media-hosting services into a validated, de-duplicated set of delivery
//! descriptors, synthesizing a DASH manifest when a service only exposes
//! disjoint per-representation data.
//!
//! Site extractors live outside this crate: they hand over
//! [`RawRepresentation`] records and get [`Stream`] descriptors back.

pub use syrinx_cache::{CacheError, CacheResult, RecencyCache};
pub use syrinx_core::{
    audio, subtitles, video, FormatRegistry, MediaFormat, StreamKind, AUDIO_FORMATS,
    SUBTITLE_FORMATS, VIDEO_FORMATS,
};
pub use syrinx_dash::{
    AdaptationRole, ByteRange, CreationError, CreationResult, ManifestBuildContext, ManifestHandle,
    Representation,
};
pub use syrinx_net::{
    BucketConfig, Headers, HostLimiter, HostOverride, HttpClient, Net, NetError, NetExt,
    NetOptions, NetResult, RateLimitNet, RateLimitOptions, TokenBucket,
};
pub use syrinx_streams::{
    contains_similar_stream, dedup_streams, resolve_streams, AudioStream, Delivery,
    RawRepresentation, Stream, VideoStream,
};
