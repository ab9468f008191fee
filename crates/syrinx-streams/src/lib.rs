#![forbid(unsafe_code)]

//! Stream descriptor model: how a service delivers each track, which tracks
//! are duplicates of one another, and how raw per-representation records
//! from an extractor become playable stream descriptors.

mod dedup;
mod delivery;
mod resolver;
mod stream;

pub use crate::{
    dedup::{contains_similar_stream, dedup_streams},
    delivery::Delivery,
    resolver::{resolve_streams, RawRepresentation},
    stream::{AudioStream, Stream, VideoStream},
};
