#![forbid(unsafe_code)]

//! Manifest synthesis for services that expose only disjoint
//! per-representation stream data instead of a ready DASH document.

mod error;
mod manifest;
mod representation;
mod writer;

pub use crate::{
    error::{CreationError, CreationResult},
    manifest::{ManifestBuildContext, ManifestHandle},
    representation::{AdaptationRole, ByteRange, Representation},
};
