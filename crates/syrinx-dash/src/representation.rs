use syrinx_core::{MediaFormat, StreamKind};
use url::Url;

use crate::error::{CreationError, CreationResult};

/// Role of an adaptation set's content, `main` or `side` (alternate)
/// material. Together with [`StreamKind`] it forms the grouping key for
/// adaptation sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdaptationRole {
    Main,
    Side,
}

impl AdaptationRole {
    /// Attribute value for the manifest's `Role` element.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Side => "alternate",
        }
    }
}

/// Inclusive byte span inside a media resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Parses a raw endpoint pair. Ranges are optional playback hints:
    /// anything that is not two non-negative integers is treated as absent,
    /// never as an error.
    #[must_use]
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = start.trim().parse::<u64>().ok()?;
        let end = end.trim().parse::<u64>().ok()?;
        Some(Self { start, end })
    }
}

impl std::fmt::Display for ByteRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One representation backing a synthesized manifest: a single
/// container/codec/quality combination with its fetch location and the
/// attributes a player needs to pick and fetch it.
#[derive(Clone, Debug)]
pub struct Representation {
    /// Stable id from the origin service.
    pub id: String,
    pub kind: StreamKind,
    pub role: AdaptationRole,
    pub format: MediaFormat,
    pub base_url: Url,
    /// Codec string, e.g. `avc1.64001f` or `opus`.
    pub codecs: String,
    /// Bits per second; the manifest's `bandwidth` attribute.
    pub bitrate: u32,
    /// Byte span of the segment index, when the resource is self-indexed.
    pub index_range: Option<ByteRange>,
    /// Byte span of the initialization data.
    pub init_range: Option<ByteRange>,
    // Video attributes.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<u32>,
    // Audio attributes.
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
    /// Total resource size when the origin reports it.
    pub content_length: Option<u64>,
}

impl Representation {
    /// Checks the attributes the manifest writer will refuse: attaching this
    /// representation fails unless its id, codecs, bitrate and kind-specific
    /// quality attributes are usable. Callers wanting whole-document
    /// resilience filter on this before building a context.
    pub fn validate(&self) -> CreationResult<()> {
        if self.id.is_empty() {
            return Err(CreationError::could_not_add_element(
                "Representation",
                "the representation id is empty",
            ));
        }
        if self.codecs.is_empty() {
            return Err(CreationError::could_not_add_element(
                "Representation",
                format!("the codecs value of representation {} is empty", self.id),
            ));
        }
        if self.bitrate == 0 {
            return Err(CreationError::could_not_add_element(
                "Representation",
                format!("the bitrate of representation {} is zero", self.id),
            ));
        }
        if self.kind.has_video() && self.width.is_none() && self.height.is_none() {
            return Err(CreationError::could_not_add_element(
                "Representation",
                format!(
                    "representation {} has neither width nor height",
                    self.id
                ),
            ));
        }
        Ok(())
    }

    /// Grouping key: one adaptation set per `(kind, role)` pair.
    #[must_use]
    pub fn adaptation_key(&self) -> (StreamKind, AdaptationRole) {
        (self.kind, self.role)
    }
}
