//! Static media format tables.
//!
//! Each hosting service reports its tracks in a small set of container/codec
//! combinations. The tables here give those combinations stable ids together
//! with a display name, a file suffix and a MIME type. Ids are scoped to
//! their registry: an audio id and a video id may collide numerically and
//! must never be compared across registries.

/// Static data about one media format: container name, file suffix and MIME
/// type, keyed by a registry-scoped id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MediaFormat {
    pub id: u32,
    pub name: &'static str,
    pub suffix: &'static str,
    pub mime_type: &'static str,
}

impl MediaFormat {
    const fn new(id: u32, name: &'static str, suffix: &'static str, mime_type: &'static str) -> Self {
        Self {
            id,
            name,
            suffix,
            mime_type,
        }
    }
}

/// Combined video+audio container formats.
pub mod video {
    use super::MediaFormat;

    pub const MPEG_4: MediaFormat = MediaFormat::new(0x0, "MPEG-4", "mp4", "video/mp4");
    pub const V3GPP: MediaFormat = MediaFormat::new(0x10, "3GPP", "3gp", "video/3gpp");
    pub const WEBM: MediaFormat = MediaFormat::new(0x20, "WebM", "webm", "video/webm");

    pub(super) const TABLE: &[MediaFormat] = &[MPEG_4, V3GPP, WEBM];
}

/// Audio-only container formats.
pub mod audio {
    use super::MediaFormat;

    pub const M4A: MediaFormat = MediaFormat::new(0x100, "m4a", "m4a", "audio/mp4");
    pub const WEBMA: MediaFormat = MediaFormat::new(0x200, "WebM", "webm", "audio/webm");
    pub const WEBMA_OPUS: MediaFormat = MediaFormat::new(0x210, "WebM Opus", "webm", "audio/webm");
    pub const MP3: MediaFormat = MediaFormat::new(0x300, "MP3", "mp3", "audio/mpeg");
    pub const MP2: MediaFormat = MediaFormat::new(0x310, "MP2", "mp2", "audio/mpeg");
    pub const OPUS: MediaFormat = MediaFormat::new(0x400, "opus", "opus", "audio/opus");
    pub const OGG: MediaFormat = MediaFormat::new(0x500, "ogg", "ogg", "audio/ogg");
    pub const AIFF: MediaFormat = MediaFormat::new(0x600, "AIFF", "aiff", "audio/aiff");
    /// Same as [`AIFF`], with the shorter file extension.
    pub const AIF: MediaFormat = MediaFormat::new(0x610, "AIFF", "aif", "audio/aiff");
    pub const WAV: MediaFormat = MediaFormat::new(0x700, "WAV", "wav", "audio/wav");
    pub const FLAC: MediaFormat = MediaFormat::new(0x800, "FLAC", "flac", "audio/flac");
    pub const ALAC: MediaFormat = MediaFormat::new(0x900, "ALAC", "alac", "audio/alac");

    pub(super) const TABLE: &[MediaFormat] = &[
        M4A, WEBMA, WEBMA_OPUS, MP3, MP2, OPUS, OGG, AIFF, AIF, WAV, FLAC, ALAC,
    ];
}

/// Subtitle formats.
pub mod subtitles {
    use super::MediaFormat;

    pub const VTT: MediaFormat = MediaFormat::new(0x1000, "WebVTT", "vtt", "text/vtt");
    pub const TTML: MediaFormat = MediaFormat::new(
        0x2000,
        "Timed Text Markup Language",
        "ttml",
        "application/ttml+xml",
    );
    pub const TRANSCRIPT1: MediaFormat = MediaFormat::new(0x3000, "TranScript v1", "srv1", "text/xml");
    pub const TRANSCRIPT2: MediaFormat = MediaFormat::new(0x4000, "TranScript v2", "srv2", "text/xml");
    pub const TRANSCRIPT3: MediaFormat = MediaFormat::new(0x5000, "TranScript v3", "srv3", "text/xml");
    pub const SRT: MediaFormat = MediaFormat::new(0x6000, "SubRip file format", "srt", "text/srt");

    pub(super) const TABLE: &[MediaFormat] = &[VTT, TTML, TRANSCRIPT1, TRANSCRIPT2, TRANSCRIPT3, SRT];
}

/// Read-only lookup over one category of formats.
///
/// Lookups are best-effort enrichment: absence is reported through `Option`
/// or a caller-supplied default, never as an error.
#[derive(Clone, Copy, Debug)]
pub struct FormatRegistry {
    entries: &'static [MediaFormat],
}

pub const VIDEO_FORMATS: FormatRegistry = FormatRegistry::new(video::TABLE);
pub const AUDIO_FORMATS: FormatRegistry = FormatRegistry::new(audio::TABLE);
pub const SUBTITLE_FORMATS: FormatRegistry = FormatRegistry::new(subtitles::TABLE);

impl FormatRegistry {
    const fn new(entries: &'static [MediaFormat]) -> Self {
        Self { entries }
    }

    /// Format registered under `id`, if any.
    #[must_use]
    pub fn by_id(&self, id: u32) -> Option<&'static MediaFormat> {
        self.entries.iter().find(|format| format.id == id)
    }

    /// Friendly name of the format with the given id, or `default`.
    #[must_use]
    pub fn name_by_id(&self, id: u32, default: &'static str) -> &'static str {
        self.by_id(id).map_or(default, |format| format.name)
    }

    /// File suffix of the format with the given id, or `default`.
    #[must_use]
    pub fn suffix_by_id(&self, id: u32, default: &'static str) -> &'static str {
        self.by_id(id).map_or(default, |format| format.suffix)
    }

    /// MIME type of the format with the given id, or `default`.
    #[must_use]
    pub fn mime_by_id(&self, id: u32, default: &'static str) -> &'static str {
        self.by_id(id).map_or(default, |format| format.mime_type)
    }

    /// First format with the given MIME type. Several formats may share a
    /// MIME type; see [`Self::all_by_mime_type`] for the rest.
    #[must_use]
    pub fn by_mime_type(&self, mime_type: &str) -> Option<&'static MediaFormat> {
        self.entries
            .iter()
            .find(|format| format.mime_type == mime_type)
    }

    /// Every format sharing the given MIME type.
    pub fn all_by_mime_type(
        &self,
        mime_type: &str,
    ) -> impl Iterator<Item = &'static MediaFormat> + '_ {
        let mime_type = mime_type.to_owned();
        self.entries
            .iter()
            .filter(move |format| format.mime_type == mime_type)
    }

    /// First format with the given file suffix.
    #[must_use]
    pub fn by_suffix(&self, suffix: &str) -> Option<&'static MediaFormat> {
        self.entries.iter().find(|format| format.suffix == suffix)
    }

    /// All formats of this registry, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static MediaFormat> {
        self.entries.iter()
    }
}
