/// Top-level media kind of a stream.
///
/// `VideoAudio` is a combined (progressive) track carrying both a video and
/// an audio channel; `Video` is video-only. The kinds are distinct namespaces:
/// descriptors of different kinds never compare equal, and format ids are
/// only meaningful within the registry matching the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StreamKind {
    Audio,
    Video,
    VideoAudio,
}

impl StreamKind {
    /// Whether this kind carries a video track.
    #[must_use]
    pub fn has_video(self) -> bool {
        matches!(self, Self::Video | Self::VideoAudio)
    }

    /// Whether this kind carries an audio track.
    #[must_use]
    pub fn has_audio(self) -> bool {
        matches!(self, Self::Audio | Self::VideoAudio)
    }
}
