use syrinx_core::{MediaFormat, StreamKind};
use syrinx_net::Net;

use crate::delivery::Delivery;

/// An audio-only track.
#[derive(Clone, Debug)]
pub struct AudioStream {
    pub format: MediaFormat,
    pub delivery: Delivery,
    /// Average bitrate in bits per second, `-1` when unreported.
    pub average_bitrate: i32,
}

/// A video track, with or without an embedded audio channel.
#[derive(Clone, Debug)]
pub struct VideoStream {
    pub format: MediaFormat,
    pub delivery: Delivery,
    /// Display resolution label, e.g. `1080p` or `360p`.
    pub resolution: String,
    /// True when the track carries no audio channel.
    pub video_only: bool,
}

/// A resolved stream descriptor: one downloadable/playable rendition of an
/// item.
#[derive(Clone, Debug)]
pub enum Stream {
    Audio(AudioStream),
    Video(VideoStream),
}

impl Stream {
    #[must_use]
    pub fn kind(&self) -> StreamKind {
        match self {
            Self::Audio(_) => StreamKind::Audio,
            Self::Video(video) if video.video_only => StreamKind::Video,
            Self::Video(_) => StreamKind::VideoAudio,
        }
    }

    #[must_use]
    pub fn media_format(&self) -> &MediaFormat {
        match self {
            Self::Audio(audio) => &audio.format,
            Self::Video(video) => &video.format,
        }
    }

    #[must_use]
    pub fn delivery(&self) -> &Delivery {
        match self {
            Self::Audio(audio) => &audio.delivery,
            Self::Video(video) => &video.delivery,
        }
    }

    /// Presentation equality: same format and same quality, regardless of
    /// where the bytes come from. Streams of different kinds never compare
    /// equal. Two descriptors with different delivery URLs but identical
    /// presentation are duplicates.
    #[must_use]
    pub fn equals_stream(&self, other: &Stream) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        match (self, other) {
            (Self::Audio(a), Self::Audio(b)) => {
                a.format.id == b.format.id && a.average_bitrate == b.average_bitrate
            }
            (Self::Video(a), Self::Video(b)) => {
                a.format.id == b.format.id
                    && a.resolution == b.resolution
                    && a.video_only == b.video_only
            }
            _ => false,
        }
    }

    /// Size in bytes of this stream's content, `-1` when unknown.
    pub async fn expected_content_length<N: Net>(&self, net: &N) -> i64 {
        self.delivery().expected_content_length(net).await
    }
}

impl From<AudioStream> for Stream {
    fn from(stream: AudioStream) -> Self {
        Self::Audio(stream)
    }
}

impl From<VideoStream> for Stream {
    fn from(stream: VideoStream) -> Self {
        Self::Video(stream)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use syrinx_core::{audio, video};
    use url::Url;

    use super::*;

    fn delivery(path: &str) -> Delivery {
        Delivery::ProgressiveHttp(
            Url::parse(&format!("https://media.example.com/{path}")).unwrap(),
        )
    }

    fn audio_stream(bitrate: i32, path: &str) -> Stream {
        Stream::Audio(AudioStream {
            format: audio::M4A,
            delivery: delivery(path),
            average_bitrate: bitrate,
        })
    }

    fn video_stream(resolution: &str, video_only: bool, path: &str) -> Stream {
        Stream::Video(VideoStream {
            format: video::MPEG_4,
            delivery: delivery(path),
            resolution: resolution.into(),
            video_only,
        })
    }

    #[rstest]
    fn kind_distinguishes_video_only_from_combined() {
        assert_eq!(audio_stream(128, "a").kind(), StreamKind::Audio);
        assert_eq!(video_stream("1080p", true, "v").kind(), StreamKind::Video);
        assert_eq!(
            video_stream("360p", false, "va").kind(),
            StreamKind::VideoAudio
        );
    }

    #[rstest]
    fn equality_ignores_delivery_url() {
        let a = audio_stream(128, "cdn-1/audio");
        let b = audio_stream(128, "cdn-2/audio");
        assert!(a.equals_stream(&b));
        assert!(b.equals_stream(&a));
    }

    #[rstest]
    fn equality_is_reflexive_and_symmetric_within_a_kind() {
        let a = video_stream("720p", false, "x");
        let b = video_stream("720p", false, "y");
        assert!(a.equals_stream(&a));
        assert!(a.equals_stream(&b) && b.equals_stream(&a));

        let c = video_stream("1080p", false, "x");
        assert!(!a.equals_stream(&c) && !c.equals_stream(&a));
    }

    #[rstest]
    fn different_kinds_never_compare_equal() {
        let audio = audio_stream(128, "a");
        let combined = video_stream("360p", false, "a");
        let video_only = video_stream("360p", true, "a");

        assert!(!audio.equals_stream(&combined));
        assert!(!combined.equals_stream(&audio));
        assert!(!combined.equals_stream(&video_only));
        assert!(!video_only.equals_stream(&combined));
    }

    #[rstest]
    fn audio_equality_tracks_bitrate() {
        assert!(!audio_stream(128, "a").equals_stream(&audio_stream(160, "a")));
    }
}
