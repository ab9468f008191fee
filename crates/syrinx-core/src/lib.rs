#![forbid(unsafe_code)]

mod formats;
mod kind;

pub use crate::{
    formats::{
        audio, subtitles, video, FormatRegistry, MediaFormat, AUDIO_FORMATS, SUBTITLE_FORMATS,
        VIDEO_FORMATS,
    },
    kind::StreamKind,
};
