use std::time::Duration;

use syrinx_core::{MediaFormat, StreamKind};
use syrinx_dash::{AdaptationRole, ByteRange, ManifestBuildContext, ManifestHandle, Representation};
use tracing::debug;
use url::Url;

use crate::{
    dedup::dedup_streams,
    delivery::Delivery,
    stream::{AudioStream, Stream, VideoStream},
};

/// One raw per-format record handed over by a site extractor.
///
/// Extractors resolve service-specific ids (e.g. itags) into a media format
/// and quality attributes before anything here sees the record; nothing in
/// this crate branches on which service produced it. Byte ranges arrive as
/// the raw endpoint strings scraped from the page.
#[derive(Clone, Debug)]
pub struct RawRepresentation {
    /// Stable per-service id of this container/codec/quality combination.
    pub id: String,
    pub kind: StreamKind,
    pub format: MediaFormat,
    pub url: Url,
    pub codecs: String,
    /// Bits per second.
    pub bitrate: u32,
    /// Average bitrate in bits per second for audio tracks, `-1` unknown.
    pub average_bitrate: i32,
    /// Resolution label for video tracks, e.g. `1080p`.
    pub resolution: String,
    pub role: AdaptationRole,
    pub index_range: Option<(String, String)>,
    pub init_range: Option<(String, String)>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub frame_rate: Option<u32>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
    pub content_length: Option<u64>,
}

impl RawRepresentation {
    fn to_representation(&self) -> Representation {
        Representation {
            id: self.id.clone(),
            kind: self.kind,
            role: self.role,
            format: self.format,
            base_url: self.url.clone(),
            codecs: self.codecs.clone(),
            bitrate: self.bitrate,
            index_range: parse_range(self.index_range.as_ref()),
            init_range: parse_range(self.init_range.as_ref()),
            width: self.width,
            height: self.height,
            frame_rate: self.frame_rate,
            sample_rate: self.sample_rate,
            channels: self.channels,
            content_length: self.content_length,
        }
    }
}

fn parse_range(raw: Option<&(String, String)>) -> Option<ByteRange> {
    let (start, end) = raw?;
    ByteRange::parse(start, end)
}

fn stream_for(record: &RawRepresentation, delivery: Delivery) -> Stream {
    match record.kind {
        StreamKind::Audio => Stream::Audio(AudioStream {
            format: record.format,
            delivery,
            average_bitrate: record.average_bitrate,
        }),
        StreamKind::Video | StreamKind::VideoAudio => Stream::Video(VideoStream {
            format: record.format,
            delivery,
            resolution: record.resolution.clone(),
            video_only: record.kind == StreamKind::Video,
        }),
    }
}

/// Resolves raw representation records into de-duplicated stream
/// descriptors.
///
/// Combined (progressive) records become plain HTTP streams. Disjoint
/// audio-only/video-only records use the service's manifest URL when one
/// exists; otherwise a single manifest is synthesized over all of them and
/// shared by the resulting streams. Records the synthesizer would refuse
/// are dropped here so one broken representation never takes down its
/// siblings; the manifest itself stays fail-fast.
pub fn resolve_streams(
    records: &[RawRepresentation],
    manifest_url: Option<&Url>,
    duration: Option<Duration>,
) -> Vec<Stream> {
    let mut streams = Vec::with_capacity(records.len());

    for record in records.iter().filter(|r| r.kind == StreamKind::VideoAudio) {
        streams.push(stream_for(
            record,
            Delivery::ProgressiveHttp(record.url.clone()),
        ));
    }

    let adaptive: Vec<&RawRepresentation> = records
        .iter()
        .filter(|r| r.kind != StreamKind::VideoAudio)
        .collect();

    if let Some(manifest_url) = manifest_url {
        for record in &adaptive {
            streams.push(stream_for(record, Delivery::DashUrl(manifest_url.clone())));
        }
    } else if !adaptive.is_empty() {
        let mut usable = Vec::with_capacity(adaptive.len());
        let mut representations = Vec::with_capacity(adaptive.len());
        for record in &adaptive {
            let representation = record.to_representation();
            match representation.validate() {
                Ok(()) => {
                    usable.push(*record);
                    representations.push(representation);
                }
                Err(error) => {
                    debug!(id = %record.id, %error, "dropping representation from synthesized manifest");
                }
            }
        }

        if let Ok(context) = ManifestBuildContext::new(representations) {
            let context = match duration {
                Some(duration) => context.with_duration(duration),
                None => context,
            };
            let handle = ManifestHandle::new(context);
            for record in usable {
                streams.push(stream_for(record, Delivery::DashManifest(handle.clone())));
            }
        }
    }

    dedup_streams(streams)
}
