use syrinx_dash::ManifestHandle;
use syrinx_net::Net;
use tracing::trace;
use url::Url;

/// How a service delivers one stream.
///
/// A closed set: every extractor maps onto one of these mechanisms, and
/// consumers match exhaustively instead of downcasting.
#[derive(Clone, Debug, PartialEq)]
pub enum Delivery {
    /// Plain HTTP download of the whole resource.
    ProgressiveHttp(Url),
    /// HLS playlist URL.
    Hls(Url),
    /// DASH manifest already hosted by the service.
    DashUrl(Url),
    /// DASH manifest synthesized from per-representation data.
    DashManifest(ManifestHandle),
    /// Torrent file URL.
    Torrent(Url),
}

impl Delivery {
    /// The fetch location, for URL-backed delivery.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::ProgressiveHttp(url)
            | Self::Hls(url)
            | Self::DashUrl(url)
            | Self::Torrent(url) => Some(url),
            Self::DashManifest(_) => None,
        }
    }

    /// The synthesized manifest, for manifest-backed delivery.
    #[must_use]
    pub fn manifest(&self) -> Option<&ManifestHandle> {
        match self {
            Self::DashManifest(handle) => Some(handle),
            _ => None,
        }
    }

    /// Size in bytes of the delivered content, best effort.
    ///
    /// URL-backed variants probe the resource through the given transport;
    /// the synthesized-manifest variant derives the size from its
    /// representations without touching the network. `-1` means unknown and
    /// is never an error.
    pub async fn expected_content_length<N: Net>(&self, net: &N) -> i64 {
        match self {
            Self::DashManifest(handle) => handle.context().total_content_length(),
            Self::ProgressiveHttp(url) | Self::Hls(url) | Self::DashUrl(url) | Self::Torrent(url) => {
                probe_content_length(net, url).await
            }
        }
    }
}

async fn probe_content_length<N: Net>(net: &N, url: &Url) -> i64 {
    match net.head(url.clone(), None).await {
        Ok(headers) => headers
            .content_length()
            .and_then(|len| i64::try_from(len).ok())
            .unwrap_or(-1),
        Err(error) => {
            trace!(%url, %error, "content length probe failed");
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bytes::Bytes;
    use rstest::*;
    use syrinx_core::{audio, StreamKind};
    use syrinx_dash::{AdaptationRole, ManifestBuildContext, Representation};
    use syrinx_net::{Headers, NetError};

    use super::*;

    /// Transport double answering HEAD with a fixed header set.
    struct StaticNet {
        content_length: Option<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl Net for StaticNet {
        async fn get_bytes(&self, _url: Url, _headers: Option<Headers>) -> Result<Bytes, NetError> {
            Ok(Bytes::new())
        }

        async fn head(&self, url: Url, _headers: Option<Headers>) -> Result<Headers, NetError> {
            if self.fail {
                return Err(NetError::http_status(403, url.to_string()));
            }
            let mut headers = Headers::new();
            if let Some(len) = self.content_length {
                headers.insert("content-length", len);
            }
            Ok(headers)
        }
    }

    fn representation(content_length: Option<u64>) -> Representation {
        Representation {
            id: "140".into(),
            kind: StreamKind::Audio,
            role: AdaptationRole::Main,
            format: audio::M4A,
            base_url: Url::parse("https://media.example.com/audio").unwrap(),
            codecs: "mp4a.40.2".into(),
            bitrate: 128_000,
            index_range: None,
            init_range: None,
            width: None,
            height: None,
            frame_rate: None,
            sample_rate: Some(44_100),
            channels: Some(2),
            content_length,
        }
    }

    #[rstest]
    #[case::reported(Some("4096"), 4096)]
    #[case::missing(None, -1)]
    #[case::garbage(Some("many"), -1)]
    #[tokio::test]
    async fn url_delivery_probes_through_transport(
        #[case] header: Option<&'static str>,
        #[case] expected: i64,
    ) {
        let net = StaticNet {
            content_length: header,
            fail: false,
        };
        let delivery =
            Delivery::ProgressiveHttp(Url::parse("https://media.example.com/v").unwrap());
        assert_eq!(delivery.expected_content_length(&net).await, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn probe_failure_degrades_to_unknown() {
        let net = StaticNet {
            content_length: None,
            fail: true,
        };
        let delivery = Delivery::Hls(Url::parse("https://media.example.com/m3u8").unwrap());
        assert_eq!(delivery.expected_content_length(&net).await, -1);
    }

    #[rstest]
    #[tokio::test]
    async fn manifest_delivery_sums_representations_without_network() {
        // A failing transport proves no probe is issued.
        let net = StaticNet {
            content_length: None,
            fail: true,
        };
        let context = ManifestBuildContext::new(vec![
            representation(Some(1_000)),
            representation(Some(2_500)),
        ])
        .unwrap();
        let delivery = Delivery::DashManifest(ManifestHandle::new(context));
        assert_eq!(delivery.expected_content_length(&net).await, 3_500);
    }

    #[rstest]
    fn equality_follows_urls_and_manifest_identity() {
        let a = Url::parse("https://media.example.com/a").unwrap();
        let b = Url::parse("https://media.example.com/b").unwrap();
        assert_eq!(
            Delivery::ProgressiveHttp(a.clone()),
            Delivery::ProgressiveHttp(a.clone())
        );
        assert_ne!(
            Delivery::ProgressiveHttp(a.clone()),
            Delivery::ProgressiveHttp(b)
        );
        assert_ne!(Delivery::ProgressiveHttp(a.clone()), Delivery::Hls(a));

        let context = ManifestBuildContext::new(vec![representation(None)]).unwrap();
        let handle = ManifestHandle::new(context.clone());
        assert_eq!(
            Delivery::DashManifest(handle.clone()),
            Delivery::DashManifest(handle)
        );
        // A second handle over an equal context is still a different manifest.
        assert_ne!(
            Delivery::DashManifest(ManifestHandle::new(context.clone())),
            Delivery::DashManifest(ManifestHandle::new(context))
        );
    }
}
