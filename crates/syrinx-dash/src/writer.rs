use std::borrow::Cow;
use std::collections::BTreeMap;

use syrinx_core::StreamKind;
use tracing::debug;

use crate::{
    error::CreationResult,
    manifest::ManifestBuildContext,
    representation::{AdaptationRole, Representation},
};

/// Escapes text and attribute content. Representation ids and URLs come
/// from untrusted pages, so everything interpolated into the document goes
/// through here.
fn xml_escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Generates the manifest document for a build context.
///
/// Shape: one `MPD` root, one `Period`, one `AdaptationSet` per
/// `(kind, role)` group, one `Representation` per input representation in
/// ascending bitrate order. Fail-fast per representation: the first one
/// that cannot be attached aborts synthesis with an error naming the
/// element.
pub(crate) fn write_manifest(context: &ManifestBuildContext) -> CreationResult<String> {
    let mut groups: BTreeMap<(StreamKind, AdaptationRole), Vec<&Representation>> = BTreeMap::new();
    for representation in context.representations() {
        groups
            .entry(representation.adaptation_key())
            .or_default()
            .push(representation);
    }

    let mut doc = String::with_capacity(1024);
    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    doc.push_str("<MPD xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"");
    doc.push_str(" xmlns=\"urn:mpeg:dash:schema:mpd:2011\"");
    doc.push_str(" xsi:schemaLocation=\"urn:mpeg:dash:schema:mpd:2011 DASH-MPD.xsd\"");
    doc.push_str(" minBufferTime=\"PT1.5S\"");
    doc.push_str(" profiles=\"urn:mpeg:dash:profile:full:2011\"");
    doc.push_str(" type=\"static\"");
    if let Some(duration) = context.duration() {
        doc.push_str(&format!(
            " mediaPresentationDuration=\"PT{:.3}S\"",
            duration.as_secs_f64()
        ));
    }
    doc.push_str(">\n");
    doc.push_str("  <Period>\n");

    for (set_index, ((kind, role), mut representations)) in groups.into_iter().enumerate() {
        representations.sort_by_key(|r| r.bitrate);

        // mimeType sits on the set when its members agree, otherwise on
        // each representation.
        let shared_mime = representations
            .iter()
            .all(|r| r.format.mime_type == representations[0].format.mime_type)
            .then(|| representations[0].format.mime_type);

        doc.push_str(&format!("    <AdaptationSet id=\"{set_index}\""));
        if let Some(mime) = shared_mime {
            doc.push_str(&format!(" mimeType=\"{mime}\""));
        }
        doc.push_str(" subsegmentAlignment=\"true\">\n");
        doc.push_str(&format!(
            "      <Role schemeIdUri=\"urn:mpeg:DASH:role:2011\" value=\"{}\"/>\n",
            role.as_str()
        ));

        for representation in representations {
            write_representation(&mut doc, representation, kind, shared_mime.is_none())?;
        }

        doc.push_str("    </AdaptationSet>\n");
    }

    doc.push_str("  </Period>\n");
    doc.push_str("</MPD>\n");

    debug!(
        representations = context.representations().len(),
        bytes = doc.len(),
        "synthesized manifest"
    );
    Ok(doc)
}

fn write_representation(
    doc: &mut String,
    representation: &Representation,
    kind: StreamKind,
    with_mime: bool,
) -> CreationResult<()> {
    representation.validate()?;

    doc.push_str(&format!(
        "      <Representation id=\"{}\"",
        xml_escape(&representation.id)
    ));
    doc.push_str(&format!(
        " codecs=\"{}\" bandwidth=\"{}\"",
        xml_escape(&representation.codecs),
        representation.bitrate
    ));
    if with_mime {
        doc.push_str(&format!(" mimeType=\"{}\"", representation.format.mime_type));
    }
    if kind.has_video() {
        if let Some(width) = representation.width {
            doc.push_str(&format!(" width=\"{width}\""));
        }
        if let Some(height) = representation.height {
            doc.push_str(&format!(" height=\"{height}\""));
        }
        if let Some(frame_rate) = representation.frame_rate {
            doc.push_str(&format!(" frameRate=\"{frame_rate}\""));
        }
    }
    if kind == StreamKind::Audio {
        if let Some(sample_rate) = representation.sample_rate {
            doc.push_str(&format!(" audioSamplingRate=\"{sample_rate}\""));
        }
    }
    doc.push_str(">\n");

    if kind == StreamKind::Audio {
        let channels = representation.channels.unwrap_or(2);
        doc.push_str(&format!(
            "        <AudioChannelConfiguration schemeIdUri=\"urn:mpeg:dash:23003:3:audio_channel_configuration:2011\" value=\"{channels}\"/>\n"
        ));
    }

    doc.push_str(&format!(
        "        <BaseURL>{}</BaseURL>\n",
        xml_escape(representation.base_url.as_str())
    ));

    match (representation.index_range, representation.init_range) {
        (Some(index), Some(init)) => {
            doc.push_str(&format!(
                "        <SegmentBase indexRange=\"{index}\">\n"
            ));
            doc.push_str(&format!("          <Initialization range=\"{init}\"/>\n"));
            doc.push_str("        </SegmentBase>\n");
        }
        (Some(index), None) => {
            doc.push_str(&format!("        <SegmentBase indexRange=\"{index}\"/>\n"));
        }
        (None, Some(init)) => {
            doc.push_str("        <SegmentBase>\n");
            doc.push_str(&format!("          <Initialization range=\"{init}\"/>\n"));
            doc.push_str("        </SegmentBase>\n");
        }
        (None, None) => {}
    }

    doc.push_str("      </Representation>\n");
    Ok(())
}
