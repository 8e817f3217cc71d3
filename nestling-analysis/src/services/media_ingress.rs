//! Media ingress checks
//!
//! **[SA-ING-010]** Cheap, local precondition checks before any inference
//! call is issued: base64 decode, non-empty payload, minimum clip duration
//! for audio, and a content sniff of the decoded bytes. Every failure here is
//! a rejection with a fixed message, not an error, and costs zero network calls.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::types::{MediaKind, MediaSample};

pub const MSG_EMPTY_MEDIA: &str = "No media was received. Please record and try again.";
pub const MSG_INVALID_ENCODING: &str =
    "The media upload was corrupted in transit. Please try again.";
pub const MSG_CLIP_TOO_SHORT: &str =
    "The recording is too short to analyze. Please record at least a few seconds of crying.";
pub const MSG_WRONG_MEDIA_TYPE_AUDIO: &str =
    "This doesn't look like an audio recording. Please use the in-app recorder.";
pub const MSG_WRONG_MEDIA_TYPE_IMAGE: &str =
    "This doesn't look like a photo. Please use the in-app camera.";

/// Content type assumed when the sniffer cannot identify an audio payload;
/// phone recorders mostly produce AAC in an MP4 container
const FALLBACK_AUDIO_MIME: &str = "audio/mp4";
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// A rejected sample: fixed user-facing message, nothing else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngressRejection {
    pub message: &'static str,
}

impl IngressRejection {
    fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Ingress validator for inbound media payloads
pub struct MediaIngress {
    min_clip_seconds: f32,
}

impl MediaIngress {
    pub fn new(min_clip_seconds: f32) -> Self {
        Self { min_clip_seconds }
    }

    /// Decode and check one payload
    ///
    /// A missing duration on an audio sample is treated as zero and rejected:
    /// ingress fails closed rather than guessing.
    pub fn prepare(
        &self,
        kind: MediaKind,
        media_base64: &str,
        duration_seconds: Option<f32>,
    ) -> Result<MediaSample, IngressRejection> {
        let encoded = strip_data_url_prefix(media_base64.trim());
        if encoded.is_empty() {
            return Err(IngressRejection::new(MSG_EMPTY_MEDIA));
        }

        let payload = STANDARD
            .decode(encoded)
            .map_err(|_| IngressRejection::new(MSG_INVALID_ENCODING))?;
        if payload.is_empty() {
            return Err(IngressRejection::new(MSG_EMPTY_MEDIA));
        }

        if kind == MediaKind::Cry {
            let duration = duration_seconds.unwrap_or(0.0);
            if duration < self.min_clip_seconds {
                tracing::debug!(
                    duration_seconds = duration,
                    min_clip_seconds = self.min_clip_seconds,
                    "Rejecting short clip at ingress"
                );
                return Err(IngressRejection::new(MSG_CLIP_TOO_SHORT));
            }
        }

        let mime_type = sniff_mime(kind, &payload)?;

        Ok(MediaSample {
            payload,
            mime_type,
            duration_seconds,
        })
    }
}

/// Mobile clients sometimes submit data URLs; keep only the payload
fn strip_data_url_prefix(encoded: &str) -> &str {
    if encoded.starts_with("data:") {
        match encoded.split_once("base64,") {
            Some((_, rest)) => rest,
            None => encoded,
        }
    } else {
        encoded
    }
}

/// Sniff the decoded bytes and check they belong to the expected family
///
/// An identified type from the wrong family is rejected; an unidentified
/// payload falls back to the domain default, since phone capture containers
/// vary more than the sniffer's table.
fn sniff_mime(kind: MediaKind, payload: &[u8]) -> Result<String, IngressRejection> {
    let detected = infer::get(payload);

    match kind {
        MediaKind::Cry => match detected {
            Some(t)
                if t.matcher_type() == infer::MatcherType::Audio
                    || t.mime_type() == "video/mp4" =>
            {
                Ok(t.mime_type().to_string())
            }
            Some(_) => Err(IngressRejection::new(MSG_WRONG_MEDIA_TYPE_AUDIO)),
            None => Ok(FALLBACK_AUDIO_MIME.to_string()),
        },
        MediaKind::Diaper => match detected {
            Some(t) if t.matcher_type() == infer::MatcherType::Image => {
                Ok(t.mime_type().to_string())
            }
            Some(_) => Err(IngressRejection::new(MSG_WRONG_MEDIA_TYPE_IMAGE)),
            None => Ok(FALLBACK_IMAGE_MIME.to_string()),
        },
    }
}
