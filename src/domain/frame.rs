//! Inbound push-frame codec.
//!
//! The push channel delivers JSON objects carrying an integer `code`
//! discriminator. Only the seismic-event code (551) is acted on; frames
//! with other codes are ignored. Malformed frames surface as
//! `DecodeError` so the connection layer can log and drop them without
//! touching connection state.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AffectedArea, Hypocenter, SeismicEvent};

/// Frame discriminator for seismic event information.
pub const SEISMIC_EVENT_CODE: i64 = 551;

/// Errors from decoding an inbound frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Seismic event frame missing required field: {0}")]
    MissingField(&'static str),
}

/// Decodes a raw frame.
///
/// Returns `Ok(None)` for well-formed frames with a non-seismic
/// discriminator, `Ok(Some(event))` for seismic event frames, and
/// `Err` for frames that cannot be decoded.
pub fn decode_frame(raw: &str) -> Result<Option<SeismicEvent>, DecodeError> {
    let frame: PushFrame = serde_json::from_str(raw)?;
    if frame.code != SEISMIC_EVENT_CODE {
        return Ok(None);
    }

    let id = frame.id.ok_or(DecodeError::MissingField("id"))?;
    let body = frame
        .earthquake
        .ok_or(DecodeError::MissingField("earthquake"))?;
    let hypocenter = body.hypocenter.unwrap_or_default();

    Ok(Some(SeismicEvent {
        id,
        time: body.time,
        hypocenter: Hypocenter {
            name: hypocenter.name.unwrap_or_default(),
            latitude: hypocenter.latitude.filter(|v| v.is_finite()),
            longitude: hypocenter.longitude.filter(|v| v.is_finite()),
            magnitude: hypocenter.magnitude.filter(|v| v.is_finite() && *v >= 0.0),
            depth: hypocenter.depth.filter(|v| v.is_finite() && *v >= 0.0),
        },
        max_scale: body.max_scale.filter(|s| *s > 0),
        tsunami: body
            .domestic_tsunami
            .map(|t| !t.is_empty() && t != "None")
            .unwrap_or(false),
        areas: frame
            .points
            .into_iter()
            .map(|p| AffectedArea {
                name: p.addr,
                scale: p.scale.filter(|s| *s > 0),
            })
            .collect(),
    }))
}

// === Wire DTOs ===
//
// Tolerant of missing fields; sentinel values (-1 scale, absent
// coordinates) normalize to None during conversion.

#[derive(Debug, Deserialize)]
struct PushFrame {
    code: i64,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    earthquake: Option<QuakeBody>,
    #[serde(default)]
    points: Vec<PointBody>,
}

#[derive(Debug, Deserialize)]
struct QuakeBody {
    #[serde(default)]
    time: String,
    #[serde(default)]
    hypocenter: Option<HypocenterBody>,
    #[serde(default, rename = "maxScale")]
    max_scale: Option<i32>,
    #[serde(default, rename = "domesticTsunami")]
    domestic_tsunami: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HypocenterBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    magnitude: Option<f64>,
    #[serde(default)]
    depth: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PointBody {
    #[serde(default)]
    addr: String,
    #[serde(default)]
    scale: Option<i32>,
}
