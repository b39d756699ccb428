use serde::{Deserialize, Serialize};

/// Codec preference used for deterministic tie-breaking: the broadly
/// compatible codec first, then the rest, then anything unknown.
pub(crate) const CODEC_PREFERENCE: [&str; 3] = ["h264", "vp8", "vp6"];

pub(crate) fn codec_rank(codec: &str) -> usize {
    CODEC_PREFERENCE
        .iter()
        .position(|c| *c == codec)
        .unwrap_or(CODEC_PREFERENCE.len())
}

/// Quality tier, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoQuality {
    Low,
    Medium,
    High,
}

impl VideoQuality {
    pub const ALL: [VideoQuality; 3] = [Self::Low, Self::Medium, Self::High];

    /// Map a payload quality name onto a tier. The player config has used
    /// both symbolic names (`mobile`/`sd`/`hd`) and pixel heights (`360p`).
    pub fn from_payload_name(name: &str) -> Option<Self> {
        match name {
            "mobile" => return Some(Self::Low),
            "sd" => return Some(Self::Medium),
            "hd" => return Some(Self::High),
            _ => {}
        }
        let height: u32 = name.strip_suffix('p')?.parse().ok()?;
        Some(if height <= 360 {
            Self::Low
        } else if height <= 540 {
            Self::Medium
        } else {
            Self::High
        })
    }
}

/// One concrete stream at one quality/codec pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub quality: VideoQuality,
    pub codec: String,
    pub url: String,
}

/// Normalized player config: metadata plus the flat rendition sequence,
/// ordered by ascending tier and then codec preference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerConfig {
    pub title: String,
    pub thumbnail_url: String,
    pub renditions: Vec<Rendition>,
}

/// The caller's side of one extraction request. Immutable for the
/// request's lifetime and never shared across concurrent extractions.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub identifier: String,
    pub quality: VideoQuality,
    pub referer: Option<String>,
}

/// The resolved result delivered to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub quality: VideoQuality,
}

impl Video {
    /// Assemble the public result from a resolved rendition and the
    /// config's metadata. Pure mapping; upstream errors never reach here.
    pub fn from_rendition(config: &PlayerConfig, rendition: &Rendition) -> Self {
        Self {
            title: config.title.clone(),
            video_url: rendition.url.clone(),
            thumbnail_url: config.thumbnail_url.clone(),
            quality: rendition.quality,
        }
    }
}
