use serde_json::Value;
use tracing::debug;

use crate::error::ExtractError;
use crate::types::{PlayerConfig, Rendition, VideoQuality, codec_rank};

/// Decode a player config payload into the normalized model.
///
/// The renditions section has shipped in three shapes over time: a
/// `progressive` array, codec-first nesting (`files.h264.sd.url`) and
/// quality-first nesting (`files.sd.h264.url`). All three normalize into
/// one flat sequence ordered by ascending tier, then codec preference.
pub fn parse(body: &str) -> Result<PlayerConfig, ExtractError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| ExtractError::UnexpectedFormat(format!("payload is not valid json: {e}")))?;

    let title = root["video"]["title"]
        .as_str()
        .ok_or_else(|| ExtractError::UnexpectedFormat("missing video.title".to_string()))?
        .to_string();
    let thumbnail_url = extract_thumbnail(&root["video"]);

    let files = root["request"]["files"]
        .as_object()
        .ok_or_else(|| ExtractError::UnexpectedFormat("missing request.files".to_string()))?;

    let mut renditions = Vec::new();

    if let Some(progressive) = files.get("progressive").and_then(|v| v.as_array()) {
        for entry in progressive {
            let Some(url) = entry["url"].as_str() else {
                continue;
            };
            let Some(quality) = entry["quality"]
                .as_str()
                .and_then(VideoQuality::from_payload_name)
            else {
                continue;
            };
            let codec = entry["codec"].as_str().unwrap_or("h264").to_lowercase();
            renditions.push(Rendition {
                quality,
                codec,
                url: url.to_string(),
            });
        }
    } else {
        for (outer_key, inner) in files {
            let Some(inner) = inner.as_object() else {
                continue;
            };
            if let Some(quality) = VideoQuality::from_payload_name(outer_key) {
                // quality-first nesting
                for (codec, leaf) in inner {
                    if let Some(url) = leaf["url"].as_str() {
                        renditions.push(Rendition {
                            quality,
                            codec: codec.to_lowercase(),
                            url: url.to_string(),
                        });
                    }
                }
            } else {
                // codec-first nesting
                for (quality_name, leaf) in inner {
                    let Some(quality) = VideoQuality::from_payload_name(quality_name) else {
                        continue;
                    };
                    if let Some(url) = leaf["url"].as_str() {
                        renditions.push(Rendition {
                            quality,
                            codec: outer_key.to_lowercase(),
                            url: url.to_string(),
                        });
                    }
                }
            }
        }
    }

    renditions.sort_by(|a, b| {
        a.quality
            .cmp(&b.quality)
            .then_with(|| codec_rank(&a.codec).cmp(&codec_rank(&b.codec)))
    });

    debug!("parsed {} renditions for {:?}", renditions.len(), title);

    Ok(PlayerConfig {
        title,
        thumbnail_url,
        renditions,
    })
}

/// Largest thumbnail wins; metadata drift here must not fail extraction.
fn extract_thumbnail(video: &Value) -> String {
    if let Some(thumbs) = video["thumbs"].as_object() {
        let mut best: Option<(u32, &str)> = None;
        for (size, url) in thumbs {
            let Some(url) = url.as_str() else {
                continue;
            };
            let width: u32 = size.parse().unwrap_or(0);
            if best.is_none_or(|(w, _)| width > w) {
                best = Some((width, url));
            }
        }
        if let Some((_, url)) = best {
            return url.to_string();
        }
    }
    video["thumbnail_url"].as_str().unwrap_or_default().to_string()
}
