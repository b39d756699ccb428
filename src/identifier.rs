use regex::Regex;

use crate::error::ExtractError;

const PAGE_BASE: &str = "https://vimeo.com";

/// Canonical form of a raw identifier. Exactly one of the two inputs is
/// authoritative: a known numeric ID yields the canonical page URL, a page
/// URL without a numeric segment keeps its own URL for scraping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoIdentifier {
    pub page_url: String,
    pub video_id: Option<u64>,
}

/// Normalize a raw page URL or bare numeric ID. Pure; never touches the
/// network.
pub fn normalize(raw: &str) -> Result<VideoIdentifier, ExtractError> {
    let raw = raw.trim();

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let id: u64 = raw
            .parse()
            .map_err(|_| ExtractError::InvalidIdentifier(raw.to_string()))?;
        return Ok(VideoIdentifier {
            page_url: format!("{PAGE_BASE}/{id}"),
            video_id: Some(id),
        });
    }

    let url_re = Regex::new(r"(?i)^https?://(?:www\.|player\.)?vimeo\.com/(?P<path>[^\s]*)$").unwrap();
    let Some(caps) = url_re.captures(raw) else {
        return Err(ExtractError::InvalidIdentifier(raw.to_string()));
    };
    let path = &caps["path"];

    // The trailing full numeric path segment is the video ID.
    let id_re = Regex::new(r"(?:^|/)(?P<id>\d+)(?:[/?#]|$)").unwrap();
    if let Some(id_caps) = id_re.captures_iter(path).last() {
        let id: u64 = id_caps["id"]
            .parse()
            .map_err(|_| ExtractError::InvalidIdentifier(raw.to_string()))?;
        return Ok(VideoIdentifier {
            page_url: format!("{PAGE_BASE}/{id}"),
            video_id: Some(id),
        });
    }

    if path.is_empty() {
        return Err(ExtractError::InvalidIdentifier(raw.to_string()));
    }

    // Vimeo URL without a numeric segment: keep it, the fetcher scrapes
    // the page for the embedded config reference.
    Ok(VideoIdentifier {
        page_url: raw.to_string(),
        video_id: None,
    })
}

/// Whether this extractor recognizes the identifier at all.
pub fn can_handle(raw: &str) -> bool {
    normalize(raw).is_ok()
}
