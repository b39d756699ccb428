use crate::error::ExtractError;
use crate::types::{PlayerConfig, Rendition, VideoQuality, codec_rank};

/// Caller-supplied codec compatibility check. `None` accepts every codec.
pub type CodecSupport<'a> = Option<&'a (dyn Fn(&str) -> bool + Send + Sync)>;

/// Select the rendition for the requested tier.
///
/// Exact tier when present; otherwise the nearest tier strictly below,
/// and only when nothing sits below, the nearest tier above. Within the
/// chosen tier the first candidate in codec-preference order wins.
pub fn resolve<'a>(
    config: &'a PlayerConfig,
    requested: VideoQuality,
    supports: CodecSupport<'_>,
) -> Result<&'a Rendition, ExtractError> {
    if config.renditions.is_empty() {
        return Err(ExtractError::UnavailableQuality);
    }
    let tier = choose_tier(&config.renditions, requested);
    pick_at_tier(&config.renditions, tier, supports).ok_or(ExtractError::UnsupportedCodec)
}

/// One rendition per available tier, ascending, for the multi-result API.
pub fn resolve_all<'a>(
    config: &'a PlayerConfig,
    supports: CodecSupport<'_>,
) -> Result<Vec<&'a Rendition>, ExtractError> {
    if config.renditions.is_empty() {
        return Err(ExtractError::UnavailableQuality);
    }

    let picks: Vec<&Rendition> = VideoQuality::ALL
        .iter()
        .filter_map(|tier| pick_at_tier(&config.renditions, *tier, supports))
        .collect();

    if picks.is_empty() {
        return Err(ExtractError::UnsupportedCodec);
    }
    Ok(picks)
}

fn choose_tier(renditions: &[Rendition], requested: VideoQuality) -> VideoQuality {
    if renditions.iter().any(|r| r.quality == requested) {
        return requested;
    }
    if let Some(below) = renditions
        .iter()
        .map(|r| r.quality)
        .filter(|q| *q < requested)
        .max()
    {
        return below;
    }
    // Nothing at or below the request: everything left sits above it.
    renditions
        .iter()
        .map(|r| r.quality)
        .min()
        .unwrap_or(requested)
}

fn pick_at_tier<'a>(
    renditions: &'a [Rendition],
    tier: VideoQuality,
    supports: CodecSupport<'_>,
) -> Option<&'a Rendition> {
    let mut best: Option<&Rendition> = None;
    for rendition in renditions.iter().filter(|r| r.quality == tier) {
        if let Some(supports) = supports {
            if !supports(&rendition.codec) {
                continue;
            }
        }
        match best {
            Some(current) if codec_rank(&rendition.codec) >= codec_rank(&current.codec) => {}
            _ => best = Some(rendition),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendition(quality: VideoQuality, codec: &str, url: &str) -> Rendition {
        Rendition {
            quality,
            codec: codec.to_string(),
            url: url.to_string(),
        }
    }

    fn config_with(renditions: Vec<Rendition>) -> PlayerConfig {
        PlayerConfig {
            title: "Sample".to_string(),
            thumbnail_url: String::new(),
            renditions,
        }
    }

    #[test]
    fn exact_tier_wins() {
        let config = config_with(vec![
            rendition(VideoQuality::Low, "h264", "low"),
            rendition(VideoQuality::Medium, "h264", "medium"),
            rendition(VideoQuality::High, "h264", "high"),
        ]);
        let picked = resolve(&config, VideoQuality::Medium, None).expect("exact match");
        assert_eq!(picked.url, "medium");
        assert_eq!(picked.quality, VideoQuality::Medium);
    }

    #[test]
    fn falls_back_to_nearest_below() {
        let config = config_with(vec![
            rendition(VideoQuality::Low, "h264", "low"),
            rendition(VideoQuality::High, "h264", "high"),
        ]);
        let picked = resolve(&config, VideoQuality::Medium, None).expect("fallback down");
        assert_eq!(picked.quality, VideoQuality::Low);
    }

    #[test]
    fn falls_up_when_nothing_below_exists() {
        let config = config_with(vec![rendition(VideoQuality::High, "h264", "high")]);
        let picked = resolve(&config, VideoQuality::Low, None).expect("fallback up");
        assert_eq!(picked.quality, VideoQuality::High);
    }

    #[test]
    fn empty_renditions_always_fail() {
        let config = config_with(vec![]);
        for quality in VideoQuality::ALL {
            assert!(matches!(
                resolve(&config, quality, None),
                Err(ExtractError::UnavailableQuality)
            ));
        }
    }

    #[test]
    fn codec_tie_break_is_deterministic() {
        let config = config_with(vec![
            rendition(VideoQuality::High, "vp6", "vp6"),
            rendition(VideoQuality::High, "h264", "h264"),
        ]);
        for _ in 0..10 {
            let picked = resolve(&config, VideoQuality::High, None).expect("pick");
            assert_eq!(picked.codec, "h264");
        }
    }

    #[test]
    fn unsupported_codecs_at_chosen_tier_fail() {
        let config = config_with(vec![
            rendition(VideoQuality::High, "vp6", "vp6"),
            rendition(VideoQuality::High, "vp8", "vp8"),
        ]);
        let supports = |codec: &str| codec == "h264";
        assert!(matches!(
            resolve(&config, VideoQuality::High, Some(&supports)),
            Err(ExtractError::UnsupportedCodec)
        ));
    }

    #[test]
    fn predicate_skips_to_a_supported_codec() {
        let config = config_with(vec![
            rendition(VideoQuality::High, "h264", "h264"),
            rendition(VideoQuality::High, "vp8", "vp8"),
        ]);
        let supports = |codec: &str| codec == "vp8";
        let picked = resolve(&config, VideoQuality::High, Some(&supports)).expect("vp8");
        assert_eq!(picked.codec, "vp8");
    }

    #[test]
    fn resolve_all_yields_one_pick_per_tier_ascending() {
        let config = config_with(vec![
            rendition(VideoQuality::High, "vp6", "high-vp6"),
            rendition(VideoQuality::High, "h264", "high-h264"),
            rendition(VideoQuality::Low, "h264", "low"),
        ]);
        let picks = resolve_all(&config, None).expect("picks");
        let urls: Vec<_> = picks.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["low", "high-h264"]);
    }

    #[test]
    fn resolve_all_empty_is_unavailable() {
        assert!(matches!(
            resolve_all(&config_with(vec![]), None),
            Err(ExtractError::UnavailableQuality)
        ));
    }

    #[test]
    fn resolve_all_with_no_supported_codec_fails() {
        let config = config_with(vec![rendition(VideoQuality::Low, "vp6", "low")]);
        let supports = |codec: &str| codec == "h264";
        assert!(matches!(
            resolve_all(&config, Some(&supports)),
            Err(ExtractError::UnsupportedCodec)
        ));
    }
}
