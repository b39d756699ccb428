use serde::{Deserialize, Serialize};

/// Process-wide static configuration: the config endpoint template and the
/// default referer. Read-only once an extractor has been constructed.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExtractorConfig {
    /// Template for the player config endpoint; `{id}` is substituted
    /// with the resolved numeric video ID.
    #[serde(default = "default_player_config_url")]
    pub player_config_url: String,
    /// Referer sent when the caller supplies none. Some videos refuse the
    /// config fetch without one.
    #[serde(default = "default_referer")]
    pub default_referer: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_player_config_url() -> String {
    "https://player.vimeo.com/video/{id}/config".to_string()
}

fn default_referer() -> String {
    "https://vimeo.com/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            player_config_url: default_player_config_url(),
            default_referer: default_referer(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ExtractorConfig {
    pub fn config_url(&self, id: u64) -> String {
        self.player_config_url.replace("{id}", &id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitutes_the_id() {
        let config = ExtractorConfig::default();
        assert_eq!(
            config.config_url(12345678),
            "https://player.vimeo.com/video/12345678/config"
        );
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let config: ExtractorConfig = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(config.default_referer, "https://vimeo.com/");
        assert_eq!(config.request_timeout_secs, 10);
    }
}
