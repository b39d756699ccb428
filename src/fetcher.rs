use regex::Regex;
use tracing::{debug, error};

use crate::configs::ExtractorConfig;
use crate::error::{ExtractError, TransportError};
use crate::identifier::VideoIdentifier;
use crate::transport::Transport;

/// Resolves an identifier to the player config payload: at most one page
/// GET (only when the ID is unknown) followed by exactly one config GET.
pub struct PageFetcher<'a> {
    transport: &'a dyn Transport,
    config: &'a ExtractorConfig,
}

impl<'a> PageFetcher<'a> {
    pub fn new(transport: &'a dyn Transport, config: &'a ExtractorConfig) -> Self {
        Self { transport, config }
    }

    /// Resolve the identifier to the config endpoint URL, scraping the
    /// page body when the numeric ID is not already known.
    pub async fn locate(
        &self,
        identifier: &VideoIdentifier,
        referer: &str,
    ) -> Result<String, ExtractError> {
        if let Some(id) = identifier.video_id {
            return Ok(self.config.config_url(id));
        }

        debug!("scraping {} for an embedded config reference", identifier.page_url);
        let body = self.get(&identifier.page_url, referer).await?;

        let config_url_re = Regex::new(r#""config_url"\s*:\s*"(?P<url>[^"]+)""#).unwrap();
        if let Some(caps) = config_url_re.captures(&body) {
            return Ok(caps["url"].replace("\\/", "/"));
        }

        let embed_re = Regex::new(r"player\.vimeo\.com/video/(?P<id>\d+)").unwrap();
        if let Some(caps) = embed_re.captures(&body) {
            let id: u64 = caps["id"].parse().map_err(|_| {
                ExtractError::UnexpectedFormat("embedded video id overflows".to_string())
            })?;
            return Ok(self.config.config_url(id));
        }

        Err(ExtractError::UnexpectedFormat(
            "page carries no player config reference".to_string(),
        ))
    }

    /// Fetch the raw player config payload for this identifier.
    pub async fn fetch_config(
        &self,
        identifier: &VideoIdentifier,
        referer: &str,
    ) -> Result<String, ExtractError> {
        let config_url = self.locate(identifier, referer).await?;
        self.get(&config_url, referer).await
    }

    async fn get(&self, url: &str, referer: &str) -> Result<String, ExtractError> {
        let headers = [("Referer".to_string(), referer.to_string())];
        let resp = match self.transport.fetch(url, &headers).await {
            Ok(resp) => resp,
            Err(e) => {
                error!("request to {} failed: {}", url, e);
                return Err(e.into());
            }
        };

        if let Some(err) = TransportError::from_status(resp.status) {
            error!("request to {} returned http {}", url, resp.status);
            return Err(err.into());
        }

        Ok(resp.body)
    }
}
