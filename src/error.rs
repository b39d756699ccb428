use thiserror::Error;

/// Failure at the HTTP boundary, split the way callers care about it:
/// content that is gone vs. a failure that a retry may clear.
#[derive(Debug, Error)]
pub enum TransportError {
    /// 4xx response: the video was removed or the identifier never existed.
    #[error("content unavailable (http {0})")]
    ContentUnavailable(u16),
    /// Network failure, timeout or 5xx response.
    #[error("transient transport failure: {0}")]
    Transient(String),
}

impl TransportError {
    /// Classify a non-2xx status code. Returns `None` for success statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            400..=499 => Some(Self::ContentUnavailable(status)),
            _ => Some(Self::Transient(format!("http {status}"))),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// One discriminated error per extraction request. Every pipeline stage
/// fails fast; no partial results are delivered alongside an error.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An operation was invoked outside the extractor's lifecycle order.
    #[error("extractor used outside its lifecycle order")]
    NotInitialized,
    /// The supplied URL or ID could not be normalized.
    #[error("unrecognized video identifier: {0}")]
    InvalidIdentifier(String),
    /// The page or config fetch failed at the network layer.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The player config payload did not match the expected schema.
    #[error("unexpected player config format: {0}")]
    UnexpectedFormat(String),
    /// The config exposes no renditions at all.
    #[error("no renditions available for this video")]
    UnavailableQuality,
    /// Renditions exist but none uses a codec the caller supports.
    #[error("no rendition uses a supported codec")]
    UnsupportedCodec,
}
