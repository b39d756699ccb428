//! Resolve playable Vimeo stream URLs from page URLs or numeric video IDs.
//!
//! The pipeline is linear per request: normalize the identifier, fetch the
//! player config (scraping the page first when the ID is unknown), parse
//! the payload into a flat rendition sequence, then pick the rendition for
//! the requested quality tier with fallback to the nearest available tier.

pub mod common;
pub mod configs;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod identifier;
pub mod parser;
pub mod quality;
pub mod transport;
pub mod types;

pub use configs::ExtractorConfig;
pub use error::{ExtractError, TransportError};
pub use extractor::{Lifecycle, VimeoExtractor};
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use types::{PlayerConfig, Rendition, RequestContext, Video, VideoQuality};
