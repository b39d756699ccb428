use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::configs::ExtractorConfig;
use crate::error::ExtractError;
use crate::fetcher::PageFetcher;
use crate::identifier;
use crate::parser;
use crate::quality::{self, CodecSupport};
use crate::transport::{HttpTransport, Transport};
use crate::types::{PlayerConfig, RequestContext, Video, VideoQuality};

/// Request lifecycle. A transition out of `Idle` happens exactly once;
/// `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Succeeded,
    Failed,
}

type CodecSupportFn = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// One extraction request: identifier in, stream URL out.
///
/// Single-use. Construct with `from_url` or `from_id`, optionally layer on
/// a referer, transport or codec predicate, then `start` (one result) or
/// `start_all` (one result per available tier). Dropping the returned
/// future cancels the request at whichever fetch is pending.
///
/// ```no_run
/// # async fn demo() -> Result<(), vimelink::ExtractError> {
/// use vimelink::{VimeoExtractor, VideoQuality};
///
/// let video = VimeoExtractor::from_id(12345678, VideoQuality::High)
///     .start()
///     .await?;
/// println!("{} -> {}", video.title, video.video_url);
/// # Ok(())
/// # }
/// ```
pub struct VimeoExtractor {
    context: RequestContext,
    config: ExtractorConfig,
    transport: Option<Arc<dyn Transport>>,
    codec_support: Option<CodecSupportFn>,
    state: Mutex<Lifecycle>,
    result: Mutex<Option<Video>>,
}

impl VimeoExtractor {
    pub fn from_url(url: impl Into<String>, quality: VideoQuality) -> Self {
        Self::new(url.into(), quality)
    }

    pub fn from_id(id: u64, quality: VideoQuality) -> Self {
        Self::new(id.to_string(), quality)
    }

    fn new(identifier: String, quality: VideoQuality) -> Self {
        Self {
            context: RequestContext {
                identifier,
                quality,
                referer: None,
            },
            config: ExtractorConfig::default(),
            transport: None,
            codec_support: None,
            state: Mutex::new(Lifecycle::Idle),
            result: Mutex::new(None),
        }
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.context.referer = Some(referer.into());
        self
    }

    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_codec_support(
        mut self,
        supports: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.codec_support = Some(Box::new(supports));
        self
    }

    /// Whether this extractor recognizes the identifier at all.
    pub fn can_handle(identifier: &str) -> bool {
        identifier::can_handle(identifier)
    }

    pub fn state(&self) -> Lifecycle {
        *self.state.lock()
    }

    /// The resolved video of a completed request. `NotInitialized` until
    /// `start` has run to a successful completion.
    pub fn video(&self) -> Result<Video, ExtractError> {
        self.result.lock().clone().ok_or(ExtractError::NotInitialized)
    }

    /// Run the pipeline and resolve a single rendition at the requested
    /// quality. Delivers exactly one result or one error.
    pub async fn start(&self) -> Result<Video, ExtractError> {
        self.begin()?;
        let outcome = self.run_single().await;
        self.finish(outcome.as_ref().ok().cloned());
        outcome
    }

    /// Run the pipeline and return one rendition per available tier.
    pub async fn start_all(&self) -> Result<Vec<Video>, ExtractError> {
        self.begin()?;
        let outcome = self.run_multi().await;
        self.finish(outcome.as_ref().ok().and_then(|v| v.first().cloned()));
        outcome
    }

    fn begin(&self) -> Result<(), ExtractError> {
        let mut state = self.state.lock();
        if *state != Lifecycle::Idle {
            return Err(ExtractError::NotInitialized);
        }
        *state = Lifecycle::Running;
        Ok(())
    }

    fn finish(&self, video: Option<Video>) {
        let mut state = self.state.lock();
        match video {
            Some(video) => {
                *state = Lifecycle::Succeeded;
                *self.result.lock() = Some(video);
            }
            None => *state = Lifecycle::Failed,
        }
    }

    async fn run_single(&self) -> Result<Video, ExtractError> {
        let parsed = self.load_config().await?;
        let rendition = quality::resolve(&parsed, self.context.quality, self.supports())?;
        Ok(Video::from_rendition(&parsed, rendition))
    }

    async fn run_multi(&self) -> Result<Vec<Video>, ExtractError> {
        let parsed = self.load_config().await?;
        let renditions = quality::resolve_all(&parsed, self.supports())?;
        Ok(renditions
            .into_iter()
            .map(|r| Video::from_rendition(&parsed, r))
            .collect())
    }

    async fn load_config(&self) -> Result<PlayerConfig, ExtractError> {
        debug!(
            "extracting {} at {:?}",
            self.context.identifier, self.context.quality
        );
        let identifier = identifier::normalize(&self.context.identifier)?;
        let transport = self.transport()?;
        let referer = self
            .context
            .referer
            .clone()
            .unwrap_or_else(|| self.config.default_referer.clone());

        let fetcher = PageFetcher::new(transport.as_ref(), &self.config);
        let body = fetcher.fetch_config(&identifier, &referer).await?;
        parser::parse(&body)
    }

    fn transport(&self) -> Result<Arc<dyn Transport>, ExtractError> {
        if let Some(transport) = &self.transport {
            return Ok(transport.clone());
        }
        Ok(Arc::new(HttpTransport::new(self.config.request_timeout_secs)?))
    }

    fn supports(&self) -> CodecSupport<'_> {
        self.codec_support.as_deref()
    }

    /// One-shot single-result extraction.
    pub async fn fetch_video(
        identifier: &str,
        quality: VideoQuality,
    ) -> Result<Video, ExtractError> {
        Self::from_url(identifier, quality).start().await
    }

    /// One-shot single-result extraction with an explicit referer.
    pub async fn fetch_video_with_referer(
        identifier: &str,
        quality: VideoQuality,
        referer: &str,
    ) -> Result<Video, ExtractError> {
        Self::from_url(identifier, quality)
            .with_referer(referer)
            .start()
            .await
    }

    /// One-shot multi-result extraction: every available tier.
    pub async fn fetch_videos(identifier: &str) -> Result<Vec<Video>, ExtractError> {
        Self::from_url(identifier, VideoQuality::High).start_all().await
    }

    /// One-shot multi-result extraction with an explicit referer.
    pub async fn fetch_videos_with_referer(
        identifier: &str,
        referer: &str,
    ) -> Result<Vec<Video>, ExtractError> {
        Self::from_url(identifier, VideoQuality::High)
            .with_referer(referer)
            .start_all()
            .await
    }
}
