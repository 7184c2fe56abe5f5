//! Background decode-and-orient.
//!
//! [`OrientationCorrector::submit`] validates the scale on the calling
//! thread, hands the CPU-bound work to the runtime's blocking pool and
//! returns a [`DecodeTask`] right away. Awaiting the task delivers the result
//! on the awaiting task. [`OrientationCorrector::submit_with`] does the same
//! but invokes a completion callback from the runtime's async executor.
//!
//! Jobs are independent: each owns its source buffer and output image, and
//! no ordering is guaranteed between two submissions. There is no
//! cancellation; dropping a `DecodeTask` detaches the job, which still runs
//! to completion.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::CorrectorConfig;
use crate::decode::{DecodedImage, ExifReader, ImageCodec, MetadataReader, PixelCodec};
use crate::orient::{orient_with, OrientError, ScaleFactor};

/// Decodes encoded images and corrects their EXIF orientation.
#[derive(Clone)]
pub struct OrientationCorrector {
    runtime: Handle,
    codec: Arc<dyn PixelCodec>,
    metadata: Arc<dyn MetadataReader>,
    config: CorrectorConfig,
}

impl fmt::Debug for OrientationCorrector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrientationCorrector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OrientationCorrector {
    /// Corrector that runs background work on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            codec: Arc::new(ImageCodec),
            metadata: Arc::new(ExifReader),
            config: CorrectorConfig::default(),
        }
    }

    /// Corrector bound to the runtime the caller is running in.
    pub fn try_current() -> Result<Self, OrientError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| OrientError::NoRuntime)
    }

    pub fn with_codec(mut self, codec: impl PixelCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    pub fn with_metadata_reader(mut self, metadata: impl MetadataReader + 'static) -> Self {
        self.metadata = Arc::new(metadata);
        self
    }

    pub fn with_config(mut self, config: CorrectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Run the pipeline on the calling thread.
    pub fn decode_and_orient(
        &self,
        source: &[u8],
        scale: Option<f32>,
    ) -> Result<DecodedImage, OrientError> {
        let scale = ScaleFactor::from_option(scale)?;
        orient_with(
            source,
            scale,
            self.codec.as_ref(),
            self.metadata.as_ref(),
            &self.config,
        )
    }

    /// Queue a decode on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns `OrientError::InvalidArgument` immediately, without spawning
    /// anything, if `scale` is outside (0.0, 1.0]. Decode failures arrive
    /// through the returned task.
    pub fn submit(
        &self,
        source: impl Into<Vec<u8>>,
        scale: Option<f32>,
    ) -> Result<DecodeTask, OrientError> {
        let scale = ScaleFactor::from_option(scale)?;
        let source = source.into();
        let codec = Arc::clone(&self.codec);
        let metadata = Arc::clone(&self.metadata);
        let config = self.config.clone();

        tracing::debug!(bytes = source.len(), "Queueing decode");
        let handle = self.runtime.spawn_blocking(move || {
            orient_with(&source, scale, codec.as_ref(), metadata.as_ref(), &config)
        });

        Ok(DecodeTask { handle })
    }

    /// Queue a decode and invoke `callback` with its outcome exactly once.
    ///
    /// The callback runs as a task on the runtime's executor, never on the
    /// blocking thread that did the decode. It is not marshalled back to the
    /// caller's thread: hosts that must handle the result on a particular
    /// thread, such as a UI thread, have to forward it there from the callback.
    pub fn submit_with<F>(
        &self,
        source: impl Into<Vec<u8>>,
        scale: Option<f32>,
        callback: F,
    ) -> Result<(), OrientError>
    where
        F: FnOnce(Result<DecodedImage, OrientError>) + Send + 'static,
    {
        let task = self.submit(source, scale)?;
        self.runtime.spawn(async move {
            callback(task.await);
        });
        Ok(())
    }
}

/// Pending result of [`OrientationCorrector::submit`].
#[derive(Debug)]
pub struct DecodeTask {
    handle: JoinHandle<Result<DecodedImage, OrientError>>,
}

impl Future for DecodeTask {
    type Output = Result<DecodedImage, OrientError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => {
                tracing::warn!(error = %e, "Decode worker failed");
                Poll::Ready(Err(OrientError::Worker(e.to_string())))
            }
        }
    }
}
