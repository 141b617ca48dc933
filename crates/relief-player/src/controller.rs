//! The video source controller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use relief_client::{CancelHandle, GenerationError, GenerationResult, VideoGenerator};
use relief_models::{Blob, ControllerPhase, Prompt, SourceKind, VideoSource};

use crate::error::{ControllerError, ControllerResult};
use crate::export::write_video;
use crate::outcome::{GenerateStatus, GenerationOutcome, IgnoreReason, Notice};
use crate::registry::{BlobRegistry, ObjectUrlRegistry};

/// The one generation request allowed in flight.
struct InFlight {
    request_id: u64,
    prompt: Prompt,
    cancel: CancelHandle,
    task: JoinHandle<GenerationResult<Blob>>,
}

impl InFlight {
    /// Signal cancellation and stop polling the task. Its result, if any, is
    /// never observed.
    fn abandon(self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Owns the displayed video and mediates local picks, generation requests
/// and teardown.
///
/// Invariants:
/// - at most one object URL issued by this controller is live at a time;
/// - only the most recently issued generation request can change the source;
/// - failures leave the previous source in place.
///
/// All methods are meant to be driven from a single task. `generate` spawns
/// onto the current Tokio runtime.
pub struct VideoSourceController<R: ObjectUrlRegistry = BlobRegistry> {
    generator: Arc<dyn VideoGenerator>,
    registry: R,
    source: VideoSource,
    phase: ControllerPhase,
    in_flight: Option<InFlight>,
    last_prompt: Option<Prompt>,
    next_request_id: u64,
}

impl VideoSourceController<BlobRegistry> {
    /// Create a controller backed by an in-memory registry.
    pub fn new(generator: Arc<dyn VideoGenerator>) -> Self {
        Self::with_registry(generator, BlobRegistry::new())
    }
}

impl<R: ObjectUrlRegistry> VideoSourceController<R> {
    pub fn with_registry(generator: Arc<dyn VideoGenerator>, registry: R) -> Self {
        Self {
            generator,
            registry,
            source: VideoSource::None,
            phase: ControllerPhase::Idle,
            in_flight: None,
            last_prompt: None,
            next_request_id: 1,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The source to render. `VideoSource::None` means show the placeholder.
    pub fn current_source(&self) -> &VideoSource {
        &self.source
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// In-flight flag.
    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Last prompt accepted by `generate`.
    pub fn last_prompt(&self) -> Option<&Prompt> {
        self.last_prompt.as_ref()
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn is_disposed(&self) -> bool {
        self.phase.is_terminal()
    }

    // =========================================================================
    // Local files
    // =========================================================================

    /// Display a user-picked file. `None` (nothing picked) is ignored.
    ///
    /// Returns `true` if the source changed.
    pub fn pick_local(&mut self, file: Option<Blob>) -> bool {
        if self.is_disposed() {
            warn!("pick_local called on a disposed controller");
            return false;
        }
        let Some(file) = file else {
            return false;
        };

        let url = self.registry.create(file);
        info!(url = %url, "Displaying local file");
        self.replace_source(VideoSource::from_kind(SourceKind::Local, url));
        self.phase = ControllerPhase::Ready;
        true
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Issue a generation request for `prompt_text`.
    ///
    /// Blank prompts and a repeat of the prompt already in flight are no-ops.
    /// A different prompt supersedes the in-flight request: its token is
    /// cancelled and its result will never be applied.
    pub fn generate(&mut self, prompt_text: &str) -> GenerateStatus {
        if self.is_disposed() {
            warn!("generate called on a disposed controller");
            return GenerateStatus::Ignored(IgnoreReason::Disposed);
        }
        let Some(prompt) = Prompt::parse(prompt_text) else {
            return GenerateStatus::Ignored(IgnoreReason::EmptyPrompt);
        };

        if let Some(current) = &self.in_flight {
            if current.prompt == prompt {
                debug!(request_id = current.request_id, "Prompt already in flight");
                return GenerateStatus::Ignored(IgnoreReason::AlreadyInFlight);
            }
        }
        if let Some(previous) = self.in_flight.take() {
            debug!(request_id = previous.request_id, "Superseding in-flight request");
            previous.abandon();
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let cancel = CancelHandle::new();
        let token = cancel.token();
        let generator = Arc::clone(&self.generator);
        let task_prompt = prompt.clone();
        let task = tokio::spawn(async move { generator.generate(&task_prompt, token).await });

        info!(request_id, prompt = %prompt, "Generation started");
        self.in_flight = Some(InFlight {
            request_id,
            prompt: prompt.clone(),
            cancel,
            task,
        });
        self.last_prompt = Some(prompt);
        self.phase = ControllerPhase::Loading;

        GenerateStatus::Started { request_id }
    }

    /// Re-issue the last accepted prompt.
    pub fn regenerate(&mut self) -> GenerateStatus {
        match self.last_prompt.clone() {
            Some(prompt) => self.generate(prompt.as_str()),
            None if self.is_disposed() => GenerateStatus::Ignored(IgnoreReason::Disposed),
            None => GenerateStatus::Ignored(IgnoreReason::EmptyPrompt),
        }
    }

    /// Wait for the in-flight request and apply its outcome.
    ///
    /// Returns `None` when nothing is in flight. Cancel-safe: dropping the
    /// returned future leaves the request in flight.
    pub async fn settle(&mut self) -> Option<GenerationOutcome> {
        let joined = match self.in_flight.as_mut() {
            Some(in_flight) => (&mut in_flight.task).await,
            None => return None,
        };
        let finished = self.in_flight.take()?;
        Some(self.apply(finished.request_id, joined))
    }

    /// Non-blocking `settle` for polling callers.
    pub fn try_settle(&mut self) -> Option<GenerationOutcome> {
        let joined = (&mut self.in_flight.as_mut()?.task).now_or_never()?;
        let finished = self.in_flight.take()?;
        Some(self.apply(finished.request_id, joined))
    }

    fn apply(
        &mut self,
        request_id: u64,
        joined: Result<GenerationResult<Blob>, JoinError>,
    ) -> GenerationOutcome {
        self.phase = ControllerPhase::Ready;

        let result = joined.unwrap_or_else(|e| {
            if e.is_cancelled() {
                Err(GenerationError::Cancelled)
            } else {
                Err(GenerationError::RequestFailed {
                    status: 0,
                    body: format!("generation task panicked: {}", e),
                })
            }
        });

        match result {
            Ok(blob) => {
                let url = self.registry.create(blob);
                info!(request_id, url = %url, "Displaying generated video");
                self.replace_source(VideoSource::from_kind(SourceKind::Remote, url));
                GenerationOutcome::Ready(self.source.clone())
            }
            Err(e) => match Notice::from_error(&e) {
                Some(notice) => {
                    warn!(request_id, "Generation failed: {}", e);
                    GenerationOutcome::Failed(notice)
                }
                None => {
                    debug!(request_id, "Generation cancelled");
                    GenerationOutcome::Cancelled
                }
            },
        }
    }

    // =========================================================================
    // Download
    // =========================================================================

    /// Save the displayed video to `target` (a file path or a directory).
    pub async fn download(&self, target: impl AsRef<Path>) -> ControllerResult<PathBuf> {
        let url = self.source.url().ok_or(ControllerError::NoVideo)?;
        let blob = self
            .registry
            .resolve(url)
            .ok_or_else(|| ControllerError::Revoked(url.to_string()))?;

        Ok(write_video(blob, target.as_ref()).await?)
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Cancel any in-flight request and revoke the held URL. Idempotent.
    ///
    /// The controller must not be reused afterwards.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        if let Some(in_flight) = self.in_flight.take() {
            debug!(request_id = in_flight.request_id, "Cancelling request on dispose");
            in_flight.abandon();
        }
        self.replace_source(VideoSource::None);
        self.phase = ControllerPhase::Disposed;
        info!("Video source controller disposed");
    }

    /// Swap in a new source and revoke the URL of the one it replaces.
    fn replace_source(&mut self, next: VideoSource) {
        let previous = std::mem::replace(&mut self.source, next);
        if let Some(url) = previous.url() {
            if !self.registry.revoke(url) {
                warn!(url = %url, "Replaced source URL was already revoked");
            }
        }
    }
}

impl<R: ObjectUrlRegistry> Drop for VideoSourceController<R> {
    fn drop(&mut self) {
        if !self.is_disposed() {
            warn!("VideoSourceController dropped without dispose() - releasing handles");
            self.dispose();
        }
    }
}
