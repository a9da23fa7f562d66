use crate::error::{UploadError, UpscaleError, ValidationError};
use crate::workflow::{SelectedImage, UploadResult, UpscaleResult};

pub const DEFAULT_SLIDER: u8 = 50;

// Status lines shown under the submit button.
pub const STATUS_READY: &str = "Image ready to process.";
pub const STATUS_UPLOADING: &str = "Sending image...";
pub const STATUS_PROCESSING: &str = "Enhancing image quality...";
pub const STATUS_DONE: &str = "Processing complete!";

// Generic failure text shown to the user. Details only go to the log.
pub const ERROR_UPLOAD: &str = "There was a problem sending the image. Please try again.";
pub const ERROR_PROCESSING: &str = "Could not process the image.";
pub const ERROR_BUSY: &str = "The service is busy right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Ready,
    Uploading,
    Processing,
    Done,
    Error,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything that can move the session forward: the user's own inputs and
/// the outcomes coming back from the workflow thread.
#[derive(Debug)]
pub enum WorkflowEvent {
    ImageSelected(SelectedImage),
    SelectionRejected(ValidationError),
    UpscaleStarted,
    UploadSucceeded(UploadResult),
    UploadFailed(UploadError),
    UpscaleSucceeded(UpscaleResult),
    UpscaleFailed(UpscaleError),
    SliderMoved(u8),
    Reset,
}

/// Presentation state for the single image flowing through the app. Never
/// touches the network or the GUI; `apply` is the only way it changes, so
/// every transition can be exercised directly in tests.
#[derive(Debug)]
pub struct SessionState {
    pub phase: Phase,
    pub status: String,
    pub error: String,
    pub slider: u8,
    pub image: Option<SelectedImage>,
    pub upload: Option<UploadResult>,
    pub result: Option<UpscaleResult>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            status: String::new(),
            error: String::new(),
            slider: DEFAULT_SLIDER,
            image: None,
            upload: None,
            result: None,
        }
    }
}

impl SessionState {
    /// True exactly while a network step is running.
    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Uploading | Phase::Processing)
    }

    /// The upscale action is available whenever an image is selected and
    /// nothing is in flight. That covers retrying after an error and
    /// re-running after a finished pass.
    pub fn can_upscale(&self) -> bool {
        self.image.is_some() && !self.loading()
    }

    pub fn apply(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::ImageSelected(image) => {
                if self.loading() {
                    return;
                }
                self.phase = Phase::Ready;
                self.status = STATUS_READY.to_string();
                self.error.clear();
                self.image = Some(image);
                self.upload = None;
                self.result = None;
                // Slider position survives a re-selection on purpose.
            }
            WorkflowEvent::SelectionRejected(reason) => {
                if self.loading() {
                    return;
                }
                self.phase = Phase::Error;
                self.status.clear();
                self.error = reason.to_string();
                self.image = None;
                self.upload = None;
                self.result = None;
            }
            WorkflowEvent::UpscaleStarted => {
                if !self.can_upscale() {
                    return;
                }
                self.phase = Phase::Uploading;
                self.status = STATUS_UPLOADING.to_string();
                self.error.clear();
            }
            WorkflowEvent::UploadSucceeded(upload) => {
                if self.phase != Phase::Uploading {
                    return;
                }
                self.phase = Phase::Processing;
                self.status = STATUS_PROCESSING.to_string();
                self.upload = Some(upload);
            }
            WorkflowEvent::UploadFailed(_) => {
                if self.phase != Phase::Uploading {
                    return;
                }
                self.phase = Phase::Error;
                self.status.clear();
                self.error = ERROR_UPLOAD.to_string();
            }
            WorkflowEvent::UpscaleSucceeded(result) => {
                if self.phase != Phase::Processing {
                    return;
                }
                self.phase = Phase::Done;
                self.status = STATUS_DONE.to_string();
                self.result = Some(result);
            }
            WorkflowEvent::UpscaleFailed(err) => {
                if self.phase != Phase::Processing {
                    return;
                }
                self.phase = Phase::Error;
                self.status.clear();
                self.error = match err {
                    UpscaleError::MissingResultUrl => ERROR_PROCESSING.to_string(),
                    _ => ERROR_BUSY.to_string(),
                };
            }
            WorkflowEvent::SliderMoved(position) => {
                self.slider = position.min(100);
            }
            WorkflowEvent::Reset => {
                *self = SessionState::default();
            }
        }
    }
}
