use thiserror::Error;

use crate::vulkan::errors::{
    DeviceIdleError, FenceError, PresentationError, RecordingError,
    ResourceCreationError, SubmissionError, SurfaceCreationError,
};

/// Everything which can go wrong while drawing a frame.
///
/// Stale or resized surfaces are not errors, they are handled by
/// [crate::frame_pipeline::ResizeRecovery]. Anything that reaches the caller
/// is fatal.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Unable to create the frame resources")]
    UnexpectedResourceCreationError(#[from] ResourceCreationError),

    #[error("Unexpected fence error")]
    UnexpectedFenceError(#[from] FenceError),

    #[error("Unexpected presentation error")]
    UnexpectedPresentationError(#[from] PresentationError),

    #[error("Unable to record the frame's commands")]
    UnexpectedRecordingError(#[from] RecordingError),

    #[error("Unable to submit the frame")]
    UnexpectedSubmissionError(#[from] SubmissionError),

    #[error("Unable to rebuild the presentation chain")]
    UnexpectedSurfaceCreationError(#[from] SurfaceCreationError),

    #[error("Unable to wait for the device to idle")]
    UnexpectedDeviceIdleError(#[from] DeviceIdleError),

    #[error("There is no render target for swapchain image {}", .0)]
    MissingRenderTarget(usize),

    #[error("The presentation surface has no graphics pipeline")]
    MissingPipeline,

    #[error("At least one frame slot is required")]
    NoFrameSlots,

    /// Raised by direct callers of `ResizeRecovery::recover` which recover a
    /// second time before starting a new iteration.
    #[error("The presentation chain was already rebuilt during this frame")]
    RecoveryAlreadyAttempted,
}
