//! The per-frame protocol.
//!
//! [FrameScheduler] owns a ring of [FrameSlot]s and drives each frame through
//! wait, acquire, record, submit, and present. [ResizeRecovery] rebuilds the
//! presentation chain whenever it goes stale.

mod command_recorder;
mod frame_error;
mod frame_scheduler;
mod frame_slot;
mod resize_recovery;

pub use self::{
    command_recorder::{CommandRecorder, CLEAR_COLOR},
    frame_error::FrameError,
    frame_scheduler::{FrameScheduler, FrameStatus},
    frame_slot::FrameSlot,
    resize_recovery::{RecoveryOutcome, ResizeRecovery},
};
