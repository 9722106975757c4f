use std::sync::Arc;

use ash::vk;

use crate::{
    frame_pipeline::{
        CommandRecorder, FrameError, FrameSlot, RecoveryOutcome,
        ResizeRecovery,
    },
    glfw_window::WindowShim,
    presentation::{PresentationSurface, SwapchainStatus},
    vulkan::{
        errors::SubmissionError, sync::DeviceIdle, DeviceApi, PipelineBuilder,
        RenderDevice, Submission, VertexSource,
    },
};

/// What happened during one call to [FrameScheduler::draw_frame].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame was submitted and presented.
    Presented,

    /// The frame was presented, then the chain was rebuilt because it was
    /// stale or the window was resized.
    PresentedThenRebuilt,

    /// The swapchain was out of date before an image could be acquired. The
    /// chain was rebuilt and nothing was drawn.
    SkippedForRebuild,

    /// The window was closed while waiting for it to become visible again.
    WindowClosed,
}

/// Drives the per-frame protocol over a ring of frame slots.
///
/// Each frame waits for its slot's fence, acquires an image, records and
/// submits the slot's command buffer, then presents. A slot's fence is only
/// reset once an image has been acquired, so a frame which is abandoned for a
/// rebuild leaves the fence signaled and the next wait cannot block forever.
pub struct FrameScheduler<D: DeviceApi = RenderDevice> {
    slots: Vec<FrameSlot<D>>,
    current: usize,
    recorder: CommandRecorder<D>,
    recovery: ResizeRecovery,
    frames_presented: u64,
    device: Arc<D>,
}

impl<D: DeviceApi> FrameScheduler<D> {
    /// Create the scheduler with `frames_in_flight` slots.
    pub fn new(
        device: Arc<D>,
        frames_in_flight: usize,
    ) -> Result<Self, FrameError> {
        if frames_in_flight == 0 {
            return Err(FrameError::NoFrameSlots);
        }
        let slots = (0..frames_in_flight)
            .map(|index| FrameSlot::new(device.clone(), index))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Created {} frame slots", slots.len());
        Ok(Self {
            slots,
            current: 0,
            recorder: CommandRecorder::new(device.clone()),
            recovery: ResizeRecovery::new(),
            frames_presented: 0,
            device,
        })
    }

    /// Draw and present a single frame.
    ///
    /// Stale and resized surfaces are recovered internally. Any error is
    /// fatal.
    pub fn draw_frame<P, V, W>(
        &mut self,
        surface: &mut PresentationSurface<P, D>,
        window: &mut W,
        vertices: &V,
    ) -> Result<FrameStatus, FrameError>
    where
        P: PipelineBuilder,
        V: VertexSource + ?Sized,
        W: WindowShim + ?Sized,
    {
        self.recovery.begin_iteration();

        let slot = &self.slots[self.current];
        let signaled = slot.sync.in_flight.wait()?;

        let (image_index, acquired_suboptimal) = match surface
            .acquire_next_image(slot.sync.image_available.raw())?
        {
            SwapchainStatus::Index(index) => (index, false),
            SwapchainStatus::Suboptimal(index) => (index, true),
            SwapchainStatus::OutOfDate => {
                // Nothing will be submitted this frame, so the fence must
                // stay signaled.
                drop(signaled);
                return match self.recovery.recover(surface, window)? {
                    RecoveryOutcome::Rebuilt => {
                        Ok(FrameStatus::SkippedForRebuild)
                    }
                    RecoveryOutcome::WindowClosed => {
                        Ok(FrameStatus::WindowClosed)
                    }
                };
            }
        };

        let target = *surface
            .render_target(image_index)
            .ok_or(FrameError::MissingRenderTarget(image_index))?;
        let pipeline = surface.pipeline().ok_or(FrameError::MissingPipeline)?;

        signaled.reset()?;

        self.recorder.record(
            slot.command_buffer(),
            &target,
            pipeline,
            vertices,
        )?;

        let submission = Submission {
            command_buffer: slot.command_buffer(),
            wait_semaphore: slot.sync.image_available.raw(),
            wait_stage: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            signal_semaphore: slot.sync.render_finished.raw(),
            signal_fence: slot.sync.in_flight.raw(),
        };
        unsafe {
            self.device
                .submit_graphics(&submission)
                .map_err(|error| SubmissionError(slot.index(), error))?;
        }

        let presented =
            surface.present(image_index, slot.sync.render_finished.raw())?;

        self.current = (self.current + 1) % self.slots.len();
        self.frames_presented += 1;

        let resized = window.check_and_clear_resize();
        let stale = !matches!(presented, SwapchainStatus::Index(_));
        if !(acquired_suboptimal || resized || stale) {
            return Ok(FrameStatus::Presented);
        }

        match self.recovery.recover(surface, window)? {
            RecoveryOutcome::Rebuilt => Ok(FrameStatus::PresentedThenRebuilt),
            RecoveryOutcome::WindowClosed => Ok(FrameStatus::WindowClosed),
        }
    }

    /// The index of the slot the next frame will use.
    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// How many times the presentation chain was rebuilt while drawing.
    pub fn recoveries(&self) -> u64 {
        self.recovery.recoveries()
    }
}

impl<D: DeviceApi> Drop for FrameScheduler<D> {
    fn drop(&mut self) {
        if let Err(error) = DeviceIdle::wait(&*self.device) {
            log::error!(
                "Unable to idle the device before destroying frame slots: {}",
                error
            );
        }
    }
}
