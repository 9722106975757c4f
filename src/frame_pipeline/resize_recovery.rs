use crate::{
    frame_pipeline::FrameError,
    glfw_window::WindowShim,
    presentation::PresentationSurface,
    vulkan::{
        errors::SurfaceCreationError, sync::DeviceIdle, DeviceApi,
        PipelineBuilder,
    },
};

/// What happened when recovery was requested.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// The presentation chain was rebuilt.
    Rebuilt,

    /// The window was closed while minimized. Nothing was rebuilt.
    WindowClosed,
}

/// Coordinates swapchain rebuilds after the surface went stale, the window
/// was resized, or the window was minimized.
#[derive(Debug, Default)]
pub struct ResizeRecovery {
    attempted_this_iteration: bool,
    recoveries: u64,
}

impl ResizeRecovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a frame loop iteration. At most one recovery can
    /// happen between calls.
    pub fn begin_iteration(&mut self) {
        self.attempted_this_iteration = false;
    }

    /// How many times the chain has been rebuilt.
    pub fn recoveries(&self) -> u64 {
        self.recoveries
    }

    /// Rebuild the presentation chain for the window's current size.
    ///
    /// Blocks on window events while the window has a zero-area framebuffer,
    /// or while the surface still reports a zero extent for a window which
    /// already has a size. Once both are usable the device is idled and the
    /// surface rebuilt.
    ///
    /// The frame scheduler recovers at most once per frame. Calling this a
    /// second time before [ResizeRecovery::begin_iteration] fails with
    /// [FrameError::RecoveryAlreadyAttempted] instead of rebuilding again.
    pub fn recover<P, D, W>(
        &mut self,
        surface: &mut PresentationSurface<P, D>,
        window: &mut W,
    ) -> Result<RecoveryOutcome, FrameError>
    where
        P: PipelineBuilder,
        D: DeviceApi,
        W: WindowShim + ?Sized,
    {
        if self.attempted_this_iteration {
            return Err(FrameError::RecoveryAlreadyAttempted);
        }
        self.attempted_this_iteration = true;

        let framebuffer_size = loop {
            let framebuffer_size = match wait_for_usable_size(window) {
                Some(size) => size,
                None => return Ok(RecoveryOutcome::WindowClosed),
            };

            let idle = DeviceIdle::wait(&**surface.device())?;
            match surface.rebuild(&idle, framebuffer_size) {
                Ok(()) => break framebuffer_size,
                Err(SurfaceCreationError::ZeroExtent(extent)) => {
                    log::debug!(
                        "Surface reports a {}x{} extent, waiting for a usable size",
                        extent.width,
                        extent.height
                    );
                    if window.should_close() {
                        return Ok(RecoveryOutcome::WindowClosed);
                    }
                    window.wait_events();
                }
                Err(error) => return Err(error.into()),
            }
        };
        self.recoveries += 1;

        // The rebuild already accounts for any resize which arrived while
        // waiting.
        window.check_and_clear_resize();

        log::debug!(
            "Recovered presentation chain at {}x{}",
            framebuffer_size.0,
            framebuffer_size.1
        );
        Ok(RecoveryOutcome::Rebuilt)
    }
}

/// Block until the framebuffer has a nonzero size in both dimensions.
///
/// Returns None if the window is closed first.
fn wait_for_usable_size<W>(window: &mut W) -> Option<(u32, u32)>
where
    W: WindowShim + ?Sized,
{
    let mut logged = false;
    loop {
        let (width, height) = window.framebuffer_size();
        if width > 0 && height > 0 {
            return Some((width, height));
        }
        if window.should_close() {
            return None;
        }
        if !logged {
            log::debug!("Window is minimized, waiting for a usable size");
            logged = true;
        }
        window.wait_events();
    }
}
