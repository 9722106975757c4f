//! Startup, the frame loop, and ordered teardown.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    config::AppConfig,
    frame_pipeline::{FrameError, FrameScheduler, FrameStatus},
    glfw_window::{GlfwWindow, WindowShim},
    presentation::PresentationSurface,
    triangle::{triangle, TrianglePipeline, VertexBuffer},
    vulkan::{
        sync::DeviceIdle, DeviceApi, PipelineBuilder, RenderDevice,
        VertexSource,
    },
};

/// The application's state.
///
/// Fields are dropped in declaration order, which is also the order the GPU
/// resources must be destroyed in.
pub struct Application {
    surface: PresentationSurface<TrianglePipeline>,
    scheduler: FrameScheduler,
    vertices: VertexBuffer,
    device: Arc<RenderDevice>,
    window: GlfwWindow,
}

impl Application {
    /// Create the window and every GPU resource needed to draw the triangle.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let window = GlfwWindow::new(&config.window_title, config.window_size)
            .context("Unable to create the application window")?;

        let device = Arc::new(
            window
                .create_render_device(config.enable_validation)
                .context("Unable to create the render device")?,
        );

        let vertices = VertexBuffer::new(device.clone(), &triangle())
            .context("Unable to create the vertex buffer")?;

        let pipeline = TrianglePipeline::new(device.clone(), &config.shader_dir)
            .with_context(|| {
                format!(
                    "Unable to load the shaders from {}",
                    config.shader_dir.display()
                )
            })?;

        let mut surface = PresentationSurface::new(device.clone(), pipeline);
        surface
            .build(window.framebuffer_size())
            .context("Unable to build the presentation chain")?;

        let scheduler =
            FrameScheduler::new(device.clone(), config.frames_in_flight)
                .context("Unable to create the frame slots")?;

        log::info!(
            "Rendering on {} with {} frame(s) in flight",
            device.device_name(),
            scheduler.slot_count()
        );

        Ok(Self {
            surface,
            scheduler,
            vertices,
            device,
            window,
        })
    }

    /// Run the application, blocks until the window is closed.
    pub fn run(mut self) -> Result<()> {
        let frames = run_frames(
            &mut self.scheduler,
            &mut self.surface,
            &mut self.window,
            &self.vertices,
        )
        .context("Unable to draw a frame")?;

        log::info!(
            "Window closed after {} frames and {} rebuilds",
            frames,
            self.scheduler.recoveries()
        );

        let idle = DeviceIdle::wait(&*self.device)
            .context("Unable to wait for the device before shutdown")?;
        self.surface.destroy(&idle);
        Ok(())
    }
}

/// Poll window events and draw frames until the window asks to close.
///
/// Returns the number of frames presented.
pub fn run_frames<P, D, V, W>(
    scheduler: &mut FrameScheduler<D>,
    surface: &mut PresentationSurface<P, D>,
    window: &mut W,
    vertices: &V,
) -> Result<u64, FrameError>
where
    P: PipelineBuilder,
    D: DeviceApi,
    V: VertexSource + ?Sized,
    W: WindowShim + ?Sized,
{
    loop {
        window.poll_events();
        if window.should_close() {
            break;
        }
        match scheduler.draw_frame(surface, window, vertices)? {
            FrameStatus::WindowClosed => break,
            status => log::trace!("{:?}", status),
        }
    }
    Ok(scheduler.frames_presented())
}
