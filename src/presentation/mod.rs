//! The swapchain lifecycle.
//!
//! [PresentationSurface] owns the presentation chain, the render pass, and
//! the graphics pipeline. Everything that depends on the swapchain extent or
//! format is rebuilt together, and only after the device is confirmed idle.

mod chain;
mod render_pass;
mod selection;

use std::sync::Arc;

use ash::vk;

pub use self::{
    chain::{PresentationChain, RenderTarget},
    render_pass::RenderPass,
    selection::{
        choose_image_count, choose_present_mode, choose_surface_format,
        choose_swap_extent, choose_swapchain_request,
    },
};

use crate::vulkan::{
    errors::{PresentationError, SurfaceCreationError},
    sync::DeviceIdle,
    DeviceApi, PipelineBuilder, RenderDevice, RenderPassDescriptor,
    SwapchainRequest,
};

/// The lifecycle of a [PresentationSurface].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceState {
    /// Created but not built yet.
    Uninitialized,

    /// The chain matches the surface.
    Ready,

    /// The platform reported the chain as suboptimal or out of date. It
    /// should be rebuilt before further use.
    Stale,

    /// Torn down for good.
    Destroyed,
}

/// The result of acquiring or presenting a swapchain image.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum SwapchainStatus {
    /// Completed the operation with the given swapchain index.
    Index(usize),

    /// Completed the operation, but the chain no longer matches the surface
    /// exactly and should be rebuilt soon.
    Suboptimal(usize),

    /// The chain can no longer be used. Any index is discarded.
    OutOfDate,
}

/// Owns the presentation chain and mediates image acquisition and
/// presentation.
pub struct PresentationSurface<P: PipelineBuilder, D: DeviceApi = RenderDevice>
{
    state: SurfaceState,
    chain: Option<PresentationChain<D>>,
    pipeline: Option<vk::Pipeline>,
    render_pass: Option<RenderPass<D>>,
    pipeline_builder: P,
    generation: u64,
    device: Arc<D>,
}

// Public API
// ----------

impl<P: PipelineBuilder, D: DeviceApi> PresentationSurface<P, D> {
    pub fn new(device: Arc<D>, pipeline_builder: P) -> Self {
        Self {
            state: SurfaceState::Uninitialized,
            chain: None,
            pipeline: None,
            render_pass: None,
            pipeline_builder,
            generation: 0,
            device,
        }
    }

    /// Build the chain, its render targets, the render pass, and the
    /// pipeline.
    ///
    /// # Params
    ///
    /// * `framebuffer_size` - the window's framebuffer size in pixels. Only
    ///   used when the surface lets the swapchain pick its own extent.
    pub fn build(
        &mut self,
        framebuffer_size: (u32, u32),
    ) -> Result<(), SurfaceCreationError> {
        if self.state != SurfaceState::Uninitialized {
            return Err(SurfaceCreationError::InvalidState(self.state));
        }
        let request = self.configure(framebuffer_size)?;
        self.build_with(request)
    }

    /// Acquire the next swapchain image, signaling `signal_semaphore` when it
    /// is ready for rendering. Blocks without a timeout.
    pub fn acquire_next_image(
        &mut self,
        signal_semaphore: vk::Semaphore,
    ) -> Result<SwapchainStatus, PresentationError> {
        let swapchain = self.usable_swapchain()?;
        let result = unsafe {
            self.device.acquire_next_image(swapchain, signal_semaphore)
        };
        match result {
            // index acquired and the swapchain is optimal
            Ok((index, false)) => Ok(SwapchainStatus::Index(index as usize)),

            // index acquired but the swapchain is suboptimal for the surface
            Ok((index, true)) => {
                log::debug!("Acquire Image: Swapchain suboptimal");
                self.state = SurfaceState::Stale;
                Ok(SwapchainStatus::Suboptimal(index as usize))
            }

            // the swapchain is lost and needs to be rebuilt
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Acquire Image: Swapchain out of date");
                self.state = SurfaceState::Stale;
                Ok(SwapchainStatus::OutOfDate)
            }

            Err(error) => Err(PresentationError::UnableToAcquireImage(error)),
        }
    }

    /// Queue an image for display once `wait_semaphore` is signaled.
    pub fn present(
        &mut self,
        image_index: usize,
        wait_semaphore: vk::Semaphore,
    ) -> Result<SwapchainStatus, PresentationError> {
        let swapchain = self.usable_swapchain()?;
        let result = unsafe {
            self.device.queue_present(
                swapchain,
                image_index as u32,
                wait_semaphore,
            )
        };
        match result {
            Ok(false) => Ok(SwapchainStatus::Index(image_index)),
            Ok(true) => {
                log::debug!("Present Image: Swapchain suboptimal");
                self.state = SurfaceState::Stale;
                Ok(SwapchainStatus::Suboptimal(image_index))
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Present Image: Swapchain out of date");
                self.state = SurfaceState::Stale;
                Ok(SwapchainStatus::OutOfDate)
            }
            Err(error) => {
                Err(PresentationError::UnableToPresentImage(image_index, error))
            }
        }
    }

    /// Tear down the render targets, the chain, and the pipeline, then build
    /// them again for the surface's current state.
    ///
    /// The render pass survives unless the surface format changed. A
    /// zero-area surface is refused before anything is torn down. If the
    /// build fails after the teardown the surface is left Stale with no
    /// chain, and can be rebuilt again.
    pub fn rebuild(
        &mut self,
        _idle: &DeviceIdle,
        framebuffer_size: (u32, u32),
    ) -> Result<(), SurfaceCreationError> {
        if !matches!(self.state, SurfaceState::Ready | SurfaceState::Stale) {
            return Err(SurfaceCreationError::InvalidState(self.state));
        }
        let request = self.configure(framebuffer_size)?;
        log::debug!("Rebuilding presentation chain {}", self.generation);
        self.state = SurfaceState::Stale;
        self.teardown();
        self.build_with(request)
    }

    /// Destroy everything. The surface cannot be used afterwards.
    pub fn destroy(&mut self, _idle: &DeviceIdle) {
        self.teardown();
        self.render_pass = None;
        self.state = SurfaceState::Destroyed;
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Incremented every time a new chain is built.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn chain(&self) -> Option<&PresentationChain<D>> {
        self.chain.as_ref()
    }

    pub fn render_target(&self, image_index: usize) -> Option<&RenderTarget> {
        self.chain
            .as_ref()
            .and_then(|chain| chain.render_targets().get(image_index))
    }

    pub fn pipeline(&self) -> Option<vk::Pipeline> {
        self.pipeline
    }

    pub fn render_pass(&self) -> Option<vk::RenderPass> {
        self.render_pass.as_ref().map(RenderPass::raw)
    }

    pub fn pipeline_builder(&self) -> &P {
        &self.pipeline_builder
    }

    pub fn device(&self) -> &Arc<D> {
        &self.device
    }
}

// Private API
// -----------

impl<P: PipelineBuilder, D: DeviceApi> PresentationSurface<P, D> {
    fn usable_swapchain(&self) -> Result<vk::SwapchainKHR, PresentationError> {
        match (&self.chain, self.state) {
            (Some(chain), SurfaceState::Ready | SurfaceState::Stale) => {
                Ok(chain.swapchain())
            }
            _ => Err(PresentationError::NotReady(self.state)),
        }
    }

    fn configure(
        &self,
        framebuffer_size: (u32, u32),
    ) -> Result<SwapchainRequest, SurfaceCreationError> {
        let support = unsafe {
            self.device
                .surface_support()
                .map_err(SurfaceCreationError::UnableToQuerySurfaceSupport)?
        };
        selection::choose_swapchain_request(&support, framebuffer_size)
    }

    fn build_with(
        &mut self,
        request: SwapchainRequest,
    ) -> Result<(), SurfaceCreationError> {
        let render_pass = match self.render_pass.take() {
            Some(render_pass)
                if render_pass.descriptor().format == request.format.format =>
            {
                render_pass
            }
            previous => {
                if previous.is_some() {
                    log::debug!("Surface format changed, rebuilding render pass");
                }
                drop(previous);
                RenderPass::new(
                    self.device.clone(),
                    RenderPassDescriptor::color_pass(request.format.format),
                )?
            }
        };
        let render_pass_raw = render_pass.raw();
        self.render_pass = Some(render_pass);

        let generation = self.generation + 1;
        let chain = PresentationChain::new(
            self.device.clone(),
            request,
            render_pass_raw,
            generation,
        )?;
        let pipeline =
            self.pipeline_builder.build(render_pass_raw, request.extent)?;
        self.generation = generation;

        log::info!(
            "Built presentation chain {}: {:?} {:?}, {:?}, {}x{}, {} images",
            self.generation,
            request.format.format,
            request.format.color_space,
            request.present_mode,
            request.extent.width,
            request.extent.height,
            chain.images().len(),
        );

        self.chain = Some(chain);
        self.pipeline = Some(pipeline);
        self.state = SurfaceState::Ready;
        Ok(())
    }

    /// Render targets and the chain go first, then the pipeline.
    fn teardown(&mut self) {
        self.chain = None;
        if let Some(pipeline) = self.pipeline.take() {
            unsafe { self.pipeline_builder.destroy(pipeline) };
        }
    }
}

impl<P: PipelineBuilder, D: DeviceApi> Drop for PresentationSurface<P, D> {
    fn drop(&mut self) {
        if self.state == SurfaceState::Destroyed {
            return;
        }
        if let Err(error) = DeviceIdle::wait(&*self.device) {
            log::error!(
                "Unable to idle the device before destroying the presentation surface: {}",
                error
            );
        }
        self.teardown();
        self.render_pass = None;
    }
}
