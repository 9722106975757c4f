use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::vulkan::{
    errors::SurfaceCreationError, DeviceApi, RenderDevice, SwapchainRequest,
};

/// The destination for one render pass instance: a swapchain image with its
/// view and framebuffer.
///
/// Render targets hold plain handles into the chain which built them and are
/// only valid while that chain is alive. `generation` identifies the chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub image_index: usize,
    pub image: vk::Image,
    pub view: vk::ImageView,
    pub framebuffer: vk::Framebuffer,
    pub render_pass: vk::RenderPass,
    pub extent: vk::Extent2D,
    pub generation: u64,
}

/// A swapchain plus one render target per swapchain image.
///
/// The render targets and the swapchain share a lifecycle: dropping the chain
/// destroys every framebuffer and view, then the swapchain itself.
pub struct PresentationChain<D: DeviceApi = RenderDevice> {
    swapchain: vk::SwapchainKHR,
    images: Vec<vk::Image>,
    request: SwapchainRequest,
    generation: u64,
    render_targets: Vec<RenderTarget>,
    device: Arc<D>,
}

impl<D: DeviceApi> PresentationChain<D> {
    /// Create the swapchain and a render target for each of its images.
    ///
    /// Anything created before a failure is destroyed before returning.
    pub fn new(
        device: Arc<D>,
        request: SwapchainRequest,
        render_pass: vk::RenderPass,
        generation: u64,
    ) -> Result<Self, SurfaceCreationError> {
        let swapchain = unsafe {
            device
                .create_swapchain(&request)
                .map_err(SurfaceCreationError::UnableToCreateSwapchain)?
        };
        let mut chain = Self {
            swapchain,
            images: vec![],
            request,
            generation,
            render_targets: vec![],
            device,
        };
        chain.images = unsafe {
            chain
                .device
                .swapchain_images(swapchain)
                .map_err(SurfaceCreationError::UnableToGetSwapchainImages)?
        };
        for image_index in 0..chain.images.len() {
            let target = chain.create_render_target(image_index, render_pass)?;
            chain.render_targets.push(target);
        }
        Ok(chain)
    }

    pub fn swapchain(&self) -> vk::SwapchainKHR {
        self.swapchain
    }

    pub fn format(&self) -> vk::SurfaceFormatKHR {
        self.request.format
    }

    pub fn present_mode(&self) -> vk::PresentModeKHR {
        self.request.present_mode
    }

    pub fn extent(&self) -> vk::Extent2D {
        self.request.extent
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn images(&self) -> &[vk::Image] {
        &self.images
    }

    pub fn render_targets(&self) -> &[RenderTarget] {
        &self.render_targets
    }
}

impl<D: DeviceApi> PresentationChain<D> {
    fn create_render_target(
        &self,
        image_index: usize,
        render_pass: vk::RenderPass,
    ) -> Result<RenderTarget, SurfaceCreationError> {
        let image = self.images[image_index];
        let view = unsafe {
            self.device
                .create_image_view(image, self.request.format.format)
                .map_err(|error| {
                    SurfaceCreationError::UnableToCreateImageView(
                        image_index,
                        error,
                    )
                })?
        };
        let framebuffer = unsafe {
            self.device.create_framebuffer(
                render_pass,
                view,
                self.request.extent,
            )
        };
        let framebuffer = match framebuffer {
            Ok(framebuffer) => framebuffer,
            Err(error) => {
                unsafe { self.device.destroy_image_view(view) };
                return Err(SurfaceCreationError::UnableToCreateFramebuffer(
                    image_index,
                    error,
                ));
            }
        };

        self.device.name_object(
            vk::ObjectType::IMAGE_VIEW,
            view.as_raw(),
            &format!("swapchain image view {}", image_index),
        );
        self.device.name_object(
            vk::ObjectType::FRAMEBUFFER,
            framebuffer.as_raw(),
            &format!("swapchain framebuffer {}", image_index),
        );

        Ok(RenderTarget {
            image_index,
            image,
            view,
            framebuffer,
            render_pass,
            extent: self.request.extent,
            generation: self.generation,
        })
    }
}

impl<D: DeviceApi> Drop for PresentationChain<D> {
    /// # DANGER
    ///
    /// The device must be idle, nothing checks that pending frames are done
    /// with the render targets.
    fn drop(&mut self) {
        log::debug!("Destroying presentation chain {}", self.generation);
        unsafe {
            for target in self.render_targets.drain(..) {
                self.device.destroy_framebuffer(target.framebuffer);
                self.device.destroy_image_view(target.view);
            }
            self.device.destroy_swapchain(self.swapchain);
        }
    }
}
