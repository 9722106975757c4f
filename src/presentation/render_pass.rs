use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::vulkan::{
    errors::SurfaceCreationError, DeviceApi, RenderDevice, RenderPassDescriptor,
};

/// An owned render pass. It only depends on the swapchain format, so it can
/// outlive a chain rebuild when only the extent changes.
pub struct RenderPass<D: DeviceApi = RenderDevice> {
    raw: vk::RenderPass,
    descriptor: RenderPassDescriptor,
    device: Arc<D>,
}

impl<D: DeviceApi> RenderPass<D> {
    pub fn new(
        device: Arc<D>,
        descriptor: RenderPassDescriptor,
    ) -> Result<Self, SurfaceCreationError> {
        let raw = unsafe {
            device
                .create_render_pass(&descriptor)
                .map_err(SurfaceCreationError::UnableToCreateRenderPass)?
        };
        device.name_object(
            vk::ObjectType::RENDER_PASS,
            raw.as_raw(),
            "color pass",
        );
        Ok(Self {
            raw,
            descriptor,
            device,
        })
    }

    pub fn raw(&self) -> vk::RenderPass {
        self.raw
    }

    pub fn descriptor(&self) -> &RenderPassDescriptor {
        &self.descriptor
    }
}

impl<D: DeviceApi> Drop for RenderPass<D> {
    /// # DANGER
    ///
    /// Every framebuffer and pipeline built against this render pass must be
    /// destroyed first, and no pending GPU work may reference it.
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_render_pass(self.raw);
        }
    }
}
