use std::sync::Arc;

use crate::vulkan::{
    errors::ResourceCreationError,
    sync::{Fence, Semaphore},
    DeviceApi, RenderDevice,
};

/// The CPU/GPU handshake for a single frame slot.
pub struct FrameSync<D: DeviceApi = RenderDevice> {
    /// Signaled by the GPU when the slot's last submission completes.
    pub in_flight: Fence<D>,

    /// Signaled when the acquired swapchain image is ready for rendering.
    pub image_available: Semaphore<D>,

    /// Signaled when rendering is done and the image can be presented.
    pub render_finished: Semaphore<D>,
}

impl<D: DeviceApi> FrameSync<D> {
    /// Create the fence (signaled) and both semaphores (unsignaled).
    pub fn create(device: Arc<D>) -> Result<Self, ResourceCreationError> {
        Ok(Self {
            in_flight: Fence::new(device.clone())?,
            image_available: Semaphore::new(device.clone())?,
            render_finished: Semaphore::new(device)?,
        })
    }

    pub fn set_debug_name(&self, name: &str) {
        self.in_flight.set_debug_name(&format!("{} in flight", name));
        self.image_available
            .set_debug_name(&format!("{} image available", name));
        self.render_finished
            .set_debug_name(&format!("{} render finished", name));
    }
}
