use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::vulkan::{errors::ResourceCreationError, DeviceApi, RenderDevice};

/// An owned command pool for the graphics queue. Command buffers allocated
/// from the pool are freed along with it.
pub struct CommandPool<D: DeviceApi = RenderDevice> {
    raw: vk::CommandPool,
    device: Arc<D>,
}

impl<D: DeviceApi> CommandPool<D> {
    pub fn new(device: Arc<D>) -> Result<Self, ResourceCreationError> {
        let raw = unsafe {
            device
                .create_command_pool()
                .map_err(ResourceCreationError::UnableToCreateCommandPool)?
        };
        Ok(Self { raw, device })
    }

    /// Allocate a primary command buffer which lives as long as the pool.
    pub fn allocate_command_buffer(
        &self,
    ) -> Result<vk::CommandBuffer, ResourceCreationError> {
        unsafe {
            self.device
                .allocate_command_buffer(self.raw)
                .map_err(ResourceCreationError::UnableToAllocateCommandBuffer)
        }
    }

    pub fn set_debug_name(&self, name: &str) {
        self.device.name_object(
            vk::ObjectType::COMMAND_POOL,
            self.raw.as_raw(),
            name,
        );
    }
}

impl<D: DeviceApi> Drop for CommandPool<D> {
    /// # DANGER
    ///
    /// Command buffers from this pool must not be pending execution when the
    /// pool is dropped.
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_command_pool(self.raw);
        }
    }
}
