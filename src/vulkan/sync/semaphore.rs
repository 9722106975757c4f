use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::vulkan::{errors::ResourceCreationError, DeviceApi, RenderDevice};

/// An owned binary semaphore which is destroyed when dropped.
pub struct Semaphore<D: DeviceApi = RenderDevice> {
    raw: vk::Semaphore,
    device: Arc<D>,
}

impl<D: DeviceApi> Semaphore<D> {
    pub fn new(device: Arc<D>) -> Result<Self, ResourceCreationError> {
        let raw = unsafe {
            device
                .create_semaphore()
                .map_err(ResourceCreationError::UnableToCreateSemaphore)?
        };
        Ok(Self { raw, device })
    }

    pub fn raw(&self) -> vk::Semaphore {
        self.raw
    }

    pub fn set_debug_name(&self, name: &str) {
        self.device.name_object(
            vk::ObjectType::SEMAPHORE,
            self.raw.as_raw(),
            name,
        );
    }
}

impl<D: DeviceApi> Drop for Semaphore<D> {
    /// # DANGER
    ///
    /// There is no internal synchronization for this type. Unexpected behavior
    /// can occur if this instance is still in-use by the GPU when it is
    /// dropped.
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_semaphore(self.raw);
        }
    }
}
