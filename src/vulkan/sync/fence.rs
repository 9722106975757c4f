use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::vulkan::{
    errors::{FenceError, ResourceCreationError},
    DeviceApi, RenderDevice,
};

/// An owned Vulkan fence object which is automatically destroyed when dropped.
pub struct Fence<D: DeviceApi = RenderDevice> {
    raw: vk::Fence,
    device: Arc<D>,
}

/// Proof that a fence was observed in the signaled state.
///
/// Resetting a fence is only possible through this token, so a reset can
/// never happen before the wait which guards it.
#[must_use = "a signaled fence should be reset before it is submitted again"]
pub struct SignaledFence<'fence, D: DeviceApi = RenderDevice> {
    fence: &'fence Fence<D>,
}

impl<D: DeviceApi> Fence<D> {
    /// Create a fence in the signaled state so the first wait returns
    /// immediately.
    pub fn new(device: Arc<D>) -> Result<Self, ResourceCreationError> {
        let raw = unsafe {
            device
                .create_fence(true)
                .map_err(ResourceCreationError::UnableToCreateFence)?
        };
        Ok(Self { raw, device })
    }

    pub fn raw(&self) -> vk::Fence {
        self.raw
    }

    /// Block until the fence is signaled.
    pub fn wait(&self) -> Result<SignaledFence<'_, D>, FenceError> {
        unsafe {
            self.device
                .wait_for_fence(self.raw)
                .map_err(FenceError::UnexpectedWaitError)?;
        }
        Ok(SignaledFence { fence: self })
    }

    /// Block until the fence is signaled, then reset.
    pub fn wait_and_reset(&self) -> Result<(), FenceError> {
        self.wait()?.reset()
    }

    pub fn set_debug_name(&self, name: &str) {
        self.device
            .name_object(vk::ObjectType::FENCE, self.raw.as_raw(), name);
    }
}

impl<'fence, D: DeviceApi> SignaledFence<'fence, D> {
    /// Reset the fence so it can be signaled by the next submission.
    pub fn reset(self) -> Result<(), FenceError> {
        unsafe {
            self.fence
                .device
                .reset_fence(self.fence.raw)
                .map_err(FenceError::UnexpectedResetError)
        }
    }
}

impl<D: DeviceApi> Drop for Fence<D> {
    /// # DANGER
    ///
    /// There is no internal synchronization for this type. Unexpected behavior
    /// can occur if this instance is still in-use by the GPU when it is
    /// dropped.
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_fence(self.raw);
        }
    }
}
