use crate::vulkan::{errors::DeviceIdleError, DeviceApi};

/// Proof that the device was idle.
///
/// Tearing down swapchain-dependent resources requires one of these, which
/// can only be obtained by actually waiting for the device.
#[derive(Debug)]
pub struct DeviceIdle {
    _private: (),
}

impl DeviceIdle {
    /// Block until every queue on the device has finished its work.
    pub fn wait<D: DeviceApi + ?Sized>(
        device: &D,
    ) -> Result<Self, DeviceIdleError> {
        unsafe {
            device.wait_idle().map_err(DeviceIdleError)?;
        }
        log::trace!("device idle");
        Ok(Self { _private: () })
    }
}
