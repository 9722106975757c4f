use ash::{extensions::khr, prelude::VkResult, vk};

use crate::vulkan::{api::SurfaceSupport, Instance};

/// The window's presentation surface and the loader used to query it.
///
/// The surface is destroyed when dropped, so it must be dropped before the
/// instance which created it.
pub struct WindowSurface {
    pub loader: khr::Surface,
    pub khr: vk::SurfaceKHR,
}

impl WindowSurface {
    /// Take ownership of a surface created by the window system.
    pub fn new(instance: &Instance, surface_khr: vk::SurfaceKHR) -> Self {
        Self {
            loader: khr::Surface::new(&instance.entry, &instance.ash),
            khr: surface_khr,
        }
    }

    /// Check that a queue family on the physical device can present to this
    /// surface.
    ///
    /// # Safety
    ///
    /// The physical device must support the surface extension.
    pub unsafe fn supports_queue_family(
        &self,
        physical_device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> VkResult<bool> {
        self.loader.get_physical_device_surface_support(
            physical_device,
            queue_family_index,
            self.khr,
        )
    }

    /// Query the capabilities, formats, and present modes for a device.
    ///
    /// # Safety
    ///
    /// The physical device must support the surface extension.
    pub unsafe fn support(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> VkResult<SurfaceSupport> {
        Ok(SurfaceSupport {
            capabilities: self
                .loader
                .get_physical_device_surface_capabilities(
                    physical_device,
                    self.khr,
                )?,
            formats: self
                .loader
                .get_physical_device_surface_formats(physical_device, self.khr)?,
            present_modes: self
                .loader
                .get_physical_device_surface_present_modes(
                    physical_device,
                    self.khr,
                )?,
        })
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        unsafe {
            self.loader.destroy_surface(self.khr, None);
        }
    }
}
