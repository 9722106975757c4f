mod device_api;
mod gpu_queue;
mod memory;
mod physical_device;
mod queue_families;

use std::ffi::CString;

use ash::{extensions::khr, vk};
use thiserror::Error;

pub use self::gpu_queue::GpuQueue;

use self::queue_families::QueueFamilies;

use crate::vulkan::{instance::InstanceError, Instance, WindowSurface};

/// This enum represents the errors which can occur while attempting to find
/// a usable physical device for the application.
#[derive(Debug, Error)]
pub enum PhysicalDeviceError {
    #[error("Unable to enumerate physical devices")]
    UnableToEnumerateDevices(#[source] vk::Result),

    #[error("No suitable physical device could be found for this application")]
    NoSuitableDeviceFound,
}

/// This enum represents errors which can occur while attempting to find all of
/// the Vulkan command queues which are required by the application.
#[derive(Debug, Error)]
pub enum QueueSelectionError {
    #[error("Unable to find a suitable graphics queue")]
    UnableToFindGraphicsQueue,

    #[error("Unable to find a suitable presentation queue")]
    UnableToFindPresentQueue,
}

/// This enum represents errors which can occur while working with the render
/// device.
#[derive(Debug, Error)]
pub enum RenderDeviceError {
    #[error("Unexpected physical device error")]
    UnexpectedPhysicalDeviceError(#[from] PhysicalDeviceError),

    #[error("Unexpected queue selection error")]
    UnexpectedQueueSelectionError(#[from] QueueSelectionError),

    #[error("Unexpected Vulkan instance error")]
    UnexpectedInstanceError(#[from] InstanceError),
}

/// The render device holds the core Vulkan state and devices which are used
/// by all parts of the application.
pub struct RenderDevice {
    /// The gpu command queues used by the application for rendering and
    /// presentation. These can be the same queue.
    graphics_queue: GpuQueue,
    present_queue: GpuQueue,

    /// The Vulkan logical device used to issue commands to the physical device.
    logical_device: ash::Device,

    swapchain_loader: khr::Swapchain,

    physical_device: vk::PhysicalDevice,
    memory_properties: vk::PhysicalDeviceMemoryProperties,
    device_name: String,

    /// The Vulkan presentation surface for the current window. Dropped before
    /// the instance.
    window_surface: WindowSurface,

    /// The Vulkan library instance.
    instance: Instance,
}

impl RenderDevice {
    /// Pick a physical device which can present to the window surface and
    /// create the logical device and queues.
    pub fn new(
        instance: Instance,
        window_surface: WindowSurface,
    ) -> Result<Self, RenderDeviceError> {
        let physical_device =
            physical_device::find_optimal(&instance.ash, &window_surface)?;
        let queue_families = QueueFamilies::find_for_physical_device(
            &instance.ash,
            &window_surface,
            physical_device,
        )?;
        let logical_device = instance.create_logical_device(
            physical_device,
            &physical_device::required_device_extensions(),
            &queue_families.as_queue_create_infos(),
        )?;
        let (graphics_queue, present_queue) =
            queue_families.get_queues(&logical_device);
        let swapchain_loader =
            khr::Swapchain::new(&instance.ash, &logical_device);
        let memory_properties = unsafe {
            instance
                .ash
                .get_physical_device_memory_properties(physical_device)
        };
        let device_name =
            physical_device::device_name(&instance.ash, physical_device);

        log::info!(
            "Using {} (graphics queue family {}, present queue family {})",
            device_name,
            graphics_queue.family_id,
            present_queue.family_id,
        );

        Ok(Self {
            graphics_queue,
            present_queue,
            logical_device,
            swapchain_loader,
            physical_device,
            memory_properties,
            device_name,
            window_surface,
            instance,
        })
    }

    /// The raw logical device, used by resources which are not routed through
    /// [crate::vulkan::DeviceApi].
    pub fn logical_device(&self) -> &ash::Device {
        &self.logical_device
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn graphics_queue(&self) -> &GpuQueue {
        &self.graphics_queue
    }

    pub fn present_queue(&self) -> &GpuQueue {
        &self.present_queue
    }

    /// Give a debug name for the Vulkan object owned by this device. The name
    /// set here will be visible in the Vulkan validation layer logs.
    pub fn name_vulkan_object<H>(
        &self,
        name: impl Into<String>,
        object_type: vk::ObjectType,
        handle: H,
    ) where
        H: vk::Handle + Copy,
    {
        self.name_raw_object(object_type, handle.as_raw(), &name.into());
    }

    fn name_raw_object(&self, object_type: vk::ObjectType, raw: u64, name: &str) {
        let debug_utils = match self.instance.debug_utils() {
            Some(debug_utils) => debug_utils,
            None => return,
        };
        let cname = match CString::new(name) {
            Ok(cname) => cname,
            Err(error) => {
                log::warn!("Invalid debug name {:?}: {}", name, error);
                return;
            }
        };
        let name_info = vk::DebugUtilsObjectNameInfoEXT {
            object_type,
            p_object_name: cname.as_ptr(),
            object_handle: raw,
            ..Default::default()
        };
        let result = unsafe {
            debug_utils.set_debug_utils_object_name(
                self.logical_device.handle(),
                &name_info,
            )
        };
        if let Err(error) = result {
            log::warn!(
                "Unable to set debug name {} for {:?}: {:?}",
                name,
                object_type,
                error
            );
        }
    }

    /// The queue family indices which need access to swapchain images.
    fn swapchain_queue_family_indices(&self) -> Vec<u32> {
        if self.graphics_queue.family_id == self.present_queue.family_id {
            vec![self.graphics_queue.family_id]
        } else {
            vec![self.graphics_queue.family_id, self.present_queue.family_id]
        }
    }
}

impl Drop for RenderDevice {
    /// Everything created with the logical device must already be destroyed.
    fn drop(&mut self) {
        unsafe {
            if let Err(error) = self.logical_device.device_wait_idle() {
                log::error!(
                    "Error while idling the device before destruction: {:?}",
                    error
                );
            }
            self.logical_device.destroy_device(None);
        }
    }
}
