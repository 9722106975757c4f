mod debug_callback;
mod extensions;
mod layers;

use std::ffi::{CString, NulError};

use ash::{extensions::ext::DebugUtils, vk, Entry};
use thiserror::Error;

use crate::{
    logging::PrettyList,
    vulkan::ffi::{owned_name, to_os_ptrs},
};

/// This enum represents errors which can occur when building and handling the
/// Vulkan instance.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("Unable to load the Vulkan library")]
    VulkanLoadingError(#[source] ash::LoadingError),

    #[error("Unable to setup the Vulkan debug callback")]
    DebugMessengerCreateFailed(#[source] vk::Result),

    #[error("Unable to list the available Vulkan extensions on this platform")]
    UnableToListAvailableExtensions(#[source] vk::Result),

    #[error("Required extensions are not available on this platform: {:?}", .0)]
    RequiredExtensionsNotFound(Vec<String>),

    #[error("Unable to list the available Vulkan layers on this platform")]
    UnableToListAvailableLayers(#[source] vk::Result),

    #[error("Required layers are not available on this platform: {:?}", .0)]
    RequiredLayersNotFound(Vec<String>),

    #[error("A layer or extension name contains an interior nul byte")]
    InvalidName(#[from] NulError),

    #[error("Unable to create the Vulkan instance")]
    UnableToCreateInstance(#[source] vk::Result),

    #[error("Unable to create the logical device")]
    UnableToCreateLogicalDevice(#[source] vk::Result),
}

/// The Instance struct holds the ash entry and ash library handle along with
/// the debug callback, when validation is enabled.
pub struct Instance {
    /// The Ash Vulkan library entrypoint.
    pub ash: ash::Instance,

    /// The debug-utils loader and messenger. Only present when validation
    /// layers were requested.
    debug: Option<(DebugUtils, vk::DebugUtilsMessengerEXT)>,

    /// The vulkan function loader
    pub entry: Entry,
}

impl Instance {
    /// Create a new ash instance with the required extensions.
    ///
    /// When `enable_validation` is set the Khronos validation layer and the
    /// debug-utils extension must both be available, validation messages are
    /// then forwarded to the log.
    pub fn new(
        required_extensions: &[String],
        enable_validation: bool,
    ) -> Result<Self, InstanceError> {
        let entry =
            unsafe { Entry::load().map_err(InstanceError::VulkanLoadingError)? };

        let mut extensions = required_extensions.to_vec();
        let layers = if enable_validation {
            extensions.push(owned_name(DebugUtils::name()));
            debug_layers()
        } else {
            vec![]
        };

        extensions::check_extensions(&entry, &extensions)?;
        layers::check_layers(&entry, &layers)?;

        log::debug!("Required Extensions: {}", PrettyList(&extensions));
        log::debug!("Enabled Layers: {}", PrettyList(&layers));

        let ash = create_instance(&entry, &extensions, &layers)?;
        let debug = if enable_validation {
            match debug_callback::create_debug_logger(&entry, &ash) {
                Ok(debug) => Some(debug),
                Err(error) => {
                    unsafe { ash.destroy_instance(None) };
                    return Err(error);
                }
            }
        } else {
            None
        };

        Ok(Self {
            ash,
            debug,
            entry,
        })
    }

    /// The debug-utils loader, if validation is enabled.
    pub fn debug_utils(&self) -> Option<&DebugUtils> {
        self.debug.as_ref().map(|(debug, _)| debug)
    }

    pub fn create_logical_device(
        &self,
        physical_device: vk::PhysicalDevice,
        physical_device_extensions: &[String],
        queue_create_infos: &[vk::DeviceQueueCreateInfo],
    ) -> Result<ash::Device, InstanceError> {
        let (_c_ext_names, ext_name_ptrs) =
            to_os_ptrs(physical_device_extensions)?;
        let features = vk::PhysicalDeviceFeatures::default();

        let create_info = vk::DeviceCreateInfo {
            queue_create_info_count: queue_create_infos.len() as u32,
            p_queue_create_infos: queue_create_infos.as_ptr(),
            p_enabled_features: &features,
            pp_enabled_extension_names: ext_name_ptrs.as_ptr(),
            enabled_extension_count: ext_name_ptrs.len() as u32,
            ..Default::default()
        };

        unsafe {
            self.ash
                .create_device(physical_device, &create_info, None)
                .map_err(InstanceError::UnableToCreateLogicalDevice)
        }
    }
}

impl Drop for Instance {
    /// The owner must ensure that the Instance is only dropped after other
    /// resources which depend on it! There is no internal synchronization.
    fn drop(&mut self) {
        unsafe {
            if let Some((debug, messenger)) = self.debug.take() {
                debug.destroy_debug_utils_messenger(messenger, None);
            }
            self.ash.destroy_instance(None);
        }
    }
}

/// The debug layers required when validation is enabled.
fn debug_layers() -> Vec<String> {
    vec!["VK_LAYER_KHRONOS_validation".to_owned()]
}

fn create_instance(
    entry: &Entry,
    extensions: &[String],
    layers: &[String],
) -> Result<ash::Instance, InstanceError> {
    let app_name = CString::new("vk triangle")?;
    let engine_name = CString::new("no engine")?;

    let app_info = vk::ApplicationInfo {
        p_engine_name: engine_name.as_ptr(),
        p_application_name: app_name.as_ptr(),
        application_version: vk::make_api_version(0, 1, 0, 0),
        engine_version: vk::make_api_version(0, 1, 0, 0),
        api_version: vk::make_api_version(0, 1, 0, 0),
        ..Default::default()
    };

    let (_layer_names, layer_ptrs) = to_os_ptrs(layers)?;
    let (_ext_names, ext_ptrs) = to_os_ptrs(extensions)?;

    let create_info = vk::InstanceCreateInfo {
        p_application_info: &app_info,
        pp_enabled_layer_names: layer_ptrs.as_ptr(),
        enabled_layer_count: layer_ptrs.len() as u32,
        pp_enabled_extension_names: ext_ptrs.as_ptr(),
        enabled_extension_count: ext_ptrs.len() as u32,
        ..Default::default()
    };

    unsafe {
        entry
            .create_instance(&create_info, None)
            .map_err(InstanceError::UnableToCreateInstance)
    }
}
