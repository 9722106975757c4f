use ash::{extensions::khr::Swapchain, vk};

use crate::{
    logging::PrettyList,
    vulkan::{
        ffi::{name_from_array, owned_name},
        render_device::{PhysicalDeviceError, QueueFamilies},
        WindowSurface,
    },
};

/// Get the set of required device extensions for this application.
pub fn required_device_extensions() -> Vec<String> {
    vec![owned_name(Swapchain::name())]
}

/// Find the first physical device which can render to the window surface.
pub fn find_optimal(
    instance: &ash::Instance,
    window_surface: &WindowSurface,
) -> Result<vk::PhysicalDevice, PhysicalDeviceError> {
    let physical_devices = unsafe {
        instance
            .enumerate_physical_devices()
            .map_err(PhysicalDeviceError::UnableToEnumerateDevices)?
    };
    physical_devices
        .into_iter()
        .find(|&device| is_device_suitable(instance, window_surface, device))
        .ok_or(PhysicalDeviceError::NoSuitableDeviceFound)
}

/// The human-readable name reported by the driver.
pub fn device_name(
    instance: &ash::Instance,
    physical_device: vk::PhysicalDevice,
) -> String {
    let properties =
        unsafe { instance.get_physical_device_properties(physical_device) };
    name_from_array(&properties.device_name)
}

fn is_device_suitable(
    instance: &ash::Instance,
    window_surface: &WindowSurface,
    physical_device: vk::PhysicalDevice,
) -> bool {
    if any_missing_extensions(instance, physical_device) {
        return false;
    }

    if QueueFamilies::find_for_physical_device(
        instance,
        window_surface,
        physical_device,
    )
    .is_err()
    {
        log::trace!(
            "Could not find suitable queue families for physical device {:?}",
            physical_device
        );
        return false;
    }

    match unsafe { window_surface.support(physical_device) } {
        Ok(support) => {
            if support.formats.is_empty() || support.present_modes.is_empty() {
                log::trace!(
                    "No usable surface format or present mode for physical device {:?}",
                    physical_device
                );
                return false;
            }
            true
        }
        Err(error) => {
            log::trace!(
                "Unable to query surface support for physical device {:?}: {:?}",
                physical_device,
                error
            );
            false
        }
    }
}

/// Returns true if there are any required device extensions that are not
/// available.
fn any_missing_extensions(
    instance: &ash::Instance,
    physical_device: vk::PhysicalDevice,
) -> bool {
    let available_device_extensions: Vec<String> = unsafe {
        instance
            .enumerate_device_extension_properties(physical_device)
            .unwrap_or_default()
    }
    .iter()
    .map(|extension| name_from_array(&extension.extension_name))
    .collect();

    log::trace!(
        "Available physical device extensions: {}",
        PrettyList(&available_device_extensions),
    );

    required_device_extensions().iter().any(|required_name| {
        let is_missing = !available_device_extensions.contains(required_name);
        if is_missing {
            log::trace!("Device extension {} is not available", required_name);
        }
        is_missing
    })
}
