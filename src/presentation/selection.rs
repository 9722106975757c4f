//! Pure policies for configuring the swapchain from the surface's reported
//! capabilities.

use ash::vk;

use crate::{
    logging::PrettyList,
    vulkan::{errors::SurfaceCreationError, SurfaceSupport, SwapchainRequest},
};

/// Prefer 8-bit BGRA sRGB with the sRGB non-linear color space, otherwise take
/// the first reported format.
pub fn choose_surface_format(
    formats: &[vk::SurfaceFormatKHR],
) -> Result<vk::SurfaceFormatKHR, SurfaceCreationError> {
    log::debug!("Available Surface Formats: {:#?}", PrettyList(formats));

    let format = formats
        .iter()
        .copied()
        .find(|format| {
            format.format == vk::Format::B8G8R8A8_SRGB
                && format.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .or_else(|| formats.first().copied())
        .ok_or(SurfaceCreationError::NoSurfaceFormats)?;

    log::debug!("Chose Surface Format: {:#?}", format);
    Ok(format)
}

/// Prefer mailbox, otherwise FIFO which every platform supports.
pub fn choose_present_mode(modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    log::debug!("Available Presentation Modes: {:#?}", PrettyList(modes));

    let mode = if modes.contains(&vk::PresentModeKHR::MAILBOX) {
        vk::PresentModeKHR::MAILBOX
    } else {
        vk::PresentModeKHR::FIFO
    };

    log::debug!("Chose Present Mode: {:#?}", mode);
    mode
}

/// Use the surface's current extent. Platforms which let the swapchain decide
/// report `u32::MAX`, in which case the framebuffer size is clamped to the
/// supported range.
pub fn choose_swap_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    framebuffer_size: (u32, u32),
) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        return capabilities.current_extent;
    }
    let (width, height) = framebuffer_size;
    vk::Extent2D {
        width: width.clamp(
            capabilities.min_image_extent.width,
            capabilities.max_image_extent.width,
        ),
        height: height.clamp(
            capabilities.min_image_extent.height,
            capabilities.max_image_extent.height,
        ),
    }
}

/// One more than the minimum, clamped to the maximum when there is one.
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let proposed_image_count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        proposed_image_count.min(capabilities.max_image_count)
    } else {
        proposed_image_count
    }
}

/// Apply every policy to the surface's support details.
///
/// Fails with [SurfaceCreationError::ZeroExtent] rather than requesting a
/// swapchain which can never be created.
pub fn choose_swapchain_request(
    support: &SurfaceSupport,
    framebuffer_size: (u32, u32),
) -> Result<SwapchainRequest, SurfaceCreationError> {
    let extent = choose_swap_extent(&support.capabilities, framebuffer_size);
    if extent.width == 0 || extent.height == 0 {
        return Err(SurfaceCreationError::ZeroExtent(extent));
    }
    Ok(SwapchainRequest {
        format: choose_surface_format(&support.formats)?,
        present_mode: choose_present_mode(&support.present_modes),
        extent,
        min_image_count: choose_image_count(&support.capabilities),
        pre_transform: support.capabilities.current_transform,
    })
}
