use ash::vk;
use thiserror::Error;

use crate::vulkan::{InstanceError, RenderDeviceError};

/// Window Errors represent things which can go wrong while creating the GLFW
/// window and its Vulkan surface.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to initialize the GLFW library")]
    UnableToInitGLFW(#[from] glfw::InitError),

    #[error("Vulkan is not supported on this device")]
    VulkanNotSupported,

    #[error("The GLFW Window could not be created")]
    WindowCreateFailed,

    #[error("GLFW is unable to determine the required vulkan extensions for this platform")]
    RequiredExtensionsUnavailable,

    #[error("Unexpected instance error")]
    UnexpectedInstanceError(#[from] InstanceError),

    #[error("Unable to create the Vulkan surface")]
    UnableToCreateSurface(#[source] vk::Result),

    #[error("Unable to create the Vulkan render device")]
    UnexpectedRenderDeviceError(#[from] RenderDeviceError),
}
