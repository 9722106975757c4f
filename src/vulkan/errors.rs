use std::path::PathBuf;

use ash::vk;
use thiserror::Error;

use crate::presentation::SurfaceState;

/// Errors raised while creating long-lived GPU resources.
///
/// These are always fatal, there is no retry.
#[derive(Debug, Error)]
pub enum ResourceCreationError {
    #[error("Unable to create a fence")]
    UnableToCreateFence(#[source] vk::Result),

    #[error("Unable to create a semaphore")]
    UnableToCreateSemaphore(#[source] vk::Result),

    #[error("Unable to create a command pool")]
    UnableToCreateCommandPool(#[source] vk::Result),

    #[error("Unable to allocate a command buffer")]
    UnableToAllocateCommandBuffer(#[source] vk::Result),

    #[error("Unable to create a buffer")]
    UnableToCreateBuffer(#[source] vk::Result),

    #[error("Unable to allocate device memory")]
    UnableToAllocateMemory(#[source] vk::Result),

    #[error("Unable to bind buffer memory")]
    UnableToBindBufferMemory(#[source] vk::Result),

    #[error("Unable to map device memory")]
    UnableToMapMemory(#[source] vk::Result),

    #[error(
        "No memory type with properties {:?} matches type bits {:#b}",
        .1,
        .0
    )]
    NoSuitableMemoryType(u32, vk::MemoryPropertyFlags),

    #[error("Unable to read shader bytecode from {:?}", .0)]
    UnableToReadShader(PathBuf, #[source] std::io::Error),

    #[error("Invalid SPIR-V bytecode: {}", .0)]
    InvalidShaderBytecode(String),

    #[error("Unable to create a shader module")]
    UnableToCreateShaderModule(#[source] vk::Result),

    #[error("Unable to create the pipeline layout")]
    UnableToCreatePipelineLayout(#[source] vk::Result),

    #[error("Unable to create the graphics pipeline")]
    UnableToCreateGraphicsPipeline(#[source] vk::Result),
}

#[derive(Debug, Error)]
pub enum FenceError {
    #[error("Error while waiting for fence")]
    UnexpectedWaitError(#[source] vk::Result),

    #[error("Error while resetting fence")]
    UnexpectedResetError(#[source] vk::Result),
}

#[derive(Debug, Error)]
#[error("Error while waiting for the device to idle")]
pub struct DeviceIdleError(#[source] pub vk::Result);

/// Errors raised while building or rebuilding the presentation chain.
#[derive(Debug, Error)]
pub enum SurfaceCreationError {
    #[error("Unable to query the window surface capabilities")]
    UnableToQuerySurfaceSupport(#[source] vk::Result),

    #[error("The window surface does not report any formats")]
    NoSurfaceFormats,

    #[error("Refusing to build a swapchain with a zero-area extent {:?}", .0)]
    ZeroExtent(vk::Extent2D),

    #[error("Unable to create the swapchain")]
    UnableToCreateSwapchain(#[source] vk::Result),

    #[error("Unable to get the swapchain images")]
    UnableToGetSwapchainImages(#[source] vk::Result),

    #[error("Unable to create an image view for swapchain image {}", .0)]
    UnableToCreateImageView(usize, #[source] vk::Result),

    #[error("Unable to create a framebuffer for swapchain image {}", .0)]
    UnableToCreateFramebuffer(usize, #[source] vk::Result),

    #[error("Unable to create the render pass")]
    UnableToCreateRenderPass(#[source] vk::Result),

    #[error("Unable to build the graphics pipeline")]
    UnableToBuildPipeline(#[from] ResourceCreationError),

    #[error("Cannot build the presentation surface in state {:?}", .0)]
    InvalidState(SurfaceState),
}

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("Unable to reset the command buffer")]
    UnableToResetCommandBuffer(#[source] vk::Result),

    #[error("Unable to begin the command buffer")]
    UnableToBeginCommandBuffer(#[source] vk::Result),

    #[error("Unable to end the command buffer")]
    UnableToEndCommandBuffer(#[source] vk::Result),
}

#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("Unexpected error while acquiring a swapchain image")]
    UnableToAcquireImage(#[source] vk::Result),

    #[error("Unexpected error while presenting swapchain image {}", .0)]
    UnableToPresentImage(usize, #[source] vk::Result),

    #[error("The presentation surface is not usable in state {:?}", .0)]
    NotReady(SurfaceState),
}

#[derive(Debug, Error)]
#[error("Unable to submit graphics commands for frame {}", .0)]
pub struct SubmissionError(pub usize, #[source] pub vk::Result);
