//! The seam between the frame protocol and the GPU.
//!
//! Everything the presentation and frame pipeline modules do to the device
//! goes through [DeviceApi]. The production implementation is
//! [crate::vulkan::RenderDevice].

use ash::{prelude::VkResult, vk};

use crate::vulkan::errors::ResourceCreationError;

/// Everything the device needs to know about the window surface in order to
/// configure a swapchain.
#[derive(Debug, Clone)]
pub struct SurfaceSupport {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

/// The parameters used to create a swapchain for the device's surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SwapchainRequest {
    pub format: vk::SurfaceFormatKHR,
    pub present_mode: vk::PresentModeKHR,
    pub extent: vk::Extent2D,
    pub min_image_count: u32,
    pub pre_transform: vk::SurfaceTransformFlagsKHR,
}

/// An immutable description of a render pass with a single color attachment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderPassDescriptor {
    pub format: vk::Format,
    pub load_op: vk::AttachmentLoadOp,
    pub store_op: vk::AttachmentStoreOp,
    pub initial_layout: vk::ImageLayout,
    pub final_layout: vk::ImageLayout,
}

impl RenderPassDescriptor {
    /// A render pass which clears the swapchain image and leaves it ready for
    /// presentation.
    pub fn color_pass(format: vk::Format) -> Self {
        Self {
            format,
            load_op: vk::AttachmentLoadOp::CLEAR,
            store_op: vk::AttachmentStoreOp::STORE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            final_layout: vk::ImageLayout::PRESENT_SRC_KHR,
        }
    }
}

/// Parameters for beginning a render pass instance in a command buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderPassBegin {
    pub render_pass: vk::RenderPass,
    pub framebuffer: vk::Framebuffer,
    pub extent: vk::Extent2D,
    pub clear_color: [f32; 4],
}

/// A single graphics queue submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Submission {
    pub command_buffer: vk::CommandBuffer,
    pub wait_semaphore: vk::Semaphore,
    pub wait_stage: vk::PipelineStageFlags,
    pub signal_semaphore: vk::Semaphore,
    pub signal_fence: vk::Fence,
}

/// The device operations used to drive frames and manage the swapchain.
///
/// Methods mirror the Vulkan calls they wrap and carry the same safety
/// requirements: handles must have been created by this device, must not be
/// destroyed while the GPU is still using them, and externally synchronized
/// objects must not be used from multiple threads at once.
pub trait DeviceApi {
    /// Create a fence, optionally in the signaled state.
    unsafe fn create_fence(&self, signaled: bool) -> VkResult<vk::Fence>;

    /// Block until the fence is signaled. There is no timeout.
    unsafe fn wait_for_fence(&self, fence: vk::Fence) -> VkResult<()>;

    unsafe fn reset_fence(&self, fence: vk::Fence) -> VkResult<()>;

    unsafe fn destroy_fence(&self, fence: vk::Fence);

    unsafe fn create_semaphore(&self) -> VkResult<vk::Semaphore>;

    unsafe fn destroy_semaphore(&self, semaphore: vk::Semaphore);

    /// Create a command pool for the graphics queue family whose buffers can
    /// be reset individually.
    unsafe fn create_command_pool(&self) -> VkResult<vk::CommandPool>;

    /// Allocate one primary command buffer from the pool.
    unsafe fn allocate_command_buffer(
        &self,
        pool: vk::CommandPool,
    ) -> VkResult<vk::CommandBuffer>;

    unsafe fn destroy_command_pool(&self, pool: vk::CommandPool);

    unsafe fn reset_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()>;

    unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()>;

    unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()>;

    unsafe fn cmd_begin_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
        begin: &RenderPassBegin,
    );

    unsafe fn cmd_bind_pipeline(
        &self,
        command_buffer: vk::CommandBuffer,
        pipeline: vk::Pipeline,
    );

    unsafe fn cmd_bind_vertex_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
    );

    unsafe fn cmd_draw(
        &self,
        command_buffer: vk::CommandBuffer,
        vertex_count: u32,
        instance_count: u32,
    );

    unsafe fn cmd_end_render_pass(&self, command_buffer: vk::CommandBuffer);

    /// Submit work to the graphics queue.
    unsafe fn submit_graphics(&self, submission: &Submission) -> VkResult<()>;

    /// Block until all queues on the device are idle.
    unsafe fn wait_idle(&self) -> VkResult<()>;

    /// Query the current state of the window surface.
    unsafe fn surface_support(&self) -> VkResult<SurfaceSupport>;

    unsafe fn create_swapchain(
        &self,
        request: &SwapchainRequest,
    ) -> VkResult<vk::SwapchainKHR>;

    unsafe fn swapchain_images(
        &self,
        swapchain: vk::SwapchainKHR,
    ) -> VkResult<Vec<vk::Image>>;

    unsafe fn destroy_swapchain(&self, swapchain: vk::SwapchainKHR);

    /// Acquire the next swapchain image without a timeout.
    ///
    /// Returns the image index and true when the swapchain is suboptimal.
    unsafe fn acquire_next_image(
        &self,
        swapchain: vk::SwapchainKHR,
        signal_semaphore: vk::Semaphore,
    ) -> VkResult<(u32, bool)>;

    /// Queue the image for presentation once the semaphore is signaled.
    ///
    /// Returns true when the swapchain is suboptimal.
    unsafe fn queue_present(
        &self,
        swapchain: vk::SwapchainKHR,
        image_index: u32,
        wait_semaphore: vk::Semaphore,
    ) -> VkResult<bool>;

    unsafe fn create_image_view(
        &self,
        image: vk::Image,
        format: vk::Format,
    ) -> VkResult<vk::ImageView>;

    unsafe fn destroy_image_view(&self, view: vk::ImageView);

    unsafe fn create_render_pass(
        &self,
        descriptor: &RenderPassDescriptor,
    ) -> VkResult<vk::RenderPass>;

    unsafe fn destroy_render_pass(&self, render_pass: vk::RenderPass);

    unsafe fn create_framebuffer(
        &self,
        render_pass: vk::RenderPass,
        view: vk::ImageView,
        extent: vk::Extent2D,
    ) -> VkResult<vk::Framebuffer>;

    unsafe fn destroy_framebuffer(&self, framebuffer: vk::Framebuffer);

    /// Give a Vulkan object a name which shows up in validation messages.
    ///
    /// Naming is best-effort, failures are logged and otherwise ignored.
    fn name_object(&self, object_type: vk::ObjectType, raw: u64, name: &str);
}

/// Builds the graphics pipeline for a render pass and swapchain extent.
///
/// The pipeline bakes in its viewport so it must be rebuilt every time the
/// swapchain extent changes.
pub trait PipelineBuilder {
    fn build(
        &mut self,
        render_pass: vk::RenderPass,
        extent: vk::Extent2D,
    ) -> Result<vk::Pipeline, ResourceCreationError>;

    /// Destroy a pipeline returned by [PipelineBuilder::build].
    ///
    /// # Safety
    ///
    /// The pipeline must not be referenced by any pending GPU work.
    unsafe fn destroy(&mut self, pipeline: vk::Pipeline);
}

/// A buffer of vertices which can be bound for drawing.
pub trait VertexSource {
    fn handle(&self) -> vk::Buffer;

    fn vertex_count(&self) -> u32;
}
