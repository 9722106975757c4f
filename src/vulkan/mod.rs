//! Vulkan plumbing: the instance and render device, RAII wrappers for the
//! objects the frame protocol uses, and the [DeviceApi] seam.

mod api;
mod command_pool;
pub mod errors;
mod ffi;
mod instance;
mod render_device;
mod shader_module;
pub mod sync;
mod window_surface;

pub use self::{
    api::{
        DeviceApi, PipelineBuilder, RenderPassBegin, RenderPassDescriptor,
        Submission, SurfaceSupport, SwapchainRequest, VertexSource,
    },
    command_pool::CommandPool,
    instance::{Instance, InstanceError},
    render_device::{
        GpuQueue, PhysicalDeviceError, QueueSelectionError,
        RenderDevice, RenderDeviceError,
    },
    shader_module::ShaderModule,
    window_surface::WindowSurface,
};
