//! Fakes which let the frame protocol run without a GPU or a display.

mod fake_device;
mod fake_window;

use std::sync::Arc;

use ash::vk;

pub use self::{
    fake_device::{Call, FailPoint, FakeDevice, Scripted},
    fake_window::FakeWindow,
};

use crate::vulkan::{
    errors::ResourceCreationError, PipelineBuilder, VertexSource,
};

/// Hands out pipeline handles from the fake device and remembers what each
/// one was built for.
pub struct FakePipelineBuilder {
    device: Arc<FakeDevice>,
    builds: Vec<(vk::RenderPass, vk::Extent2D)>,
}

impl FakePipelineBuilder {
    pub fn new(device: Arc<FakeDevice>) -> Self {
        Self {
            device,
            builds: vec![],
        }
    }

    /// Every (render pass, extent) pair a pipeline was built for, oldest
    /// first.
    pub fn builds(&self) -> Vec<(vk::RenderPass, vk::Extent2D)> {
        self.builds.clone()
    }
}

impl PipelineBuilder for FakePipelineBuilder {
    fn build(
        &mut self,
        render_pass: vk::RenderPass,
        extent: vk::Extent2D,
    ) -> Result<vk::Pipeline, ResourceCreationError> {
        let pipeline = self
            .device
            .create_pipeline(render_pass)
            .map_err(ResourceCreationError::UnableToCreateGraphicsPipeline)?;
        self.builds.push((render_pass, extent));
        Ok(pipeline)
    }

    unsafe fn destroy(&mut self, pipeline: vk::Pipeline) {
        self.device.destroy_pipeline(pipeline);
    }
}

pub struct FakeVertices {
    buffer: vk::Buffer,
    vertex_count: u32,
}

impl FakeVertices {
    pub fn new(device: &Arc<FakeDevice>, vertex_count: u32) -> Self {
        Self {
            buffer: device.create_buffer(),
            vertex_count,
        }
    }
}

impl VertexSource for FakeVertices {
    fn handle(&self) -> vk::Buffer {
        self.buffer
    }

    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
