use std::sync::Arc;

use ash::vk;

use crate::{
    presentation::RenderTarget,
    vulkan::{
        errors::RecordingError, DeviceApi, RenderDevice, RenderPassBegin,
        VertexSource,
    },
};

/// Opaque black.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Encodes a frame's draw into a reusable command buffer.
pub struct CommandRecorder<D: DeviceApi = RenderDevice> {
    device: Arc<D>,
}

impl<D: DeviceApi> CommandRecorder<D> {
    pub fn new(device: Arc<D>) -> Self {
        Self { device }
    }

    /// Reset the buffer and record one render pass which clears the target
    /// and draws every vertex once.
    ///
    /// Recording the same inputs twice produces the same commands.
    pub fn record<V>(
        &self,
        command_buffer: vk::CommandBuffer,
        target: &RenderTarget,
        pipeline: vk::Pipeline,
        vertices: &V,
    ) -> Result<(), RecordingError>
    where
        V: VertexSource + ?Sized,
    {
        let begin = RenderPassBegin {
            render_pass: target.render_pass,
            framebuffer: target.framebuffer,
            extent: target.extent,
            clear_color: CLEAR_COLOR,
        };
        unsafe {
            self.device
                .reset_command_buffer(command_buffer)
                .map_err(RecordingError::UnableToResetCommandBuffer)?;
            self.device
                .begin_command_buffer(command_buffer)
                .map_err(RecordingError::UnableToBeginCommandBuffer)?;

            self.device.cmd_begin_render_pass(command_buffer, &begin);
            self.device.cmd_bind_pipeline(command_buffer, pipeline);
            self.device
                .cmd_bind_vertex_buffer(command_buffer, vertices.handle());
            self.device
                .cmd_draw(command_buffer, vertices.vertex_count(), 1);
            self.device.cmd_end_render_pass(command_buffer);

            self.device
                .end_command_buffer(command_buffer)
                .map_err(RecordingError::UnableToEndCommandBuffer)?;
        }
        Ok(())
    }
}
