use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::vulkan::{
    errors::ResourceCreationError, sync::FrameSync, CommandPool, DeviceApi,
    RenderDevice,
};

/// The sync primitives and command buffer reserved for one in-flight frame.
///
/// Slots live as long as the scheduler. A chain rebuild does not touch them,
/// their command buffer is simply recorded again for the next frame.
pub struct FrameSlot<D: DeviceApi = RenderDevice> {
    index: usize,
    pub sync: FrameSync<D>,
    command_buffer: vk::CommandBuffer,

    /// Owns the command buffer's memory.
    #[allow(unused)]
    command_pool: CommandPool<D>,
}

impl<D: DeviceApi> FrameSlot<D> {
    pub fn new(
        device: Arc<D>,
        index: usize,
    ) -> Result<Self, ResourceCreationError> {
        let sync = FrameSync::create(device.clone())?;
        let command_pool = CommandPool::new(device.clone())?;
        let command_buffer = command_pool.allocate_command_buffer()?;

        let name = format!("Frame {}", index);
        sync.set_debug_name(&name);
        command_pool.set_debug_name(&format!("{} command pool", name));
        device.name_object(
            vk::ObjectType::COMMAND_BUFFER,
            command_buffer.as_raw(),
            &format!("{} command buffer", name),
        );

        Ok(Self {
            index,
            sync,
            command_buffer,
            command_pool,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn command_buffer(&self) -> vk::CommandBuffer {
        self.command_buffer
    }
}
