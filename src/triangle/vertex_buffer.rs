use std::sync::Arc;

use ash::vk::{self, Handle};

use crate::{
    triangle::Vertex,
    vulkan::{errors::ResourceCreationError, RenderDevice, VertexSource},
};

/// A host-visible vertex buffer which is filled once when created.
pub struct VertexBuffer {
    buffer: vk::Buffer,
    memory: vk::DeviceMemory,
    vertex_count: u32,
    render_device: Arc<RenderDevice>,
}

impl VertexBuffer {
    /// Create a buffer big enough for `vertices` and copy them in.
    pub fn new(
        render_device: Arc<RenderDevice>,
        vertices: &[Vertex],
    ) -> Result<Self, ResourceCreationError> {
        let byte_size = std::mem::size_of_val(vertices) as vk::DeviceSize;
        let device = render_device.logical_device();

        let create_info = vk::BufferCreateInfo {
            size: byte_size,
            usage: vk::BufferUsageFlags::VERTEX_BUFFER,
            sharing_mode: vk::SharingMode::EXCLUSIVE,
            ..Default::default()
        };
        let buffer = unsafe {
            device
                .create_buffer(&create_info, None)
                .map_err(ResourceCreationError::UnableToCreateBuffer)?
        };

        let memory = match allocate_and_bind(&render_device, buffer) {
            Ok(memory) => memory,
            Err(error) => {
                unsafe { device.destroy_buffer(buffer, None) };
                return Err(error);
            }
        };

        let vertex_buffer = Self {
            buffer,
            memory,
            vertex_count: vertices.len() as u32,
            render_device: render_device.clone(),
        };
        vertex_buffer.write(vertices, byte_size)?;
        render_device.name_vulkan_object(
            "Triangle Vertices",
            vk::ObjectType::BUFFER,
            buffer,
        );
        log::debug!(
            "Created vertex buffer {:#x} with {} vertices",
            buffer.as_raw(),
            vertex_buffer.vertex_count
        );
        Ok(vertex_buffer)
    }

    fn write(
        &self,
        vertices: &[Vertex],
        byte_size: vk::DeviceSize,
    ) -> Result<(), ResourceCreationError> {
        let device = self.render_device.logical_device();
        unsafe {
            let ptr = device
                .map_memory(self.memory, 0, byte_size, vk::MemoryMapFlags::empty())
                .map_err(ResourceCreationError::UnableToMapMemory)?;
            std::ptr::copy_nonoverlapping(
                vertices.as_ptr(),
                ptr as *mut Vertex,
                vertices.len(),
            );
            // host coherent, no flush needed
            device.unmap_memory(self.memory);
        }
        Ok(())
    }
}

/// Allocate host-visible, host-coherent memory for the buffer and bind it.
fn allocate_and_bind(
    render_device: &RenderDevice,
    buffer: vk::Buffer,
) -> Result<vk::DeviceMemory, ResourceCreationError> {
    let device = render_device.logical_device();
    let requirements = unsafe { device.get_buffer_memory_requirements(buffer) };
    let memory_type_index = render_device.find_memory_type(
        requirements.memory_type_bits,
        vk::MemoryPropertyFlags::HOST_VISIBLE
            | vk::MemoryPropertyFlags::HOST_COHERENT,
    )?;
    let allocate_info = vk::MemoryAllocateInfo {
        allocation_size: requirements.size,
        memory_type_index,
        ..Default::default()
    };
    unsafe {
        let memory = device
            .allocate_memory(&allocate_info, None)
            .map_err(ResourceCreationError::UnableToAllocateMemory)?;
        if let Err(error) = device.bind_buffer_memory(buffer, memory, 0) {
            device.free_memory(memory, None);
            return Err(ResourceCreationError::UnableToBindBufferMemory(error));
        }
        Ok(memory)
    }
}

impl VertexSource for VertexBuffer {
    fn handle(&self) -> vk::Buffer {
        self.buffer
    }

    fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Drop for VertexBuffer {
    /// # DANGER
    ///
    /// The buffer must not be referenced by pending draws.
    fn drop(&mut self) {
        let device = self.render_device.logical_device();
        unsafe {
            device.destroy_buffer(self.buffer, None);
            device.free_memory(self.memory, None);
        }
    }
}
