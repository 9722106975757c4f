use ash::vk;

use crate::vulkan::{errors::ResourceCreationError, RenderDevice};

impl RenderDevice {
    /// Find a memory type allowed by `type_bits` with all of the requested
    /// property flags.
    pub fn find_memory_type(
        &self,
        type_bits: u32,
        properties: vk::MemoryPropertyFlags,
    ) -> Result<u32, ResourceCreationError> {
        pick_memory_type(&self.memory_properties, type_bits, properties)
    }
}

/// The index of the first memory type which is allowed by `type_bits` and
/// supports `properties`.
pub fn pick_memory_type(
    memory_properties: &vk::PhysicalDeviceMemoryProperties,
    type_bits: u32,
    properties: vk::MemoryPropertyFlags,
) -> Result<u32, ResourceCreationError> {
    memory_properties.memory_types
        [..memory_properties.memory_type_count as usize]
        .iter()
        .enumerate()
        .find(|(index, memory_type)| {
            type_bits & (1 << index) != 0
                && memory_type.property_flags.contains(properties)
        })
        .map(|(index, _)| index as u32)
        .ok_or(ResourceCreationError::NoSuitableMemoryType(
            type_bits, properties,
        ))
}
