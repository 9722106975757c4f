use ash::vk;
use memoffset::offset_of;
use nalgebra as na;

/// A single vertex as it is laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub pos: na::Vector2<f32>,
    pub color: na::Vector3<f32>,
}

impl Vertex {
    pub fn new(pos: [f32; 2], color: [f32; 3]) -> Self {
        Self {
            pos: na::Vector2::new(pos[0], pos[1]),
            color: na::Vector3::new(color[0], color[1], color[2]),
        }
    }

    pub fn binding_description() -> vk::VertexInputBindingDescription {
        vk::VertexInputBindingDescription {
            binding: 0,
            stride: std::mem::size_of::<Self>() as u32,
            input_rate: vk::VertexInputRate::VERTEX,
        }
    }

    /// Position at location 0, color at location 1.
    pub fn attribute_descriptions() -> [vk::VertexInputAttributeDescription; 2]
    {
        [
            vk::VertexInputAttributeDescription {
                binding: 0,
                location: 0,
                format: vk::Format::R32G32_SFLOAT,
                offset: offset_of!(Self, pos) as u32,
            },
            vk::VertexInputAttributeDescription {
                binding: 0,
                location: 1,
                format: vk::Format::R32G32B32_SFLOAT,
                offset: offset_of!(Self, color) as u32,
            },
        ]
    }
}

/// The one triangle this application draws. Clockwise in framebuffer space.
pub fn triangle() -> [Vertex; 3] {
    [
        Vertex::new([0.0, -0.5], [1.0, 0.0, 0.0]),
        Vertex::new([0.5, 0.5], [0.0, 1.0, 0.0]),
        Vertex::new([-0.5, 0.5], [0.0, 0.0, 1.0]),
    ]
}
