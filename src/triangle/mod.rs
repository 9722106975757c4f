//! The one hard-coded draw: vertex layout, vertex data, and the pipeline
//! which renders it.

mod graphics_pipeline;
mod vertex;
mod vertex_buffer;

pub use self::{
    graphics_pipeline::{
        TrianglePipeline, FRAGMENT_SHADER_FILE, VERTEX_SHADER_FILE,
    },
    vertex::{triangle, Vertex},
    vertex_buffer::VertexBuffer,
};
