use std::{ffi::CStr, path::Path, sync::Arc};

use ash::vk;

use crate::{
    triangle::Vertex,
    vulkan::{
        errors::ResourceCreationError, PipelineBuilder, RenderDevice,
        ShaderModule,
    },
};

pub const VERTEX_SHADER_FILE: &str = "triangle.vert.spv";
pub const FRAGMENT_SHADER_FILE: &str = "triangle.frag.spv";

/// Builds the triangle's graphics pipeline for each presentation chain.
///
/// The shader modules and the (empty) pipeline layout are created once and
/// shared by every pipeline this builds.
pub struct TrianglePipeline {
    vertex_shader: ShaderModule,
    fragment_shader: ShaderModule,
    layout: vk::PipelineLayout,
    render_device: Arc<RenderDevice>,
}

impl TrianglePipeline {
    /// Load the compiled shaders from `shader_dir`.
    pub fn new(
        render_device: Arc<RenderDevice>,
        shader_dir: &Path,
    ) -> Result<Self, ResourceCreationError> {
        let vertex_shader = ShaderModule::from_spirv_file(
            render_device.clone(),
            shader_dir.join(VERTEX_SHADER_FILE),
        )?;
        let fragment_shader = ShaderModule::from_spirv_file(
            render_device.clone(),
            shader_dir.join(FRAGMENT_SHADER_FILE),
        )?;
        render_device.name_vulkan_object(
            "Triangle Vertex Shader",
            vk::ObjectType::SHADER_MODULE,
            vertex_shader.raw(),
        );
        render_device.name_vulkan_object(
            "Triangle Fragment Shader",
            vk::ObjectType::SHADER_MODULE,
            fragment_shader.raw(),
        );

        let layout_create_info = vk::PipelineLayoutCreateInfo::default();
        let layout = unsafe {
            render_device
                .logical_device()
                .create_pipeline_layout(&layout_create_info, None)
                .map_err(ResourceCreationError::UnableToCreatePipelineLayout)?
        };
        render_device.name_vulkan_object(
            "Triangle Pipeline Layout",
            vk::ObjectType::PIPELINE_LAYOUT,
            layout,
        );

        Ok(Self {
            vertex_shader,
            fragment_shader,
            layout,
            render_device,
        })
    }
}

impl PipelineBuilder for TrianglePipeline {
    fn build(
        &mut self,
        render_pass: vk::RenderPass,
        extent: vk::Extent2D,
    ) -> Result<vk::Pipeline, ResourceCreationError> {
        let entry = entry_point();
        let stages = [
            vk::PipelineShaderStageCreateInfo {
                stage: vk::ShaderStageFlags::VERTEX,
                module: self.vertex_shader.raw(),
                p_name: entry.as_ptr(),
                ..Default::default()
            },
            vk::PipelineShaderStageCreateInfo {
                stage: vk::ShaderStageFlags::FRAGMENT,
                module: self.fragment_shader.raw(),
                p_name: entry.as_ptr(),
                ..Default::default()
            },
        ];

        // Fixed Function Configuration

        let bindings = [Vertex::binding_description()];
        let attributes = Vertex::attribute_descriptions();
        let vertex_input_state = vk::PipelineVertexInputStateCreateInfo {
            vertex_binding_description_count: bindings.len() as u32,
            p_vertex_binding_descriptions: bindings.as_ptr(),
            vertex_attribute_description_count: attributes.len() as u32,
            p_vertex_attribute_descriptions: attributes.as_ptr(),
            ..Default::default()
        };

        let input_assembly = vk::PipelineInputAssemblyStateCreateInfo {
            topology: vk::PrimitiveTopology::TRIANGLE_LIST,
            primitive_restart_enable: vk::FALSE,
            ..Default::default()
        };

        let viewports = [vk::Viewport {
            x: 0.0,
            y: 0.0,
            width: extent.width as f32,
            height: extent.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }];
        let scissors = [vk::Rect2D {
            offset: vk::Offset2D { x: 0, y: 0 },
            extent,
        }];
        let viewport_state = vk::PipelineViewportStateCreateInfo {
            viewport_count: viewports.len() as u32,
            p_viewports: viewports.as_ptr(),
            scissor_count: scissors.len() as u32,
            p_scissors: scissors.as_ptr(),
            ..Default::default()
        };

        let raster_state = vk::PipelineRasterizationStateCreateInfo {
            depth_clamp_enable: vk::FALSE,
            rasterizer_discard_enable: vk::FALSE,
            polygon_mode: vk::PolygonMode::FILL,
            line_width: 1.0,
            cull_mode: vk::CullModeFlags::BACK,
            front_face: vk::FrontFace::CLOCKWISE,
            depth_bias_enable: vk::FALSE,
            ..Default::default()
        };

        let multisample_state = vk::PipelineMultisampleStateCreateInfo {
            sample_shading_enable: vk::FALSE,
            rasterization_samples: vk::SampleCountFlags::TYPE_1,
            min_sample_shading: 1.0,
            alpha_to_coverage_enable: vk::FALSE,
            alpha_to_one_enable: vk::FALSE,
            ..Default::default()
        };

        let blend_attachments = [vk::PipelineColorBlendAttachmentState {
            blend_enable: vk::FALSE,
            color_write_mask: vk::ColorComponentFlags::R
                | vk::ColorComponentFlags::G
                | vk::ColorComponentFlags::B
                | vk::ColorComponentFlags::A,
            src_color_blend_factor: vk::BlendFactor::ONE,
            dst_color_blend_factor: vk::BlendFactor::ZERO,
            color_blend_op: vk::BlendOp::ADD,
            src_alpha_blend_factor: vk::BlendFactor::ONE,
            dst_alpha_blend_factor: vk::BlendFactor::ZERO,
            alpha_blend_op: vk::BlendOp::ADD,
        }];
        let blend_state = vk::PipelineColorBlendStateCreateInfo {
            logic_op_enable: vk::FALSE,
            logic_op: vk::LogicOp::COPY,
            attachment_count: blend_attachments.len() as u32,
            p_attachments: blend_attachments.as_ptr(),
            blend_constants: [0.0, 0.0, 0.0, 0.0],
            ..Default::default()
        };

        let create_info = vk::GraphicsPipelineCreateInfo {
            stage_count: stages.len() as u32,
            p_stages: stages.as_ptr(),
            p_vertex_input_state: &vertex_input_state,
            p_input_assembly_state: &input_assembly,
            p_viewport_state: &viewport_state,
            p_rasterization_state: &raster_state,
            p_multisample_state: &multisample_state,
            p_color_blend_state: &blend_state,
            layout: self.layout,
            render_pass,
            subpass: 0,
            ..Default::default()
        };

        let pipelines = unsafe {
            self.render_device
                .logical_device()
                .create_graphics_pipelines(
                    vk::PipelineCache::null(),
                    &[create_info],
                    None,
                )
                .map_err(|(_, error)| {
                    ResourceCreationError::UnableToCreateGraphicsPipeline(error)
                })?
        };
        let pipeline = pipelines.first().copied().ok_or(
            ResourceCreationError::UnableToCreateGraphicsPipeline(
                vk::Result::ERROR_INITIALIZATION_FAILED,
            ),
        )?;
        self.render_device.name_vulkan_object(
            format!("Triangle Pipeline {}x{}", extent.width, extent.height),
            vk::ObjectType::PIPELINE,
            pipeline,
        );
        Ok(pipeline)
    }

    unsafe fn destroy(&mut self, pipeline: vk::Pipeline) {
        self.render_device
            .logical_device()
            .destroy_pipeline(pipeline, None);
    }
}

impl Drop for TrianglePipeline {
    /// # DANGER
    ///
    /// Pipelines built with the layout must already be destroyed.
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .logical_device()
                .destroy_pipeline_layout(self.layout, None);
        }
    }
}

fn entry_point() -> &'static CStr {
    // "main\0" has no interior nul
    unsafe { CStr::from_bytes_with_nul_unchecked(b"main\0") }
}
