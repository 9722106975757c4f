use ash::{prelude::VkResult, vk};

use crate::vulkan::{
    DeviceApi, RenderDevice, RenderPassBegin, RenderPassDescriptor, Submission,
    SurfaceSupport, SwapchainRequest,
};

impl DeviceApi for RenderDevice {
    unsafe fn create_fence(&self, signaled: bool) -> VkResult<vk::Fence> {
        let create_info = vk::FenceCreateInfo {
            flags: if signaled {
                vk::FenceCreateFlags::SIGNALED
            } else {
                vk::FenceCreateFlags::empty()
            },
            ..Default::default()
        };
        self.logical_device.create_fence(&create_info, None)
    }

    unsafe fn wait_for_fence(&self, fence: vk::Fence) -> VkResult<()> {
        self.logical_device.wait_for_fences(&[fence], true, u64::MAX)
    }

    unsafe fn reset_fence(&self, fence: vk::Fence) -> VkResult<()> {
        self.logical_device.reset_fences(&[fence])
    }

    unsafe fn destroy_fence(&self, fence: vk::Fence) {
        self.logical_device.destroy_fence(fence, None);
    }

    unsafe fn create_semaphore(&self) -> VkResult<vk::Semaphore> {
        let create_info = vk::SemaphoreCreateInfo::default();
        self.logical_device.create_semaphore(&create_info, None)
    }

    unsafe fn destroy_semaphore(&self, semaphore: vk::Semaphore) {
        self.logical_device.destroy_semaphore(semaphore, None);
    }

    unsafe fn create_command_pool(&self) -> VkResult<vk::CommandPool> {
        let create_info = vk::CommandPoolCreateInfo {
            queue_family_index: self.graphics_queue.family_id,
            flags: vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER,
            ..Default::default()
        };
        self.logical_device.create_command_pool(&create_info, None)
    }

    unsafe fn allocate_command_buffer(
        &self,
        pool: vk::CommandPool,
    ) -> VkResult<vk::CommandBuffer> {
        let allocate_info = vk::CommandBufferAllocateInfo {
            command_pool: pool,
            level: vk::CommandBufferLevel::PRIMARY,
            command_buffer_count: 1,
            ..Default::default()
        };
        let buffers =
            self.logical_device.allocate_command_buffers(&allocate_info)?;
        buffers
            .first()
            .copied()
            .ok_or(vk::Result::ERROR_INITIALIZATION_FAILED)
    }

    unsafe fn destroy_command_pool(&self, pool: vk::CommandPool) {
        self.logical_device.destroy_command_pool(pool, None);
    }

    unsafe fn reset_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        self.logical_device.reset_command_buffer(
            command_buffer,
            vk::CommandBufferResetFlags::empty(),
        )
    }

    unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        let begin_info = vk::CommandBufferBeginInfo::default();
        self.logical_device
            .begin_command_buffer(command_buffer, &begin_info)
    }

    unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        self.logical_device.end_command_buffer(command_buffer)
    }

    unsafe fn cmd_begin_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
        begin: &RenderPassBegin,
    ) {
        let clear_value = vk::ClearValue {
            color: vk::ClearColorValue {
                float32: begin.clear_color,
            },
        };
        let begin_info = vk::RenderPassBeginInfo {
            render_pass: begin.render_pass,
            framebuffer: begin.framebuffer,
            render_area: vk::Rect2D {
                offset: vk::Offset2D { x: 0, y: 0 },
                extent: begin.extent,
            },
            clear_value_count: 1,
            p_clear_values: &clear_value,
            ..Default::default()
        };
        self.logical_device.cmd_begin_render_pass(
            command_buffer,
            &begin_info,
            vk::SubpassContents::INLINE,
        );
    }

    unsafe fn cmd_bind_pipeline(
        &self,
        command_buffer: vk::CommandBuffer,
        pipeline: vk::Pipeline,
    ) {
        self.logical_device.cmd_bind_pipeline(
            command_buffer,
            vk::PipelineBindPoint::GRAPHICS,
            pipeline,
        );
    }

    unsafe fn cmd_bind_vertex_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
    ) {
        self.logical_device
            .cmd_bind_vertex_buffers(command_buffer, 0, &[buffer], &[0]);
    }

    unsafe fn cmd_draw(
        &self,
        command_buffer: vk::CommandBuffer,
        vertex_count: u32,
        instance_count: u32,
    ) {
        self.logical_device.cmd_draw(
            command_buffer,
            vertex_count,
            instance_count,
            0,
            0,
        );
    }

    unsafe fn cmd_end_render_pass(&self, command_buffer: vk::CommandBuffer) {
        self.logical_device.cmd_end_render_pass(command_buffer);
    }

    unsafe fn submit_graphics(&self, submission: &Submission) -> VkResult<()> {
        let submit_info = vk::SubmitInfo {
            wait_semaphore_count: 1,
            p_wait_semaphores: &submission.wait_semaphore,
            p_wait_dst_stage_mask: &submission.wait_stage,
            command_buffer_count: 1,
            p_command_buffers: &submission.command_buffer,
            signal_semaphore_count: 1,
            p_signal_semaphores: &submission.signal_semaphore,
            ..Default::default()
        };
        self.logical_device.queue_submit(
            self.graphics_queue.queue,
            &[submit_info],
            submission.signal_fence,
        )
    }

    unsafe fn wait_idle(&self) -> VkResult<()> {
        self.logical_device.device_wait_idle()
    }

    unsafe fn surface_support(&self) -> VkResult<SurfaceSupport> {
        self.window_surface.support(self.physical_device)
    }

    unsafe fn create_swapchain(
        &self,
        request: &SwapchainRequest,
    ) -> VkResult<vk::SwapchainKHR> {
        let indices = self.swapchain_queue_family_indices();
        let mut create_info = vk::SwapchainCreateInfoKHR {
            surface: self.window_surface.khr,

            // image settings
            image_format: request.format.format,
            image_color_space: request.format.color_space,
            image_extent: request.extent,
            min_image_count: request.min_image_count,
            image_array_layers: 1,
            image_usage: vk::ImageUsageFlags::COLOR_ATTACHMENT,

            // window system presentation settings
            present_mode: request.present_mode,
            composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
            pre_transform: request.pre_transform,
            old_swapchain: vk::SwapchainKHR::null(),
            clipped: vk::TRUE,

            ..Default::default()
        };

        if indices.len() == 1 {
            create_info.image_sharing_mode = vk::SharingMode::EXCLUSIVE;
        } else {
            create_info.image_sharing_mode = vk::SharingMode::CONCURRENT;
            create_info.p_queue_family_indices = indices.as_ptr();
            create_info.queue_family_index_count = indices.len() as u32;
        }

        self.swapchain_loader.create_swapchain(&create_info, None)
    }

    unsafe fn swapchain_images(
        &self,
        swapchain: vk::SwapchainKHR,
    ) -> VkResult<Vec<vk::Image>> {
        self.swapchain_loader.get_swapchain_images(swapchain)
    }

    unsafe fn destroy_swapchain(&self, swapchain: vk::SwapchainKHR) {
        self.swapchain_loader.destroy_swapchain(swapchain, None);
    }

    unsafe fn acquire_next_image(
        &self,
        swapchain: vk::SwapchainKHR,
        signal_semaphore: vk::Semaphore,
    ) -> VkResult<(u32, bool)> {
        self.swapchain_loader.acquire_next_image(
            swapchain,
            u64::MAX,
            signal_semaphore,
            vk::Fence::null(),
        )
    }

    unsafe fn queue_present(
        &self,
        swapchain: vk::SwapchainKHR,
        image_index: u32,
        wait_semaphore: vk::Semaphore,
    ) -> VkResult<bool> {
        let present_info = vk::PresentInfoKHR {
            wait_semaphore_count: 1,
            p_wait_semaphores: &wait_semaphore,
            swapchain_count: 1,
            p_swapchains: &swapchain,
            p_image_indices: &image_index,
            ..Default::default()
        };
        self.swapchain_loader
            .queue_present(self.present_queue.queue, &present_info)
    }

    unsafe fn create_image_view(
        &self,
        image: vk::Image,
        format: vk::Format,
    ) -> VkResult<vk::ImageView> {
        let create_info = vk::ImageViewCreateInfo {
            image,
            format,
            view_type: vk::ImageViewType::TYPE_2D,
            subresource_range: vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            },
            components: vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            },
            ..Default::default()
        };
        self.logical_device.create_image_view(&create_info, None)
    }

    unsafe fn destroy_image_view(&self, view: vk::ImageView) {
        self.logical_device.destroy_image_view(view, None);
    }

    unsafe fn create_render_pass(
        &self,
        descriptor: &RenderPassDescriptor,
    ) -> VkResult<vk::RenderPass> {
        let color_attachment = vk::AttachmentDescription {
            format: descriptor.format,
            samples: vk::SampleCountFlags::TYPE_1,
            load_op: descriptor.load_op,
            store_op: descriptor.store_op,
            stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
            stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
            initial_layout: descriptor.initial_layout,
            final_layout: descriptor.final_layout,
            ..Default::default()
        };
        let color_attachment_reference = vk::AttachmentReference {
            attachment: 0,
            layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        };
        let subpass = vk::SubpassDescription {
            pipeline_bind_point: vk::PipelineBindPoint::GRAPHICS,
            color_attachment_count: 1,
            p_color_attachments: &color_attachment_reference,
            ..Default::default()
        };

        // The swapchain image is only available once the acquire semaphore
        // signals at the color attachment output stage.
        let dependency = vk::SubpassDependency {
            src_subpass: vk::SUBPASS_EXTERNAL,
            dst_subpass: 0,
            src_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            src_access_mask: vk::AccessFlags::empty(),
            dst_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
            dst_access_mask: vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
            ..Default::default()
        };

        let create_info = vk::RenderPassCreateInfo {
            attachment_count: 1,
            p_attachments: &color_attachment,
            subpass_count: 1,
            p_subpasses: &subpass,
            dependency_count: 1,
            p_dependencies: &dependency,
            ..Default::default()
        };
        self.logical_device.create_render_pass(&create_info, None)
    }

    unsafe fn destroy_render_pass(&self, render_pass: vk::RenderPass) {
        self.logical_device.destroy_render_pass(render_pass, None);
    }

    unsafe fn create_framebuffer(
        &self,
        render_pass: vk::RenderPass,
        view: vk::ImageView,
        extent: vk::Extent2D,
    ) -> VkResult<vk::Framebuffer> {
        let create_info = vk::FramebufferCreateInfo {
            render_pass,
            attachment_count: 1,
            p_attachments: &view,
            width: extent.width,
            height: extent.height,
            layers: 1,
            ..Default::default()
        };
        self.logical_device.create_framebuffer(&create_info, None)
    }

    unsafe fn destroy_framebuffer(&self, framebuffer: vk::Framebuffer) {
        self.logical_device.destroy_framebuffer(framebuffer, None);
    }

    fn name_object(&self, object_type: vk::ObjectType, raw: u64, name: &str) {
        self.name_raw_object(object_type, raw, name);
    }
}
