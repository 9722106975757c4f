use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use ash::{
    prelude::VkResult,
    vk::{self, Handle},
};

use crate::vulkan::{
    DeviceApi, RenderPassBegin, RenderPassDescriptor, Submission,
    SurfaceSupport, SwapchainRequest,
};

/// Every device call the fake observed, in order.
///
/// Debug naming is not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateFence(vk::Fence),
    WaitFence(vk::Fence),
    ResetFence(vk::Fence),
    DestroyFence(vk::Fence),
    CreateSemaphore(vk::Semaphore),
    DestroySemaphore(vk::Semaphore),
    CreateCommandPool(vk::CommandPool),
    AllocateCommandBuffer(vk::CommandBuffer),
    DestroyCommandPool(vk::CommandPool),
    ResetCommandBuffer(vk::CommandBuffer),
    BeginCommandBuffer(vk::CommandBuffer),
    EndCommandBuffer(vk::CommandBuffer),
    BeginRenderPass(vk::CommandBuffer, RenderPassBegin),
    BindPipeline(vk::CommandBuffer, vk::Pipeline),
    BindVertexBuffer(vk::CommandBuffer, vk::Buffer),
    Draw(vk::CommandBuffer, u32, u32),
    EndRenderPass(vk::CommandBuffer),
    Submit(Submission),
    WaitIdle,
    SurfaceSupport,
    CreateSwapchain(vk::SwapchainKHR, SwapchainRequest),
    DestroySwapchain(vk::SwapchainKHR),
    Acquire(vk::SwapchainKHR),
    Present(vk::SwapchainKHR, u32),
    CreateImageView(vk::ImageView),
    DestroyImageView(vk::ImageView),
    CreateRenderPass(vk::RenderPass),
    DestroyRenderPass(vk::RenderPass),
    CreateFramebuffer(vk::Framebuffer),
    DestroyFramebuffer(vk::Framebuffer),
    CreatePipeline(vk::Pipeline),
    DestroyPipeline(vk::Pipeline),
}

/// The outcome of the next acquire or present.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scripted {
    Optimal,
    Suboptimal,
    OutOfDate,
    Fail(vk::Result),
}

/// Device calls which can be made to fail once with [FakeDevice::fail_next].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FailPoint {
    FenceCreation,
    FenceWait,
    FenceReset,
    SemaphoreCreation,
    CommandPoolCreation,
    CommandBufferAllocation,
    ResetCommandBuffer,
    BeginCommandBuffer,
    EndCommandBuffer,
    Submit,
    WaitIdle,
    SurfaceSupport,
    SwapchainCreation,
    ImageViewCreation,
    RenderPassCreation,
    FramebufferCreation,
    PipelineCreation,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum FenceState {
    Signaled,
    Unsignaled,
    Pending,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum BufferState {
    Initial,
    Recording,
    Executable,
    Pending,
}

struct FakeSwapchain {
    images: Vec<vk::Image>,
    acquired: HashSet<u32>,
    next_index: u32,
}

struct State {
    next_handle: u64,
    calls: Vec<Call>,
    alive: HashSet<u64>,
    names: HashMap<u64, String>,
    fences: HashMap<vk::Fence, FenceState>,
    semaphores: HashMap<vk::Semaphore, bool>,
    command_buffers: HashMap<vk::CommandBuffer, BufferState>,
    pools: HashMap<vk::CommandPool, Vec<vk::CommandBuffer>>,
    swapchains: HashMap<vk::SwapchainKHR, FakeSwapchain>,
    pending: Vec<Submission>,
    support: SurfaceSupport,
    queued_extents: VecDeque<vk::Extent2D>,
    acquire_script: VecDeque<Scripted>,
    present_script: VecDeque<Scripted>,
    failures: HashMap<FailPoint, vk::Result>,
}

/// An in-memory device which enforces the ordering rules a real driver's
/// validation layer would complain about.
///
/// Submitted work stays pending until a fence wait or an idle wait completes
/// it. Misuse panics:
///
/// - waiting on an unsignaled fence with no pending submission (the wait
///   would never return),
/// - resetting or destroying a fence while its submission is pending,
/// - submitting with a fence which was not reset,
/// - resetting or destroying command buffers which are pending,
/// - destroying swapchain resources or pipelines while any work is pending,
/// - using or destroying a handle which is not alive.
pub struct FakeDevice {
    state: Mutex<State>,
}

impl FakeDevice {
    pub fn new() -> Arc<Self> {
        let support = SurfaceSupport {
            capabilities: vk::SurfaceCapabilitiesKHR {
                min_image_count: 2,
                max_image_count: 3,
                current_extent: vk::Extent2D {
                    width: 800,
                    height: 600,
                },
                min_image_extent: vk::Extent2D {
                    width: 1,
                    height: 1,
                },
                max_image_extent: vk::Extent2D {
                    width: 4096,
                    height: 4096,
                },
                current_transform: vk::SurfaceTransformFlagsKHR::IDENTITY,
                ..Default::default()
            },
            formats: vec![vk::SurfaceFormatKHR {
                format: vk::Format::B8G8R8A8_SRGB,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            }],
            present_modes: vec![
                vk::PresentModeKHR::FIFO,
                vk::PresentModeKHR::MAILBOX,
            ],
        };
        Arc::new(Self {
            state: Mutex::new(State {
                next_handle: 1,
                calls: vec![],
                alive: HashSet::new(),
                names: HashMap::new(),
                fences: HashMap::new(),
                semaphores: HashMap::new(),
                command_buffers: HashMap::new(),
                pools: HashMap::new(),
                swapchains: HashMap::new(),
                pending: vec![],
                support,
                queued_extents: VecDeque::new(),
                acquire_script: VecDeque::new(),
                present_script: VecDeque::new(),
                failures: HashMap::new(),
            }),
        })
    }

    // Scripting
    // ---------

    pub fn set_formats(&self, formats: Vec<vk::SurfaceFormatKHR>) {
        self.state().support.formats = formats;
    }

    pub fn set_present_modes(&self, modes: Vec<vk::PresentModeKHR>) {
        self.state().support.present_modes = modes;
    }

    pub fn set_image_counts(&self, min: u32, max: u32) {
        let mut state = self.state();
        state.support.capabilities.min_image_count = min;
        state.support.capabilities.max_image_count = max;
    }

    /// Pass `u32::MAX` to let the swapchain pick its extent from the
    /// framebuffer size.
    pub fn set_current_extent(&self, width: u32, height: u32) {
        self.state().support.capabilities.current_extent =
            vk::Extent2D { width, height };
    }

    /// Each later surface query takes the next extent and keeps reporting it
    /// once the queue runs out.
    pub fn queue_current_extents(&self, extents: &[(u32, u32)]) {
        self.state().queued_extents.extend(
            extents
                .iter()
                .map(|&(width, height)| vk::Extent2D { width, height }),
        );
    }

    /// Queue the outcome of a future acquire. Unscripted acquires succeed.
    pub fn script_acquire(&self, outcome: Scripted) {
        self.state().acquire_script.push_back(outcome);
    }

    /// Queue the outcome of a future present. Unscripted presents succeed.
    pub fn script_present(&self, outcome: Scripted) {
        self.state().present_script.push_back(outcome);
    }

    /// Make the next call at `point` fail with `result`.
    pub fn fail_next(&self, point: FailPoint, result: vk::Result) {
        self.state().failures.insert(point, result);
    }

    // Inspection
    // ----------

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn is_signaled(&self, fence: vk::Fence) -> bool {
        self.state().fences.get(&fence) == Some(&FenceState::Signaled)
    }

    pub fn is_semaphore_signaled(&self, semaphore: vk::Semaphore) -> bool {
        self.state().semaphores.get(&semaphore) == Some(&true)
    }

    pub fn is_alive(&self, raw: u64) -> bool {
        self.state().alive.contains(&raw)
    }

    pub fn name_of(&self, raw: u64) -> Option<String> {
        self.state().names.get(&raw).cloned()
    }

    pub fn live_fence_count(&self) -> usize {
        self.state().fences.len()
    }

    pub fn live_swapchain_count(&self) -> usize {
        self.state().swapchains.len()
    }

    // Resources which are not part of DeviceApi
    // -----------------------------------------

    pub fn create_pipeline(
        &self,
        render_pass: vk::RenderPass,
    ) -> VkResult<vk::Pipeline> {
        let mut state = self.state();
        state.fail(FailPoint::PipelineCreation)?;
        state.require_alive(render_pass.as_raw(), "render pass");
        let pipeline = vk::Pipeline::from_raw(state.create_handle());
        state.calls.push(Call::CreatePipeline(pipeline));
        Ok(pipeline)
    }

    pub fn destroy_pipeline(&self, pipeline: vk::Pipeline) {
        let mut state = self.state();
        state.calls.push(Call::DestroyPipeline(pipeline));
        state.require_idle("pipeline");
        state.release(pipeline.as_raw(), "pipeline");
    }

    pub fn create_buffer(&self) -> vk::Buffer {
        vk::Buffer::from_raw(self.state().create_handle())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // a failed assertion in one test should not cascade into every Drop
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn create_handle(&mut self) -> u64 {
        let raw = self.next_handle;
        self.next_handle += 1;
        self.alive.insert(raw);
        raw
    }

    fn fail(&mut self, point: FailPoint) -> VkResult<()> {
        match self.failures.remove(&point) {
            Some(result) => Err(result),
            None => Ok(()),
        }
    }

    fn require_alive(&self, raw: u64, what: &str) {
        assert!(self.alive.contains(&raw), "{} {:#x} is not alive", what, raw);
    }

    fn release(&mut self, raw: u64, what: &str) {
        assert!(
            self.alive.remove(&raw),
            "{} {:#x} destroyed twice or never created",
            what,
            raw
        );
        self.names.remove(&raw);
    }

    fn require_idle(&self, what: &str) {
        assert!(
            self.pending.is_empty(),
            "{} destroyed while {} submissions are pending",
            what,
            self.pending.len()
        );
    }

    fn buffer_state(&self, command_buffer: vk::CommandBuffer) -> BufferState {
        match self.command_buffers.get(&command_buffer) {
            Some(state) => *state,
            None => panic!("unknown command buffer {:?}", command_buffer),
        }
    }

    fn require_recording(&self, command_buffer: vk::CommandBuffer) {
        assert_eq!(
            self.buffer_state(command_buffer),
            BufferState::Recording,
            "command buffer {:?} is not recording",
            command_buffer
        );
    }

    /// Complete the first `count` pending submissions in queue order.
    fn complete(&mut self, count: usize) {
        let completed: Vec<Submission> = self.pending.drain(..count).collect();
        for submission in completed {
            if let Some(fence) = self.fences.get_mut(&submission.signal_fence)
            {
                *fence = FenceState::Signaled;
            }
            if let Some(buffer) =
                self.command_buffers.get_mut(&submission.command_buffer)
            {
                *buffer = BufferState::Executable;
            }
        }
    }
}

impl DeviceApi for FakeDevice {
    unsafe fn create_fence(&self, signaled: bool) -> VkResult<vk::Fence> {
        let mut state = self.state();
        state.fail(FailPoint::FenceCreation)?;
        let fence = vk::Fence::from_raw(state.create_handle());
        let initial = if signaled {
            FenceState::Signaled
        } else {
            FenceState::Unsignaled
        };
        state.fences.insert(fence, initial);
        state.calls.push(Call::CreateFence(fence));
        Ok(fence)
    }

    unsafe fn wait_for_fence(&self, fence: vk::Fence) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::WaitFence(fence));
        state.fail(FailPoint::FenceWait)?;
        let current = state.fences.get(&fence).copied();
        match current {
            Some(FenceState::Signaled) => Ok(()),
            Some(FenceState::Pending) => {
                let position = state
                    .pending
                    .iter()
                    .position(|submission| submission.signal_fence == fence);
                if let Some(position) = position {
                    state.complete(position + 1);
                }
                Ok(())
            }
            Some(FenceState::Unsignaled) => panic!(
                "deadlock: waiting on fence {:?} which nothing will signal",
                fence
            ),
            None => panic!("waiting on unknown fence {:?}", fence),
        }
    }

    unsafe fn reset_fence(&self, fence: vk::Fence) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::ResetFence(fence));
        state.fail(FailPoint::FenceReset)?;
        match state.fences.get_mut(&fence) {
            Some(FenceState::Pending) => {
                panic!("reset fence {:?} while its work is pending", fence)
            }
            Some(current) => *current = FenceState::Unsignaled,
            None => panic!("reset unknown fence {:?}", fence),
        }
        Ok(())
    }

    unsafe fn destroy_fence(&self, fence: vk::Fence) {
        let mut state = self.state();
        state.calls.push(Call::DestroyFence(fence));
        assert_ne!(
            state.fences.remove(&fence),
            Some(FenceState::Pending),
            "destroyed fence {:?} while its work is pending",
            fence
        );
        state.release(fence.as_raw(), "fence");
    }

    unsafe fn create_semaphore(&self) -> VkResult<vk::Semaphore> {
        let mut state = self.state();
        state.fail(FailPoint::SemaphoreCreation)?;
        let semaphore = vk::Semaphore::from_raw(state.create_handle());
        state.semaphores.insert(semaphore, false);
        state.calls.push(Call::CreateSemaphore(semaphore));
        Ok(semaphore)
    }

    unsafe fn destroy_semaphore(&self, semaphore: vk::Semaphore) {
        let mut state = self.state();
        state.calls.push(Call::DestroySemaphore(semaphore));
        state.semaphores.remove(&semaphore);
        state.release(semaphore.as_raw(), "semaphore");
    }

    unsafe fn create_command_pool(&self) -> VkResult<vk::CommandPool> {
        let mut state = self.state();
        state.fail(FailPoint::CommandPoolCreation)?;
        let pool = vk::CommandPool::from_raw(state.create_handle());
        state.pools.insert(pool, vec![]);
        state.calls.push(Call::CreateCommandPool(pool));
        Ok(pool)
    }

    unsafe fn allocate_command_buffer(
        &self,
        pool: vk::CommandPool,
    ) -> VkResult<vk::CommandBuffer> {
        let mut state = self.state();
        state.fail(FailPoint::CommandBufferAllocation)?;
        state.require_alive(pool.as_raw(), "command pool");
        let command_buffer =
            vk::CommandBuffer::from_raw(state.create_handle());
        state
            .command_buffers
            .insert(command_buffer, BufferState::Initial);
        state.pools.entry(pool).or_default().push(command_buffer);
        state.calls.push(Call::AllocateCommandBuffer(command_buffer));
        Ok(command_buffer)
    }

    unsafe fn destroy_command_pool(&self, pool: vk::CommandPool) {
        let mut state = self.state();
        state.calls.push(Call::DestroyCommandPool(pool));
        for command_buffer in state.pools.remove(&pool).unwrap_or_default() {
            assert_ne!(
                state.command_buffers.remove(&command_buffer),
                Some(BufferState::Pending),
                "freed command buffer {:?} while it is pending",
                command_buffer
            );
            state.release(command_buffer.as_raw(), "command buffer");
        }
        state.release(pool.as_raw(), "command pool");
    }

    unsafe fn reset_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::ResetCommandBuffer(command_buffer));
        state.fail(FailPoint::ResetCommandBuffer)?;
        assert_ne!(
            state.buffer_state(command_buffer),
            BufferState::Pending,
            "reset command buffer {:?} while it is pending",
            command_buffer
        );
        state
            .command_buffers
            .insert(command_buffer, BufferState::Initial);
        Ok(())
    }

    unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::BeginCommandBuffer(command_buffer));
        state.fail(FailPoint::BeginCommandBuffer)?;
        assert_eq!(
            state.buffer_state(command_buffer),
            BufferState::Initial,
            "began command buffer {:?} without resetting it",
            command_buffer
        );
        state
            .command_buffers
            .insert(command_buffer, BufferState::Recording);
        Ok(())
    }

    unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::EndCommandBuffer(command_buffer));
        state.fail(FailPoint::EndCommandBuffer)?;
        state.require_recording(command_buffer);
        state
            .command_buffers
            .insert(command_buffer, BufferState::Executable);
        Ok(())
    }

    unsafe fn cmd_begin_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
        begin: &RenderPassBegin,
    ) {
        let mut state = self.state();
        state
            .calls
            .push(Call::BeginRenderPass(command_buffer, *begin));
        state.require_recording(command_buffer);
        state.require_alive(begin.render_pass.as_raw(), "render pass");
        state.require_alive(begin.framebuffer.as_raw(), "framebuffer");
    }

    unsafe fn cmd_bind_pipeline(
        &self,
        command_buffer: vk::CommandBuffer,
        pipeline: vk::Pipeline,
    ) {
        let mut state = self.state();
        state.calls.push(Call::BindPipeline(command_buffer, pipeline));
        state.require_recording(command_buffer);
        state.require_alive(pipeline.as_raw(), "pipeline");
    }

    unsafe fn cmd_bind_vertex_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        buffer: vk::Buffer,
    ) {
        let mut state = self.state();
        state.calls.push(Call::BindVertexBuffer(command_buffer, buffer));
        state.require_recording(command_buffer);
        state.require_alive(buffer.as_raw(), "vertex buffer");
    }

    unsafe fn cmd_draw(
        &self,
        command_buffer: vk::CommandBuffer,
        vertex_count: u32,
        instance_count: u32,
    ) {
        let mut state = self.state();
        state.calls.push(Call::Draw(
            command_buffer,
            vertex_count,
            instance_count,
        ));
        state.require_recording(command_buffer);
    }

    unsafe fn cmd_end_render_pass(&self, command_buffer: vk::CommandBuffer) {
        let mut state = self.state();
        state.calls.push(Call::EndRenderPass(command_buffer));
        state.require_recording(command_buffer);
    }

    unsafe fn submit_graphics(&self, submission: &Submission) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::Submit(*submission));
        state.fail(FailPoint::Submit)?;

        assert_eq!(
            state.buffer_state(submission.command_buffer),
            BufferState::Executable,
            "submitted command buffer {:?} which is not executable",
            submission.command_buffer
        );
        assert_eq!(
            state.fences.get(&submission.signal_fence),
            Some(&FenceState::Unsignaled),
            "submitted with fence {:?} which was not reset",
            submission.signal_fence
        );
        assert_eq!(
            state.semaphores.insert(submission.wait_semaphore, false),
            Some(true),
            "submission waits on semaphore {:?} which nothing signaled",
            submission.wait_semaphore
        );
        assert_eq!(
            state.semaphores.insert(submission.signal_semaphore, true),
            Some(false),
            "submission signals semaphore {:?} which is already signaled",
            submission.signal_semaphore
        );

        state
            .command_buffers
            .insert(submission.command_buffer, BufferState::Pending);
        state
            .fences
            .insert(submission.signal_fence, FenceState::Pending);
        state.pending.push(*submission);
        Ok(())
    }

    unsafe fn wait_idle(&self) -> VkResult<()> {
        let mut state = self.state();
        state.calls.push(Call::WaitIdle);
        state.fail(FailPoint::WaitIdle)?;
        let count = state.pending.len();
        state.complete(count);
        Ok(())
    }

    unsafe fn surface_support(&self) -> VkResult<SurfaceSupport> {
        let mut state = self.state();
        state.calls.push(Call::SurfaceSupport);
        state.fail(FailPoint::SurfaceSupport)?;
        if let Some(extent) = state.queued_extents.pop_front() {
            state.support.capabilities.current_extent = extent;
        }
        Ok(state.support.clone())
    }

    unsafe fn create_swapchain(
        &self,
        request: &SwapchainRequest,
    ) -> VkResult<vk::SwapchainKHR> {
        let mut state = self.state();
        state.fail(FailPoint::SwapchainCreation)?;
        assert!(
            request.extent.width > 0 && request.extent.height > 0,
            "requested a swapchain with a zero-area extent {:?}",
            request.extent
        );
        let swapchain = vk::SwapchainKHR::from_raw(state.create_handle());
        let images = (0..request.min_image_count)
            .map(|_| vk::Image::from_raw(state.create_handle()))
            .collect();
        state.swapchains.insert(
            swapchain,
            FakeSwapchain {
                images,
                acquired: HashSet::new(),
                next_index: 0,
            },
        );
        state.calls.push(Call::CreateSwapchain(swapchain, *request));
        Ok(swapchain)
    }

    unsafe fn swapchain_images(
        &self,
        swapchain: vk::SwapchainKHR,
    ) -> VkResult<Vec<vk::Image>> {
        let state = self.state();
        match state.swapchains.get(&swapchain) {
            Some(chain) => Ok(chain.images.clone()),
            None => panic!("unknown swapchain {:?}", swapchain),
        }
    }

    unsafe fn destroy_swapchain(&self, swapchain: vk::SwapchainKHR) {
        let mut state = self.state();
        state.calls.push(Call::DestroySwapchain(swapchain));
        state.require_idle("swapchain");
        let chain = match state.swapchains.remove(&swapchain) {
            Some(chain) => chain,
            None => panic!("destroyed unknown swapchain {:?}", swapchain),
        };
        for image in chain.images {
            state.release(image.as_raw(), "swapchain image");
        }
        state.release(swapchain.as_raw(), "swapchain");
    }

    unsafe fn acquire_next_image(
        &self,
        swapchain: vk::SwapchainKHR,
        signal_semaphore: vk::Semaphore,
    ) -> VkResult<(u32, bool)> {
        let mut state = self.state();
        state.calls.push(Call::Acquire(swapchain));
        state.require_alive(swapchain.as_raw(), "swapchain");
        let suboptimal = match state
            .acquire_script
            .pop_front()
            .unwrap_or(Scripted::Optimal)
        {
            Scripted::Optimal => false,
            Scripted::Suboptimal => true,
            Scripted::OutOfDate => return Err(vk::Result::ERROR_OUT_OF_DATE_KHR),
            Scripted::Fail(result) => return Err(result),
        };

        assert_eq!(
            state.semaphores.insert(signal_semaphore, true),
            Some(false),
            "acquire signals semaphore {:?} which is already signaled",
            signal_semaphore
        );

        let chain = match state.swapchains.get_mut(&swapchain) {
            Some(chain) => chain,
            None => panic!("unknown swapchain {:?}", swapchain),
        };
        let image_count = chain.images.len() as u32;
        let index = (0..image_count)
            .map(|offset| (chain.next_index + offset) % image_count)
            .find(|index| !chain.acquired.contains(index))
            .unwrap_or_else(|| {
                panic!("every image is acquired, acquire would block forever")
            });
        chain.acquired.insert(index);
        chain.next_index = (index + 1) % image_count;
        Ok((index, suboptimal))
    }

    unsafe fn queue_present(
        &self,
        swapchain: vk::SwapchainKHR,
        image_index: u32,
        wait_semaphore: vk::Semaphore,
    ) -> VkResult<bool> {
        let mut state = self.state();
        state.calls.push(Call::Present(swapchain, image_index));
        let chain = match state.swapchains.get_mut(&swapchain) {
            Some(chain) => chain,
            None => panic!("presenting to unknown swapchain {:?}", swapchain),
        };
        assert!(
            chain.acquired.remove(&image_index),
            "presented image {} which was never acquired",
            image_index
        );
        assert_eq!(
            state.semaphores.insert(wait_semaphore, false),
            Some(true),
            "present waits on semaphore {:?} which nothing signaled",
            wait_semaphore
        );
        match state
            .present_script
            .pop_front()
            .unwrap_or(Scripted::Optimal)
        {
            Scripted::Optimal => Ok(false),
            Scripted::Suboptimal => Ok(true),
            Scripted::OutOfDate => Err(vk::Result::ERROR_OUT_OF_DATE_KHR),
            Scripted::Fail(result) => Err(result),
        }
    }

    unsafe fn create_image_view(
        &self,
        image: vk::Image,
        _format: vk::Format,
    ) -> VkResult<vk::ImageView> {
        let mut state = self.state();
        state.fail(FailPoint::ImageViewCreation)?;
        state.require_alive(image.as_raw(), "image");
        let view = vk::ImageView::from_raw(state.create_handle());
        state.calls.push(Call::CreateImageView(view));
        Ok(view)
    }

    unsafe fn destroy_image_view(&self, view: vk::ImageView) {
        let mut state = self.state();
        state.calls.push(Call::DestroyImageView(view));
        state.require_idle("image view");
        state.release(view.as_raw(), "image view");
    }

    unsafe fn create_render_pass(
        &self,
        _descriptor: &RenderPassDescriptor,
    ) -> VkResult<vk::RenderPass> {
        let mut state = self.state();
        state.fail(FailPoint::RenderPassCreation)?;
        let render_pass = vk::RenderPass::from_raw(state.create_handle());
        state.calls.push(Call::CreateRenderPass(render_pass));
        Ok(render_pass)
    }

    unsafe fn destroy_render_pass(&self, render_pass: vk::RenderPass) {
        let mut state = self.state();
        state.calls.push(Call::DestroyRenderPass(render_pass));
        state.require_idle("render pass");
        state.release(render_pass.as_raw(), "render pass");
    }

    unsafe fn create_framebuffer(
        &self,
        render_pass: vk::RenderPass,
        view: vk::ImageView,
        _extent: vk::Extent2D,
    ) -> VkResult<vk::Framebuffer> {
        let mut state = self.state();
        state.fail(FailPoint::FramebufferCreation)?;
        state.require_alive(render_pass.as_raw(), "render pass");
        state.require_alive(view.as_raw(), "image view");
        let framebuffer = vk::Framebuffer::from_raw(state.create_handle());
        state.calls.push(Call::CreateFramebuffer(framebuffer));
        Ok(framebuffer)
    }

    unsafe fn destroy_framebuffer(&self, framebuffer: vk::Framebuffer) {
        let mut state = self.state();
        state.calls.push(Call::DestroyFramebuffer(framebuffer));
        state.require_idle("framebuffer");
        state.release(framebuffer.as_raw(), "framebuffer");
    }

    fn name_object(&self, _object_type: vk::ObjectType, raw: u64, name: &str) {
        self.state().names.insert(raw, name.to_owned());
    }
}
