use std::sync::mpsc::Receiver;

use ash::vk;
use glfw::{Action, Key, WindowEvent};

use crate::{
    glfw_window::{WindowError, WindowShim},
    vulkan::{Instance, RenderDevice, WindowSurface},
};

/// GLFW uses a Receiver for accepting window events. This type alias is more
/// convenient to write/read than the full name.
pub type EventReceiver = Receiver<(f64, WindowEvent)>;

/// All of the GLFW resources which are required for managing a single-windowed
/// GLFW application.
pub struct GlfwWindow {
    /// The glfw library instance
    pub glfw: glfw::Glfw,

    /// The glfw window
    pub window: glfw::Window,

    event_receiver: EventReceiver,

    /// Set by framebuffer resize events, cleared by the frame loop.
    resized: bool,
}

impl GlfwWindow {
    /// Initialize the GLFW library and create a resizable window without a
    /// client API.
    pub fn new(
        window_title: &str,
        (width, height): (u32, u32),
    ) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

        if !glfw.vulkan_supported() {
            return Err(WindowError::VulkanNotSupported);
        }

        // Tell GLFW not to bother setting up the OpenGL API
        glfw.window_hint(glfw::WindowHint::ClientApi(
            glfw::ClientApiHint::NoApi,
        ));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, event_receiver) = glfw
            .create_window(
                width,
                height,
                window_title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::WindowCreateFailed)?;
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(Self {
            glfw,
            window,
            event_receiver,
            resized: false,
        })
    }

    /// Create the Vulkan instance, the window's surface, and the render
    /// device which presents to it.
    pub fn create_render_device(
        &self,
        enable_validation: bool,
    ) -> Result<RenderDevice, WindowError> {
        let required_extensions = self
            .glfw
            .get_required_instance_extensions()
            .ok_or(WindowError::RequiredExtensionsUnavailable)?;
        let instance = Instance::new(&required_extensions, enable_validation)?;

        let mut surface_handle = vk::SurfaceKHR::null();
        let result = self.window.create_window_surface(
            instance.ash.handle(),
            std::ptr::null(),
            &mut surface_handle,
        );
        if result != vk::Result::SUCCESS {
            return Err(WindowError::UnableToCreateSurface(result));
        }

        let window_surface = WindowSurface::new(&instance, surface_handle);

        Ok(RenderDevice::new(instance, window_surface)?)
    }

    fn drain_events(&mut self) {
        for (_, event) in glfw::flush_messages(&self.event_receiver) {
            match event {
                WindowEvent::FramebufferSize(width, height) => {
                    log::trace!("framebuffer resized to {}x{}", width, height);
                    self.resized = true;
                }
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window.set_should_close(true);
                }
                _ => (),
            }
        }
    }
}

impl WindowShim for GlfwWindow {
    fn poll_events(&mut self) {
        self.glfw.poll_events();
        self.drain_events();
    }

    fn wait_events(&mut self) {
        self.glfw.wait_events();
        self.drain_events();
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn check_and_clear_resize(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}
