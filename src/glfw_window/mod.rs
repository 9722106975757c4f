//! The window and its input events.

mod glfw_window;
mod window_error;

pub use self::{
    glfw_window::{EventReceiver, GlfwWindow},
    window_error::WindowError,
};

/// The window operations the frame loop depends on.
pub trait WindowShim {
    /// Process pending window events without blocking.
    fn poll_events(&mut self);

    /// Block until at least one window event arrives, then process it.
    fn wait_events(&mut self);

    fn should_close(&self) -> bool;

    /// The framebuffer size in pixels. Zero in either dimension while the
    /// window is minimized.
    fn framebuffer_size(&self) -> (u32, u32);

    /// True if the framebuffer was resized since the last call.
    fn check_and_clear_resize(&mut self) -> bool;
}
