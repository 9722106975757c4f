use std::collections::VecDeque;

use crate::glfw_window::WindowShim;

/// A window whose size changes only when a test says so.
///
/// Sizes passed to [FakeWindow::queue_sizes] are applied one per
/// `wait_events` call, as if the platform delivered one resize per wait.
#[derive(Debug)]
pub struct FakeWindow {
    size: (u32, u32),
    queued_sizes: VecDeque<(u32, u32)>,
    resized: bool,
    closed: bool,
    close_after_polls: Option<usize>,
    polls: usize,
    waits: usize,
}

impl FakeWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            queued_sizes: VecDeque::new(),
            resized: false,
            closed: false,
            close_after_polls: None,
            polls: 0,
            waits: 0,
        }
    }

    /// Change the framebuffer size and raise the resize notification.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resized = true;
    }

    pub fn queue_sizes(&mut self, sizes: &[(u32, u32)]) {
        self.queued_sizes.extend(sizes.iter().copied());
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Request close once `polls` calls to `poll_events` have been made.
    pub fn close_after_polls(&mut self, polls: usize) {
        self.close_after_polls = Some(polls);
    }

    pub fn wait_count(&self) -> usize {
        self.waits
    }

    pub fn poll_count(&self) -> usize {
        self.polls
    }
}

impl WindowShim for FakeWindow {
    fn poll_events(&mut self) {
        self.polls += 1;
        if self.close_after_polls == Some(self.polls) {
            self.closed = true;
        }
    }

    fn wait_events(&mut self) {
        self.waits += 1;
        let (width, height) = self
            .queued_sizes
            .pop_front()
            .expect("wait_events with nothing queued would block forever");
        self.resize(width, height);
    }

    fn should_close(&self) -> bool {
        self.closed
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn check_and_clear_resize(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}
