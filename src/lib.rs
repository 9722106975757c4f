//! A single-triangle Vulkan renderer.
//!
//! The interesting parts live in [presentation] and [frame_pipeline]: the
//! swapchain lifecycle and the per-frame acquire, record, submit, present
//! protocol which survives window resizes and minimization.

pub mod application;
pub mod config;
pub mod frame_pipeline;
pub mod glfw_window;
pub mod logging;
pub mod presentation;
pub mod triangle;
pub mod vulkan;

#[cfg(test)]
mod testing;
