mod device_idle;
mod fence;
mod frame_sync;
mod semaphore;

pub use self::{
    device_idle::DeviceIdle,
    fence::{Fence, SignaledFence},
    frame_sync::FrameSync,
    semaphore::Semaphore,
};
