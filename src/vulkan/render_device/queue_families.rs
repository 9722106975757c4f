use ash::vk;
use indoc::indoc;

use crate::vulkan::{
    render_device::{GpuQueue, QueueSelectionError},
    WindowSurface,
};

const QUEUE_PRIORITY: [f32; 1] = [1.0];

/// The indices for all of the required queue families for this application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueueFamilies {
    pub graphics_family_index: u32,
    pub present_family_index: u32,
}

impl QueueFamilies {
    /// Find the queue family indexes for the queues this application needs.
    pub fn find_for_physical_device(
        instance: &ash::Instance,
        window_surface: &WindowSurface,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Self, QueueSelectionError> {
        let families = unsafe {
            instance.get_physical_device_queue_family_properties(physical_device)
        };
        let present_support: Vec<bool> = (0..families.len() as u32)
            .map(|index| {
                let supported = unsafe {
                    window_surface
                        .supports_queue_family(physical_device, index)
                };
                supported.unwrap_or_else(|error| {
                    // There could be other queues to check.
                    log::warn!(
                        indoc!(
                            "
                            Error checking for surface support
                              - device {:?}
                              - queue family {} [{:?}]
                              - error {:?}"
                        ),
                        physical_device,
                        index,
                        families[index as usize].queue_flags,
                        error
                    );
                    false
                })
            })
            .collect();
        let graphics_flags: Vec<vk::QueueFlags> =
            families.iter().map(|family| family.queue_flags).collect();

        Self::select(&graphics_flags, &present_support)
    }

    /// Pick queue families given each family's flags and present support.
    ///
    /// A family which can do both is preferred so rendering and presentation
    /// share one queue.
    pub fn select(
        family_flags: &[vk::QueueFlags],
        present_support: &[bool],
    ) -> Result<Self, QueueSelectionError> {
        let is_graphics = |index: &usize| {
            family_flags[*index].contains(vk::QueueFlags::GRAPHICS)
        };
        let can_present = |index: &usize| present_support[*index];

        if let Some(index) = (0..family_flags.len())
            .filter(is_graphics)
            .find(can_present)
        {
            return Ok(Self {
                graphics_family_index: index as u32,
                present_family_index: index as u32,
            });
        }

        let graphics_family_index = (0..family_flags.len())
            .find(is_graphics)
            .ok_or(QueueSelectionError::UnableToFindGraphicsQueue)?;
        let present_family_index = (0..present_support.len())
            .find(can_present)
            .ok_or(QueueSelectionError::UnableToFindPresentQueue)?;

        Ok(Self {
            graphics_family_index: graphics_family_index as u32,
            present_family_index: present_family_index as u32,
        })
    }

    /// Create a vector of queue create infos.
    /// Automatically handles the situation where the graphics and present
    /// queue are the same.
    pub fn as_queue_create_infos(&self) -> Vec<vk::DeviceQueueCreateInfo> {
        let mut create_infos = vec![vk::DeviceQueueCreateInfo {
            queue_family_index: self.graphics_family_index,
            p_queue_priorities: QUEUE_PRIORITY.as_ptr(),
            queue_count: 1,
            ..Default::default()
        }];

        if self.graphics_family_index != self.present_family_index {
            create_infos.push(vk::DeviceQueueCreateInfo {
                queue_family_index: self.present_family_index,
                p_queue_priorities: QUEUE_PRIORITY.as_ptr(),
                queue_count: 1,
                ..Default::default()
            });
        }

        create_infos
    }

    /// Get the graphics and present queues from the logical device.
    pub fn get_queues(&self, logical_device: &ash::Device) -> (GpuQueue, GpuQueue) {
        let graphics_queue = GpuQueue::from_raw(
            unsafe { logical_device.get_device_queue(self.graphics_family_index, 0) },
            self.graphics_family_index,
            0,
        );
        let present_queue =
            if self.graphics_family_index == self.present_family_index {
                graphics_queue
            } else {
                GpuQueue::from_raw(
                    unsafe {
                        logical_device
                            .get_device_queue(self.present_family_index, 0)
                    },
                    self.present_family_index,
                    0,
                )
            };
        (graphics_queue, present_queue)
    }
}
