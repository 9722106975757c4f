//! Functions for verifying the available Vulkan instance extensions.

use ash::Entry;

use crate::{
    logging::PrettyList,
    vulkan::{ffi::name_from_array, instance::InstanceError},
};

/// Check that each of the provided extensions is available on the current
/// platform.
pub fn check_extensions(
    entry: &Entry,
    required_extensions: &[String],
) -> Result<(), InstanceError> {
    let available_names: Vec<String> = entry
        .enumerate_instance_extension_properties(None)
        .map_err(InstanceError::UnableToListAvailableExtensions)?
        .iter()
        .map(|ext| name_from_array(&ext.extension_name))
        .collect();

    log::debug!("Available extensions: {}", PrettyList(&available_names));

    let missing = missing_names(&available_names, required_extensions);
    if !missing.is_empty() {
        Err(InstanceError::RequiredExtensionsNotFound(missing))
    } else {
        Ok(())
    }
}

/// Every required name which does not appear in the available list.
pub(super) fn missing_names(
    available: &[String],
    required: &[String],
) -> Vec<String> {
    required
        .iter()
        .filter(|name| !available.contains(name))
        .cloned()
        .collect()
}
