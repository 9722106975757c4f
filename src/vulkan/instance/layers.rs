//! Functions for checking supported Vulkan layers.

use ash::Entry;

use crate::{
    logging::PrettyList,
    vulkan::{
        ffi::name_from_array,
        instance::{extensions::missing_names, InstanceError},
    },
};

/// Check that each of the required layers is available on the current platform.
pub fn check_layers(
    entry: &Entry,
    required_layers: &[String],
) -> Result<(), InstanceError> {
    let available_names: Vec<String> = entry
        .enumerate_instance_layer_properties()
        .map_err(InstanceError::UnableToListAvailableLayers)?
        .iter()
        .map(|layer| name_from_array(&layer.layer_name))
        .collect();

    log::debug!("Available layers: {}", PrettyList(&available_names));

    let missing = missing_names(&available_names, required_layers);
    if !missing.is_empty() {
        Err(InstanceError::RequiredLayersNotFound(missing))
    } else {
        Ok(())
    }
}
