use std::{path::Path, sync::Arc};

use ash::vk;

use crate::vulkan::{errors::ResourceCreationError, RenderDevice};

const SPIRV_MAGIC: u32 = 0x0723_0203;

/// An owned Vulkan shader module.
pub struct ShaderModule {
    raw: vk::ShaderModule,
    render_device: Arc<RenderDevice>,
}

impl ShaderModule {
    /// Read compiled SPIR-V from disk and build a shader module.
    pub fn from_spirv_file(
        render_device: Arc<RenderDevice>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ResourceCreationError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|error| {
            ResourceCreationError::UnableToReadShader(path.to_owned(), error)
        })?;
        log::debug!("Loaded {} bytes of SPIR-V from {:?}", bytes.len(), path);
        Self::from_spirv_bytes(render_device, &bytes)
    }

    /// Build a new shader module using compiled SPIR-V shader source code.
    pub fn from_spirv_bytes(
        render_device: Arc<RenderDevice>,
        source_bytes: &[u8],
    ) -> Result<Self, ResourceCreationError> {
        let source_words = copy_to_u32(source_bytes)?;
        let create_info = vk::ShaderModuleCreateInfo {
            p_code: source_words.as_ptr(),
            code_size: source_words.len() * std::mem::size_of::<u32>(),
            ..Default::default()
        };
        let raw = unsafe {
            render_device
                .logical_device()
                .create_shader_module(&create_info, None)
                .map_err(ResourceCreationError::UnableToCreateShaderModule)?
        };
        Ok(Self { raw, render_device })
    }

    /// The raw Vulkan shader module handle.
    pub fn raw(&self) -> vk::ShaderModule {
        self.raw
    }
}

impl Drop for ShaderModule {
    /// # Safety
    ///
    /// The application must ensure that the shader module is not in use when
    /// it is dropped.
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .logical_device()
                .destroy_shader_module(self.raw, None);
        }
    }
}

/// Copy a byte slice into properly-aligned little-endian u32 words.
///
/// The bytes must be a whole number of words and start with the SPIR-V magic
/// number.
fn copy_to_u32(bytes: &[u8]) -> Result<Vec<u32>, ResourceCreationError> {
    const U32_SIZE: usize = std::mem::size_of::<u32>();

    if bytes.is_empty() || bytes.len() % U32_SIZE != 0 {
        return Err(ResourceCreationError::InvalidShaderBytecode(format!(
            "{} bytes is not a whole number of 32-bit words",
            bytes.len()
        )));
    }

    let words: Vec<u32> = bytes
        .chunks_exact(U32_SIZE)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    if words[0] != SPIRV_MAGIC {
        return Err(ResourceCreationError::InvalidShaderBytecode(format!(
            "bad magic number {:#010x}",
            words[0]
        )));
    }

    Ok(words)
}
