//! Application configuration.
//!
//! Every setting has a default which can be overridden with an environment
//! variable.

use std::path::PathBuf;

use thiserror::Error;

pub const WINDOW_SIZE_VAR: &str = "VK_TRIANGLE_WINDOW_SIZE";
pub const FRAMES_IN_FLIGHT_VAR: &str = "VK_TRIANGLE_FRAMES_IN_FLIGHT";
pub const SHADER_DIR_VAR: &str = "VK_TRIANGLE_SHADER_DIR";
pub const VALIDATION_VAR: &str = "VK_TRIANGLE_VALIDATION";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{} must look like WIDTHxHEIGHT with nonzero sizes, got {:?}", WINDOW_SIZE_VAR, .0)]
    InvalidWindowSize(String),

    #[error("{} must be a whole number of at least 1, got {:?}", FRAMES_IN_FLIGHT_VAR, .0)]
    InvalidFramesInFlight(String),

    #[error("{} must be one of 1/0/true/false/on/off, got {:?}", VALIDATION_VAR, .0)]
    InvalidValidationFlag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub window_title: String,

    /// The initial window size in screen coordinates.
    pub window_size: (u32, u32),

    /// How many frames can be recorded while earlier frames are still on
    /// the GPU.
    pub frames_in_flight: usize,

    /// The directory holding the compiled SPIR-V shaders.
    pub shader_dir: PathBuf,

    /// Enable the Khronos validation layer and forward its messages to the
    /// log.
    pub enable_validation: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Vulkan Triangle".to_owned(),
            window_size: (800, 600),
            frames_in_flight: 2,
            shader_dir: PathBuf::from("shaders"),
            enable_validation: cfg!(debug_assertions),
        }
    }
}

impl AppConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which returns the value of a variable
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(WINDOW_SIZE_VAR) {
            config.window_size = parse_window_size(&raw)?;
        }
        if let Some(raw) = lookup(FRAMES_IN_FLIGHT_VAR) {
            config.frames_in_flight = parse_frames_in_flight(&raw)?;
        }
        if let Some(raw) = lookup(SHADER_DIR_VAR) {
            config.shader_dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup(VALIDATION_VAR) {
            config.enable_validation = parse_flag(&raw)?;
        }
        Ok(config)
    }
}

fn parse_window_size(raw: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidWindowSize(raw.to_owned());
    let (width, height) = raw
        .trim()
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

fn parse_frames_in_flight(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(ConfigError::InvalidFramesInFlight(raw.to_owned())),
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValidationFlag(raw.to_owned())),
    }
}
