use std::process::ExitCode;

use anyhow::{Context, Result};
use vk_triangle::{application::Application, config::AppConfig, logging};

fn run() -> Result<()> {
    let config =
        AppConfig::from_env().context("Invalid application configuration")?;
    log::debug!("{:#?}", config);
    Application::new(&config)?.run()
}

fn main() -> ExitCode {
    let _logger = match logging::setup() {
        Ok(handle) => Some(handle),
        Err(error) => {
            eprintln!("Unable to set up logging: {:?}", error);
            None
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("Application failed: {:#}", error);
            eprintln!("{:?}", error);
            ExitCode::from(1)
        }
    }
}
