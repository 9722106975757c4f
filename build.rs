use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Error, Result};

fn output_file_for_shader_file(shader_file_path: &Path) -> Result<PathBuf> {
    let parent = shader_file_path.parent().with_context(|| {
        format!("unable to get parent dir for shader at {:?}", shader_file_path)
    })?;
    let shader_file_name = shader_file_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| {
            format!(
                "Unable to get the file name for shader at path {:#?}",
                shader_file_path,
            )
        })?;
    Ok(parent.join(format!("{}.spv", shader_file_name)))
}

fn needs_rebuild(shader_file_path: &Path, output_path: &Path) -> Result<bool> {
    if !output_path.try_exists()? {
        return Ok(true);
    }

    let shader_last_modified_time =
        std::fs::metadata(shader_file_path)?.modified()?;
    let output_last_modified_time =
        std::fs::metadata(output_path)?.modified()?;

    Ok(shader_last_modified_time > output_last_modified_time)
}

fn compile_shader(shader_file_path: &Path) -> Result<()> {
    println!("cargo:rerun-if-changed={}", shader_file_path.display());

    let output_path = output_file_for_shader_file(shader_file_path)?;
    if !needs_rebuild(shader_file_path, &output_path).unwrap_or(true) {
        return Ok(());
    }

    let output = match Command::new("glslc")
        .arg(shader_file_path)
        .arg("-o")
        .arg(&output_path)
        .arg("--target-env=vulkan1.0")
        .output()
    {
        Ok(output) => output,
        Err(error) => {
            // Existing bytecode is still usable, so a missing compiler is
            // only worth a warning.
            println!(
                "cargo:warning=glslc is unavailable ({}), {} was not compiled",
                error,
                shader_file_path.display()
            );
            return Ok(());
        }
    };

    if !output.status.success() {
        eprintln!("{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        return Err(Error::msg(format!(
            "Error running glslc for shader at {:#?}",
            shader_file_path,
        )));
    }

    println!(
        "cargo:warning={} -> {}",
        shader_file_path.display(),
        output_path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let all_paths = glob::glob("./shaders/*.vert")?
        .chain(glob::glob("./shaders/*.frag")?);
    for path_entry in all_paths {
        compile_shader(path_entry?.as_path())?;
    }
    Ok(())
}
