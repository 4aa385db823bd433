//! Configuration loading, validation and output gating

use super::schema::{OutputConfig, ToolboxConfig};
use crate::error::{Error, Result};
use crate::io::confirm_overwrite;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// Load and validate a toolbox configuration from a YAML file
///
/// ```no_run
/// use snnkit::config::load_config;
///
/// let config = load_config("snnkit.yaml")?;
/// println!("working dir: {}", config.paths.working_dir.display());
/// # Ok::<(), snnkit::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ToolboxConfig> {
    let yaml_content = fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    let config: ToolboxConfig = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;

    validate_config(&config).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;
    Ok(config)
}

/// Check semantic constraints serde cannot express
pub fn validate_config(config: &ToolboxConfig) -> std::result::Result<(), String> {
    if config.paths.working_dir.as_os_str().is_empty() {
        return Err("paths.working_dir must not be empty".to_string());
    }

    if let Some(quant) = &config.quantization {
        if let Some(h) = quant.binarize_h {
            if !h.is_finite() || h == 0.0 {
                return Err(format!(
                    "quantization.binarize_h must be finite and non-zero, got {h}"
                ));
            }
        }
    }

    Ok(())
}

/// Decide whether `path` may be written, prompting on stdin when it exists
pub fn should_write(path: &Path, output: &OutputConfig) -> Result<bool> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    should_write_with(path, output, &mut stdin.lock(), &mut stdout.lock())
}

/// [`should_write`] with explicit prompt streams
pub fn should_write_with<R: BufRead, W: Write>(
    path: &Path,
    output: &OutputConfig,
    input: &mut R,
    prompt: &mut W,
) -> Result<bool> {
    if output.overwrite {
        return Ok(true);
    }

    let confirmed = confirm_overwrite(path, input, prompt)?;
    if !confirmed {
        tracing::warn!(path = %path.display(), "overwrite cancelled");
    }
    Ok(confirmed)
}
