//! Toolbox configuration schema

use crate::quant::QFormat;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Deserialize a bool that may also be given as the string "true"/"false"
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

/// Complete toolbox configuration
///
/// Every section is optional in the YAML file.
///
/// ```yaml
/// paths:
///   working_dir: ./runs/mnist
/// output:
///   overwrite: "true"
/// quantization:
///   format: Q2.6
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolboxConfig {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub quantization: Option<QuantSpec>,
}

/// Filesystem locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory that relative model, output and helper paths resolve against
    pub working_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
        }
    }
}

/// Output file policy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Replace existing files without asking
    #[serde(deserialize_with = "deserialize_bool_lenient")]
    pub overwrite: bool,
}

/// Default quantization applied by the `quantize` command
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuantSpec {
    /// Fixed-point format for reduce-precision quantization
    #[serde(default)]
    pub format: Option<QFormat>,
    /// Binarize with levels `±h` instead of reducing precision
    #[serde(default)]
    pub binarize_h: Option<f32>,
}
