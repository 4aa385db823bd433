//! Quantize command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{should_write, OutputConfig, QuantizeArgs, ToolboxConfig};
use crate::helpers::get_abs_path;
use crate::io::{load_weights, save_weights, to_json, ExportValue};
use crate::quant::{QFormat, QuantBuffer};
use ndarray::ArrayD;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Transform applied to every F32 tensor
#[derive(Debug, Clone, Copy, PartialEq)]
enum QuantPlan {
    Reduce(QFormat),
    Binarize {
        h: f32,
        stochastic: bool,
        seed: Option<u64>,
    },
}

impl QuantPlan {
    fn describe(&self) -> String {
        match self {
            QuantPlan::Reduce(format) => format!("fixed-point {format}"),
            QuantPlan::Binarize {
                h,
                stochastic: false,
                ..
            } => format!("binary ±{h}"),
            QuantPlan::Binarize { h, .. } => format!("stochastic binary ±{h}"),
        }
    }
}

/// Command-line flags take precedence over the `quantization` config section.
fn resolve_plan(args: &QuantizeArgs, config: &ToolboxConfig) -> Result<QuantPlan, String> {
    let defaults = config.quantization.clone().unwrap_or_default();

    // An explicit --format wins over a configured binarization level
    let binarize_h = match (args.binarize, args.format) {
        (Some(h), _) => Some(h),
        (None, None) => defaults.binarize_h,
        (None, Some(_)) => None,
    };

    if let Some(h) = binarize_h {
        if !h.is_finite() || h == 0.0 {
            return Err(format!(
                "Binarization level must be finite and non-zero, got {h}"
            ));
        }
        return Ok(QuantPlan::Binarize {
            h,
            stochastic: args.stochastic,
            seed: args.seed,
        });
    }

    args.format
        .or(defaults.format)
        .map(QuantPlan::Reduce)
        .ok_or_else(|| {
            "No quantization requested: pass --format Qm.f or --binarize H, \
             or set quantization.format in the config"
                .to_string()
        })
}

fn resolve_path(path: &Path, working_dir: &Path) -> Result<PathBuf, String> {
    let (dir, file_name) = get_abs_path(path, working_dir).map_err(|e| e.to_string())?;
    Ok(dir.join(file_name))
}

/// Per-tensor error statistics for the report
struct TensorStats {
    shape: Vec<usize>,
    max_abs_error: f32,
    mean_abs_error: f64,
    saturated: usize,
}

impl TensorStats {
    fn measure(original: &ArrayD<f32>, quantized: &ArrayD<f32>, plan: QuantPlan) -> Self {
        let mut max_abs_error = 0.0f32;
        let mut total = 0.0f64;
        let mut saturated = 0;
        for (&x, &q) in original.iter().zip(quantized.iter()) {
            let err = (x - q).abs();
            max_abs_error = max_abs_error.max(err);
            total += f64::from(err);
            if let QuantPlan::Reduce(format) = plan {
                if !format.in_range(x) {
                    saturated += 1;
                }
            }
        }
        let mean_abs_error = if original.is_empty() {
            0.0
        } else {
            total / original.len() as f64
        };
        Self {
            shape: original.shape().to_vec(),
            max_abs_error,
            mean_abs_error,
            saturated,
        }
    }

    fn to_export(&self) -> ExportValue {
        let mut entry = BTreeMap::new();
        entry.insert("shape".to_string(), ExportValue::from(self.shape.clone()));
        entry.insert(
            "max_abs_error".to_string(),
            ExportValue::from(self.max_abs_error),
        );
        entry.insert(
            "mean_abs_error".to_string(),
            ExportValue::from(self.mean_abs_error),
        );
        entry.insert("saturated".to_string(), ExportValue::from(self.saturated));
        ExportValue::Map(entry)
    }
}

fn quantize_tensors(
    tensors: &BTreeMap<String, ArrayD<f32>>,
    plan: QuantPlan,
) -> BTreeMap<String, ArrayD<f32>> {
    match plan {
        QuantPlan::Reduce(format) => tensors
            .iter()
            .map(|(name, w)| (name.clone(), w.reduce_precision(format)))
            .collect(),
        QuantPlan::Binarize {
            h,
            stochastic: false,
            ..
        } => tensors
            .iter()
            .map(|(name, w)| (name.clone(), w.binarize(h)))
            .collect(),
        QuantPlan::Binarize { h, seed, .. } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            // BTreeMap order keeps the draw sequence stable for a given seed
            tensors
                .iter()
                .map(|(name, w)| (name.clone(), w.binarize_stochastic(h, &mut rng)))
                .collect()
        }
    }
}

fn build_report(
    args: &QuantizeArgs,
    plan: QuantPlan,
    stats: &BTreeMap<String, TensorStats>,
    skipped: &[String],
) -> BTreeMap<String, ExportValue> {
    let mut report = BTreeMap::new();
    report.insert(
        "model".to_string(),
        ExportValue::from(args.model.display().to_string()),
    );
    report.insert(
        "output".to_string(),
        ExportValue::from(args.output.display().to_string()),
    );
    match plan {
        QuantPlan::Reduce(format) => {
            report.insert("method".to_string(), ExportValue::from("reduce_precision"));
            report.insert("format".to_string(), ExportValue::from(format));
        }
        QuantPlan::Binarize {
            h,
            stochastic,
            seed,
        } => {
            report.insert("method".to_string(), ExportValue::from("binarize"));
            report.insert("h".to_string(), ExportValue::from(h));
            report.insert("stochastic".to_string(), ExportValue::from(stochastic));
            report.insert("seed".to_string(), ExportValue::from(seed));
        }
    }
    report.insert(
        "tensors".to_string(),
        ExportValue::Map(
            stats
                .iter()
                .map(|(name, s)| (name.clone(), s.to_export()))
                .collect(),
        ),
    );
    report.insert("skipped".to_string(), ExportValue::from(skipped.to_vec()));
    report
}

fn gate_output(path: &Path, output: &OutputConfig, level: LogLevel) -> Result<bool, String> {
    let ok = should_write(path, output).map_err(|e| format!("Failed to confirm overwrite: {e}"))?;
    if !ok {
        log(
            level,
            LogLevel::Normal,
            &format!("Skipped {} (not overwritten)", path.display()),
        );
    }
    Ok(ok)
}

pub fn run_quantize(
    args: QuantizeArgs,
    config: &ToolboxConfig,
    level: LogLevel,
) -> Result<(), String> {
    let plan = resolve_plan(&args, config)?;
    let working_dir = &config.paths.working_dir;
    let model_path = resolve_path(&args.model, working_dir)?;
    let output_path = resolve_path(&args.output, working_dir)?;
    let output_config = OutputConfig {
        overwrite: config.output.overwrite || args.force,
    };

    log(
        level,
        LogLevel::Normal,
        &format!("Quantizing {} ({})", model_path.display(), plan.describe()),
    );

    let weights = load_weights(&model_path)
        .map_err(|e| format!("Failed to read model {}: {e}", model_path.display()))?;
    for name in &weights.skipped {
        log(level, LogLevel::Verbose, &format!("  Skipping {name} (not F32)"));
    }

    let quantized = quantize_tensors(&weights.tensors, plan);

    let stats: BTreeMap<String, TensorStats> = weights
        .tensors
        .iter()
        .zip(quantized.values())
        .map(|((name, original), q)| (name.clone(), TensorStats::measure(original, q, plan)))
        .collect();
    for (name, s) in &stats {
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  {}: {:?} max error {:.6}, mean error {:.6}, saturated {}",
                name, s.shape, s.max_abs_error, s.mean_abs_error, s.saturated
            ),
        );
    }

    if gate_output(&output_path, &output_config, level)? {
        let mut metadata = HashMap::new();
        metadata.insert("quantization".to_string(), plan.describe());
        save_weights(&quantized, metadata, &output_path)
            .map_err(|e| format!("Failed to write output: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Quantization complete: {} tensors written to {}",
                quantized.len(),
                output_path.display()
            ),
        );
    }

    if let Some(report) = &args.report {
        let report_path = resolve_path(report, working_dir)?;
        if gate_output(&report_path, &output_config, level)? {
            let data = build_report(&args, plan, &stats, &weights.skipped);
            to_json(&data, &report_path).map_err(|e| format!("Failed to write report: {e}"))?;
            log(
                level,
                LogLevel::Normal,
                &format!("  Report: {}", report_path.display()),
            );
        }
    }

    Ok(())
}
