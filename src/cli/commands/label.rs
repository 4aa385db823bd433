//! Label command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::LabelArgs;
use crate::label::extract_label;

pub fn run_label(args: LabelArgs, level: LogLevel) -> Result<(), String> {
    let label = extract_label(&args.label).map_err(|e| e.to_string())?;

    log(level, LogLevel::Verbose, &format!("  Parsed {}", args.label));
    let json =
        serde_json::to_string(&label).map_err(|e| format!("Failed to serialize label: {e}"))?;
    println!("{json}");
    Ok(())
}
