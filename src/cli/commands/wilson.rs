//! Wilson command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::WilsonArgs;
use crate::stats::wilson_score;

pub fn run_wilson(args: WilsonArgs, level: LogLevel) -> Result<(), String> {
    if !(0.0..=1.0).contains(&args.p) {
        return Err(format!("Proportion must be in [0, 1], got {}", args.p));
    }

    let ci = wilson_score(args.p, args.n);
    log(
        level,
        LogLevel::Verbose,
        &format!("  p = {}, n = {}", args.p, args.n),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Interval: [{:.6}, {:.6}]",
            (args.p - ci).max(0.0),
            (args.p + ci).min(1.0)
        ),
    );
    println!("{ci:.6}");
    Ok(())
}
