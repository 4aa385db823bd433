//! Range command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::RangeArgs;
use crate::stats::{get_range, get_range_with_rng};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn run_range(args: RangeArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  {} samples in [{}, {}) using {}",
            args.num, args.start, args.stop, args.method
        ),
    );

    let values = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            get_range_with_rng(args.start, args.stop, args.num, args.method, &mut rng)
        }
        None => get_range(args.start, args.stop, args.num, args.method),
    }
    .map_err(|e| e.to_string())?;

    for value in values {
        println!("{value}");
    }
    Ok(())
}
