// ============================================================================
// vidproc-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialisation for the CLI
//
// Library code logs through the `log` facade; this is the only place a
// backend is installed. Log output goes to stderr so stdout carries nothing
// but command results.
//
// USAGE:
// - default: warnings and errors only
// - --verbose: debug (ffprobe/ffmpeg command lines, fallbacks)
// - RUST_LOG=...: overrides both, e.g. RUST_LOG=vidproc_core=trace

use log::LevelFilter;
use std::io::Write;

/// Level used when `RUST_LOG` is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initialize the logger for vidproc
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .filter_level(default_level(verbose))
        .target(env_logger::Target::Stderr);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized with level: {}", default_level(verbose));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_enables_debug() {
        assert_eq!(default_level(false), LevelFilter::Warn);
        assert_eq!(default_level(true), LevelFilter::Debug);
    }
}
