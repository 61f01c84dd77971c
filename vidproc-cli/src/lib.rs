// vidproc-cli/src/lib.rs
//
// Library portion of the vidproc CLI application.
// Contains argument definitions, configuration and command dispatch.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

use std::io::Write;

use vidproc_core::{CoreConfig, CoreConfigBuilder, VideoProcessor};

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands};
pub use error::{CliResult, exit_code};

/// Builds the core configuration from the global flags.
pub fn core_config(cli: &Cli) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new().overwrite_output(!cli.no_overwrite);
    if let Some(path) = &cli.ffmpeg_path {
        builder = builder.ffmpeg_path(path.clone());
    }
    if let Some(path) = &cli.ffprobe_path {
        builder = builder.ffprobe_path(path.clone());
    }
    if let Some(dir) = &cli.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

/// Runs the parsed command, writing results to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let config = core_config(&cli)?;
    log::debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Info(args) => {
            commands::inspect::run_info(&VideoProcessor::with_config(args.input, config), args.json, out)
        }
        Commands::Codec(args) => {
            commands::inspect::run_codec(&VideoProcessor::with_config(args.input, config), args.stream, out)
        }
        Commands::Bitrate(args) => {
            commands::inspect::run_bitrate(&VideoProcessor::with_config(args.input, config), args.stream, out)
        }
        Commands::Dimensions(args) => {
            commands::inspect::run_dimensions(&VideoProcessor::with_config(args.input, config), out)
        }
        Commands::SampleRate(args) => {
            commands::inspect::run_sample_rate(&VideoProcessor::with_config(args.input, config), out)
        }
        Commands::FrameRate(args) => {
            commands::inspect::run_frame_rate(&VideoProcessor::with_config(args.input, config), out)
        }
        Commands::Duration(args) => {
            commands::inspect::run_duration(&VideoProcessor::with_config(args.input, config), out)
        }
        Commands::BurnSubtitles(args) => commands::edit::run_burn_subtitles(
            &VideoProcessor::with_config(args.input, config),
            &args.subtitles,
            &args.output,
            out,
        ),
        Commands::Concat(args) => {
            // Concatenation has no single source; the first input stands in.
            let source = args.inputs.first().cloned().unwrap_or_default();
            let processor = VideoProcessor::with_config(source, config);
            commands::edit::run_concat(&processor, &args.inputs, &args.output, out)
        }
    }
}
