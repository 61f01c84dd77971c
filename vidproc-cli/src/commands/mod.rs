//! Command implementations for the CLI.
//!
//! Each function runs one subcommand against a [`VideoProcessor`] and writes
//! its result to the given writer.
//!
//! [`VideoProcessor`]: vidproc_core::VideoProcessor

/// `info`, `codec`, `bitrate` and the other single-property queries.
pub mod inspect;

/// `burn-subtitles` and `concat`.
pub mod edit;
