// ============================================================================
// vidproc-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Unset options keep the values from
// CoreConfig::default().

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use vidproc_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .ffprobe_path(PathBuf::from("/usr/local/bin/ffprobe"))
///     .temp_dir(PathBuf::from("/tmp"))
///     .build();
/// assert_eq!(config.temp_dir, Some(PathBuf::from("/tmp")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ffmpeg binary used for burning and concatenation.
    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.config.ffmpeg_path = Some(path);
        self
    }

    /// Sets the ffprobe binary used for inspection.
    pub fn ffprobe_path(mut self, path: PathBuf) -> Self {
        self.config.ffprobe_path = Some(path);
        self
    }

    /// Sets the temporary files directory.
    pub fn temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.config.temp_dir = Some(temp_dir);
        self
    }

    /// Sets whether existing output files may be replaced.
    pub fn overwrite_output(mut self, overwrite: bool) -> Self {
        self.config.overwrite_output = overwrite;
        self
    }

    /// Builds the CoreConfig instance.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}
