//! Builder that assembles the layered configuration.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Builds a [`Config`] from files, environment and programmatic overrides.
///
/// # Examples
///
/// ```
/// use kitbook::config::{BookingConfig, Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         booking: Some(BookingConfig {
///             max_duration_days: Some(7),
///             privileged_positions: None,
///         }),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_duration_days(), 7);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Creates a builder that reads files from the current directory and
    /// the default data directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start the `kitbook.yaml` search from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Highest-precedence overrides.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Do not read any configuration file.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `KITBOOK_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed, an environment variable
    /// is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                log::debug!("loaded configuration from {}", source.path.display());
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_files_layered_by_precedence() {
        let work = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(
            data.path().join("config.yaml"),
            "booking:\n  max_duration_days: 10\noutput_format: json\n",
        )
        .unwrap();
        fs::write(
            work.path().join("kitbook.yaml"),
            "booking:\n  max_duration_days: 20\n",
        )
        .unwrap();
        fs::write(
            work.path().join("kitbook.local.yaml"),
            "members:\n  olena: [Head]\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_working_dir(work.path())
            .with_data_dir(data.path())
            .build()
            .unwrap();

        assert_eq!(config.max_duration_days(), 20);
        assert_eq!(config.output_format, Some(crate::config::OutputFormat::Json));
        assert_eq!(config.positions_of("olena"), ["Head".to_string()]);
    }

    #[test]
    fn test_overrides_win_and_are_validated() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let work = TempDir::new().unwrap();
        fs::write(
            work.path().join("kitbook.yaml"),
            "booking:\n  max_duration_days: 20\n",
        )
        .unwrap();
        let data = TempDir::new().unwrap();

        std::env::set_var("KITBOOK_MAX_DURATION_DAYS", "5");
        let result = ConfigBuilder::new()
            .with_working_dir(work.path())
            .with_data_dir(data.path())
            .build();
        std::env::remove_var("KITBOOK_MAX_DURATION_DAYS");

        assert_eq!(result.unwrap().max_duration_days(), 5);
    }
}
