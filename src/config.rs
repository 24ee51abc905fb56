//! Centralized configuration management for formgrid

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::models::DisplayMode;

pub const MIN_CELL_WIDTH: usize = 4;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where drafts are created by default
    pub draft_dir: PathBuf,
    /// Directory receiving submitted forms
    pub submission_dir: PathBuf,
    /// Log file written by both binaries
    pub log_file: PathBuf,
    /// Start in print mode instead of edit mode
    pub print_mode: bool,
    /// Widest a cell may be in text output before it is truncated
    pub max_cell_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            draft_dir: "./drafts".into(),
            submission_dir: "./submissions".into(),
            log_file: "formgrid.log".into(),
            print_mode: false,
            max_cell_width: 24,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let draft_dir = std::env::var("FORMGRID_DRAFT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.draft_dir);

        let submission_dir = std::env::var("FORMGRID_SUBMISSION_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.submission_dir);

        let log_file = std::env::var("FORMGRID_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        Ok(Config {
            draft_dir,
            submission_dir,
            log_file,
            print_mode: parse_env_var("FORMGRID_PRINT_MODE")?.unwrap_or(defaults.print_mode),
            max_cell_width: parse_env_var("FORMGRID_MAX_CELL_WIDTH")?
                .unwrap_or(defaults.max_cell_width),
        })
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_print_flag(self.print_mode)
    }

    /// Narrower cells cannot show anything beyond the ellipsis
    pub fn check_max_cell_width(&self) -> Result<()> {
        if self.max_cell_width < MIN_CELL_WIDTH {
            return Err(anyhow::anyhow!(
                "Maximum cell width must be at least {}, got {}",
                MIN_CELL_WIDTH,
                self.max_cell_width
            ));
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.check_max_cell_width()?;

        std::fs::create_dir_all(&self.draft_dir)
            .with_context(|| format!("Cannot create draft directory: {}", self.draft_dir.display()))?;
        std::fs::create_dir_all(&self.submission_dir).with_context(|| {
            format!(
                "Cannot create submission directory: {}",
                self.submission_dir.display()
            )
        })?;

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.draft_dir, PathBuf::from("./drafts"));
        assert_eq!(config.max_cell_width, 24);
        assert_eq!(config.display_mode(), DisplayMode::Edit);
    }

    #[test]
    fn test_parse_env_var_reports_bad_value() {
        std::env::set_var("FORMGRID_TEST_BAD_WIDTH", "wide");
        let err = parse_env_var::<usize>("FORMGRID_TEST_BAD_WIDTH").unwrap_err();
        assert!(err.to_string().contains("FORMGRID_TEST_BAD_WIDTH"));
        assert_eq!(parse_env_var::<usize>("FORMGRID_TEST_UNSET_VAR").unwrap(), None);
    }

    #[test]
    fn test_config_validation_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            draft_dir: dir.path().join("d"),
            submission_dir: dir.path().join("s"),
            ..Config::default()
        };
        config.validate().unwrap();
        assert!(config.draft_dir.is_dir());
        assert!(config.submission_dir.is_dir());

        let narrow = Config {
            max_cell_width: 2,
            ..config
        };
        assert!(narrow.validate().is_err());
    }

    #[test]
    fn test_zero_cell_width_is_rejected_without_touching_dirs() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            draft_dir: dir.path().join("d"),
            max_cell_width: 0,
            ..Config::default()
        };
        let err = config.check_max_cell_width().unwrap_err();
        assert!(err.to_string().contains("at least 4, got 0"));
        assert!(!config.draft_dir.exists());
        assert!(Config::default().check_max_cell_width().is_ok());
    }
}
