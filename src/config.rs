//! Application path resolution for config and data files.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args -> ENV var (BLOOMSCROLL_CONFIG_DIR) -> None (defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("BLOOMSCROLL_CONFIG_DIR")
                .ok()
                .map(PathBuf::from)
        });

        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. BLOOMSCROLL_CONFIG_DIR environment variable
/// 3. Local folder IF any app files exist there already
/// 4. Platform-specific config directory from dirs-next
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    get_config_dir(config).join(name)
}

/// Get path to a data file (note journal, logs)
///
/// Same priority chain as `config_file`, but falls back to the platform data
/// directory instead of the config directory.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    get_data_dir(config).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = get_config_dir(config);
    let data_dir = get_data_dir(config);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
    }

    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }

    Ok(())
}

/// Check if any app files exist in the given directory
fn has_local_files(dir: &PathBuf) -> bool {
    let files = [
        "bloomscroll.json",
        "bloomscroll_notes.json",
        "bloomscroll.log",
    ];
    files.iter().any(|f| dir.join(f).exists())
}

fn get_config_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && has_local_files(&current_dir)
    {
        return current_dir;
    }

    if let Some(dir) = dirs_next::config_dir() {
        return dir.join("bloomscroll");
    }

    PathBuf::from(".")
}

fn get_data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && has_local_files(&current_dir)
    {
        return current_dir;
    }

    if let Some(dir) = dirs_next::data_dir() {
        return dir.join("bloomscroll");
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        let path = config_file("test.json", &config);
        assert_eq!(path, PathBuf::from("/custom/test.json"));
    }

    #[test]
    fn test_data_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        let path = data_file("notes.json", &config);
        assert_eq!(path, PathBuf::from("/custom/notes.json"));
    }

    #[test]
    fn test_platform_defaults_contain_app_name() {
        let config = PathConfig { config_dir: None };

        let path = config_file("test.json", &config);
        assert!(path.to_string_lossy().contains("test.json"));
    }
}
