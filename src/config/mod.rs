mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/bench-rank/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("bench-rank"))
}

/// Get the default config file path (~/.config/bench-rank/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/bench-rank/config.yaml) and falls back to the default
///   config when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                log::debug!("No config at {}, using defaults", default_path.display());
                return Ok(Config::default());
            }
            default_path
        }
    };

    parse_config_file(&config_path)
}

fn parse_config_file(path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::EnergyScale;
    use std::env;

    #[test]
    fn test_load_full_config() {
        let path = env::temp_dir().join("bench_rank_test_config_full.yaml");
        fs::write(
            &path,
            r#"
catalogue: /tmp/catalogue.json
stats_dir: /tmp/stats
energy:
  base: 200
  increment: 50
"#,
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.catalogue, Some(PathBuf::from("/tmp/catalogue.json")));
        assert_eq!(config.stats_dir, Some(PathBuf::from("/tmp/stats")));
        assert_eq!(
            config.energy.unwrap().scale(),
            EnergyScale {
                base: 200.0,
                increment: 50.0
            }
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_empty_config() {
        let path = env::temp_dir().join("bench_rank_test_config_empty.yaml");
        fs::write(&path, "{}").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config, Config::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let path = env::temp_dir().join("bench_rank_test_config_missing.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let path = env::temp_dir().join("bench_rank_test_config_unknown.yaml");
        fs::write(&path, "queries: []\n").unwrap();

        assert!(load_config(Some(path.clone())).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_expand_home() {
        let plain = PathBuf::from("/etc/catalogue.yaml");
        assert_eq!(expand_home(&plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/bench/catalogue.yaml")),
                home.join("bench/catalogue.yaml")
            );
        }
    }
}
