use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use regiondata_core::GeneratorConfig;

use crate::CliError;

pub const DEFAULT_CONFIG_PATH: &str = "regiondata.toml";

/// Read a TOML configuration, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, CliError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(GeneratorConfig::default()),
    }
}

/// Write `config` as TOML. An existing file is only replaced with `force`.
pub fn save_config(path: &Path, config: &GeneratorConfig, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "{} already exists, pass --force to overwrite",
            path.display()
        )));
    }
    let encoded = toml::to_string_pretty(config)?;
    write_bytes_atomic(path, encoded.as_bytes())
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, CliError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::InvalidArgs(format!("invalid path '{}'", path.display())))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("regiondata_cli_{}", uuid::Uuid::new_v4()));
        create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn saved_config_loads_back() {
        let path = temp_dir().join(DEFAULT_CONFIG_PATH);
        let mut config = GeneratorConfig::default();
        config.seed = Some(42);
        config.water.count = 12;

        save_config(&path, &config, false).expect("save config");
        let loaded = load_config(Some(&path)).expect("load config");
        assert_eq!(loaded, config);
        assert!(!path.with_file_name("regiondata.toml.tmp").exists());
    }

    #[test]
    fn existing_config_needs_force() {
        let path = temp_dir().join(DEFAULT_CONFIG_PATH);
        let config = GeneratorConfig::default();

        save_config(&path, &config, false).expect("first save");
        assert!(matches!(
            save_config(&path, &config, false),
            Err(CliError::InvalidArgs(_))
        ));
        save_config(&path, &config, true).expect("forced save");
    }

    #[test]
    fn malformed_config_is_a_configuration_error() {
        let path = temp_dir().join("broken.toml");
        std::fs::write(&path, "seed = \"not a number\"").expect("write config");

        let err = load_config(Some(&path)).expect_err("decode failure");
        assert_eq!(err.kind(), "configuration");
    }
}
