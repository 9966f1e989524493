use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "CATALOG_ADMIN_DIR";
pub const DEFAULT_DATA_DIR: &str = "~/.config/catalog-admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Explicit directory wins, then the environment, then the default.
    /// `~` and `$VAR` are expanded in all three.
    pub fn resolve(data_dir: Option<&str>) -> Result<Config> {
        let from_env = std::env::var(DATA_DIR_ENV).ok();
        let raw = data_dir
            .map(str::to_owned)
            .or(from_env)
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());
        Ok(Config { data_dir: expand(&raw)? })
    }
}

fn expand(raw: &str) -> Result<PathBuf> {
    let path = shellexpand::full(raw)
        .with_context(|| format!("Data directory path {} is invalid", raw))?;
    Ok(Path::new(path.as_ref()).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_is_used() {
        let config = Config::resolve(Some("/tmp/catalog")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/catalog"));
    }

    #[test]
    fn tilde_is_expanded() {
        let path = expand("~/catalog").unwrap();
        assert!(!path.starts_with("~"), "{:?}", path);
        assert!(path.ends_with("catalog"));
    }

    #[test]
    fn unset_variable_is_an_error() {
        assert!(expand("$CATALOG_ADMIN_SURELY_UNSET_VAR/x").is_err());
    }
}
