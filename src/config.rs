use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "GITIGNORE_FETCH_CONFIG";

/// Where templates come from and where the result goes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub REST API root, used for the commit and tree lookups.
    pub api_base: String,
    /// Raw content root, used for template bodies.
    pub raw_base: String,
    pub owner: String,
    pub repo: String,
    /// Ref the catalog and templates are read from.
    pub branch: String,
    /// File suffix that marks a template in the repository tree.
    pub suffix: String,
    pub user_agent: String,
    /// File the merged templates are written to.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            owner: "github".to_string(),
            repo: "gitignore".to_string(),
            branch: "main".to_string(),
            suffix: ".gitignore".to_string(),
            user_agent: concat!("gitignore-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
            output: PathBuf::from(".gitignore"),
        }
    }
}

impl Config {
    /// Loads the config file named by [`CONFIG_ENV`], or the one in the platform
    /// config directory. Falls back to defaults when neither exists.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_path(),
        };

        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// `<config dir>/config.json` for this application, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "gitignore-fetch", "gitignore-fetch")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn commit_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch
        )
    }

    pub fn tree_url(&self, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            sha
        )
    }

    pub fn template_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}{}",
            self.raw_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            name,
            self.suffix
        )
    }
}
