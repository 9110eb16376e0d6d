use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::options::{self, ConfigOption};
use crate::error::{Result, VelvetError};
use crate::i18n::Translations;

pub const CONFIG_FILE_NAME: &str = "velvet.toml";

/// On-disk configuration (`velvet.toml`). Every field is optional; unset
/// fields leave the programmatic defaults alone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub template_dir: Option<PathBuf>,
    pub asset_dir: Option<PathBuf>,
    pub development: Option<bool>,
    pub asset_version: Option<String>,
    pub default_layout: Option<String>,
    pub cache: Option<bool>,
    pub delimiters: Option<DelimiterConfig>,
    pub i18n: Option<I18nConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DelimiterConfig {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    pub default_lang: String,

    /// `[i18n.translations.<lang>]` tables of key = "format".
    #[serde(default)]
    pub translations: Translations,
}

impl ConfigFile {
    /// Turn the file into options, in a fixed order, to be applied before any
    /// options given in code.
    pub fn into_options(self) -> Vec<ConfigOption> {
        let mut opts = Vec::new();
        if let Some(dir) = self.template_dir {
            opts.push(options::with_template_dir(dir));
        }
        if let Some(dir) = self.asset_dir {
            opts.push(options::with_asset_dir(dir));
        }
        if let Some(dev) = self.development {
            opts.push(options::with_development(dev));
        }
        if let Some(version) = self.asset_version {
            opts.push(options::with_asset_version(version));
        }
        if let Some(layout) = self.default_layout {
            opts.push(options::with_default_layout(layout));
        }
        if let Some(cache) = self.cache {
            opts.push(options::with_cache(cache));
        }
        if let Some(d) = self.delimiters {
            opts.push(options::with_delimiters(d.left, d.right));
        }
        if let Some(i18n) = self.i18n {
            opts.push(options::with_i18n(i18n.default_lang, i18n.translations));
        }
        opts
    }
}

/// Load a config file. `path` may be the file itself or a directory holding
/// `velvet.toml`. A relative `template_dir` is resolved against the file's
/// own directory.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        return Err(VelvetError::ConfigNotFound { path: config_path });
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| VelvetError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    let mut config: ConfigFile =
        toml::from_str(&content).map_err(|e| VelvetError::ConfigParse { source: e })?;

    if let Some(base) = config_path.parent() {
        config.template_dir = config.template_dir.map(|dir| base.join(dir));
    }

    Ok(config)
}
