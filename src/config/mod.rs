pub mod file;
pub mod options;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Result, VelvetError};
use crate::funcs::FuncMap;
use crate::i18n::Translator;

pub use file::{load_config, ConfigFile};
pub use options::ConfigOption;

pub const DEFAULT_LEFT_DELIM: &str = "{{";
pub const DEFAULT_RIGHT_DELIM: &str = "}}";

/// Markers that open and close template expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Delimiters {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Both markers set and different from Tera's own `{{ }}`.
    pub fn is_custom(&self) -> bool {
        !self.left.is_empty()
            && !self.right.is_empty()
            && (self.left != DEFAULT_LEFT_DELIM || self.right != DEFAULT_RIGHT_DELIM)
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM)
    }
}

/// Engine configuration. Built from [`Config::default`] plus options.
#[derive(Debug, Clone)]
pub struct Config {
    /// Caller-supplied helpers; these win over built-ins with the same name.
    pub funcs: FuncMap,
    pub delimiters: Delimiters,
    /// Re-parse every template before each render.
    pub development: bool,
    pub asset_version: Option<String>,
    pub default_layout: Option<String>,
    /// Accepted for compatibility; templates are never cached beyond the
    /// loaded set, so this has no effect.
    pub enable_cache: bool,
    pub template_dir: PathBuf,
    pub asset_dir: Option<PathBuf>,
    pub i18n: Option<Arc<Translator>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            funcs: FuncMap::new(),
            delimiters: Delimiters::default(),
            development: false,
            asset_version: None,
            default_layout: None,
            enable_cache: true,
            template_dir: PathBuf::from("templates"),
            asset_dir: Some(PathBuf::from("assets")),
            i18n: None,
        }
    }
}

impl Config {
    /// Apply options in order. Later options overwrite earlier ones.
    pub fn with_options(options: impl IntoIterator<Item = ConfigOption>) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    pub fn apply(&mut self, options: impl IntoIterator<Item = ConfigOption>) {
        for option in options {
            option(self);
        }
    }

    /// Validate the config for internal consistency.
    pub fn validate(&self) -> Result<()> {
        let Delimiters { left, right } = &self.delimiters;
        if left.is_empty() != right.is_empty() {
            return Err(VelvetError::InvalidDelimiters {
                left: left.clone(),
                right: right.clone(),
            });
        }

        if !self.template_dir.is_dir() {
            return Err(VelvetError::TemplateDirMissing {
                path: self.template_dir.clone(),
            });
        }

        Ok(())
    }
}
