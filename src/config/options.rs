//! Functional options applied to a [`Config`] before the engine is built.
//!
//! Options never validate; a bad combination is reported when the engine is
//! constructed.

use std::path::PathBuf;
use std::sync::Arc;

use super::{Config, Delimiters};
use crate::funcs::FuncMap;
use crate::i18n::{Translations, Translator};

pub type ConfigOption = Box<dyn FnOnce(&mut Config) + Send>;

/// Enable development mode (re-parse templates before every render).
pub fn with_development(development: bool) -> ConfigOption {
    Box::new(move |c: &mut Config| c.development = development)
}

pub fn with_template_dir(dir: impl Into<PathBuf>) -> ConfigOption {
    let dir = dir.into();
    Box::new(move |c: &mut Config| c.template_dir = dir)
}

/// Directory the `asset` helper prefixes. An empty path removes the helper.
pub fn with_asset_dir(dir: impl Into<PathBuf>) -> ConfigOption {
    let dir = Some(dir.into()).filter(|d| !d.as_os_str().is_empty());
    Box::new(move |c: &mut Config| c.asset_dir = dir)
}

/// Add template helpers. Entries replace existing ones with the same name.
pub fn with_funcs(funcs: FuncMap) -> ConfigOption {
    Box::new(move |c: &mut Config| c.funcs.extend(funcs))
}

pub fn with_delimiters(left: impl Into<String>, right: impl Into<String>) -> ConfigOption {
    let delimiters = Delimiters::new(left, right);
    Box::new(move |c: &mut Config| c.delimiters = delimiters)
}

/// Version appended to asset URLs outside development mode.
pub fn with_asset_version(version: impl Into<String>) -> ConfigOption {
    let version = version.into();
    Box::new(move |c: &mut Config| c.asset_version = Some(version))
}

pub fn with_default_layout(layout: impl Into<String>) -> ConfigOption {
    let layout = layout.into();
    Box::new(move |c: &mut Config| c.default_layout = Some(layout))
}

pub fn with_cache(enable: bool) -> ConfigOption {
    Box::new(move |c: &mut Config| c.enable_cache = enable)
}

/// Install a translation table. The current language starts at `default_lang`.
pub fn with_i18n(default_lang: impl Into<String>, translations: Translations) -> ConfigOption {
    let translator = Arc::new(Translator::new(default_lang, translations));
    Box::new(move |c: &mut Config| c.i18n = Some(translator))
}
