//! Helper functions exposed inside templates.

pub mod asset;
pub mod builtins;
pub mod i18n;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tera::{Function, Value};

use crate::config::Config;

/// A cloneable handle to a Tera function.
#[derive(Clone)]
pub struct Helper(Arc<dyn Function>);

impl Helper {
    pub fn new<F: Function + 'static>(function: F) -> Self {
        Self(Arc::new(function))
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Helper")
            .field("is_safe", &self.0.is_safe())
            .finish()
    }
}

impl Function for Helper {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        self.0.call(args)
    }

    fn is_safe(&self) -> bool {
        self.0.is_safe()
    }
}

/// Helper name -> helper.
pub type FuncMap = BTreeMap<String, Helper>;

/// Build the full helper set for a configuration.
///
/// Built-ins first, then the i18n helpers (when a translator is configured),
/// then `asset` (when an asset directory is configured), then the caller's
/// own functions, which replace any built-in of the same name.
pub fn merge_funcs(config: &Config) -> FuncMap {
    let mut funcs = builtins::default_funcs();

    if let Some(translator) = &config.i18n {
        funcs.extend(i18n::i18n_funcs(translator));
    }

    if let Some(asset_dir) = config
        .asset_dir
        .as_deref()
        .filter(|d| !d.as_os_str().is_empty())
    {
        funcs.insert(
            "asset".to_string(),
            asset::asset_helper(
                asset_dir,
                config.development,
                config.asset_version.clone(),
            ),
        );
    }

    funcs.extend(config.funcs.iter().map(|(k, v)| (k.clone(), v.clone())));
    funcs
}

/// Fetch a required string argument.
pub(crate) fn str_arg<'a>(
    function: &str,
    args: &'a HashMap<String, Value>,
    key: &str,
) -> tera::Result<&'a str> {
    match args.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(tera::Error::msg(format!(
            "Function `{function}` expects argument `{key}` to be a string, got {other}"
        ))),
        None => Err(tera::Error::msg(format!(
            "Function `{function}` requires a `{key}` argument"
        ))),
    }
}
