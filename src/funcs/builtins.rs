use std::collections::HashMap;

use serde_json::Map;
use tera::{Function, Value};

use super::{str_arg, FuncMap, Helper};
use crate::error::DictError;

/// Returns its `value` argument untouched and flagged safe, so autoescaping
/// skips it. Nothing is sanitised: the caller vouches for the content.
///
/// Tera has a single escaping mode, so the HTML, URL and JS variants differ
/// only by name.
#[derive(Debug, Clone, Copy)]
pub struct MarkSafe {
    name: &'static str,
}

impl Function for MarkSafe {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        str_arg(self.name, args, "value").map(|s| Value::String(s.to_string()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Placeholder for partial inclusion. Always renders nothing.
#[derive(Debug, Clone, Copy)]
pub struct Partial;

impl Function for Partial {
    fn call(&self, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(Value::String(String::new()))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Build a map from alternating keys and values.
pub fn build_dict(values: &[Value]) -> Result<Map<String, Value>, DictError> {
    if values.len() % 2 != 0 {
        return Err(DictError::OddArgumentCount(values.len()));
    }

    let mut dict = Map::with_capacity(values.len() / 2);
    for (i, pair) in values.chunks_exact(2).enumerate() {
        let Value::String(key) = &pair[0] else {
            return Err(DictError::NonStringKey { index: i * 2 });
        };
        dict.insert(key.clone(), pair[1].clone());
    }
    Ok(dict)
}

fn dict(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let pairs = match args.get("pairs") {
        Some(Value::Array(values)) => values.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "Function `dict` expects `pairs` to be a list, got {other}"
            )))
        }
    };

    build_dict(pairs)
        .map(Value::Object)
        .map_err(|e| tera::Error::msg(e.to_string()))
}

pub fn default_funcs() -> FuncMap {
    let mut funcs = FuncMap::new();
    for name in ["safe_html", "safe_url", "safe_js"] {
        funcs.insert(name.to_string(), Helper::new(MarkSafe { name }));
    }
    funcs.insert("dict".to_string(), Helper::new(dict));
    funcs.insert("partial".to_string(), Helper::new(Partial));
    funcs
}
