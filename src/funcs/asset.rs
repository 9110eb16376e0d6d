use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::{Function, Value};

use super::{str_arg, Helper};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Join an asset directory and file name, appending `?v=<version>` when a
/// version is given.
///
/// The joined path is cleaned lexically: `.` segments and repeated slashes
/// are dropped and `..` removes the preceding segment.
pub fn asset_path(asset_dir: &Path, name: &str, version: Option<&str>) -> String {
    let dir = asset_dir.to_string_lossy();
    let joined = [dir.as_ref(), name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    let path = clean_path(&joined);

    match version {
        Some(v) if !v.is_empty() => format!("{path}?v={v}"),
        _ => path,
    }
}

fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let cleaned = segments.join("/");
    match (rooted, cleaned.is_empty()) {
        (true, _) => format!("/{cleaned}"),
        (false, true) => ".".to_string(),
        (false, false) => cleaned,
    }
}

/// Cache-busting token for development mode: the local wall clock.
pub fn dev_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// The `asset` helper. In development mode every call gets a fresh
/// timestamp; otherwise the configured version (if any) is used.
///
/// Output is marked safe so the path survives HTML autoescaping intact.
#[derive(Debug, Clone)]
pub struct AssetHelper {
    asset_dir: PathBuf,
    development: bool,
    version: Option<String>,
}

impl Function for AssetHelper {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let name = str_arg("asset", args, "name")?;
        let path = if self.development {
            asset_path(&self.asset_dir, name, Some(&dev_timestamp()))
        } else {
            asset_path(&self.asset_dir, name, self.version.as_deref())
        };
        Ok(Value::String(path))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

pub fn asset_helper(asset_dir: &Path, development: bool, version: Option<String>) -> Helper {
    Helper::new(AssetHelper {
        asset_dir: asset_dir.to_path_buf(),
        development,
        version,
    })
}
