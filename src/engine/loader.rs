use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use globset::{GlobBuilder, GlobMatcher};
use tera::Tera;
use walkdir::WalkDir;

use crate::config::Config;
use crate::engine::delims;
use crate::error::{Result, VelvetError};
use crate::funcs::merge_funcs;

/// A template file read from disk.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    /// Path relative to the template directory, `/`-separated.
    pub name: String,
    pub path: PathBuf,
    pub source: String,
}

/// A parsed, immutable collection of templates.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub(crate) tera: Tera,
    names: Vec<String>,
    loaded_at: DateTime<Local>,
}

impl TemplateSet {
    /// Template names in discovery order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}

/// Parse every file under `config.template_dir` matching `pattern`.
///
/// Every template is HTML-escaped, whatever its file extension.
pub fn build_template_set(config: &Config, pattern: &str) -> Result<TemplateSet> {
    let sources = read_sources(config, pattern)?;

    let mut tera = Tera::default();
    tera.autoescape_on(vec![""]);
    for (name, helper) in merge_funcs(config) {
        tera.register_function(&name, helper);
    }

    tera.add_raw_templates(
        sources
            .iter()
            .map(|t| (t.name.as_str(), t.source.as_str())),
    )
    .map_err(|e| VelvetError::Parse { source: e })?;

    tracing::debug!(
        dir = %config.template_dir.display(),
        pattern,
        templates = sources.len(),
        "loaded templates"
    );

    Ok(TemplateSet {
        tera,
        names: sources.into_iter().map(|t| t.name).collect(),
        loaded_at: Local::now(),
    })
}

/// Read all matching files, rewriting custom delimiters into Tera syntax.
pub fn read_sources(config: &Config, pattern: &str) -> Result<Vec<TemplateSource>> {
    let matched = discover(&config.template_dir, pattern)?;

    let mut sources = Vec::with_capacity(matched.len());
    for (name, path) in matched {
        let raw = std::fs::read_to_string(&path).map_err(|e| VelvetError::Io {
            context: format!("reading {}", path.display()),
            source: e,
        })?;

        let source = if config.delimiters.is_custom() {
            delims::translate(&name, &raw, &config.delimiters)?
        } else {
            raw
        };

        sources.push(TemplateSource { name, path, source });
    }
    Ok(sources)
}

/// Walk `dir` in file-name order and return `(name, path)` for every file
/// whose relative path matches `pattern`.
pub fn discover(dir: &Path, pattern: &str) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Err(VelvetError::TemplateDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let matcher = build_matcher(pattern)?;
    let mut matched = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(rel_path) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let name = rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if matcher.is_match(&name) {
            matched.push((name, entry.path().to_path_buf()));
        }
    }

    if matched.is_empty() {
        return Err(VelvetError::NoTemplatesMatched {
            pattern: pattern.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    Ok(matched)
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| VelvetError::GlobPattern {
            pattern: pattern.to_string(),
            source: e,
        })?;
    Ok(glob.compile_matcher())
}
