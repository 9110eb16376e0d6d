#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum VelvetError {
    #[error("Config file not found at {path}")]
    #[diagnostic(help("Create a velvet.toml file or drop the --config flag"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse velvet.toml")]
    #[diagnostic(help("Check the TOML syntax in your velvet.toml file"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid delimiter pair ({left:?}, {right:?})")]
    #[diagnostic(help("Set both the left and right delimiter, or neither"))]
    InvalidDelimiters { left: String, right: String },

    #[error("Template directory not found: {path}")]
    #[diagnostic(help("Point the template directory at an existing folder"))]
    TemplateDirMissing { path: PathBuf },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Pattern '{pattern}' matched no files in {dir}")]
    #[diagnostic(help("Check the pattern, e.g. \"*.html\" or \"**/*.html\""))]
    NoTemplatesMatched { pattern: String, dir: PathBuf },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unterminated '{delimiter}' in {template} at byte {offset}")]
    #[diagnostic(help("Every opening delimiter needs a matching closing delimiter"))]
    DelimiterSyntax {
        template: String,
        delimiter: String,
        offset: usize,
    },

    #[error("Template parse error")]
    #[diagnostic(help("Check your Tera template syntax"))]
    Parse {
        #[source]
        source: tera::Error,
    },

    #[error("No templates loaded")]
    NoTemplates,

    #[error("Template set could not be cloned for composition")]
    CloneFailed {
        #[source]
        source: tera::Error,
    },

    #[error("Failed to reload templates")]
    #[diagnostic(help("The previously loaded templates are still in use"))]
    ReloadFailed {
        #[source]
        source: Box<VelvetError>,
    },

    #[error("Template {name} not found")]
    TemplateNotFound { name: String },

    #[error("Invalid template name: {name}")]
    InvalidTemplateName { name: String },

    #[error("Render data must serialize to a map")]
    InvalidData {
        #[source]
        source: tera::Error,
    },

    #[error("Template rendering failed: {template}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },
}

/// Errors raised by the `dict` template helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictError {
    #[error("invalid dict call: expected an even number of arguments, got {0}")]
    OddArgumentCount(usize),

    #[error("dict keys must be strings (argument {index})")]
    NonStringKey { index: usize },
}

pub type Result<T> = std::result::Result<T, VelvetError>;
