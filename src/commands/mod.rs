pub mod check;
pub mod list;
pub mod render;

use std::path::Path;

use miette::Result;
use velvet::config::options::{with_delimiters, with_development, with_template_dir};
use velvet::config::{load_config, ConfigOption};
use velvet::EngineBuilder;

use crate::cli::SourceArgs;

/// Config file settings first, then command-line flags on top.
pub fn engine_builder(source: &SourceArgs) -> Result<EngineBuilder> {
    let mut options: Vec<ConfigOption> = Vec::new();

    if let Some(path) = &source.config {
        options.extend(load_config(Path::new(path))?.into_options());
    }
    if let Some(dir) = &source.dir {
        options.push(with_template_dir(dir));
    }
    if source.dev {
        options.push(with_development(true));
    }
    if let Some([left, right]) = source.delimiters.as_deref() {
        options.push(with_delimiters(left, right));
    }

    Ok(EngineBuilder::new(&source.pattern, options))
}
