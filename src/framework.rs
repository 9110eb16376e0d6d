//! Capabilities a web framework programs against: a factory that builds an
//! engine, and a renderer that turns a template name and data into bytes.

use std::io::Write;

use crate::engine::{EngineBuilder, HtmlEngine};
use crate::error::Result;

/// Builds a ready-to-use renderer.
pub trait TemplateConfig {
    fn create_engine(&self) -> Result<Box<dyn TemplateEngine>>;
}

/// Renders a named template into a byte sink.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, out: &mut dyn Write, name: &str, data: &serde_json::Value) -> Result<()>;
}

impl TemplateConfig for EngineBuilder {
    fn create_engine(&self) -> Result<Box<dyn TemplateEngine>> {
        Ok(Box::new(self.build()?))
    }
}

impl TemplateEngine for HtmlEngine {
    fn render(&self, out: &mut dyn Write, name: &str, data: &serde_json::Value) -> Result<()> {
        HtmlEngine::render(self, out, name, data)
    }
}
