pub mod context;
pub mod delims;
pub mod layout;
pub mod loader;
pub mod validate;

use std::io::Write;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::{Config, ConfigOption};
use crate::error::{Result, VelvetError};
use crate::i18n::scope_language;

pub use context::build_context;
pub use layout::CONTENT_TEMPLATE;
pub use loader::{build_template_set, TemplateSet};

/// Describes an engine to build: a glob pattern plus a configuration.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    pattern: String,
    config: Config,
}

impl EngineBuilder {
    /// Apply `options` to the default configuration.
    pub fn new(pattern: impl Into<String>, options: impl IntoIterator<Item = ConfigOption>) -> Self {
        Self::from_config(pattern, Config::with_options(options))
    }

    pub fn from_config(pattern: impl Into<String>, config: Config) -> Self {
        Self {
            pattern: pattern.into(),
            config,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate the configuration, parse every matching template and check
    /// the result.
    pub fn build(&self) -> Result<HtmlEngine> {
        self.config.validate()?;

        let set = build_template_set(&self.config, &self.pattern)?;
        validate::validate(&set)?;

        Ok(HtmlEngine {
            config: self.config.clone(),
            pattern: self.pattern.clone(),
            set: RwLock::new(set),
        })
    }
}

/// A layout render: `view` is placed into `layout` through the `content`
/// template. Without a layout (and no default layout) the view renders alone.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest<T> {
    pub layout: Option<String>,
    pub view: String,
    pub data: T,
    /// Language for translation helpers during this render only.
    pub lang: Option<String>,
}

impl<T> RenderRequest<T> {
    pub fn new(view: impl Into<String>, data: T) -> Self {
        Self {
            layout: None,
            view: view.into(),
            data,
            lang: None,
        }
    }

    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Renders named templates from a parsed set.
///
/// In development mode the set is rebuilt from disk before every render;
/// otherwise it is built once and never replaced.
#[derive(Debug)]
pub struct HtmlEngine {
    config: Config,
    pattern: String,
    set: RwLock<TemplateSet>,
}

impl HtmlEngine {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render template `name` with `data` into `out`.
    pub fn render<W, T>(&self, out: &mut W, name: &str, data: &T) -> Result<()>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized,
    {
        self.render_in(out, name, data, None)
    }

    /// Like [`HtmlEngine::render`], with translation helpers pinned to `lang`.
    pub fn render_in<W, T>(&self, out: &mut W, name: &str, data: &T, lang: Option<&str>) -> Result<()>
    where
        W: Write + ?Sized,
        T: Serialize + ?Sized,
    {
        let start = Instant::now();
        self.reload_for_render()?;

        let set = self.read_set();
        if !set.contains(name) {
            return Err(VelvetError::TemplateNotFound {
                name: name.to_string(),
            });
        }
        let context = build_context(data)?;

        let _lang = scope_language(lang);
        let result = set
            .tera
            .render_to(name, &context, out)
            .map_err(|e| VelvetError::Render {
                template: name.to_string(),
                source: e,
            });

        if self.config.development {
            tracing::debug!(template = name, elapsed = ?start.elapsed(), "rendered template");
        }

        result
    }

    /// Render `request.view` inside a layout.
    ///
    /// An absent or empty layout falls back to the configured default layout,
    /// and with neither the view is rendered on its own.
    pub fn render_with_layout<W, T>(&self, out: &mut W, request: &RenderRequest<T>) -> Result<()>
    where
        W: Write + ?Sized,
        T: Serialize,
    {
        let layout = request
            .layout
            .as_deref()
            .filter(|l| !l.is_empty())
            .or_else(|| self.config.default_layout.as_deref().filter(|l| !l.is_empty()));

        let Some(layout) = layout else {
            return self.render_in(out, &request.view, &request.data, request.lang.as_deref());
        };

        let start = Instant::now();
        self.reload_for_render()?;

        let composed = {
            let set = self.read_set();
            for name in [layout, request.view.as_str()] {
                if !set.contains(name) {
                    return Err(VelvetError::TemplateNotFound {
                        name: name.to_string(),
                    });
                }
            }
            layout::compose(&set.tera, &request.view)?
        };
        let context = build_context(&request.data)?;

        let _lang = scope_language(request.lang.as_deref());
        let result = composed
            .render_to(layout, &context, out)
            .map_err(|e| VelvetError::Render {
                template: layout.to_string(),
                source: e,
            });

        if self.config.development {
            tracing::debug!(
                layout,
                view = %request.view,
                elapsed = ?start.elapsed(),
                "rendered template with layout"
            );
        }

        result
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.read_set().contains(name)
    }

    /// Template names in the order they were discovered on disk.
    pub fn template_names(&self) -> Vec<String> {
        self.read_set().names().to_vec()
    }

    /// When the live template set was parsed.
    pub fn last_loaded(&self) -> DateTime<Local> {
        self.read_set().loaded_at()
    }

    /// Re-run the checks performed at construction against the live set.
    pub fn validate(&self) -> Result<()> {
        validate::validate(&self.read_set())
    }

    /// Rebuild the template set from disk.
    ///
    /// Holds the write lock while parsing. On failure the previous set stays
    /// in place.
    pub fn reload(&self) -> Result<()> {
        let mut set = self.write_set();
        let fresh = build_template_set(&self.config, &self.pattern)?;
        validate::validate(&fresh)?;
        *set = fresh;
        Ok(())
    }

    fn reload_for_render(&self) -> Result<()> {
        if !self.config.development {
            return Ok(());
        }
        self.reload().map_err(|e| {
            tracing::warn!(error = %e, "template reload failed");
            VelvetError::ReloadFailed {
                source: Box::new(e),
            }
        })
    }

    fn read_set(&self) -> RwLockReadGuard<'_, TemplateSet> {
        self.set.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_set(&self) -> RwLockWriteGuard<'_, TemplateSet> {
        self.set.write().unwrap_or_else(PoisonError::into_inner)
    }
}
