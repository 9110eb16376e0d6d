//! HTML template rendering for web frameworks, on top of Tera.
//!
//! ```no_run
//! use velvet::config::options::{with_default_layout, with_template_dir};
//! use velvet::{EngineBuilder, RenderRequest};
//!
//! let engine = EngineBuilder::new(
//!     "*.html",
//!     vec![with_template_dir("templates"), with_default_layout("layout.html")],
//! )
//! .build()?;
//!
//! let mut body = Vec::new();
//! let request = RenderRequest::new("greet.html", serde_json::json!({ "name": "Ada" }));
//! engine.render_with_layout(&mut body, &request)?;
//! # Ok::<(), velvet::error::VelvetError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod framework;
pub mod funcs;
pub mod i18n;

pub use config::{Config, ConfigOption, Delimiters};
pub use engine::{EngineBuilder, HtmlEngine, RenderRequest, CONTENT_TEMPLATE};
pub use error::{DictError, Result, VelvetError};
pub use framework::{TemplateConfig, TemplateEngine};
pub use funcs::{FuncMap, Helper};
pub use i18n::{Translations, Translator};
