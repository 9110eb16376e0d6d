use tera::Tera;

use crate::error::{Result, VelvetError};

/// Name of the template a layout includes to place the view.
pub const CONTENT_TEMPLATE: &str = "content";

/// Clone `base` and add a `content` template that includes `view`.
///
/// The clone is used for a single render and then dropped, so the base set
/// never sees the composition.
pub fn compose(base: &Tera, view: &str) -> Result<Tera> {
    let body = include_statement(view)?;
    let mut composed = base.clone();
    composed
        .add_raw_template(CONTENT_TEMPLATE, &body)
        .map_err(|e| VelvetError::CloneFailed { source: e })?;
    Ok(composed)
}

fn include_statement(view: &str) -> Result<String> {
    ['"', '\'', '`']
        .into_iter()
        .find(|q| !view.contains(*q))
        .map(|q| format!("{{% include {q}{view}{q} %}}"))
        .ok_or_else(|| VelvetError::InvalidTemplateName {
            name: view.to_string(),
        })
}
