use std::io::Write;

use miette::{IntoDiagnostic, Result, WrapErr};
use velvet::RenderRequest;

use crate::cli::SourceArgs;
use crate::commands::engine_builder;

pub fn run(
    source: &SourceArgs,
    name: String,
    data: Option<String>,
    layout: Option<String>,
    lang: Option<String>,
) -> Result<()> {
    let engine = engine_builder(source)?.build()?;

    let data: serde_json::Value = match &data {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading data file {path}"))?;
            serde_json::from_str(&content)
                .into_diagnostic()
                .wrap_err_with(|| format!("parsing data file {path}"))?
        }
        None => serde_json::Value::Null,
    };

    let request = RenderRequest {
        layout,
        view: name,
        data,
        lang,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    engine.render_with_layout(&mut out, &request)?;
    out.flush().into_diagnostic()?;

    Ok(())
}
