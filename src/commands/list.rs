use console::style;
use miette::Result;

use crate::cli::SourceArgs;
use crate::commands::engine_builder;

pub fn run(source: &SourceArgs) -> Result<()> {
    let engine = engine_builder(source)?.build()?;
    let names = engine.template_names();

    eprintln!(
        "{} ({} template{} in {})\n",
        style("Templates").bold(),
        names.len(),
        if names.len() == 1 { "" } else { "s" },
        style(engine.config().template_dir.display()).cyan()
    );

    for name in &names {
        println!("{name}");
    }

    Ok(())
}
