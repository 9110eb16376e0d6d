use console::style;
use miette::Result;

use crate::cli::SourceArgs;
use crate::commands::engine_builder;

pub fn run(source: &SourceArgs) -> Result<()> {
    let builder = engine_builder(source)?;
    let config = builder.config();

    println!(
        "{} {}",
        style("Checking templates in").bold(),
        style(config.template_dir.display()).cyan()
    );
    println!("  Pattern: {}", builder.pattern());
    println!(
        "  Delimiters: {} {}",
        config.delimiters.left, config.delimiters.right
    );
    if let Some(layout) = &config.default_layout {
        println!("  Default layout: {layout}");
    }
    if let Some(i18n) = &config.i18n {
        println!(
            "  Languages: {} (default {})",
            i18n.translations().len(),
            i18n.default_language()
        );
    }

    let engine = builder.build()?;
    let names = engine.template_names();

    if let Some(layout) = &config.default_layout {
        if !engine.has_template(layout) {
            println!(
                "\n{} Default layout '{}' is not among the loaded templates",
                style("⚠").yellow(),
                layout
            );
        }
    }

    println!(
        "\n{} {} template{} parsed and validated",
        style("✓").green().bold(),
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
