use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "velvet",
    about = "Render HTML templates from the command line",
    version
)]
pub struct Cli {
    /// Log template loading and render timings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template to stdout
    Render {
        /// Template name (path relative to the template directory)
        name: String,

        /// JSON file with the render data
        #[arg(long)]
        data: Option<String>,

        /// Layout to wrap the template in
        #[arg(short, long)]
        layout: Option<String>,

        /// Language used by the translation helpers
        #[arg(long)]
        lang: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the templates matched by the pattern
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Parse and validate every matched template
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// Template directory (default: templates, or the config file's value)
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Glob pattern relative to the template directory
    #[arg(short, long, default_value = "*.html")]
    pub pattern: String,

    /// Path to a velvet.toml file (or a directory containing one)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Development mode: re-parse templates before every render
    #[arg(long)]
    pub dev: bool,

    /// Custom expression delimiters, e.g. --delimiters '[[' ']]'
    #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
    pub delimiters: Option<Vec<String>>,
}
