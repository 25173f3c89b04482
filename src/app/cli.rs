use crate::app::models::OutputStyle;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compile a project's Sass entry stylesheet into CSS"
)]
pub struct Cli {
    /// Tasks to run (e.g., 'default', 'sass', 'sass:dist')
    #[arg(default_value = "default")]
    pub tasks: Vec<String>,

    /// Project root; relative paths in the build file resolve against it
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Build file, relative to the project root
    #[arg(long, default_value = "Sassfile.toml")]
    pub file: PathBuf,

    /// Include-path layout to use (vendor, foundation, bower or a custom one)
    #[arg(long)]
    pub layout: Option<String>,

    /// Extra directories searched by @import, appended after the layout
    #[arg(long, num_args = 1..)]
    pub include_path: Option<Vec<String>>,

    /// Override the output style of every target
    #[arg(long, value_enum)]
    pub output_style: Option<OutputStyle>,
}
