use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// How the compiler lays out the generated CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

/// Everything the compiler needs for one stylesheet, after layouts, task
/// options, target options and CLI overrides have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub include_paths: Vec<PathBuf>,
    pub output_style: OutputStyle,
    pub entry_file: PathBuf,
    pub output_file: PathBuf,
}

/// A registered unit of work.
#[derive(Debug, Clone)]
pub enum Task {
    Compile(Vec<BuildConfiguration>),
    Alias(Vec<String>), // run these tasks in order
}
