use crate::app::cli::Cli;
use crate::app::layouts::{self, Layout};
use crate::app::models::{BuildConfiguration, OutputStyle};
use crate::app::package::PackageMetadata;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const SASS_TASK: &str = "sass";

/// Contents of `Sassfile.toml`.
#[derive(Deserialize, Debug)]
pub struct BuildFile {
    #[serde(default = "default_package")]
    pub package: String,
    pub layout: Option<String>,
    #[serde(default)]
    pub layouts: HashMap<String, Layout>,
    #[serde(default)]
    pub sass: SassTask,
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

fn default_package() -> String {
    "package.json".into()
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SassOptions {
    pub include_paths: Option<Vec<String>>,
    pub output_style: Option<OutputStyle>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SassTask {
    #[serde(default)]
    pub options: SassOptions,
    #[serde(flatten)]
    pub targets: BTreeMap<String, SassTarget>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SassTarget {
    #[serde(default)]
    pub options: SassOptions,
    /// `destination = source`
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl BuildFile {
    /// The configuration used when a project has no build file: the `vendor`
    /// layout and one compressed `dist` target.
    pub fn builtin() -> Self {
        let mut files = BTreeMap::new();
        files.insert("css/main.css".to_string(), "scss/main.scss".to_string());

        let mut targets = BTreeMap::new();
        targets.insert(
            "dist".to_string(),
            SassTarget {
                options: SassOptions {
                    include_paths: None,
                    output_style: Some(OutputStyle::Compressed),
                },
                files,
            },
        );

        Self {
            package: default_package(),
            layout: Some("vendor".to_string()),
            layouts: HashMap::new(),
            sass: SassTask {
                options: SassOptions::default(),
                targets,
            },
            aliases: BTreeMap::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No build file at {:?}, using built-in configuration", path);
            return Ok(Self::builtin());
        }

        let content =
            fs::read_to_string(path).context(format!("Failed to read build file at {:?}", path))?;
        toml::from_str(&content).context(format!("Failed to parse build file at {:?}", path))
    }
}

/// Command-line values that take precedence over the build file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub layout: Option<String>,
    pub include_paths: Option<Vec<String>>,
    pub output_style: Option<OutputStyle>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            layout: cli.layout.clone(),
            include_paths: cli.include_path.clone(),
            output_style: cli.output_style,
        }
    }
}

/// Build configurations per `sass` target, plus the task aliases.
#[derive(Debug, Default)]
pub struct ResolvedBuild {
    pub targets: BTreeMap<String, Vec<BuildConfiguration>>,
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl ResolvedBuild {
    /// The only configuration, when exactly one file is built.
    pub fn single(&self) -> Option<&BuildConfiguration> {
        let mut all = self.targets.values().flatten();
        match (all.next(), all.next()) {
            (Some(config), None) => Some(config),
            _ => None,
        }
    }
}

/// Concatenates option lists in precedence order and removes duplicates,
/// keeping the first occurrence.
fn merge_vecs(lists: &[Option<&Vec<String>>]) -> Vec<String> {
    let mut combined: Vec<String> = lists
        .iter()
        .flatten()
        .flat_map(|v| v.iter().cloned())
        .collect();
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

pub fn resolve_config(
    file: &BuildFile,
    overrides: &Overrides,
    root: &Path,
    metadata: &PackageMetadata,
    user_layouts: &HashMap<String, Layout>,
) -> Result<ResolvedBuild> {
    // CLI flag > build file > none
    let layout = match overrides.layout.as_deref().or(file.layout.as_deref()) {
        Some(name) => layouts::resolve(name, &file.layouts, user_layouts)?,
        None => Layout::default(),
    };

    for name in file.aliases.keys() {
        if name == SASS_TASK || name.starts_with(&format!("{}:", SASS_TASK)) {
            bail!("Alias \"{}\" shadows a built-in task", name);
        }
    }

    let mut targets = BTreeMap::new();
    for (name, target) in &file.sass.targets {
        // A target's list replaces the task's list; the layout stays first
        // and CLI extras last.
        let options_paths = target
            .options
            .include_paths
            .as_ref()
            .or(file.sass.options.include_paths.as_ref());
        let include_paths: Vec<PathBuf> = merge_vecs(&[
            Some(&layout.include_paths),
            options_paths,
            overrides.include_paths.as_ref(),
        ])
        .iter()
        .map(|p| root.join(metadata.expand(p)))
        .collect();

        let output_style = overrides
            .output_style
            .or(target.options.output_style)
            .or(file.sass.options.output_style)
            .unwrap_or_default();

        let configs = target
            .files
            .iter()
            .map(|(dest, src)| BuildConfiguration {
                include_paths: include_paths.clone(),
                output_style,
                entry_file: root.join(metadata.expand(src)),
                output_file: root.join(metadata.expand(dest)),
            })
            .collect();
        targets.insert(name.clone(), configs);
    }

    Ok(ResolvedBuild {
        targets,
        aliases: file.aliases.clone(),
    })
}
