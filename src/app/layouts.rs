use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A named vendoring strategy: which directories the compiler searches.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    #[serde(default)]
    pub include_paths: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct LayoutsFile {
    #[serde(flatten)]
    layouts: HashMap<String, Layout>,
}

const VENDOR: &[&str] = &[
    "_vendor/normalize-scss/",
    "_vendor/bourbon/app/assets/stylesheets/",
    "_vendor/neat/app/assets/stylesheets/",
    "_vendor/bitters/app/assets/stylesheets/",
];

const FOUNDATION: &[&str] = &["bower_components/foundation/scss/"];

const BOWER: &[&str] = &[
    "bower_components/normalize-scss/",
    "bower_components/bourbon/app/assets/stylesheets/",
    "bower_components/neat/app/assets/stylesheets/",
    "bower_components/bitters/app/assets/stylesheets/",
];

pub fn builtin(name: &str) -> Option<Layout> {
    let paths = match name {
        "vendor" => VENDOR,
        "foundation" => FOUNDATION,
        "bower" => BOWER,
        _ => return None,
    };
    Some(Layout {
        include_paths: paths.iter().map(|p| p.to_string()).collect(),
    })
}

/// Layouts shared across projects, from `~/.config/stylebuild/layouts.toml`.
pub fn load_user_layouts() -> Result<HashMap<String, Layout>> {
    let Some(home) = dirs::home_dir() else {
        return Ok(HashMap::new());
    };
    load_layouts_file(&home.join(".config").join("stylebuild").join("layouts.toml"))
}

fn load_layouts_file(path: &Path) -> Result<HashMap<String, Layout>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read layouts at {:?}", path))?;
    let parsed: LayoutsFile = toml::from_str(&content).context("Failed to parse layouts.toml")?;

    Ok(parsed.layouts)
}

/// Project layouts win over user layouts, which win over the built-in ones.
pub fn resolve(
    name: &str,
    project: &HashMap<String, Layout>,
    user: &HashMap<String, Layout>,
) -> Result<Layout> {
    project
        .get(name)
        .or_else(|| user.get(name))
        .cloned()
        .or_else(|| builtin(name))
        .with_context(|| format!("Unknown include-path layout: {}", name))
}
