use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<%=\s*pkg\.([A-Za-z0-9_.\-]+)\s*%>").expect("valid regex"));

/// Project metadata read from `package.json`. Only used for log lines and
/// path templates; the compiler never sees it.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    doc: Value,
}

impl PackageMetadata {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// Reads the metadata document. A missing file yields empty metadata.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No package metadata at {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read package metadata at {:?}", path))?;
        let doc: Value = serde_json::from_str(&content)
            .context(format!("Failed to parse package metadata at {:?}", path))?;

        Ok(Self { doc })
    }

    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.doc.get("version").and_then(Value::as_str)
    }

    /// Looks up a dotted key such as `author.name`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.')
            .try_fold(&self.doc, |node, part| node.get(part))
    }

    /// Expands `<%= pkg.key %>` placeholders. Unknown keys expand to an
    /// empty string, strings are inserted without quotes.
    pub fn expand(&self, template: &str) -> String {
        TEMPLATE
            .replace_all(template, |caps: &Captures| match self.lookup(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .into_owned()
    }

    pub fn describe(&self) -> String {
        match (self.name(), self.version()) {
            (Some(name), Some(version)) => format!("{}@{}", name, version),
            (Some(name), None) => name.to_string(),
            _ => "unnamed project".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> PackageMetadata {
        PackageMetadata::new(json!({
            "name": "site",
            "version": "1.2.0",
            "author": { "name": "Jo" },
            "private": true
        }))
    }

    #[test]
    fn expands_nested_and_scalar_keys() {
        let pkg = sample();
        assert_eq!(pkg.expand("css/<%= pkg.name %>.css"), "css/site.css");
        assert_eq!(pkg.expand("<%=pkg.author.name%>-<%= pkg.version %>"), "Jo-1.2.0");
        assert_eq!(pkg.expand("<%= pkg.private %>"), "true");
    }

    #[test]
    fn unknown_keys_expand_to_nothing() {
        assert_eq!(sample().expand("a<%= pkg.missing.key %>b"), "ab");
        assert_eq!(sample().expand("plain/path.css"), "plain/path.css");
    }

    #[test]
    fn missing_file_is_empty_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = PackageMetadata::load(&dir.path().join("package.json")).unwrap();
        assert_eq!(pkg.name(), None);
        assert_eq!(pkg.describe(), "unnamed project");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(PackageMetadata::load(&path).is_err());
    }

    #[test]
    fn reads_name_and_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "theme", "version": "0.3.1"}"#).unwrap();
        let pkg = PackageMetadata::load(&path).unwrap();
        assert_eq!(pkg.describe(), "theme@0.3.1");
    }
}
