use crate::app::compiler::{self, SassCompiler};
use crate::app::models::{BuildConfiguration, Task};
use crate::app::package::PackageMetadata;
use anyhow::{bail, Result};
use pathdiff::diff_paths;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_TASK: &str = "default";

/// Named tasks plus the compiler that executes them.
pub struct TaskRegistry<C> {
    compiler: C,
    root: PathBuf,
    metadata: PackageMetadata,
    tasks: BTreeMap<String, Task>,
}

impl<C: SassCompiler> TaskRegistry<C> {
    pub fn new(compiler: C, root: PathBuf) -> Self {
        Self {
            compiler,
            root,
            metadata: PackageMetadata::default(),
            tasks: BTreeMap::new(),
        }
    }

    /// Registers `default` as a single compilation of `config`, forwarded to
    /// the compiler unmodified.
    pub fn register_default_build(
        &mut self,
        config: BuildConfiguration,
        metadata: PackageMetadata,
    ) {
        self.metadata = metadata;
        self.register(DEFAULT_TASK, Task::Compile(vec![config]));
    }

    pub fn set_metadata(&mut self, metadata: PackageMetadata) {
        self.metadata = metadata;
    }

    /// Later registrations replace earlier ones with the same name.
    pub fn register(&mut self, name: &str, task: Task) {
        if self.tasks.insert(name.to_string(), task).is_some() {
            log::debug!("Task \"{}\" re-registered", name);
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    #[cfg(test)]
    pub(crate) fn compiler(&self) -> &C {
        &self.compiler
    }

    pub fn run(&self, name: &str) -> Result<()> {
        log::info!("Running \"{}\" for {}", name, self.metadata.describe());
        let mut stack = Vec::new();
        self.run_inner(name, &mut stack)
    }

    fn run_inner(&self, name: &str, stack: &mut Vec<String>) -> Result<()> {
        if stack.iter().any(|s| s == name) {
            bail!("Task alias cycle: {} -> {}", stack.join(" -> "), name);
        }

        let Some(task) = self.tasks.get(name) else {
            bail!("Task \"{}\" not found", name);
        };

        stack.push(name.to_string());
        match task {
            Task::Alias(names) => {
                for next in names {
                    self.run_inner(next, stack)?;
                }
            }
            Task::Compile(configs) => {
                for config in configs {
                    compiler::build(&self.compiler, config)?;
                    let shown = diff_paths(&config.output_file, &self.root)
                        .unwrap_or_else(|| config.output_file.clone());
                    log::info!("File {} created", shown.display());
                }
            }
        }
        stack.pop();

        Ok(())
    }
}
