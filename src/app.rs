// Declare modules
pub mod cli;
pub mod compiler;
pub mod config;
pub mod layouts;
pub mod models;
pub mod package;
pub mod tasks;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;

use self::cli::Cli;
use self::compiler::{Rsass, SassCompiler};
use self::config::{resolve_config, BuildFile, Overrides, ResolvedBuild, SASS_TASK};
use self::models::Task;
use self::package::PackageMetadata;
use self::tasks::{TaskRegistry, DEFAULT_TASK};

/// Parses the command line and runs the requested tasks.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

/// Initializes components and runs the tasks named in `args`.
pub fn run_with(args: Cli) -> Result<()> {
    // 1. Identify Project Root
    let root = match &args.base {
        Some(base) => base.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    // 2. Resolve Configuration
    let file = BuildFile::load(&root.join(&args.file))?;
    let metadata = PackageMetadata::load(&root.join(&file.package))?;
    let user_layouts = layouts::load_user_layouts()?;
    let resolved = resolve_config(
        &file,
        &Overrides::from(&args),
        &root,
        &metadata,
        &user_layouts,
    )?;

    // 3. Register & Run
    let registry = build_registry(Rsass, &root, resolved, metadata);
    for task in &args.tasks {
        registry.run(task)?;
    }

    Ok(())
}

/// Registers `sass`, one `sass:<target>` per target, the aliases, and
/// `default`. Without an explicit `default` alias, a single-file build is
/// registered directly as the default build; otherwise `default` runs `sass`.
pub fn build_registry<C: SassCompiler>(
    compiler: C,
    root: &Path,
    resolved: ResolvedBuild,
    metadata: PackageMetadata,
) -> TaskRegistry<C> {
    let mut registry = TaskRegistry::new(compiler, root.to_path_buf());

    let mut target_tasks = Vec::new();
    let single = resolved.single().cloned();
    for (target, configs) in resolved.targets {
        let name = format!("{}:{}", SASS_TASK, target);
        registry.register(&name, Task::Compile(configs));
        target_tasks.push(name);
    }
    registry.register(SASS_TASK, Task::Alias(target_tasks));

    let explicit_default = resolved.aliases.contains_key(DEFAULT_TASK);
    for (name, tasks) in resolved.aliases {
        registry.register(&name, Task::Alias(tasks));
    }

    match single {
        Some(config) if !explicit_default => registry.register_default_build(config, metadata),
        _ => {
            registry.set_metadata(metadata);
            if !explicit_default {
                registry.register(DEFAULT_TASK, Task::Alias(vec![SASS_TASK.to_string()]));
            }
        }
    }

    registry
}
