use crate::app::models::{BuildConfiguration, OutputStyle};
use anyhow::{Context, Result};
use rsass::input::FsContext;
use rsass::output::{Format, Style};
use std::fs;

/// The external Sass compiler. Implementations receive the configuration
/// as-is and return the generated CSS.
pub trait SassCompiler {
    fn compile(&self, config: &BuildConfiguration) -> Result<Vec<u8>>;
}

/// Compiler backed by `rsass`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rsass;

impl SassCompiler for Rsass {
    fn compile(&self, config: &BuildConfiguration) -> Result<Vec<u8>> {
        let format = Format {
            style: match config.output_style {
                OutputStyle::Expanded => Style::Expanded,
                OutputStyle::Compressed => Style::Compressed,
            },
            ..Default::default()
        };

        let (mut context, scss) = FsContext::for_path(&config.entry_file).map_err(rsass::Error::from)?;
        for dir in &config.include_paths {
            if !dir.is_dir() {
                log::debug!("Include path {:?} does not exist", dir);
            }
            context.push_path(dir);
        }

        Ok(context.with_format(format).transform(scss)?)
    }
}

/// Compiles fully in memory, then writes `output_file`. A failed compile
/// leaves any existing output untouched.
pub fn build<C: SassCompiler + ?Sized>(compiler: &C, config: &BuildConfiguration) -> Result<()> {
    let css = compiler.compile(config)?;

    if let Some(parent) = config.output_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create output directory {:?}", parent))?;
        }
    }
    fs::write(&config.output_file, css)
        .context(format!("Failed to write {:?}", config.output_file))?;

    Ok(())
}
