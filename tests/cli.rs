//! Drives the command-line entry point against scratch projects.

use clap::Parser;
use std::fs;
use std::path::Path;
use stylebuild::app::cli::Cli;
use stylebuild::app::run_with;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("stylebuild").chain(args.iter().copied()))
}

#[test]
fn base_and_layout_flags_build_the_default_task() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_str().unwrap();
    write(dir.path(), "scss/main.scss", "@import \"grid\";\n");
    write(
        dir.path(),
        "bower_components/foundation/scss/_grid.scss",
        ".row { width: 100%; }\n",
    );

    run_with(cli(&["--base", base, "--layout", "foundation"])).unwrap();

    let css = fs::read_to_string(dir.path().join("css/main.css")).unwrap();
    assert!(css.contains(".row{width:100%}"), "got {:?}", css);
}

#[test]
fn missing_entry_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_str().unwrap();

    let result = run_with(cli(&["--base", base, "--layout", "foundation"]));

    assert!(result.is_err());
    assert!(!dir.path().join("css/main.css").exists());
}

#[test]
fn build_file_flag_and_overrides_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_str().unwrap();
    write(dir.path(), "src/site.scss", "@import \"colors\";\n");
    write(dir.path(), "extra/_colors.scss", "p { color: blue; }\n");
    write(
        dir.path(),
        "config/build.toml",
        r#"
        [sass.site.options]
        output_style = "compressed"

        [sass.site.files]
        "public/site.css" = "src/site.scss"
        "#,
    );

    run_with(cli(&[
        "sass:site",
        "--base",
        base,
        "--file",
        "config/build.toml",
        "--output-style",
        "expanded",
        "--include-path",
        "extra/",
    ]))
    .unwrap();

    let css = fs::read_to_string(dir.path().join("public/site.css")).unwrap();
    assert!(css.contains("color: blue;"), "got {:?}", css);
}

#[test]
fn unknown_task_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_str().unwrap();
    assert!(run_with(cli(&["nothing-here", "--base", base])).is_err());
}
