// inflector/tests/cli_integration_tests.rs
//! Command-line integration tests for the `inflector` binary.
//!
//! These tests run the compiled executable with `assert_cmd`, feeding it
//! temporary YAML configs created with `tempfile`, and assert on stdout,
//! stderr and the exit status.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test;

const MVC_CONFIG: &str = r#"
target: ":module/:controller/:action"
rules:
  - key: module
    value: app
  - key: ":controller"
    value: [camel_case_to_dash, lowercase]
  - key: ":action"
    value: lowercase
"#;

fn write_config(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

/// Runs `inflector` with `args`, with logging enabled for the spawned process.
fn run_inflector(args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("inflector").unwrap();
    cmd.env("RUST_LOG", "debug");
    cmd.env_remove("INFLECTOR_CONFIG");
    cmd.args(args);
    cmd.assert()
}

#[test]
fn test_render_mvc_target() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let path = config.path().to_str().unwrap();
    run_inflector(&["render", "-c", path, "--set", "controller=UserAccount", "--set", "action=Create"])
        .success()
        .stdout("app/user-account/create\n");
    Ok(())
}

#[test]
fn test_render_fails_on_unresolved_placeholder() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let path = config.path().to_str().unwrap();
    run_inflector(&["render", "-c", path, "--set", "controller=Index"])
        .failure()
        .stderr(predicate::str::contains("app/index/:action"));
    Ok(())
}

#[test]
fn test_render_no_throw_leaves_placeholder() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let path = config.path().to_str().unwrap();
    run_inflector(&["-q", "render", "-c", path, "--no-throw", "--set", "controller=Index"])
        .success()
        .stdout("app/index/:action\n");
    Ok(())
}

#[test]
fn test_render_target_override_and_json_source() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let mut source = NamedTempFile::new()?;
    source.write_all(br#"{"controller": "NewsItem", "action": "Show"}"#)?;

    run_inflector(&[
        "render",
        "-c",
        config.path().to_str().unwrap(),
        "--target",
        "views/:controller/:action.phtml",
        "--source-json",
        source.path().to_str().unwrap(),
        "--set",
        "action=Edit",
    ])
    .success()
    .stdout("views/news-item/edit.phtml\n");
    Ok(())
}

#[test]
fn test_render_from_stdin_json() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let mut cmd = Command::cargo_bin("inflector")?;
    cmd.args(["render", "-c", config.path().to_str().unwrap(), "--source-json", "-"]);
    cmd.write_stdin(r#"{"controller": "Blog", "action": "List"}"#);
    cmd.assert().success().stdout("app/blog/list\n");
    Ok(())
}

#[test]
fn test_render_writes_output_file() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let output = NamedTempFile::new()?;
    run_inflector(&[
        "render",
        "-c",
        config.path().to_str().unwrap(),
        "-s",
        "controller=A",
        "-s",
        "action=B",
        "-o",
        output.path().to_str().unwrap(),
    ])
    .success()
    .stderr(predicate::str::contains("Writing inflected target to file"));
    assert_eq!(fs::read_to_string(output.path())?, "app/a/b\n");
    Ok(())
}

#[test]
fn test_rules_lists_stack_order() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    run_inflector(&["rules", "-c", config.path().to_str().unwrap()])
        .success()
        .stdout(
            "module\tstatic\tapp\n\
             controller\tchain\tcamel_case_to_dash -> lowercase\n\
             action\tchain\tlowercase\n",
        );
    Ok(())
}

#[test]
fn test_filters_lists_builtins() {
    run_inflector(&["filters"])
        .success()
        .stdout(predicate::str::contains("lowercase\n"))
        .stdout(predicate::str::contains("regex_replace\n"));
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
    let config = write_config("target: \":a\"\nrules:\n  - key: \":a\"\n    value: not_a_filter\n")?;
    run_inflector(&["render", "-c", config.path().to_str().unwrap(), "-s", "a=x"])
        .failure()
        .stderr(predicate::str::contains("not_a_filter"));
    Ok(())
}

#[test]
fn test_malformed_set_argument_is_rejected() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    run_inflector(&["render", "-c", config.path().to_str().unwrap(), "--set", "novalue"])
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
    Ok(())
}

#[test]
fn test_render_warns_about_unbound_source_values() -> Result<()> {
    let config = write_config(MVC_CONFIG)?;
    let path = config.path().to_str().unwrap();
    run_inflector(&["render", "-c", path, "-s", "controller=Blog", "-s", "action=List", "-s", "extra=1"])
        .success()
        .stdout("app/blog/list\n")
        .stderr(predicate::str::contains("[warning] Source value 'extra' does not match any rule"));

    run_inflector(&["-q", "render", "-c", path, "-s", "controller=Blog", "-s", "action=List", "-s", "extra=1"])
        .success()
        .stderr(predicate::str::contains("[warning]").not());
    Ok(())
}
