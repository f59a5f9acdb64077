//! Command line handling and exit codes.

use crate::common::{Project, SourceFixture, platepipe_cmd};
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_help_exits_zero() {
    platepipe_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[DOCUMENT] [TEMPLATE]..."))
        .stdout(predicate::str::contains("--var-defaults"))
        .stdout(predicate::str::contains("EXAMPLES:"))
        .stdout(predicate::str::contains("two dashes (--vd, --vo, --df, --tf)"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_single_dash_alias_is_rejected() {
    platepipe_cmd()
        .args(["-df", "md", "doc.md", "page.html"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn test_version_exits_zero() {
    platepipe_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_document_is_usage_error() {
    platepipe_cmd()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no document specified"))
        .stderr(predicate::str::contains("--help"));
}

#[test]
fn test_no_templates_is_usage_error() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;

    project
        .cmd()
        .arg("doc.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no templates specified"));
    Ok(())
}

#[test]
fn test_unknown_format_is_usage_error() {
    platepipe_cmd()
        .args(["--df", "pdf", "doc.txt", "page.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pdf"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    platepipe_cmd().args(["--nope", "doc.txt", "page.txt"]).assert().code(1);
}

#[test]
fn test_missing_document_is_runtime_error() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_template())?;

    project
        .cmd()
        .args(["missing.md", "page.txt"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "error reading document: open missing.md: no such file or directory",
        ));
    Ok(())
}

#[test]
fn test_missing_template_is_runtime_error() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;

    project
        .cmd()
        .args(["doc.txt", "missing.html"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error loading template: open missing.html"));
    Ok(())
}

#[test]
fn test_missing_variables_file_is_runtime_error() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.fixture(&SourceFixture::text_template())?;

    project
        .cmd()
        .args(["--vd", "nope.toml", "doc.txt", "page.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error loading variables:"))
        .stderr(predicate::str::contains("nope.toml"));
    Ok(())
}

#[test]
fn test_malformed_template_is_runtime_error() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.fixture(&SourceFixture::malformed_template())?;

    project
        .cmd()
        .args(["doc.txt", "broken.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error loading template: broken.txt"))
        .stderr(predicate::str::contains("syntax error"));
    Ok(())
}
