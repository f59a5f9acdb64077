//! End-to-end rendering through the binary.

use crate::common::{Project, SourceFixture};
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_markdown_through_html_template() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::markdown_document())?;
    project.fixture(&SourceFixture::html_template())?;

    project
        .cmd()
        .args(["doc.md", "page.html"])
        .assert()
        .success()
        .stdout(
            "<html lang=\"en\"><title>Release notes</title><body><h1>Changes</h1>\n\
             <ul>\n<li>faster <em>startup</em></li>\n</ul>\n</body></html>\n",
        );
    Ok(())
}

#[test]
fn test_html_template_escapes_text_document() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.fixture(&SourceFixture::html_template())?;

    project
        .cmd()
        .args(["doc.txt", "page.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<body>fish &amp; chips &lt; 5 euros\n</body>"));
    Ok(())
}

#[test]
fn test_html_template_escapes_header_values() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::markdown_document())?;
    project.file("author.html", "{{ author }}")?;

    project
        .cmd()
        .args(["doc.md", "author.html"])
        .assert()
        .success()
        .stdout("Ops &lt;ops@example.com&gt;");
    Ok(())
}

#[test]
fn test_html_template_filters_before_escaping() -> Result<()> {
    let project = Project::new()?;
    project.file("doc.txt", "title = 'Fish & Chips'\n\nbody")?;
    project.file(
        "filters.html",
        r#"[{{ title | truncate(length=6) }}][{{ title | replace(from="&", to="and") }}][{{ title | length }}]"#,
    )?;

    project
        .cmd()
        .args(["doc.txt", "filters.html"])
        .assert()
        .success()
        .stdout("[Fish &amp;…][Fish and Chips][12]");
    Ok(())
}

#[test]
fn test_text_template_is_verbatim() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.fixture(&SourceFixture::text_template())?;

    project
        .cmd()
        .args(["doc.txt", "page.txt"])
        .assert()
        .success()
        .stdout("== Plain ==\nfish & chips < 5 euros\n");
    Ok(())
}

#[test]
fn test_document_from_stdin() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_template())?;

    project
        .cmd()
        .args(["-", "page.txt"])
        .write_stdin("title = 'From stdin'\n\n# not converted")
        .assert()
        .success()
        .stdout("== From stdin ==\n# not converted");
    Ok(())
}

#[test]
fn test_latin1_document_renders() -> Result<()> {
    let project = Project::new()?;
    project.file("body.txt", "[{{ content }}]")?;

    project
        .cmd()
        .args(["-", "body.txt"])
        .write_stdin(&b"caf\xe9 au lait"[..])
        .assert()
        .success()
        .stdout("[caf\u{FFFD} au lait]");
    Ok(())
}

#[test]
fn test_stdin_markdown_with_doc_format() -> Result<()> {
    let project = Project::new()?;
    project.file("body.html", "{{ content }}")?;

    project
        .cmd()
        .args(["--df", "md", "-", "body.html"])
        .write_stdin("# Title")
        .assert()
        .success()
        .stdout("<h1>Title</h1>\n");
    Ok(())
}

#[test]
fn test_doc_format_txt_skips_conversion() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::markdown_document())?;
    project.file("body.txt", "{{ content }}")?;

    project
        .cmd()
        .args(["--df", "txt", "doc.md", "body.txt"])
        .assert()
        .success()
        .stdout("# Changes\n\n- faster *startup*\n");
    Ok(())
}

#[test]
fn test_template_format_override() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.file("raw.html", "{{ content }}")?;

    project
        .cmd()
        .args(["--tf", "txt", "doc.txt", "raw.html"])
        .assert()
        .success()
        .stdout("fish & chips < 5 euros\n");
    Ok(())
}

#[test]
fn test_chain_threads_content_and_priority() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::headerless_document())?;
    project.file("inner.txt", "who = 'inner'\n\n[{{ who }}: {{ content }}]")?;
    project.file("outer.txt", "who = 'outer'\nextra = 'x'\n\n<{{ content }}|{{ who }}|{{ extra }}>")?;

    project
        .cmd()
        .args(["bare.txt", "inner.txt", "outer.txt"])
        .assert()
        .success()
        .stdout("<[inner: just content\n]|inner|x>");
    Ok(())
}

#[test]
fn test_variable_files_priority() -> Result<()> {
    let project = Project::new()?;
    project.file("doc.txt", "a = 'document'\nb = 'document'\n\nbody")?;
    project.file("vars.txt", "{{ a }} {{ b }} {{ c }}")?;
    project.fixture(&SourceFixture::variables(
        "defaults.toml",
        "a = 'default'\nb = 'default'\nc = 'default'",
    ))?;
    project.fixture(&SourceFixture::variables("overrides.toml", "a = 'override'"))?;

    project
        .cmd()
        .args(["--vd", "defaults.toml", "--vo", "overrides.toml", "doc.txt", "vars.txt"])
        .assert()
        .success()
        .stdout("override document default");
    Ok(())
}

#[test]
fn test_program_metadata_wins() -> Result<()> {
    let project = Project::new()?;
    project.file("doc.txt", "body")?;
    project.file("meta.txt", "{{ platepipe.document }} {{ platepipe.templates | join(sep=\",\") }}")?;
    project.file("overrides.toml", "[platepipe]\ndocument = 'forged'")?;

    project
        .cmd()
        .args(["--vo", "overrides.toml", "doc.txt", "meta.txt"])
        .assert()
        .success()
        .stdout("doc.txt meta.txt");
    Ok(())
}

#[test]
fn test_malformed_header_is_content() -> Result<()> {
    let project = Project::new()?;
    project.file("doc.txt", "Dear reader, hello\n\nbody")?;
    project.file("body.txt", "{{ content }}")?;

    project
        .cmd()
        .args(["doc.txt", "body.txt"])
        .assert()
        .success()
        .stdout("Dear reader, hello\n\nbody");
    Ok(())
}

#[test]
fn test_undefined_variable_fails_without_output() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.file("typo.txt", "{{ titel }}")?;

    project
        .cmd()
        .args(["doc.txt", "typo.txt"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error applying template: stage 1: typo.txt"))
        .stderr(predicate::str::contains("did you mean 'title'?"));
    Ok(())
}

#[test]
fn test_verbose_error_lists_variables() -> Result<()> {
    let project = Project::new()?;
    project.fixture(&SourceFixture::text_document())?;
    project.file("typo.txt", "{{ titel }}")?;

    project
        .cmd()
        .args(["-v", "doc.txt", "typo.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Available variables:"));
    Ok(())
}

#[test]
fn test_markdown_extensions_from_env() -> Result<()> {
    let project = Project::new()?;
    project.file("doc.md", "~~old~~ new")?;
    project.file("body.html", "{{ content }}")?;

    project
        .cmd()
        .env("PLATEPIPE_MARKDOWN_EXTENSIONS", "strikethrough")
        .args(["doc.md", "body.html"])
        .assert()
        .success()
        .stdout("<p><del>old</del> new</p>\n");

    project
        .cmd()
        .args(["doc.md", "body.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<del>").not());
    Ok(())
}
