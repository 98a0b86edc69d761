use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_files(&[
        ("app/main.html", "<h1 translate>TITLE</h1>\n<p>{{ 'SUBTITLE' | translate }}</p>\n"),
        (
            "app/main.ts",
            "class MainCtrl {\n  constructor(private $translate) {\n    this.$translate('GREETING');\n  }\n}\n",
        ),
    ])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\u{2713} Scanned 2 files - 3 translations, no issues found\n"
    );
    assert!(!test.root().join("translations.json").exists());

    Ok(())
}

#[test]
fn test_check_reports_issues_without_writing() -> Result<()> {
    let test = CliTest::with_files(&[("view.html", "<span translate=\"{{ key }}\"></span>")])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("dynamic-translation"));
    assert!(out.contains("--> ./view.html:1:1"));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));
    assert!(!test.root().join("translations.json").exists());

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::with_files(&[
        (".transcanrc.json", r#"{ "ignores": ["**/generated/**"] }"#),
        ("app/generated/view.html", "<p translate>{{ broken }}</p>"),
        ("app/view.html", "<p translate>OK</p>"),
    ])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Scanned 1 file - 1 translation"));

    Ok(())
}

#[test]
fn test_test_files_are_skipped() -> Result<()> {
    let test = CliTest::with_files(&[
        ("app/main.js", "$translate('MAIN');"),
        ("app/main.spec.js", "$translate(dynamicKey);"),
    ])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Scanned 1 file - 1 translation"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_internal_error() -> Result<()> {
    let test = CliTest::with_files(&[(".transcanrc.json", r#"{ "ignores": ["[oops"] }"#)])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_parse_warning_hint_on_stderr() -> Result<()> {
    let test = CliTest::with_files(&[("broken.ts", "const = ;")])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("1 file(s) could not be parsed (use -v for details)"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("extract"));
    assert!(out.contains("check"));
    assert!(out.contains("init"));

    Ok(())
}
