use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stdout};

const LOGIN_HTML: &str = r#"<form>
  <h1 translate>LOGIN_TITLE</h1>
  <input translate-attr-placeholder="USERNAME" translate-default-attr-placeholder="User name">
  <button translate translate-default="Sign in">SUBMIT</button>
</form>
"#;

const LOGIN_JS: &str = r#"angular.module('app').controller('LoginCtrl', function ($translate) {
  var vm = this;
  vm.error = $translate.instant('LOGIN_FAILED', 'Wrong password');
});
"#;

#[test]
fn test_extract_writes_json_catalog() -> Result<()> {
    let test = CliTest::with_files(&[
        ("app/login/login.html", LOGIN_HTML),
        ("app/login/login.js", LOGIN_JS),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("translations.json")?,
        r#"{
  "LOGIN_TITLE": "",
  "USERNAME": "User name",
  "SUBMIT": "Sign in",
  "LOGIN_FAILED": "Wrong password"
}
"#
    );
    let out = stdout(&output);
    assert!(out.contains("Scanned 2 files - 4 translations, no issues found"));
    assert!(out.contains("Wrote ./translations.json"));

    Ok(())
}

#[test]
fn test_attribute_only_translation_site() -> Result<()> {
    let test = CliTest::with_files(&[(
        "view.html",
        r#"<div translate translate-attr-title="attribute-default-id" translate-default-attr-title="Default text for attribute title"></div>
"#,
    )])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("translations.json")?,
        "{\n  \"attribute-default-id\": \"Default text for attribute title\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_empty_translation_site_is_reported() -> Result<()> {
    let test = CliTest::with_files(&[("view.html", "<p translate></p>\n")])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("no id was given and there is no content to use as one"));

    Ok(())
}

#[test]
fn test_extract_commonjs_format() -> Result<()> {
    let test = CliTest::with_files(&[("index.html", "<p translate>HELLO</p>")])?;

    let output = test.extract_command().args(["--format", "js"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(!test.root().join("translations.json").exists());
    assert_eq!(
        test.read_file("translations.js")?,
        "module.exports = {\n  \"HELLO\": \"\"\n};\n"
    );

    Ok(())
}

#[test]
fn test_extract_output_flag() -> Result<()> {
    let test = CliTest::with_files(&[("index.html", "<p translate>HELLO</p>")])?;

    let output = test
        .extract_command()
        .args(["--output", "dist/i18n"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("dist/i18n/translations.json").exists());

    Ok(())
}

#[test]
fn test_extract_uses_config_output_dir_and_format() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".transcanrc.json",
            r#"{ "outputDir": "build", "format": "js" }"#,
        ),
        ("index.html", "<p translate>HELLO</p>"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("build/translations.js").exists());

    Ok(())
}

#[test]
fn test_dynamic_usage_fails_but_asset_is_written() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "app/main.html",
            "<p translate>STATIC</p>\n<p translate>{{ vm.key }}</p>\n",
        ),
        ("app/main.js", "function f($translate) {\n  $translate(key);\n}\n"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        test.read_file("translations.json")?,
        "{\n  \"STATIC\": \"\"\n}\n"
    );

    let out = stdout(&output);
    assert!(out.contains(
        "error: Failed to extract the translation { id: `{{ vm.key }}`, defaultText: undefined, usages: [ ./app/main.html:2:1 ] }: the id or the default text is not a literal.  dynamic-translation"
    ));
    assert!(out.contains("--> ./app/main.js:2:3"));
    assert!(out.contains("2 |   $translate(key);"));
    assert!(out.contains("2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_suppressed_dynamic_usages_pass() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            "app/main.html",
            "<p translate suppress-dynamic-translation-error>{{ vm.key }}</p>\n",
        ),
        (
            "app/main.js",
            "function f($translate) {\n  // suppress-dynamic-translation-error\n  $translate(key);\n}\n",
        ),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("translations.json")?, "{}\n");

    Ok(())
}

#[test]
fn test_conflict_keeps_first_default_text() -> Result<()> {
    let test = CliTest::with_files(&[
        ("a.html", "<p translate translate-default=\"First\">KEY</p>"),
        ("b.js", "$translate('KEY', 'Second');"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        test.read_file("translations.json")?,
        "{\n  \"KEY\": \"First\"\n}\n"
    );

    let out = stdout(&output);
    assert!(out.contains(
        "error: Two translations with the same id \"KEY\" but different default texts.  conflicting-translation"
    ));
    assert!(out.contains(
        "= note: Existing: { id: \"KEY\", defaultText: \"First\", usages: [ ./a.html:1:1 ] }"
    ));
    assert!(out.contains(
        "= note: New: { id: \"KEY\", defaultText: \"Second\", usages: [ ./b.js:1:1 ] }"
    ));

    Ok(())
}

#[test]
fn test_parse_error_is_reported_and_other_files_extracted() -> Result<()> {
    let test = CliTest::with_files(&[
        ("broken.js", "function ( {"),
        ("ok.html", "<p translate>OK</p>"),
    ])?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(test.read_file("translations.json")?, "{\n  \"OK\": \"\"\n}\n");

    let out = stdout(&output);
    assert!(out.contains("parse-error"));
    assert!(out.contains("--> ./broken.js"));

    Ok(())
}

#[test]
fn test_extract_with_source_root() -> Result<()> {
    let test = CliTest::with_files(&[("web/index.html", "<p translate>HELLO</p>")])?;

    let output = test
        .extract_command()
        .args(["--source-root", "web"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(test.root().join("web/translations.json").exists());
    assert!(stdout(&output).contains("Scanned 1 file - 1 translation"));

    Ok(())
}

#[test]
fn test_missing_source_root_is_an_internal_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .extract_command()
        .args(["--source-root", "missing"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(crate::stderr(&output).contains("Source root is not a directory"));

    Ok(())
}
