use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn tokensmith(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tokensmith"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn fixture() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/hmi")
        .to_string_lossy()
        .into_owned()
}

fn cyclic_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("Tokens/New/_Base/Value.json");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(
        file,
        r#"{ "x": { "value": "{y}" }, "y": { "value": "{x}" }, "spacing": { "4": { "value": 4 } } }"#,
    )
    .unwrap();
    root
}

#[test]
fn check_clean_fixture_exits_zero() {
    let output = tokensmith(&["check", &fixture(), "--modes"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert!(stdout.starts_with("Checked 4 combination(s)\n"));
    assert!(stdout.contains("No diagnostics"));
}

#[test]
fn diagnostics_exit_two_unless_lenient() {
    let root = cyclic_root();
    let root_arg = root.path().to_string_lossy().into_owned();

    let output = tokensmith(&["generate", &root_arg]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[default_day] cycle: alias cycle: x -> y -> x"));
    assert!(root
        .path()
        .join("_TransformedTokens/css/default_day/spacing.css")
        .exists());

    let output = tokensmith(&["generate", &root_arg, "--lenient"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Diagnostics: 2"));
}

#[test]
fn structural_errors_exit_one() {
    let root = tempfile::tempdir().unwrap();
    let file = root.path().join("Tokens/New/_Base/Value.json");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, "not json").unwrap();

    let output = tokensmith(&["generate", &root.path().to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn platform_flag_limits_output() {
    let out = tempfile::tempdir().unwrap();
    let output = tokensmith(&[
        "generate",
        &fixture(),
        "--out",
        &out.path().to_string_lossy(),
        "--platform",
        "xml",
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert!(out.path().join("xml/default_day/colors.xml").exists());
    assert!(!out.path().join("css").exists());
}

#[test]
fn init_refuses_to_overwrite() {
    let root = tempfile::tempdir().unwrap();
    let root_arg = root.path().to_string_lossy().into_owned();

    assert_eq!(tokensmith(&["init", &root_arg]).status.code(), Some(0));
    assert!(root.path().join("tokensmith.toml").exists());
    assert_eq!(tokensmith(&["init", &root_arg]).status.code(), Some(1));
    assert_eq!(tokensmith(&["init", &root_arg, "--force"]).status.code(), Some(0));
}
