//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kornum() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("kornum").unwrap()
}

/// Plain-mode command that ignores any settings file on the machine.
fn plain(dir: &TempDir) -> Command {
    let mut cmd = kornum();
    cmd.arg("--plain")
        .arg("--config")
        .arg(dir.path().join("settings.json"))
        .arg("--auto-advance-ms")
        .arg("0")
        .arg("--seed")
        .arg("1");
    cmd
}

#[test]
fn convert_sino_number() {
    kornum()
        .args(["convert", "1234"])
        .assert()
        .success()
        .stdout("천이백삼십사\n");
}

#[test]
fn convert_native_number() {
    kornum()
        .args(["convert", "21", "--system", "native"])
        .assert()
        .success()
        .stdout("스물하나\n");
}

#[test]
fn convert_out_of_range_prints_marker() {
    kornum()
        .args(["convert", "100", "--system", "native"])
        .assert()
        .success()
        .stdout("범위 초과\n");
}

#[test]
fn convert_negative_number_fails() {
    kornum()
        .args(["convert", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("negative"));
}

#[test]
fn unknown_system_is_rejected() {
    kornum()
        .args(["convert", "5", "--system", "roman"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown number system"));
}

#[test]
fn native_table_lists_every_number() {
    let output = kornum().args(["table", "--system", "native"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 100);
    assert!(stdout.starts_with("0\t영\n"));
    assert!(stdout.contains("99\t아흔아홉\n"));
}

#[test]
fn plain_single_value_korean_to_english() {
    let dir = TempDir::new().unwrap();
    plain(&dir)
        .args(["--min", "5", "--max", "5", "--direction", "k2e"])
        .write_stdin("5\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("다섯"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Score: 1 / 1"));
}

#[test]
fn plain_single_value_english_to_korean() {
    let dir = TempDir::new().unwrap();
    plain(&dir)
        .args(["--min", "5", "--max", "5", "--direction", "e2k", "--system", "native"])
        .write_stdin("다섯\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1 / 1"));
}

#[test]
fn plain_shows_expected_answer_when_wrong() {
    let dir = TempDir::new().unwrap();
    plain(&dir)
        .args(["--min", "1234", "--max", "1234", "--system", "sino", "--direction", "e2k"])
        .write_stdin("일천이백삼십사\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect"))
        .stdout(predicate::str::contains("천이백삼십사"))
        .stdout(predicate::str::contains("Score: 0 / 1"));
}

#[test]
fn plain_accepts_inverted_and_negative_ranges() {
    let dir = TempDir::new().unwrap();
    plain(&dir)
        .args(["--min", "50", "--max", "-10"])
        .write_stdin(":q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0 / 0"));
}

#[test]
fn settings_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{ "system": "sino", "direction": "e2k", "min": 10, "max": 10 }"#,
    )
    .unwrap();
    plain(&dir)
        .write_stdin("십\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sino-Korean"))
        .stdout(predicate::str::contains("Score: 1 / 1"));
}

#[test]
fn broken_settings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    plain(&dir)
        .write_stdin(":q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings file"));
}

#[test]
fn unknown_direction_is_rejected() {
    let dir = TempDir::new().unwrap();
    plain(&dir)
        .args(["--direction", "sideways"])
        .write_stdin(":q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown direction"));
}
