use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_mentions_run_options() {
    let mut cmd = Command::cargo_bin("relsweep").unwrap();
    let output = cmd
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert!(text.contains("--config"), "help missing --config flag");
    assert!(
        text.contains("--resume-from"),
        "help missing --resume-from flag"
    );
    assert!(text.contains("--throttle"), "help missing --throttle flag");
    assert!(
        text.contains("--output-dir"),
        "help missing --output-dir flag"
    );
}

#[test]
fn config_flag_is_required() {
    let mut cmd = Command::cargo_bin("relsweep").unwrap();
    cmd.env_remove("RELSWEEP_CONFIG")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn throttle_rejects_out_of_range_values() {
    let mut cmd = Command::cargo_bin("relsweep").unwrap();
    cmd.arg("--config")
        .arg("/dev/null")
        .arg("--throttle")
        .arg("21")
        .assert()
        .failure()
        .stderr(predicate::str::contains("21"));
}
