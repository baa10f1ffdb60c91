//! Binary tests for the brush-timer CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn brush_timer() -> Command {
    Command::cargo_bin("brush-timer").unwrap()
}

#[test]
fn help_lists_subcommands() {
    brush_timer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("zones"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn zones_prints_eight_zones_in_order() {
    let output = brush_timer().arg("zones").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("1. En haut à droite, à l'extérieur"));
    assert!(lines[7].starts_with("8. En bas à droite, à l'intérieur"));
}

#[test]
fn zones_json() {
    let output = brush_timer().args(["zones", "--json"]).assert().success();
    let zones: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    let zones = zones.as_array().unwrap();
    assert_eq!(zones.len(), 8);
    assert_eq!(zones[0]["index"], 0);
    assert_eq!(zones[0]["arch"], "upper");
    assert_eq!(zones[0]["side"], "right");
    assert_eq!(zones[0]["surface"], "outer");
}

#[test]
fn completions_bash() {
    brush_timer()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("brush-timer"));
}

#[test]
fn run_shows_ready_screen_and_quits() {
    brush_timer()
        .args(["run", "--no-sound"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("C'est l'heure de se brosser les dents !"))
        .stdout(predicate::str::contains("Prêt(e) ?"))
        .stdout(predicate::str::contains("02:00"));
}

#[test]
fn run_without_subcommand_defaults_to_session() {
    // Opens the default audio device when there is one
    brush_timer()
        .write_stdin("q\n")
        .env("RUST_LOG", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("Prêt(e) ?"));
}

#[test]
fn run_start_shows_first_zone() {
    brush_timer()
        .args(["run", "--no-sound"])
        .write_stdin("\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("En haut à droite, à l'extérieur"));
}

#[test]
fn music_without_sound_reports_failure() {
    brush_timer()
        .args(["run", "--no-sound"])
        .write_stdin("m\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("La musique ne peut pas démarrer"))
        .stdout(predicate::str::contains("Musique : non"));
}

#[test]
fn json_mode_emits_snapshots_and_events() {
    let output = brush_timer()
        .args(["run", "--no-sound", "--json"])
        .write_stdin("\nq\n")
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let values: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(values[0]["phase"], "ready");
    assert_eq!(values[0]["remainingSeconds"], 120);
    assert!(values.iter().any(|v| v["event"] == "started"));
    assert!(values.iter().any(|v| v["phase"] == "brushing"));
}

#[test]
fn missing_music_file_is_not_fatal() {
    brush_timer()
        .args(["run", "--no-sound", "--music", "/nonexistent/song.mp3"])
        .write_stdin("q\n")
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn interrupt_ends_session_with_stdin_open() {
    use std::process::Stdio;
    use std::thread::sleep;
    use std::time::{Duration, Instant};

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("brush-timer"))
        .args(["run", "--no-sound", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    // Keep stdin open for the whole test
    let _stdin = child.stdin.take().unwrap();

    sleep(Duration::from_millis(500));
    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let deadline = Instant::now() + Duration::from_secs(5);
    let exited = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break Some(status);
        }
        if Instant::now() >= deadline {
            break None;
        }
        sleep(Duration::from_millis(20));
    };

    if exited.is_none() {
        let _ = child.kill();
        let _ = child.wait();
    }
    assert!(exited.is_some(), "still running after SIGINT");
}
