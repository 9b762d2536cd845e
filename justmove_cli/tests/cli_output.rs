use std::{env, fs, process::Command};

fn norm_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "")
}

fn exe() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_justmove_cli"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_mentions_subcommands() {
    let output = exe().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    for sub in ["generate", "simulate", "play", "songs"] {
        assert!(stdout.contains(sub), "missing {sub}");
    }
}

#[test]
fn songs_lists_presets() {
    let output = exe().arg("songs").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("electric-dreams"));
    assert!(stdout.contains("neon-nights"));
    assert!(stdout.contains("cyber-funk"));
}

#[test]
fn generate_prints_seeded_json() {
    let run = || {
        exe()
            .args(["generate", "--song", "neon-nights", "--seed", "5"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let v: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(v["song"]["tempo_bpm"], 140.0);
    assert_eq!(v["song"]["style"], "house");
    assert!(v["events"].as_array().is_some_and(|e| !e.is_empty()));
    assert!(v["sections"].as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn generate_then_simulate_file() {
    let dir = env::temp_dir().join(format!("justmove_cli_generate_simulate_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("map.json");

    let out = exe()
        .args([
            "generate",
            "--bpm",
            "128",
            "--duration",
            "45",
            "--difficulty",
            "hard",
            "--style",
            "edm",
            "--seed",
            "1",
            "-o",
            path.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(path.exists());

    let out = exe().args(["simulate", path.to_str().unwrap()]).output().unwrap();
    assert!(out.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&out.stdout));
    assert!(stdout.starts_with("Simulation Start (45.0s, 128 BPM, hard, edm"));
    assert!(stdout.contains("drop"));
}

#[test]
fn unknown_style_is_reported() {
    let output = exe().args(["generate", "--style", "polka"]).output().unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("Error: invalid song"));
    assert!(stderr.contains("Caused by:"));
    assert!(stderr.contains("unknown style: \"polka\""));
}

#[test]
fn simulate_missing_file_is_reported() {
    let missing = env::temp_dir().join(format!("justmove_cli_missing_{}.json", std::process::id()));
    let _ = fs::remove_file(&missing);

    let output = exe().args(["simulate", missing.to_str().unwrap()]).output().unwrap();

    assert!(!output.status.success());
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("Error: failed to read beat map:"));
}

#[test]
fn play_prints_summary_json() {
    let output = exe()
        .args(["play", "--song", "electric-dreams", "--accuracy", "1.0", "--seed", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["grade"], "S");
    assert_eq!(summary["rating_counts"]["miss"], 0);
    assert!(summary["score"].as_u64().is_some_and(|s| s > 0));
}

#[test]
fn play_rejects_bad_config() {
    let dir = env::temp_dir().join(format!("justmove_cli_bad_config_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.json");
    fs::write(&config, r#"{ "ratings": { "perfect": 0.3, "great": 0.6 } }"#).unwrap();

    let output = exe()
        .args(["play", "--duration", "10", "--config", config.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("invalid config"));
}

#[test]
fn play_writes_judged_replay() {
    let dir = env::temp_dir().join(format!("justmove_cli_replay_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let replay = dir.join("replay.json");

    let output = exe()
        .args([
            "play",
            "--duration",
            "20",
            "--accuracy",
            "0",
            "--replay",
            replay.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&replay).unwrap()).unwrap();
    let events = v["events"].as_array().unwrap();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e["scored"] == true && e["rating"] == "miss"));
}
