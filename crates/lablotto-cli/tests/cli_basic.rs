//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary HOME, so the
//! config file and kv database start empty.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_lablotto-cli"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("LABLOTTO_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("{args:?} bad JSON ({e}): {stdout}"))
}

#[test]
fn test_points_clamp_at_zero() {
    let home = TempDir::new().unwrap();
    let added = run_json(&home, &["points", "add", "40"]);
    assert_eq!(added["type"], "points_changed");
    assert_eq!(added["balance"], 40);

    let debited = run_json(&home, &["points", "add", "-100"]);
    assert_eq!(debited["balance"], 0);

    let shown = run_json(&home, &["points", "show"]);
    assert_eq!(shown["points"], 0);
}

#[test]
fn test_daily_task_claimed_once() {
    let home = TempDir::new().unwrap();
    let first = run_json(&home, &["task", "complete", "daily-reward"]);
    assert_eq!(first["result"]["outcome"], "completed");
    assert_eq!(first["points"], 100);

    let (stdout, stderr, code) = run_cli(&home, &["task", "complete", "dailyReward"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("already claimed"));
    let second: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(second["result"]["outcome"], "already_claimed");
    assert_eq!(second["points"], 100);
}

#[test]
fn test_task_list_covers_table() {
    let home = TempDir::new().unwrap();
    let list = run_json(&home, &["task", "list"]);
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r["claimable"] == true));
}

#[test]
fn test_unknown_task_rejected() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&home, &["task", "complete", "spin-the-wheel"]);
    assert_ne!(code, 0);
}

#[test]
fn test_login_issues_invitation_code() {
    let home = TempDir::new().unwrap();
    let event = run_json(&home, &["user", "login", "--id", "42", "--first-name", "Ada"]);
    let code = event["invitation_code"].as_str().unwrap();
    assert!(code.starts_with("LBLX-42-"), "{code}");

    let shown = run_json(&home, &["user", "show"]);
    assert_eq!(shown["invitation_code"], code);
    assert_eq!(shown["user"]["first_name"], "Ada");
}

#[test]
fn test_referrals_accumulate() {
    let home = TempDir::new().unwrap();
    run_json(&home, &["referral", "add"]);
    let second = run_json(&home, &["referral", "add"]);
    assert_eq!(second["invited_users"], 2);
    assert_eq!(second["balance"], 2000);
}

#[test]
fn test_ticket_lifecycle() {
    let home = TempDir::new().unwrap();
    run_json(&home, &["ticket", "add", "weekly"]);
    let used = run_json(&home, &["ticket", "use"]);
    assert_eq!(used["type"], "ticket_used");
    assert_eq!(used["remaining"], 0);

    let (_, stderr, code) = run_cli(&home, &["ticket", "use"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no unused tickets"));

    let pass = run_json(&home, &["pass", "add", "season"]);
    assert_eq!(pass["total"], 1);
}

#[test]
fn test_timer_start_and_double_start() {
    let home = TempDir::new().unwrap();
    let started = run_json(&home, &["timer", "start", "--duration", "3600"]);
    assert_eq!(started["started"]["type"], "earning_timer_started");
    assert!(started["completed"].is_null());

    let (stdout, stderr, code) = run_cli(&home, &["timer", "start", "--duration", "10"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("already running"));
    let again: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(again["started"].is_null());
    assert_eq!(again["snapshot"]["timer_phase"], "running");

    let status = run_json(&home, &["timer", "status"]);
    assert_eq!(status["snapshot"]["type"], "state_snapshot");
    assert!(status["snapshot"]["time_remaining"].as_u64().unwrap() > 3000);
    assert!(status["completed"].is_null());
}

#[test]
fn test_timer_completion_prints_single_document() {
    let home = TempDir::new().unwrap();
    run_json(&home, &["timer", "start", "--duration", "0"]);

    let status = run_json(&home, &["timer", "status"]);
    assert_eq!(status["completed"]["type"], "earning_timer_completed");
    assert_eq!(status["completed"]["reward"], 500);
    assert_eq!(status["snapshot"]["timer_phase"], "completed");
    assert_eq!(status["snapshot"]["points"], 500);

    let settled = run_json(&home, &["timer", "status"]);
    assert!(settled["completed"].is_null());
    assert_eq!(settled["snapshot"]["points"], 500);

    let restarted = run_json(&home, &["timer", "start", "--duration", "0"]);
    assert_eq!(restarted["started"]["type"], "earning_timer_started");
}

#[test]
fn test_config_get_set() {
    let home = TempDir::new().unwrap();
    let shown = run_json(&home, &["config", "show"]);
    assert_eq!(shown["rewards"]["referral_reward"], 1000);

    let (stdout, _, code) = run_cli(&home, &["config", "get", "rewards.referral_reward"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1000");

    let (_, _, code) = run_cli(&home, &["config", "set", "rewards.referral_reward", "250"]);
    assert_eq!(code, 0);
    let event = run_json(&home, &["referral", "add"]);
    assert_eq!(event["reward"], 250);

    let (_, _, code) = run_cli(&home, &["config", "get", "rewards.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_agent_offline_falls_back() {
    let home = TempDir::new().unwrap();
    // Port 9 (discard) on localhost refuses connections.
    let (_, _, code) = run_cli(
        &home,
        &["config", "set", "agent.endpoint", "http://127.0.0.1:9/api/agent"],
    );
    assert_eq!(code, 0);
    let reply = run_json(&home, &["agent", "ask", "how do I earn tickets?"]);
    assert_eq!(reply["source"], "fallback");
    assert!(reply["text"].as_str().unwrap().contains("how do I earn tickets?"));
}
