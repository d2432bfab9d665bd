#![allow(clippy::uninlined_format_args)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use jsonschema::JSONSchema;
use rusqlite::Connection;
use serde_json::Value;
use ulid::Ulid;

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|err| panic!("failed to canonicalize repo root: {err}"))
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("contracts/views/v1/fixtures").join(name)
}

fn schema(name: &str) -> PathBuf {
    repo_root().join("contracts/views/v1/schemas").join(name)
}

fn boxscore_binary_path() -> PathBuf {
    match std::env::var("CARGO_BIN_EXE_boxscore") {
        Ok(value) => PathBuf::from(value),
        Err(_) => Path::new(env!("CARGO_MANIFEST_DIR")).join("../../target/debug/boxscore"),
    }
}

fn boxscore_output(db_path: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(boxscore_binary_path());
    command.arg("--db").arg(db_path);
    command.env("RUST_LOG", "warn");
    for arg in args {
        command.arg(arg);
    }

    match command.output() {
        Ok(output) => output,
        Err(err) => panic!("failed to run boxscore command {:?}: {err}", args),
    }
}

fn stdout_json(output: &Output) -> Value {
    match serde_json::from_slice::<Value>(&output.stdout) {
        Ok(value) => value,
        Err(err) => panic!(
            "failed to parse stdout as JSON: {err}\nstdout={}\nstderr={}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ),
    }
}

fn read_json(path: &Path) -> Value {
    let body = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    serde_json::from_str(&body)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

fn assert_schema(schema_path: &Path, value: &Value) {
    let schema = read_json(schema_path);
    let compiled = JSONSchema::compile(&schema)
        .unwrap_or_else(|err| panic!("failed to compile {}: {err}", schema_path.display()));
    if let Some(errors) = compiled
        .validate(value)
        .err()
        .map(|iter| iter.map(|err| err.to_string()).collect::<Vec<_>>())
    {
        panic!(
            "schema validation failed for {}:\n{}",
            schema_path.display(),
            errors.join("\n")
        );
    }
}

fn temp_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}-{}", Ulid::new()))
}

fn assert_exit(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "stdout={}\nstderr={}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// A database with both reference files imported and the sample game log
/// ingested as a doubleheader (games "1" and "2") plus the single game "0".
fn seeded_db() -> PathBuf {
    let db_path = temp_path("boxscore-contract").with_extension("sqlite3");

    for (kind, file) in [("teams", "teams.sample.txt"), ("parks", "parks.sample.txt")] {
        let output = boxscore_output(
            &db_path,
            &["load", kind, "--file", &fixture(file).display().to_string()],
        );
        assert_exit(&output, 0);
    }

    let sample = fs::read_to_string(fixture("game-log.sample.txt"))
        .unwrap_or_else(|err| panic!("failed to read sample game log: {err}"));
    let sample = sample.trim_end();
    let doubleheader: String = ["1", "2"]
        .iter()
        .map(|game| format!("{}\n", sample.replacen("\"20180329\",\"0\"", &format!("\"20180329\",\"{game}\""), 1)))
        .collect();

    let log_dir = temp_path("boxscore-contract-logs");
    fs::create_dir_all(&log_dir)
        .unwrap_or_else(|err| panic!("failed to create {}: {err}", log_dir.display()));
    fs::write(log_dir.join("GL2018-a.TXT"), &doubleheader)
        .unwrap_or_else(|err| panic!("failed to write game log: {err}"));
    fs::write(log_dir.join("GL2018-b.txt"), format!("{sample}\n{sample}\nnot,a,game\n"))
        .unwrap_or_else(|err| panic!("failed to write game log: {err}"));

    let output = boxscore_output(
        &db_path,
        &["load", "games", "--dir", &log_dir.display().to_string()],
    );
    assert_exit(&output, 0);

    let report = stdout_json(&output);
    assert_schema(&schema("ingest-report.schema.json"), &report);
    assert_eq!(report["files"], 2);
    assert_eq!(report["lines"], 5);
    assert_eq!(report["inserted"], 3);
    assert_eq!(report["duplicates"], 1);
    assert_eq!(report["rejected"], 1);

    let _ = fs::remove_dir_all(&log_dir);
    db_path
}

#[test]
fn help_contract_lists_expected_subcommands() {
    let output = match Command::new(boxscore_binary_path()).arg("--help").output() {
        Ok(value) => value,
        Err(err) => panic!("failed to run help command: {err}"),
    };

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for required in ["load", "game", "team"] {
        assert!(
            stdout.contains(required),
            "expected help output to contain subcommand {required}; output={stdout}"
        );
    }
}

#[test]
fn summary_view_matches_contract_and_orders_doubleheaders() {
    let db_path = seeded_db();
    let output = boxscore_output(
        &db_path,
        &["game", "summary", "--date", "2018-03-29", "--teams", "BOS@TBA"],
    );
    assert_exit(&output, 0);

    let document = stdout_json(&output);
    assert_schema(&schema("game-summary.schema.json"), &document);

    let order: Vec<&str> = document["games"]
        .as_array()
        .map(|games| {
            games
                .iter()
                .filter_map(|game| game["number_of_game"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(order, vec!["0", "1", "2"]);

    let game = &document["games"][0];
    assert_eq!(game["visiting_team"]["full_team_name"], "Boston Red Sox");
    assert_eq!(game["home_team"]["team_location"], "Tampa Bay");
    assert_eq!(game["home_team"]["runs"], 6);
    assert_eq!(game["venue"]["name"], "Tropicana Field");
    assert_eq!(game["saving_pitcher"]["id"], "coloa001");
}

#[test]
fn lineups_and_stats_views_match_contracts() {
    let db_path = seeded_db();

    let lineups = boxscore_output(
        &db_path,
        &["game", "lineups", "--date", "20180329", "--teams", "BOS@TBA"],
    );
    assert_exit(&lineups, 0);
    let lineups = stdout_json(&lineups);
    assert_schema(&schema("game-lineups.schema.json"), &lineups);
    let home_ninth = &lineups["games"][0]["home_team"]["starting_lineup"][8];
    assert_eq!(home_ninth["id"], "refsr001");
    assert_eq!(home_ninth["position_symbol"], "DH");
    assert_eq!(lineups["games"][0]["umpires"]["left_field"]["name"], "");

    let stats = boxscore_output(
        &db_path,
        &["game", "stats", "--date", "2018-03-29", "--teams", "BOS@TBA"],
    );
    assert_exit(&stats, 0);
    let stats = stdout_json(&stats);
    assert_schema(&schema("game-stats.schema.json"), &stats);
    assert_eq!(stats["games"][0]["visiting_team"]["batting"]["runs"], 4);
    assert_eq!(
        stats["games"][0]["visiting_team"]["full_team_name"],
        lineups["games"][0]["visiting_team"]["full_team_name"]
    );
}

#[test]
fn validation_errors_exit_with_code_two() {
    let db_path = seeded_db();

    for (date, teams, message) in [
        ("2018-03-29", "BOS", "Must provide two teams"),
        ("2018-03-29", "BOS@TBA@NYA", "Must provide two teams"),
        ("March 29", "BOS@TBA", "Invalid input"),
    ] {
        let output = boxscore_output(
            &db_path,
            &["game", "summary", "--date", date, "--teams", teams],
        );
        assert_exit(&output, 2);

        let document = stdout_json(&output);
        assert_schema(&schema("error.schema.json"), &document);
        assert_eq!(document["errors"][0]["message"], message);
    }
}

#[test]
fn missing_games_and_teams_exit_with_code_three() {
    let db_path = seeded_db();

    let output = boxscore_output(
        &db_path,
        &["game", "stats", "--date", "2018-03-30", "--teams", "BOS@TBA"],
    );
    assert_exit(&output, 3);
    let document = stdout_json(&output);
    assert_schema(&schema("error.schema.json"), &document);
    assert_eq!(document["errors"][0]["message"], "No games were found");

    let output = boxscore_output(&db_path, &["team", "show", "--symbol", "XXX"]);
    assert_exit(&output, 3);
    assert_eq!(
        stdout_json(&output)["errors"][0]["message"],
        "There is no team with that symbol"
    );
}

#[test]
fn team_view_matches_contract() {
    let db_path = seeded_db();
    let output = boxscore_output(&db_path, &["team", "show", "--symbol", "TBA"]);
    assert_exit(&output, 0);

    let document = stdout_json(&output);
    assert_schema(&schema("team.schema.json"), &document);
    assert_eq!(document["team"]["full_name"], "Tampa Bay Rays");
    assert_eq!(document["team"]["founded"], 1998);
}

#[test]
fn unknown_teams_keep_symbols_with_blank_names() {
    let db_path = temp_path("boxscore-contract-bare").with_extension("sqlite3");
    let log_dir = temp_path("boxscore-contract-bare-logs");
    fs::create_dir_all(&log_dir)
        .unwrap_or_else(|err| panic!("failed to create {}: {err}", log_dir.display()));
    fs::copy(fixture("game-log.sample.txt"), log_dir.join("GL2018.TXT"))
        .unwrap_or_else(|err| panic!("failed to copy game log: {err}"));

    let output = boxscore_output(
        &db_path,
        &["load", "games", "--dir", &log_dir.display().to_string()],
    );
    assert_exit(&output, 0);

    let output = boxscore_output(
        &db_path,
        &["game", "summary", "--date", "2018-03-29", "--teams", "BOS@TBA"],
    );
    assert_exit(&output, 0);
    let document = stdout_json(&output);
    assert_schema(&schema("game-summary.schema.json"), &document);

    let visiting = &document["games"][0]["visiting_team"];
    assert_eq!(visiting["symbol"], "BOS");
    assert_eq!(visiting["full_team_name"], "");
    assert_eq!(visiting["team_name"], "");
    assert_eq!(document["games"][0]["venue"]["venue_id"], "STP01");
    assert_eq!(document["games"][0]["venue"]["city"], "");

    let _ = fs::remove_dir_all(&log_dir);
}

#[test]
fn stored_games_cannot_be_rewritten() {
    let db_path = seeded_db();
    let conn = match Connection::open(&db_path) {
        Ok(value) => value,
        Err(err) => panic!("failed to open db: {err}"),
    };

    assert!(conn.execute("UPDATE games SET home_score = 0", []).is_err());
    assert!(conn.execute("DELETE FROM games", []).is_err());
}

#[test]
fn unopenable_database_is_fatal() {
    let db_path = temp_path("boxscore-missing-dir").join("nested/boxscore.sqlite3");
    let output = boxscore_output(&db_path, &["team", "show", "--symbol", "BOS"]);

    assert_exit(&output, 1);
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to open sqlite database"));
}

#[test]
fn reads_never_create_a_missing_database() {
    let db_path = temp_path("boxscore-missing").with_extension("sqlite3");
    let output = boxscore_output(
        &db_path,
        &["game", "summary", "--date", "2018-03-29", "--teams", "BOS@TBA"],
    );

    assert_exit(&output, 1);
    assert!(output.stdout.is_empty());
    assert!(!db_path.exists(), "{} should not exist", db_path.display());
}
