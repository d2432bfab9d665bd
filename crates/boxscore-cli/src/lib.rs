//! Command surface for the box-score store.
//!
//! Host programs embed it through [`run_cli`]; the `boxscore` binary is a
//! thin wrapper that adds [`exit_code`]. Documents are printed to stdout as
//! JSON, logs go to stderr.

mod ingest;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use boxscore_core::{
    run_game_query, team_view, GameQuery, QueryError, RecordParser, ReferenceCatalogs,
    ViewComposer, ViewKind,
};
use boxscore_store_sqlite::SqliteGameStore;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

pub use ingest::{
    game_log_files, import_parks, import_people, import_teams, ingest_game_log_files,
    ingest_game_logs, ImportReport, IngestReport,
};
pub use logging::{LogFormat, LoggingConfig};

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_VALIDATION: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "boxscore")]
#[command(about = "Box-score game log store")]
pub struct Cli {
    #[arg(long, global = true, default_value = "./boxscore.sqlite3")]
    db: PathBuf,

    /// Default filter when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One-time batch imports.
    Load {
        #[command(subcommand)]
        command: LoadCommand,
    },
    /// Views of the games between two teams on one date.
    Game {
        #[command(subcommand)]
        command: GameCommand,
    },
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum LoadCommand {
    /// Every `*.txt` game log in a directory.
    Games(LoadDirArgs),
    Teams(LoadFileArgs),
    Parks(LoadFileArgs),
    People(LoadFileArgs),
}

#[derive(Debug, Args)]
pub struct LoadDirArgs {
    #[arg(long)]
    dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct LoadFileArgs {
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum GameCommand {
    Summary(GameArgs),
    Lineups(GameArgs),
    Stats(GameArgs),
}

#[derive(Debug, Args)]
pub struct GameArgs {
    /// `YYYY-MM-DD` or `YYYYMMDD`.
    #[arg(long)]
    date: String,
    /// `VISITOR@HOME`, e.g. `BOS@TBA`.
    #[arg(long)]
    teams: String,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    Show(TeamShowArgs),
}

#[derive(Debug, Args)]
pub struct TeamShowArgs {
    #[arg(long)]
    symbol: String,
}

pub fn run_cli(cli: Cli) -> Result<()> {
    let logging = LoggingConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
    };
    if !logging.init() {
        debug!("Tracing subscriber already installed");
    }

    run_with_db(&cli.db, cli.command)
}

/// Runs `command` against the store at `db_path`.
///
/// Loads create and migrate the database; reads require it to exist already.
pub fn run_with_db(db_path: &Path, command: Command) -> Result<()> {
    match command {
        Command::Load { command } => {
            let store = SqliteGameStore::open(db_path)?;
            store.migrate()?;
            run_load(command, &store)
        }
        Command::Game { command } => run_game(command, &SqliteGameStore::open_existing(db_path)?),
        Command::Team { command } => run_team(command, &SqliteGameStore::open_existing(db_path)?),
    }
}

fn run_load(command: LoadCommand, store: &SqliteGameStore) -> Result<()> {
    match command {
        LoadCommand::Games(args) => {
            let parser = RecordParser::new().context("game log field table is invalid")?;
            let report = ingest_game_logs(store, &parser, &args.dir)?;
            info!(
                files = report.files,
                unreadable_files = report.unreadable_files,
                inserted = report.inserted,
                duplicates = report.duplicates,
                rejected = report.rejected,
                failed = report.failed,
                "Game log ingestion finished"
            );
            print_json(&report)
        }
        LoadCommand::Teams(args) => print_json(&import_teams(store, &args.file)?),
        LoadCommand::Parks(args) => print_json(&import_parks(store, &args.file)?),
        LoadCommand::People(args) => print_json(&import_people(store, &args.file)?),
    }
}

fn run_game(command: GameCommand, store: &SqliteGameStore) -> Result<()> {
    let (kind, args) = match command {
        GameCommand::Summary(args) => (ViewKind::Summary, args),
        GameCommand::Lineups(args) => (ViewKind::Lineups, args),
        GameCommand::Stats(args) => (ViewKind::Stats, args),
    };

    debug!(view = kind.as_str(), date = %args.date, teams = %args.teams, "Running game query");
    let catalogs = load_catalogs(store)?;
    let composer = ViewComposer::new(&catalogs);

    let result = GameQuery::parse(&args.date, &args.teams)
        .and_then(|query| run_game_query(store, &composer, kind, &query));
    emit(result)
}

fn run_team(command: TeamCommand, store: &SqliteGameStore) -> Result<()> {
    match command {
        TeamCommand::Show(args) => {
            let catalogs = load_catalogs(store)?;
            emit(team_view(&catalogs, &args.symbol))
        }
    }
}

fn load_catalogs(store: &SqliteGameStore) -> Result<ReferenceCatalogs> {
    let catalogs = ReferenceCatalogs::load(store).context("failed to load reference catalogs")?;
    debug!(
        teams = catalogs.team_count(),
        parks = catalogs.park_count(),
        "Reference catalogs loaded"
    );
    Ok(catalogs)
}

/// Prints the document, or the error document for a query error before
/// handing the error back for the exit code.
fn emit<T: Serialize>(result: Result<T, QueryError>) -> Result<()> {
    match result {
        Ok(document) => print_json(&document),
        Err(err) => {
            print_json(&err.to_document())?;
            Err(err.into())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Process exit code for an error returned by [`run_cli`].
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<QueryError>() {
        Some(QueryError::Validation(_)) => EXIT_VALIDATION,
        Some(QueryError::NotFound(_) | QueryError::TeamNotFound(_)) => EXIT_NOT_FOUND,
        Some(QueryError::Store(_)) | None => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use ulid::Ulid;

    use super::*;

    fn must_parse(args: &[&str]) -> Cli {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(err) => panic!("test failure: {err}"),
        }
    }

    #[test]
    fn global_flags_have_defaults() {
        let cli = must_parse(&["boxscore", "team", "show", "--symbol", "BOS"]);
        assert_eq!(cli.db, PathBuf::from("./boxscore.sqlite3"));
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn game_views_take_date_and_teams() {
        let cli = must_parse(&[
            "boxscore",
            "game",
            "lineups",
            "--date",
            "2018-03-29",
            "--teams",
            "BOS@TBA",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.log_format, LogFormat::Json);
        match cli.command {
            Command::Game {
                command: GameCommand::Lineups(args),
            } => {
                assert_eq!(args.date, "2018-03-29");
                assert_eq!(args.teams, "BOS@TBA");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn load_games_requires_a_directory() {
        assert!(Cli::try_parse_from(["boxscore", "load", "games"]).is_err());
    }

    #[test]
    fn exit_codes_follow_the_error_kind() {
        let validation: anyhow::Error = QueryError::Validation("Invalid input".to_string()).into();
        let not_found: anyhow::Error = QueryError::NotFound("No games were found".to_string()).into();
        let no_team: anyhow::Error = QueryError::TeamNotFound("XXX".to_string()).into();
        let store: anyhow::Error = QueryError::Store(anyhow!("disk I/O error")).into();

        assert_eq!(exit_code(&validation), EXIT_VALIDATION);
        assert_eq!(exit_code(&not_found), EXIT_NOT_FOUND);
        assert_eq!(exit_code(&no_team), EXIT_NOT_FOUND);
        assert_eq!(exit_code(&store), EXIT_FAILURE);
        assert_eq!(exit_code(&anyhow!("failed to open sqlite database")), EXIT_FAILURE);
    }

    #[test]
    fn reads_against_a_missing_database_are_fatal() {
        let db_path = std::env::temp_dir().join(format!("boxscore-cli-{}.sqlite3", Ulid::new()));
        let command = Command::Team {
            command: TeamCommand::Show(TeamShowArgs {
                symbol: "BOS".to_string(),
            }),
        };

        let err = match run_with_db(&db_path, command) {
            Ok(()) => panic!("a missing database should not be served"),
            Err(err) => err,
        };
        assert_eq!(exit_code(&err), EXIT_FAILURE);
        assert!(!db_path.exists());
    }
}
