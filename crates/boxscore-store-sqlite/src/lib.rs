#![allow(clippy::missing_errors_doc)]

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use boxscore_core::{
    format_iso_date, parse_iso_date, GameKey, GameRecord, GameStore, ParkRecord, PersonRecord,
    ReferenceSource, TeamRecord,
};
use rusqlite::{params, Connection, OpenFlags};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

const BOXSCORE_MIGRATION_VERSION: i64 = 1;

const SCHEMA_BOXSCORE_V1: &str = r"
CREATE TABLE IF NOT EXISTS games (
  game_date TEXT NOT NULL,
  visiting_team TEXT NOT NULL,
  home_team TEXT NOT NULL,
  game_of_day TEXT NOT NULL,
  park_id TEXT NOT NULL,
  visiting_score INTEGER NOT NULL,
  home_score INTEGER NOT NULL,
  attendance INTEGER NOT NULL,
  record_json TEXT NOT NULL,
  ingested_at TEXT NOT NULL,
  PRIMARY KEY (game_date, visiting_team, home_team, game_of_day)
);

CREATE TRIGGER IF NOT EXISTS trg_games_no_update
BEFORE UPDATE ON games
BEGIN
  SELECT RAISE(FAIL, 'games is append-only');
END;

CREATE TRIGGER IF NOT EXISTS trg_games_no_delete
BEFORE DELETE ON games
BEGIN
  SELECT RAISE(FAIL, 'games is append-only');
END;

CREATE INDEX IF NOT EXISTS idx_games_park
  ON games(park_id, game_date);

CREATE TABLE IF NOT EXISTS teams (
  symbol TEXT PRIMARY KEY,
  founded INTEGER NOT NULL,
  league TEXT NOT NULL,
  location TEXT NOT NULL,
  name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS parks (
  park_id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  nickname TEXT NOT NULL,
  city TEXT NOT NULL,
  state TEXT NOT NULL,
  start_date TEXT,
  end_date TEXT,
  league TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS people (
  person_id TEXT PRIMARY KEY,
  last_name TEXT NOT NULL,
  first_name TEXT NOT NULL,
  player_debut TEXT,
  manager_debut TEXT,
  coach_debut TEXT,
  umpire_debut TEXT
);
";

/// Raised through `anyhow` when a game identity is inserted a second time;
/// callers find it with `downcast_ref`.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} is already stored")]
    DuplicateGame(GameKey),
}

pub struct SqliteGameStore {
    conn: Connection,
}

impl SqliteGameStore {
    /// Opens the database at `path`, creating the file if it is missing.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_flags(path, OpenFlags::default())
    }

    /// Opens a database that must already exist. Read commands use this so a
    /// mistyped path fails instead of serving an empty store.
    pub fn open_existing(path: &Path) -> Result<Self> {
        Self::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    fn open_with_flags(path: &Path, flags: OpenFlags) -> Result<Self> {
        let conn = Connection::open_with_flags(path, flags)
            .with_context(|| format!("failed to open sqlite database at {}", path.display()))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to configure sqlite pragmas")?;

        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS schema_migrations (
                    version INTEGER PRIMARY KEY,
                    applied_at TEXT NOT NULL
                );",
            )
            .context("failed to ensure schema_migrations exists")?;

        self.conn
            .execute_batch(SCHEMA_BOXSCORE_V1)
            .context("failed to apply boxscore schema")?;

        self.conn
            .execute(
                "INSERT OR IGNORE INTO schema_migrations(version, applied_at) VALUES (?1, ?2)",
                params![BOXSCORE_MIGRATION_VERSION, now_rfc3339()?],
            )
            .context("failed to register boxscore schema migration")?;

        Ok(())
    }

    pub fn insert_team(&self, team: &TeamRecord) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO teams(symbol, founded, league, location, name)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![team.symbol, team.founded, team.league, team.location, team.name],
            )
            .with_context(|| format!("failed to insert team {}", team.symbol))?;
        Ok(())
    }

    pub fn insert_park(&self, park: &ParkRecord) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO parks(park_id, name, nickname, city, state, start_date, end_date, league)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    park.park_id,
                    park.name,
                    park.nickname,
                    park.city,
                    park.state,
                    park.start_date.map(format_iso_date),
                    park.end_date.map(format_iso_date),
                    park.league,
                ],
            )
            .with_context(|| format!("failed to insert park {}", park.park_id))?;
        Ok(())
    }

    pub fn insert_person(&self, person: &PersonRecord) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO people(
                    person_id, last_name, first_name,
                    player_debut, manager_debut, coach_debut, umpire_debut
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    person.person_id,
                    person.last_name,
                    person.first_name,
                    person.player_debut.map(format_iso_date),
                    person.manager_debut.map(format_iso_date),
                    person.coach_debut.map(format_iso_date),
                    person.umpire_debut.map(format_iso_date),
                ],
            )
            .with_context(|| format!("failed to insert person {}", person.person_id))?;
        Ok(())
    }

    pub fn list_teams(&self) -> Result<Vec<TeamRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol, founded, league, location, name
             FROM teams
             ORDER BY symbol ASC",
        )?;
        let rows = stmt.query_map([], parse_team_row)?;
        collect_rows(rows)
    }

    pub fn list_parks(&self) -> Result<Vec<ParkRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT park_id, name, nickname, city, state, start_date, end_date, league
             FROM parks
             ORDER BY park_id ASC",
        )?;
        let rows = stmt.query_map([], parse_park_row)?;
        collect_rows(rows)
    }

    pub fn list_people(&self) -> Result<Vec<PersonRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT person_id, last_name, first_name,
                    player_debut, manager_debut, coach_debut, umpire_debut
             FROM people
             ORDER BY person_id ASC",
        )?;
        let rows = stmt.query_map([], parse_person_row)?;
        collect_rows(rows)
    }

    pub fn count_games(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
            .context("failed to count games")?;
        usize::try_from(count).with_context(|| format!("invalid game count: {count}"))
    }

    #[cfg(test)]
    fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl GameStore for SqliteGameStore {
    fn insert_game(&self, game: &GameRecord) -> Result<()> {
        let key = game.key();
        let payload = serde_json::to_string(game).context("failed to serialize game record")?;

        let inserted = self.conn.execute(
            "INSERT INTO games(
                game_date, visiting_team, home_team, game_of_day,
                park_id, visiting_score, home_score, attendance,
                record_json, ingested_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                format_iso_date(key.date),
                key.visiting_team,
                key.home_team,
                key.game_of_day,
                game.park_id,
                game.visiting.score,
                game.home.score,
                game.attendance,
                payload,
                now_rfc3339()?,
            ],
        );

        match inserted {
            Ok(_) => Ok(()),
            Err(err) if is_primary_key_violation(&err) => Err(StoreError::DuplicateGame(key).into()),
            Err(err) => Err(anyhow::Error::new(err).context(format!("failed to insert game {key}"))),
        }
    }

    fn lookup_games(
        &self,
        date: Date,
        visiting_team: &str,
        home_team: &str,
    ) -> Result<Vec<GameRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT record_json
             FROM games
             WHERE game_date = ?1 AND visiting_team = ?2 AND home_team = ?3
             ORDER BY game_of_day ASC",
        )?;
        let rows = stmt.query_map(
            params![format_iso_date(date), visiting_team, home_team],
            |row| row.get::<_, String>(0),
        )?;

        collect_rows(rows)?
            .iter()
            .map(|json| serde_json::from_str::<GameRecord>(json).context("invalid stored game JSON"))
            .collect()
    }
}

impl ReferenceSource for SqliteGameStore {
    fn teams(&self) -> Result<Vec<TeamRecord>> {
        self.list_teams()
    }

    fn parks(&self) -> Result<Vec<ParkRecord>> {
        self.list_parks()
    }
}

fn parse_team_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TeamRecord> {
    Ok(TeamRecord {
        symbol: row.get(0)?,
        founded: row.get(1)?,
        league: row.get(2)?,
        location: row.get(3)?,
        name: row.get(4)?,
    })
}

fn parse_park_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ParkRecord> {
    Ok(ParkRecord {
        park_id: row.get(0)?,
        name: row.get(1)?,
        nickname: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        start_date: parse_stored_date(row.get(5)?),
        end_date: parse_stored_date(row.get(6)?),
        league: row.get(7)?,
    })
}

fn parse_person_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonRecord> {
    Ok(PersonRecord {
        person_id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        player_debut: parse_stored_date(row.get(3)?),
        manager_debut: parse_stored_date(row.get(4)?),
        coach_debut: parse_stored_date(row.get(5)?),
        umpire_debut: parse_stored_date(row.get(6)?),
    })
}

fn parse_stored_date(raw: Option<String>) -> Option<Date> {
    raw.as_deref().and_then(parse_iso_date)
}

fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| anyhow!("failed to format timestamp: {err}"))
}

fn collect_rows<T>(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>>,
) -> Result<Vec<T>> {
    let mut values = Vec::new();
    for row in rows {
        values.push(row?);
    }
    Ok(values)
}
