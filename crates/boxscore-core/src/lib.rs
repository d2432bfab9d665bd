#![forbid(unsafe_code)]
//! Box-score domain: the game-log record, its parser, the reference
//! catalogs and the three read views composed from a stored game.

mod catalog;
mod parser;
mod position;
mod query;
mod record;
mod reference;
pub mod schema;
mod store;
mod views;

use time::{Date, Month, OffsetDateTime};

pub use catalog::{CatalogError, ParkPlace, ReferenceCatalogs, ReferenceSource, TeamNames};
pub use parser::{
    normalize_null, parse_tolerant_int, split_fields, ParseError, ParsedGame, RecordParser,
    RecoveredField, MALFORMED_INT,
};
pub use position::Position;
pub use query::{
    run_game_query, team_view, ErrorDocument, ErrorMessage, GameQuery, QueryError, TeamDocument,
    TeamSummary, MSG_INVALID_INPUT, MSG_NO_GAMES, MSG_NO_TEAM, MSG_TWO_TEAMS,
};
pub use record::{
    BattingLine, FieldingLine, GameKey, GameRecord, LineupSlot, PersonRef, PitchingLine, TeamGame,
    UmpireCrew, LINEUP_SLOTS,
};
pub use reference::{
    parse_park_fields, parse_person_fields, parse_team_fields, ParkRecord, PersonRecord,
    TeamRecord,
};
pub use schema::{FieldKind, FieldSpec, FIELD_COUNT, GAME_LOG_FIELDS, NULL_SENTINEL};
pub use store::GameStore;
pub use views::{
    ComposedView, GameLineup, GameStats, GameSummary, GamesDocument, LineupPlayer, LineupTeam,
    StatsBatting, StatsTeam, SummaryTeam, TeamDisplay, Umpires, Venue, ViewComposer, ViewKind,
};

/// Date stored for a game whose date field could not be parsed.
#[must_use]
pub fn epoch_date() -> Date {
    OffsetDateTime::UNIX_EPOCH.date()
}

/// Parses the game-log date layout, `YYYYMMDD`.
#[must_use]
pub fn parse_compact_date(raw: &str) -> Option<Date> {
    if raw.len() != 8 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    calendar_date(
        raw[0..4].parse().ok()?,
        raw[4..6].parse().ok()?,
        raw[6..8].parse().ok()?,
    )
}

/// Parses `YYYY-MM-DD`.
#[must_use]
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    parse_compact_date(&format!("{}{}{}", &raw[0..4], &raw[5..7], &raw[8..10]))
}

/// Parses the reference-file date layout, `M/D/YYYY` with optional zero
/// padding.
#[must_use]
pub fn parse_us_date(raw: &str) -> Option<Date> {
    let mut parts = raw.trim().split('/');
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    let year = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    calendar_date(year, month, day)
}

#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn calendar_date(year: i32, month: u8, day: u8) -> Option<Date> {
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
