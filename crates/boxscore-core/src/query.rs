use serde::Serialize;
use time::Date;

use crate::catalog::ReferenceCatalogs;
use crate::store::GameStore;
use crate::views::{ComposedView, ViewComposer, ViewKind};
use crate::{parse_compact_date, parse_iso_date};

pub const MSG_TWO_TEAMS: &str = "Must provide two teams";
pub const MSG_INVALID_INPUT: &str = "Invalid input";
pub const MSG_NO_GAMES: &str = "No games were found";
pub const MSG_NO_TEAM: &str = "There is no team with that symbol";

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("There is no team with that symbol: {0}")]
    TeamNotFound(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl QueryError {
    /// The client-facing document for this error. Store failures are not
    /// described beyond a generic message.
    #[must_use]
    pub fn to_document(&self) -> ErrorDocument {
        let message = match self {
            Self::Validation(message) | Self::NotFound(message) => message.as_str(),
            Self::TeamNotFound(_) => MSG_NO_TEAM,
            Self::Store(_) => "Internal error",
        };
        ErrorDocument::single(message)
    }
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorMessage>,
}

impl ErrorDocument {
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorMessage {
                message: message.into(),
            }],
        }
    }
}

/// A validated `(date, VISITOR@HOME)` read request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameQuery {
    pub date: Date,
    pub visiting_team: String,
    pub home_team: String,
}

impl GameQuery {
    /// Accepts `YYYY-MM-DD` or `YYYYMMDD` and exactly two `@`-separated
    /// team symbols. The team count is checked first.
    ///
    /// # Errors
    /// Returns [`QueryError::Validation`] for a wrong team count or an
    /// unreadable date.
    pub fn parse(date: &str, teams: &str) -> Result<Self, QueryError> {
        let symbols: Vec<&str> = teams.split('@').collect();
        let [visiting_team, home_team] = symbols.as_slice() else {
            return Err(QueryError::Validation(MSG_TWO_TEAMS.to_string()));
        };

        let date = parse_iso_date(date)
            .or_else(|| parse_compact_date(date))
            .ok_or_else(|| QueryError::Validation(MSG_INVALID_INPUT.to_string()))?;

        Ok(Self {
            date,
            visiting_team: (*visiting_team).to_string(),
            home_team: (*home_team).to_string(),
        })
    }
}

/// Looks up the queried games and composes them into one view document.
///
/// # Errors
/// Returns [`QueryError::NotFound`] when no game matches and
/// [`QueryError::Store`] when the lookup itself fails.
pub fn run_game_query(
    store: &impl GameStore,
    composer: &ViewComposer<'_>,
    kind: ViewKind,
    query: &GameQuery,
) -> Result<ComposedView, QueryError> {
    let games = store.lookup_games(query.date, &query.visiting_team, &query.home_team)?;
    if games.is_empty() {
        return Err(QueryError::NotFound(MSG_NO_GAMES.to_string()));
    }

    Ok(composer.compose(kind, &games))
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct TeamSummary {
    pub team_symbol: String,
    pub founded: i32,
    pub league: String,
    pub location: String,
    pub name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct TeamDocument {
    pub team: TeamSummary,
}

/// # Errors
/// Returns [`QueryError::TeamNotFound`] when the symbol is not catalogued.
pub fn team_view(catalogs: &ReferenceCatalogs, symbol: &str) -> Result<TeamDocument, QueryError> {
    let team = catalogs
        .lookup_team(symbol)
        .ok_or_else(|| QueryError::TeamNotFound(symbol.to_string()))?;
    let names = catalogs.team_names(symbol);

    Ok(TeamDocument {
        team: TeamSummary {
            team_symbol: team.symbol.clone(),
            founded: team.founded,
            league: team.league.clone(),
            location: names.location,
            name: names.name,
            full_name: names.full_name,
        },
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::{anyhow, Result};

    use super::*;
    use crate::parser::RecordParser;
    use crate::record::GameRecord;
    use crate::reference::TeamRecord;

    const SAMPLE_LINE: &str =
        include_str!("../../../contracts/views/v1/fixtures/game-log.sample.txt");

    /// In-memory store double; records the last lookup it served.
    #[derive(Default)]
    struct MemoryStore {
        games: Vec<GameRecord>,
        fail: bool,
        last_lookup: RefCell<Option<(Date, String, String)>>,
    }

    impl GameStore for MemoryStore {
        fn insert_game(&self, _game: &GameRecord) -> Result<()> {
            Err(anyhow!("read-only double"))
        }

        fn lookup_games(
            &self,
            date: Date,
            visiting_team: &str,
            home_team: &str,
        ) -> Result<Vec<GameRecord>> {
            if self.fail {
                return Err(anyhow!("database is locked"));
            }
            self.last_lookup.replace(Some((
                date,
                visiting_team.to_string(),
                home_team.to_string(),
            )));
            Ok(self
                .games
                .iter()
                .filter(|game| {
                    game.date == date
                        && game.visiting.team == visiting_team
                        && game.home.team == home_team
                })
                .cloned()
                .collect())
        }
    }

    fn must_game() -> GameRecord {
        match RecordParser::new().and_then(|parser| parser.parse_line(SAMPLE_LINE)) {
            Ok(parsed) => parsed.record,
            Err(err) => panic!("sample should parse: {err}"),
        }
    }

    fn must_query(date: &str, teams: &str) -> GameQuery {
        match GameQuery::parse(date, teams) {
            Ok(query) => query,
            Err(err) => panic!("query should validate: {err}"),
        }
    }

    fn must_catalogs() -> ReferenceCatalogs {
        let teams = vec![TeamRecord {
            symbol: "BOS".to_string(),
            founded: 1901,
            league: "AL".to_string(),
            location: "Boston".to_string(),
            name: "Red Sox".to_string(),
        }];
        match ReferenceCatalogs::new(teams, Vec::new()) {
            Ok(catalogs) => catalogs,
            Err(err) => panic!("catalogs should build: {err}"),
        }
    }

    #[test]
    fn both_date_layouts_are_accepted() {
        let dashed = must_query("2018-03-29", "BOS@TBA");
        let compact = must_query("20180329", "BOS@TBA");
        assert_eq!(dashed, compact);
        assert_eq!(dashed.visiting_team, "BOS");
        assert_eq!(dashed.home_team, "TBA");
    }

    #[test]
    fn team_count_other_than_two_is_rejected_before_the_date() {
        for teams in ["BOS", "BOS@TBA@NYA", ""] {
            let err = GameQuery::parse("not-a-date", teams);
            assert!(
                matches!(&err, Err(QueryError::Validation(message)) if message == MSG_TWO_TEAMS),
                "{teams}: {err:?}"
            );
        }
    }

    #[test]
    fn unreadable_date_is_invalid_input() {
        let err = GameQuery::parse("03/29/2018", "BOS@TBA");
        assert!(matches!(&err, Err(QueryError::Validation(message)) if message == MSG_INVALID_INPUT));
    }

    #[test]
    fn zero_rows_is_not_found() {
        let store = MemoryStore::default();
        let catalogs = must_catalogs();
        let composer = ViewComposer::new(&catalogs);
        let query = must_query("2018-03-29", "BOS@TBA");

        let err = run_game_query(&store, &composer, ViewKind::Summary, &query);
        assert!(matches!(&err, Err(QueryError::NotFound(message)) if message == MSG_NO_GAMES));
        assert_eq!(
            store.last_lookup.borrow().clone(),
            Some((query.date, "BOS".to_string(), "TBA".to_string()))
        );
    }

    #[test]
    fn matching_rows_compose_into_a_document() {
        let store = MemoryStore {
            games: vec![must_game()],
            ..MemoryStore::default()
        };
        let catalogs = must_catalogs();
        let composer = ViewComposer::new(&catalogs);
        let query = must_query("2018-03-29", "BOS@TBA");

        match run_game_query(&store, &composer, ViewKind::Lineups, &query) {
            Ok(view) => {
                assert_eq!(view.kind(), ViewKind::Lineups);
                assert_eq!(view.len(), 1);
            }
            Err(err) => panic!("query should succeed: {err}"),
        }
    }

    #[test]
    fn store_failures_stay_distinct_from_not_found() {
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let catalogs = must_catalogs();
        let composer = ViewComposer::new(&catalogs);
        let query = must_query("2018-03-29", "BOS@TBA");

        let err = run_game_query(&store, &composer, ViewKind::Stats, &query);
        match err {
            Err(err @ QueryError::Store(_)) => {
                assert_eq!(err.to_document(), ErrorDocument::single("Internal error"));
            }
            other => panic!("expected store error, got {other:?}"),
        }
    }

    #[test]
    fn team_view_reports_full_name_or_not_found() {
        let catalogs = must_catalogs();

        match team_view(&catalogs, "BOS") {
            Ok(document) => {
                assert_eq!(document.team.full_name, "Boston Red Sox");
                assert_eq!(document.team.founded, 1901);
            }
            Err(err) => panic!("team should resolve: {err}"),
        }

        match team_view(&catalogs, "XXX") {
            Err(err @ QueryError::TeamNotFound(_)) => {
                assert_eq!(err.to_document(), ErrorDocument::single(MSG_NO_TEAM));
            }
            other => panic!("expected team not found, got {other:?}"),
        }
    }
}
