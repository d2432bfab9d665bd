//! The three read shapes of a stored game.
//!
//! Every team block embeds [`TeamDisplay`], built only from
//! [`ReferenceCatalogs::team_names`], so a symbol resolves to the same
//! strings in every view.

use serde::Serialize;

use crate::catalog::{ReferenceCatalogs, TeamNames};
use crate::format_iso_date;
use crate::position::Position;
use crate::record::{
    BattingLine, FieldingLine, GameRecord, LineupSlot, PersonRef, PitchingLine, TeamGame,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ViewKind {
    Summary,
    Lineups,
    Stats,
}

impl ViewKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Lineups => "lineups",
            Self::Stats => "stats",
        }
    }
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct TeamDisplay {
    pub full_team_name: String,
    pub team_name: String,
    pub team_location: String,
}

impl From<TeamNames> for TeamDisplay {
    fn from(names: TeamNames) -> Self {
        Self {
            full_team_name: names.full_name,
            team_name: names.name,
            team_location: names.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct Venue {
    pub venue_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct SummaryTeam {
    pub symbol: String,
    #[serde(flatten)]
    pub display: TeamDisplay,
    pub league: String,
    pub game_number: i32,
    pub runs: i32,
    pub hits: i32,
    pub errors: i32,
    pub manager: PersonRef,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct GameSummary {
    pub date: String,
    pub number_of_game: String,
    pub day_of_week: String,
    pub visiting_team: SummaryTeam,
    pub home_team: SummaryTeam,
    pub game_length_in_outs: i32,
    pub game_length_in_mins: i32,
    pub day_night_indicator: String,
    pub attendance: i32,
    pub winning_pitcher: PersonRef,
    pub losing_pitcher: PersonRef,
    pub saving_pitcher: PersonRef,
    pub game_winning_rbi_batter: PersonRef,
    pub venue: Venue,
}

/// One batting-order slot with its position resolved. Codes outside the
/// position table resolve to empty name and symbol.
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct LineupPlayer {
    pub id: String,
    pub name: String,
    pub position_number: i32,
    pub position_name: String,
    pub position_symbol: String,
}

impl From<&LineupSlot> for LineupPlayer {
    fn from(slot: &LineupSlot) -> Self {
        let position = Position::from_code(slot.position_code);
        Self {
            id: slot.player.id.clone(),
            name: slot.player.name.clone(),
            position_number: slot.position_code,
            position_name: position.map(Position::name).unwrap_or_default().to_string(),
            position_symbol: position.map(Position::symbol).unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct LineupTeam {
    pub manager: PersonRef,
    pub team_symbol: String,
    #[serde(flatten)]
    pub display: TeamDisplay,
    pub starting_pitcher: PersonRef,
    pub starting_lineup: Vec<LineupPlayer>,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct Umpires {
    pub home_plate: PersonRef,
    pub first_base: PersonRef,
    pub second_base: PersonRef,
    pub third_base: PersonRef,
    pub left_field: PersonRef,
    pub right_field: PersonRef,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct GameLineup {
    pub date: String,
    pub number_of_game: String,
    pub visiting_team: LineupTeam,
    pub home_team: LineupTeam,
    pub umpires: Umpires,
}

/// Batting block of the stats view: the stored tallies plus the team's runs.
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct StatsBatting {
    pub runs: i32,
    #[serde(flatten)]
    pub line: BattingLine,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct StatsTeam {
    pub team_symbol: String,
    #[serde(flatten)]
    pub display: TeamDisplay,
    pub pitching: PitchingLine,
    pub batting: StatsBatting,
    pub fielding: FieldingLine,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct GameStats {
    pub date: String,
    pub number_of_game: String,
    pub visiting_team: StatsTeam,
    pub home_team: StatsTeam,
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct GamesDocument<T> {
    pub games: Vec<T>,
}

/// A composed `{"games": [...]}` document of any view kind.
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum ComposedView {
    Summary(GamesDocument<GameSummary>),
    Lineups(GamesDocument<GameLineup>),
    Stats(GamesDocument<GameStats>),
}

impl ComposedView {
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Summary(_) => ViewKind::Summary,
            Self::Lineups(_) => ViewKind::Lineups,
            Self::Stats(_) => ViewKind::Stats,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Summary(document) => document.games.len(),
            Self::Lineups(document) => document.games.len(),
            Self::Stats(document) => document.games.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds views of stored games against one catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ViewComposer<'a> {
    catalogs: &'a ReferenceCatalogs,
}

impl<'a> ViewComposer<'a> {
    #[must_use]
    pub fn new(catalogs: &'a ReferenceCatalogs) -> Self {
        Self { catalogs }
    }

    fn display(&self, symbol: &str) -> TeamDisplay {
        self.catalogs.team_names(symbol).into()
    }

    #[must_use]
    pub fn summary(&self, game: &GameRecord) -> GameSummary {
        let park = self.catalogs.park_place(&game.park_id);

        GameSummary {
            date: format_iso_date(game.date),
            number_of_game: game.game_of_day.clone(),
            day_of_week: game.day_of_week.clone(),
            visiting_team: self.summary_team(&game.visiting),
            home_team: self.summary_team(&game.home),
            game_length_in_outs: game.game_length_outs,
            game_length_in_mins: game.duration_minutes,
            day_night_indicator: game.day_night.clone(),
            attendance: game.attendance,
            winning_pitcher: game.winning_pitcher.clone(),
            losing_pitcher: game.losing_pitcher.clone(),
            saving_pitcher: game.saving_pitcher.clone(),
            game_winning_rbi_batter: game.game_winning_rbi_batter.clone(),
            venue: Venue {
                venue_id: park.park_id,
                name: park.name,
                city: park.city,
                state: park.state,
            },
        }
    }

    fn summary_team(&self, team: &TeamGame) -> SummaryTeam {
        SummaryTeam {
            symbol: team.team.clone(),
            display: self.display(&team.team),
            league: team.league.clone(),
            game_number: team.game_number,
            runs: team.score,
            hits: team.hits(),
            errors: team.errors(),
            manager: team.manager.clone(),
        }
    }

    #[must_use]
    pub fn lineup(&self, game: &GameRecord) -> GameLineup {
        let crew = &game.umpires;

        GameLineup {
            date: format_iso_date(game.date),
            number_of_game: game.game_of_day.clone(),
            visiting_team: self.lineup_team(&game.visiting),
            home_team: self.lineup_team(&game.home),
            umpires: Umpires {
                home_plate: crew.home_plate.clone(),
                first_base: crew.first_base.clone(),
                second_base: crew.second_base.clone(),
                third_base: crew.third_base.clone(),
                left_field: crew.left_field.clone(),
                right_field: crew.right_field.clone(),
            },
        }
    }

    fn lineup_team(&self, team: &TeamGame) -> LineupTeam {
        LineupTeam {
            manager: team.manager.clone(),
            team_symbol: team.team.clone(),
            display: self.display(&team.team),
            starting_pitcher: team.starting_pitcher.clone(),
            starting_lineup: team.lineup.iter().map(LineupPlayer::from).collect(),
        }
    }

    #[must_use]
    pub fn stats(&self, game: &GameRecord) -> GameStats {
        GameStats {
            date: format_iso_date(game.date),
            number_of_game: game.game_of_day.clone(),
            visiting_team: self.stats_team(&game.visiting),
            home_team: self.stats_team(&game.home),
        }
    }

    fn stats_team(&self, team: &TeamGame) -> StatsTeam {
        StatsTeam {
            team_symbol: team.team.clone(),
            display: self.display(&team.team),
            pitching: team.pitching.clone(),
            batting: StatsBatting {
                runs: team.score,
                line: team.batting.clone(),
            },
            fielding: team.fielding.clone(),
        }
    }

    /// Composes every record, in the order given, into one document.
    #[must_use]
    pub fn compose(&self, kind: ViewKind, games: &[GameRecord]) -> ComposedView {
        match kind {
            ViewKind::Summary => ComposedView::Summary(GamesDocument {
                games: games.iter().map(|game| self.summary(game)).collect(),
            }),
            ViewKind::Lineups => ComposedView::Lineups(GamesDocument {
                games: games.iter().map(|game| self.lineup(game)).collect(),
            }),
            ViewKind::Stats => ComposedView::Stats(GamesDocument {
                games: games.iter().map(|game| self.stats(game)).collect(),
            }),
        }
    }
}
