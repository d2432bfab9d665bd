use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::format_iso_date;

pub const LINEUP_SLOTS: usize = 9;

/// An `(id, name)` pair for anyone referenced by a box score. An absent
/// optional role is the empty pair, never a missing value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct PersonRef {
    pub id: String,
    pub name: String,
}

impl PersonRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct BattingLine {
    pub at_bats: i32,
    pub hits: i32,
    pub doubles: i32,
    pub triples: i32,
    pub home_runs: i32,
    pub runs_batted_in: i32,
    pub sacrifice_hits: i32,
    pub sacrifice_flies: i32,
    pub hit_by_pitch: i32,
    pub walks: i32,
    pub intentional_walks: i32,
    pub strikeouts: i32,
    pub stolen_bases: i32,
    pub caught_stealing: i32,
    pub grounded_into_double_play: i32,
    pub catcher_interference: i32,
    pub left_on_base: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct PitchingLine {
    pub pitchers_used: i32,
    pub individual_earned_runs: i32,
    pub team_earned_runs: i32,
    pub wild_pitches: i32,
    pub balks: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct FieldingLine {
    pub putouts: i32,
    pub assists: i32,
    pub errors: i32,
    pub passed_balls: i32,
    pub double_plays: i32,
    pub triple_plays: i32,
}

/// One batting-order slot. `position_code` keeps whatever the source said,
/// including the `-1` sentinel; resolution against [`crate::Position`]
/// happens at view time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct LineupSlot {
    pub player: PersonRef,
    pub position_code: i32,
}

/// Everything the record carries for one side of the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct TeamGame {
    pub team: String,
    pub league: String,
    pub game_number: i32,
    pub score: i32,
    pub line_score: String,
    pub batting: BattingLine,
    pub pitching: PitchingLine,
    pub fielding: FieldingLine,
    pub manager: PersonRef,
    pub starting_pitcher: PersonRef,
    pub lineup: [LineupSlot; LINEUP_SLOTS],
}

impl TeamGame {
    #[must_use]
    pub fn hits(&self) -> i32 {
        self.batting.hits
    }

    #[must_use]
    pub fn errors(&self) -> i32 {
        self.fielding.errors
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct UmpireCrew {
    pub home_plate: PersonRef,
    pub first_base: PersonRef,
    pub second_base: PersonRef,
    pub third_base: PersonRef,
    pub left_field: PersonRef,
    pub right_field: PersonRef,
}

/// Identity of a stored game. `game_of_day` is `"0"` for a single game and
/// `"1"`/`"2"` for the halves of a doubleheader.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GameKey {
    pub date: Date,
    pub visiting_team: String,
    pub home_team: String,
    pub game_of_day: String,
}

impl Display for GameKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}@{}:{}",
            format_iso_date(self.date),
            self.visiting_team,
            self.home_team,
            self.game_of_day
        )
    }
}

/// Immutable box score of one completed game.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct GameRecord {
    pub date: Date,
    pub date_raw: String,
    pub game_of_day: String,
    pub day_of_week: String,
    pub visiting: TeamGame,
    pub home: TeamGame,
    pub game_length_outs: i32,
    pub day_night: String,
    pub completion_info: String,
    pub forfeit_info: String,
    pub protest_info: String,
    pub park_id: String,
    pub attendance: i32,
    pub duration_minutes: i32,
    pub umpires: UmpireCrew,
    pub winning_pitcher: PersonRef,
    pub losing_pitcher: PersonRef,
    pub saving_pitcher: PersonRef,
    pub game_winning_rbi_batter: PersonRef,
    pub additional_info: String,
    pub acquisition_info: String,
}

impl GameRecord {
    #[must_use]
    pub fn key(&self) -> GameKey {
        GameKey {
            date: self.date,
            visiting_team: self.visiting.team.clone(),
            home_team: self.home.team.clone(),
            game_of_day: self.game_of_day.clone(),
        }
    }
}
