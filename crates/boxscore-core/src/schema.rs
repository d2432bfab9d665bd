//! Named layout of a game-log line.
//!
//! The wire format is positional: 161 comma-separated fields in the order
//! below. The parser never indexes a line directly; it asks for fields by
//! name, and [`crate::RecordParser::new`] checks this table before any line
//! is read so a reordering or a missing entry fails at startup.

use serde::Serialize;

pub const FIELD_COUNT: usize = 161;

/// Literal the source uses for an absent optional role.
pub const NULL_SENTINEL: &str = "(none)";

#[derive(Debug, Clone, Copy, Serialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Int,
    Date,
    /// Text that maps [`NULL_SENTINEL`] to the empty string.
    OptionalRole,
}

impl FieldKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::Date => "date",
            Self::OptionalRole => "optional_role",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Eq, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

pub const GAME_LOG_FIELDS: [FieldSpec; FIELD_COUNT] = [
    field("date", FieldKind::Date), // 0
    field("game_of_day", FieldKind::Text), // 1
    field("day_of_week", FieldKind::Text), // 2
    field("visiting_team", FieldKind::Text), // 3
    field("visiting_league", FieldKind::Text), // 4
    field("visiting_game_number", FieldKind::Int), // 5
    field("home_team", FieldKind::Text), // 6
    field("home_league", FieldKind::Text), // 7
    field("home_game_number", FieldKind::Int), // 8
    field("visiting_score", FieldKind::Int), // 9
    field("home_score", FieldKind::Int), // 10
    field("game_length_outs", FieldKind::Int), // 11
    field("day_night", FieldKind::Text), // 12
    field("completion_info", FieldKind::Text), // 13
    field("forfeit_info", FieldKind::Text), // 14
    field("protest_info", FieldKind::Text), // 15
    field("park_id", FieldKind::Text), // 16
    field("attendance", FieldKind::Int), // 17
    field("duration_minutes", FieldKind::Int), // 18
    field("visiting_line_score", FieldKind::Text), // 19
    field("home_line_score", FieldKind::Text), // 20
    field("visiting_at_bats", FieldKind::Int), // 21
    field("visiting_hits", FieldKind::Int), // 22
    field("visiting_doubles", FieldKind::Int), // 23
    field("visiting_triples", FieldKind::Int), // 24
    field("visiting_home_runs", FieldKind::Int), // 25
    field("visiting_runs_batted_in", FieldKind::Int), // 26
    field("visiting_sacrifice_hits", FieldKind::Int), // 27
    field("visiting_sacrifice_flies", FieldKind::Int), // 28
    field("visiting_hit_by_pitch", FieldKind::Int), // 29
    field("visiting_walks", FieldKind::Int), // 30
    field("visiting_intentional_walks", FieldKind::Int), // 31
    field("visiting_strikeouts", FieldKind::Int), // 32
    field("visiting_stolen_bases", FieldKind::Int), // 33
    field("visiting_caught_stealing", FieldKind::Int), // 34
    field("visiting_grounded_into_double_play", FieldKind::Int), // 35
    field("visiting_catcher_interference", FieldKind::Int), // 36
    field("visiting_left_on_base", FieldKind::Int), // 37
    field("visiting_pitchers_used", FieldKind::Int), // 38
    field("visiting_individual_earned_runs", FieldKind::Int), // 39
    field("visiting_team_earned_runs", FieldKind::Int), // 40
    field("visiting_wild_pitches", FieldKind::Int), // 41
    field("visiting_balks", FieldKind::Int), // 42
    field("visiting_putouts", FieldKind::Int), // 43
    field("visiting_assists", FieldKind::Int), // 44
    field("visiting_errors", FieldKind::Int), // 45
    field("visiting_passed_balls", FieldKind::Int), // 46
    field("visiting_double_plays", FieldKind::Int), // 47
    field("visiting_triple_plays", FieldKind::Int), // 48
    field("home_at_bats", FieldKind::Int), // 49
    field("home_hits", FieldKind::Int), // 50
    field("home_doubles", FieldKind::Int), // 51
    field("home_triples", FieldKind::Int), // 52
    field("home_home_runs", FieldKind::Int), // 53
    field("home_runs_batted_in", FieldKind::Int), // 54
    field("home_sacrifice_hits", FieldKind::Int), // 55
    field("home_sacrifice_flies", FieldKind::Int), // 56
    field("home_hit_by_pitch", FieldKind::Int), // 57
    field("home_walks", FieldKind::Int), // 58
    field("home_intentional_walks", FieldKind::Int), // 59
    field("home_strikeouts", FieldKind::Int), // 60
    field("home_stolen_bases", FieldKind::Int), // 61
    field("home_caught_stealing", FieldKind::Int), // 62
    field("home_grounded_into_double_play", FieldKind::Int), // 63
    field("home_catcher_interference", FieldKind::Int), // 64
    field("home_left_on_base", FieldKind::Int), // 65
    field("home_pitchers_used", FieldKind::Int), // 66
    field("home_individual_earned_runs", FieldKind::Int), // 67
    field("home_team_earned_runs", FieldKind::Int), // 68
    field("home_wild_pitches", FieldKind::Int), // 69
    field("home_balks", FieldKind::Int), // 70
    field("home_putouts", FieldKind::Int), // 71
    field("home_assists", FieldKind::Int), // 72
    field("home_errors", FieldKind::Int), // 73
    field("home_passed_balls", FieldKind::Int), // 74
    field("home_double_plays", FieldKind::Int), // 75
    field("home_triple_plays", FieldKind::Int), // 76
    field("home_plate_umpire_id", FieldKind::Text), // 77
    field("home_plate_umpire_name", FieldKind::Text), // 78
    field("first_base_umpire_id", FieldKind::Text), // 79
    field("first_base_umpire_name", FieldKind::Text), // 80
    field("second_base_umpire_id", FieldKind::Text), // 81
    field("second_base_umpire_name", FieldKind::Text), // 82
    field("third_base_umpire_id", FieldKind::Text), // 83
    field("third_base_umpire_name", FieldKind::Text), // 84
    field("left_field_umpire_id", FieldKind::Text), // 85
    field("left_field_umpire_name", FieldKind::OptionalRole), // 86
    field("right_field_umpire_id", FieldKind::Text), // 87
    field("right_field_umpire_name", FieldKind::OptionalRole), // 88
    field("visiting_manager_id", FieldKind::Text), // 89
    field("visiting_manager_name", FieldKind::Text), // 90
    field("home_manager_id", FieldKind::Text), // 91
    field("home_manager_name", FieldKind::Text), // 92
    field("winning_pitcher_id", FieldKind::Text), // 93
    field("winning_pitcher_name", FieldKind::Text), // 94
    field("losing_pitcher_id", FieldKind::Text), // 95
    field("losing_pitcher_name", FieldKind::Text), // 96
    field("saving_pitcher_id", FieldKind::OptionalRole), // 97
    field("saving_pitcher_name", FieldKind::OptionalRole), // 98
    field("game_winning_rbi_batter_id", FieldKind::OptionalRole), // 99
    field("game_winning_rbi_batter_name", FieldKind::OptionalRole), // 100
    field("visiting_starting_pitcher_id", FieldKind::Text), // 101
    field("visiting_starting_pitcher_name", FieldKind::Text), // 102
    field("home_starting_pitcher_id", FieldKind::Text), // 103
    field("home_starting_pitcher_name", FieldKind::Text), // 104
    field("visiting_player1_id", FieldKind::Text), // 105
    field("visiting_player1_name", FieldKind::Text), // 106
    field("visiting_player1_position", FieldKind::Int), // 107
    field("visiting_player2_id", FieldKind::Text), // 108
    field("visiting_player2_name", FieldKind::Text), // 109
    field("visiting_player2_position", FieldKind::Int), // 110
    field("visiting_player3_id", FieldKind::Text), // 111
    field("visiting_player3_name", FieldKind::Text), // 112
    field("visiting_player3_position", FieldKind::Int), // 113
    field("visiting_player4_id", FieldKind::Text), // 114
    field("visiting_player4_name", FieldKind::Text), // 115
    field("visiting_player4_position", FieldKind::Int), // 116
    field("visiting_player5_id", FieldKind::Text), // 117
    field("visiting_player5_name", FieldKind::Text), // 118
    field("visiting_player5_position", FieldKind::Int), // 119
    field("visiting_player6_id", FieldKind::Text), // 120
    field("visiting_player6_name", FieldKind::Text), // 121
    field("visiting_player6_position", FieldKind::Int), // 122
    field("visiting_player7_id", FieldKind::Text), // 123
    field("visiting_player7_name", FieldKind::Text), // 124
    field("visiting_player7_position", FieldKind::Int), // 125
    field("visiting_player8_id", FieldKind::Text), // 126
    field("visiting_player8_name", FieldKind::Text), // 127
    field("visiting_player8_position", FieldKind::Int), // 128
    field("visiting_player9_id", FieldKind::Text), // 129
    field("visiting_player9_name", FieldKind::Text), // 130
    field("visiting_player9_position", FieldKind::Int), // 131
    field("home_player1_id", FieldKind::Text), // 132
    field("home_player1_name", FieldKind::Text), // 133
    field("home_player1_position", FieldKind::Int), // 134
    field("home_player2_id", FieldKind::Text), // 135
    field("home_player2_name", FieldKind::Text), // 136
    field("home_player2_position", FieldKind::Int), // 137
    field("home_player3_id", FieldKind::Text), // 138
    field("home_player3_name", FieldKind::Text), // 139
    field("home_player3_position", FieldKind::Int), // 140
    field("home_player4_id", FieldKind::Text), // 141
    field("home_player4_name", FieldKind::Text), // 142
    field("home_player4_position", FieldKind::Int), // 143
    field("home_player5_id", FieldKind::Text), // 144
    field("home_player5_name", FieldKind::Text), // 145
    field("home_player5_position", FieldKind::Int), // 146
    field("home_player6_id", FieldKind::Text), // 147
    field("home_player6_name", FieldKind::Text), // 148
    field("home_player6_position", FieldKind::Int), // 149
    field("home_player7_id", FieldKind::Text), // 150
    field("home_player7_name", FieldKind::Text), // 151
    field("home_player7_position", FieldKind::Int), // 152
    field("home_player8_id", FieldKind::Text), // 153
    field("home_player8_name", FieldKind::Text), // 154
    field("home_player8_position", FieldKind::Int), // 155
    field("home_player9_id", FieldKind::Text), // 156
    field("home_player9_name", FieldKind::Text), // 157
    field("home_player9_position", FieldKind::Int), // 158
    field("additional_info", FieldKind::Text), // 159
    field("acquisition_info", FieldKind::Text), // 160
];
