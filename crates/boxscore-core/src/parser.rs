use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::record::{
    BattingLine, FieldingLine, GameRecord, LineupSlot, PersonRef, PitchingLine, TeamGame,
    UmpireCrew, LINEUP_SLOTS,
};
use crate::schema::{FieldKind, FIELD_COUNT, GAME_LOG_FIELDS, NULL_SENTINEL};
use crate::{epoch_date, parse_compact_date};

/// Value stored for a numeric field that failed to parse.
pub const MALFORMED_INT: i32 = -1;

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("field count mismatch: expected {expected}, found {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("unterminated quoted field starting at byte {0}")]
    UnterminatedQuote(usize),
    #[error("unexpected quote at byte {0}")]
    BareQuote(usize),
    #[error("schema error: {0}")]
    Schema(String),
}

/// A field that fell back to its sentinel during parsing.
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct RecoveredField {
    pub name: &'static str,
    pub index: usize,
    pub raw: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedGame {
    pub record: GameRecord,
    pub recovered: Vec<RecoveredField>,
}

/// Splits one delimited line into fields.
///
/// Fields may be wrapped in double quotes, inside which commas are data and
/// `""` is a literal quote. A trailing line terminator is ignored. Records
/// are one line each, so a quoted field cannot span a newline.
///
/// # Errors
/// Returns [`ParseError::UnterminatedQuote`] when a quoted field never closes
/// and [`ParseError::BareQuote`] for a quote inside an unquoted field or
/// text after a closing quote.
pub fn split_fields(line: &str) -> Result<Vec<String>, ParseError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut closed = false;
    let mut quote_start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek().map(|&(_, next)| next) == Some('"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    closed = true;
                }
            } else {
                current.push(ch);
            }
        } else if ch == ',' {
            fields.push(std::mem::take(&mut current));
            closed = false;
        } else if closed {
            return Err(ParseError::BareQuote(offset));
        } else if ch == '"' {
            if !current.is_empty() {
                return Err(ParseError::BareQuote(offset));
            }
            in_quotes = true;
            quote_start = offset;
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote(quote_start));
    }

    fields.push(current);
    Ok(fields)
}

/// Parses an integer the way the game logs need: anything unparseable
/// becomes [`MALFORMED_INT`].
#[must_use]
pub fn parse_tolerant_int(raw: &str) -> i32 {
    raw.parse().unwrap_or(MALFORMED_INT)
}

#[must_use]
pub fn normalize_null(raw: &str) -> String {
    if raw == NULL_SENTINEL {
        String::new()
    } else {
        raw.to_string()
    }
}

/// Turns game-log lines into [`GameRecord`]s through the named field table.
#[derive(Debug, Clone)]
pub struct RecordParser {
    index: BTreeMap<&'static str, usize>,
}

impl RecordParser {
    /// Builds the name index and proves the parser reads every field of
    /// [`GAME_LOG_FIELDS`] exactly once.
    ///
    /// # Errors
    /// Returns [`ParseError::Schema`] when the field table has duplicate
    /// names, when the parser asks for a field the table does not define, or
    /// when a field is never read.
    pub fn new() -> Result<Self, ParseError> {
        let mut index = BTreeMap::new();
        for (position, spec) in GAME_LOG_FIELDS.iter().enumerate() {
            if index.insert(spec.name, position).is_some() {
                return Err(ParseError::Schema(format!(
                    "duplicate field name: {}",
                    spec.name
                )));
            }
        }

        let parser = Self { index };
        parser.verify_coverage()?;
        Ok(parser)
    }

    fn verify_coverage(&self) -> Result<(), ParseError> {
        let blank = vec![String::new(); FIELD_COUNT];
        let mut reader = FieldReader::new(&blank, &self.index);
        read_game(&mut reader)?;

        if let Some(position) = reader.first_unread() {
            return Err(ParseError::Schema(format!(
                "field {position} ({}) is never read",
                GAME_LOG_FIELDS[position].name
            )));
        }

        Ok(())
    }

    /// Splits and parses one game-log line.
    ///
    /// # Errors
    /// Returns [`ParseError::UnterminatedQuote`] for a broken line and
    /// [`ParseError::FieldCount`] when it does not carry exactly
    /// [`FIELD_COUNT`] fields.
    pub fn parse_line(&self, line: &str) -> Result<ParsedGame, ParseError> {
        let fields = split_fields(line)?;
        self.parse_fields(&fields)
    }

    /// Parses an already split field sequence.
    ///
    /// Malformed numbers become `-1` and a malformed date becomes the Unix
    /// epoch; both are listed in [`ParsedGame::recovered`].
    ///
    /// # Errors
    /// Returns [`ParseError::FieldCount`] when `fields` is truncated or
    /// extended.
    pub fn parse_fields<S: AsRef<str>>(&self, fields: &[S]) -> Result<ParsedGame, ParseError> {
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let mut reader = FieldReader::new(fields, &self.index);
        let record = read_game(&mut reader)?;

        let mut recovered = reader.recovered;
        recovered.sort_by_key(|field| field.index);
        Ok(ParsedGame { record, recovered })
    }
}

struct FieldReader<'a, S> {
    fields: &'a [S],
    index: &'a BTreeMap<&'static str, usize>,
    consumed: Vec<bool>,
    recovered: Vec<RecoveredField>,
}

impl<'a, S: AsRef<str>> FieldReader<'a, S> {
    fn new(fields: &'a [S], index: &'a BTreeMap<&'static str, usize>) -> Self {
        Self {
            fields,
            index,
            consumed: vec![false; fields.len()],
            recovered: Vec::new(),
        }
    }

    fn take(&mut self, name: &str, expected: FieldKind) -> Result<(usize, &'a str), ParseError> {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| ParseError::Schema(format!("unknown field: {name}")))?;

        let spec = GAME_LOG_FIELDS[position];
        if spec.kind != expected {
            return Err(ParseError::Schema(format!(
                "field {name} is {} in the schema but was read as {}",
                spec.kind.as_str(),
                expected.as_str()
            )));
        }

        if std::mem::replace(&mut self.consumed[position], true) {
            return Err(ParseError::Schema(format!("field {name} read twice")));
        }

        let fields = self.fields;
        Ok((position, fields[position].as_ref()))
    }

    fn text(&mut self, name: &str) -> Result<String, ParseError> {
        let (_, raw) = self.take(name, FieldKind::Text)?;
        Ok(raw.to_string())
    }

    fn optional_role(&mut self, name: &str) -> Result<String, ParseError> {
        let (_, raw) = self.take(name, FieldKind::OptionalRole)?;
        Ok(normalize_null(raw))
    }

    fn int(&mut self, name: &str) -> Result<i32, ParseError> {
        let (position, raw) = self.take(name, FieldKind::Int)?;
        match raw.parse::<i32>() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.recover(position, raw);
                Ok(MALFORMED_INT)
            }
        }
    }

    fn date(&mut self, name: &str) -> Result<(Date, String), ParseError> {
        let (position, raw) = self.take(name, FieldKind::Date)?;
        let date = match parse_compact_date(raw) {
            Some(value) => value,
            None => {
                self.recover(position, raw);
                epoch_date()
            }
        };
        Ok((date, raw.to_string()))
    }

    fn person(&mut self, prefix: &str) -> Result<PersonRef, ParseError> {
        Ok(PersonRef {
            id: self.text(&format!("{prefix}_id"))?,
            name: self.text(&format!("{prefix}_name"))?,
        })
    }

    fn recover(&mut self, position: usize, raw: &str) {
        let spec = GAME_LOG_FIELDS[position];
        self.recovered.push(RecoveredField {
            name: spec.name,
            index: position,
            raw: raw.to_string(),
            kind: spec.kind,
        });
    }

    fn first_unread(&self) -> Option<usize> {
        self.consumed.iter().position(|read| !read)
    }
}

fn read_game<S: AsRef<str>>(reader: &mut FieldReader<'_, S>) -> Result<GameRecord, ParseError> {
    let (date, date_raw) = reader.date("date")?;

    Ok(GameRecord {
        date,
        date_raw,
        game_of_day: reader.text("game_of_day")?,
        day_of_week: reader.text("day_of_week")?,
        visiting: read_team(reader, "visiting")?,
        home: read_team(reader, "home")?,
        game_length_outs: reader.int("game_length_outs")?,
        day_night: reader.text("day_night")?,
        completion_info: reader.text("completion_info")?,
        forfeit_info: reader.text("forfeit_info")?,
        protest_info: reader.text("protest_info")?,
        park_id: reader.text("park_id")?,
        attendance: reader.int("attendance")?,
        duration_minutes: reader.int("duration_minutes")?,
        umpires: UmpireCrew {
            home_plate: reader.person("home_plate_umpire")?,
            first_base: reader.person("first_base_umpire")?,
            second_base: reader.person("second_base_umpire")?,
            third_base: reader.person("third_base_umpire")?,
            left_field: PersonRef {
                id: reader.text("left_field_umpire_id")?,
                name: reader.optional_role("left_field_umpire_name")?,
            },
            right_field: PersonRef {
                id: reader.text("right_field_umpire_id")?,
                name: reader.optional_role("right_field_umpire_name")?,
            },
        },
        winning_pitcher: reader.person("winning_pitcher")?,
        losing_pitcher: reader.person("losing_pitcher")?,
        saving_pitcher: PersonRef {
            id: reader.optional_role("saving_pitcher_id")?,
            name: reader.optional_role("saving_pitcher_name")?,
        },
        game_winning_rbi_batter: PersonRef {
            id: reader.optional_role("game_winning_rbi_batter_id")?,
            name: reader.optional_role("game_winning_rbi_batter_name")?,
        },
        additional_info: reader.text("additional_info")?,
        acquisition_info: reader.text("acquisition_info")?,
    })
}

fn read_team<S: AsRef<str>>(
    reader: &mut FieldReader<'_, S>,
    side: &str,
) -> Result<TeamGame, ParseError> {
    let key = |suffix: &str| format!("{side}_{suffix}");

    let batting = BattingLine {
        at_bats: reader.int(&key("at_bats"))?,
        hits: reader.int(&key("hits"))?,
        doubles: reader.int(&key("doubles"))?,
        triples: reader.int(&key("triples"))?,
        home_runs: reader.int(&key("home_runs"))?,
        runs_batted_in: reader.int(&key("runs_batted_in"))?,
        sacrifice_hits: reader.int(&key("sacrifice_hits"))?,
        sacrifice_flies: reader.int(&key("sacrifice_flies"))?,
        hit_by_pitch: reader.int(&key("hit_by_pitch"))?,
        walks: reader.int(&key("walks"))?,
        intentional_walks: reader.int(&key("intentional_walks"))?,
        strikeouts: reader.int(&key("strikeouts"))?,
        stolen_bases: reader.int(&key("stolen_bases"))?,
        caught_stealing: reader.int(&key("caught_stealing"))?,
        grounded_into_double_play: reader.int(&key("grounded_into_double_play"))?,
        catcher_interference: reader.int(&key("catcher_interference"))?,
        left_on_base: reader.int(&key("left_on_base"))?,
    };

    let pitching = PitchingLine {
        pitchers_used: reader.int(&key("pitchers_used"))?,
        individual_earned_runs: reader.int(&key("individual_earned_runs"))?,
        team_earned_runs: reader.int(&key("team_earned_runs"))?,
        wild_pitches: reader.int(&key("wild_pitches"))?,
        balks: reader.int(&key("balks"))?,
    };

    let fielding = FieldingLine {
        putouts: reader.int(&key("putouts"))?,
        assists: reader.int(&key("assists"))?,
        errors: reader.int(&key("errors"))?,
        passed_balls: reader.int(&key("passed_balls"))?,
        double_plays: reader.int(&key("double_plays"))?,
        triple_plays: reader.int(&key("triple_plays"))?,
    };

    let mut lineup: [LineupSlot; LINEUP_SLOTS] = Default::default();
    for (slot_index, slot) in lineup.iter_mut().enumerate() {
        let prefix = key(&format!("player{}", slot_index + 1));
        *slot = LineupSlot {
            player: reader.person(&prefix)?,
            position_code: reader.int(&format!("{prefix}_position"))?,
        };
    }

    Ok(TeamGame {
        team: reader.text(&key("team"))?,
        league: reader.text(&key("league"))?,
        game_number: reader.int(&key("game_number"))?,
        score: reader.int(&key("score"))?,
        line_score: reader.text(&key("line_score"))?,
        batting,
        pitching,
        fielding,
        manager: reader.person(&key("manager"))?,
        starting_pitcher: reader.person(&key("starting_pitcher"))?,
        lineup,
    })
}
