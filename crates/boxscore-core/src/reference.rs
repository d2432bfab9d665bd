use serde::{Deserialize, Serialize};
use time::Date;

use crate::parser::{parse_tolerant_int, ParseError};
use crate::parse_us_date;

const TEAM_FIELDS: usize = 5;
const PARK_FIELDS: usize = 8;
const PERSON_FIELDS: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct TeamRecord {
    pub symbol: String,
    pub founded: i32,
    pub league: String,
    pub location: String,
    pub name: String,
}

impl TeamRecord {
    /// Location and nickname joined by one space, e.g. "Boston Red Sox".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.location, self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ParkRecord {
    pub park_id: String,
    pub name: String,
    pub nickname: String,
    pub city: String,
    pub state: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub league: String,
}

/// Row of the people reference file. Stored, never joined into a view.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PersonRecord {
    pub person_id: String,
    pub last_name: String,
    pub first_name: String,
    pub player_debut: Option<Date>,
    pub manager_debut: Option<Date>,
    pub coach_debut: Option<Date>,
    pub umpire_debut: Option<Date>,
}

/// Reads a team line: `symbol, league, location, name, founded`.
///
/// # Errors
/// Returns [`ParseError::FieldCount`] when the line is short.
pub fn parse_team_fields<S: AsRef<str>>(fields: &[S]) -> Result<TeamRecord, ParseError> {
    let fields = require(fields, TEAM_FIELDS)?;
    Ok(TeamRecord {
        symbol: fields[0].to_string(),
        league: fields[1].to_string(),
        location: fields[2].to_string(),
        name: fields[3].to_string(),
        founded: parse_tolerant_int(fields[4]),
    })
}

/// Reads a park line: `id, name, nickname, city, state, start, end, league`.
/// Dates are `MM/DD/YYYY`; blank or malformed dates are absent.
///
/// # Errors
/// Returns [`ParseError::FieldCount`] when the line is short.
pub fn parse_park_fields<S: AsRef<str>>(fields: &[S]) -> Result<ParkRecord, ParseError> {
    let fields = require(fields, PARK_FIELDS)?;
    Ok(ParkRecord {
        park_id: fields[0].to_string(),
        name: fields[1].to_string(),
        nickname: fields[2].to_string(),
        city: fields[3].to_string(),
        state: fields[4].to_string(),
        start_date: parse_us_date(fields[5]),
        end_date: parse_us_date(fields[6]),
        league: fields[7].to_string(),
    })
}

/// Reads a person line: `id, last, first, player, manager, coach, umpire`
/// where the last four are debut dates.
///
/// # Errors
/// Returns [`ParseError::FieldCount`] when the line is short.
pub fn parse_person_fields<S: AsRef<str>>(fields: &[S]) -> Result<PersonRecord, ParseError> {
    let fields = require(fields, PERSON_FIELDS)?;
    Ok(PersonRecord {
        person_id: fields[0].to_string(),
        last_name: fields[1].to_string(),
        first_name: fields[2].to_string(),
        player_debut: parse_us_date(fields[3]),
        manager_debut: parse_us_date(fields[4]),
        coach_debut: parse_us_date(fields[5]),
        umpire_debut: parse_us_date(fields[6]),
    })
}

// Trailing columns beyond the ones read are ignored.
fn require<S: AsRef<str>>(fields: &[S], expected: usize) -> Result<Vec<&str>, ParseError> {
    if fields.len() < expected {
        return Err(ParseError::FieldCount {
            expected,
            actual: fields.len(),
        });
    }

    Ok(fields.iter().map(|field| field.as_ref()).collect())
}
