use anyhow::Result;
use time::Date;

use crate::record::GameRecord;

/// Append-only game persistence.
///
/// Games are identified by `(date, visiting team, home team, game of day)`;
/// inserting an identity that already exists is an error, never an update.
pub trait GameStore {
    #[allow(clippy::missing_errors_doc)]
    fn insert_game(&self, game: &GameRecord) -> Result<()>;

    /// Every game on `date` between the two teams, ordered by game of day.
    #[allow(clippy::missing_errors_doc)]
    fn lookup_games(&self, date: Date, visiting_team: &str, home_team: &str)
        -> Result<Vec<GameRecord>>;
}
