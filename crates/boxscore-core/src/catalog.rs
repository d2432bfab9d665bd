use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::reference::{ParkRecord, TeamRecord};

/// Anything that can hand over the full team and park reference sets.
pub trait ReferenceSource {
    #[allow(clippy::missing_errors_doc)]
    fn teams(&self) -> Result<Vec<TeamRecord>>;

    #[allow(clippy::missing_errors_doc)]
    fn parks(&self) -> Result<Vec<ParkRecord>>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} key in reference data: {key}")]
    Duplicate { kind: &'static str, key: String },
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

/// Display names for one team symbol. Every field but `symbol` is empty when
/// the symbol is not in the catalog.
#[derive(Debug, Clone, Default, Serialize, Eq, PartialEq)]
pub struct TeamNames {
    pub symbol: String,
    pub full_name: String,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Eq, PartialEq)]
pub struct ParkPlace {
    pub park_id: String,
    pub name: String,
    pub city: String,
    pub state: String,
}

/// Teams and parks keyed by symbol and park id. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalogs {
    teams: BTreeMap<String, TeamRecord>,
    parks: BTreeMap<String, ParkRecord>,
}

impl ReferenceCatalogs {
    /// # Errors
    /// Returns [`CatalogError::Duplicate`] when a team symbol or park id
    /// appears twice.
    pub fn new(teams: Vec<TeamRecord>, parks: Vec<ParkRecord>) -> Result<Self, CatalogError> {
        let mut catalogs = Self::default();

        for team in teams {
            if catalogs.teams.contains_key(&team.symbol) {
                return Err(CatalogError::Duplicate {
                    kind: "team",
                    key: team.symbol,
                });
            }
            catalogs.teams.insert(team.symbol.clone(), team);
        }

        for park in parks {
            if catalogs.parks.contains_key(&park.park_id) {
                return Err(CatalogError::Duplicate {
                    kind: "park",
                    key: park.park_id,
                });
            }
            catalogs.parks.insert(park.park_id.clone(), park);
        }

        Ok(catalogs)
    }

    /// Reads both reference sets from `source`.
    ///
    /// # Errors
    /// Returns [`CatalogError::Source`] when the source cannot be read and
    /// [`CatalogError::Duplicate`] for conflicting keys.
    pub fn load(source: &impl ReferenceSource) -> Result<Self, CatalogError> {
        let teams = source.teams().context("failed to load team catalog")?;
        let parks = source.parks().context("failed to load park catalog")?;
        Self::new(teams, parks)
    }

    #[must_use]
    pub fn lookup_team(&self, symbol: &str) -> Option<&TeamRecord> {
        self.teams.get(symbol)
    }

    #[must_use]
    pub fn lookup_park(&self, park_id: &str) -> Option<&ParkRecord> {
        self.parks.get(park_id)
    }

    #[must_use]
    pub fn team_names(&self, symbol: &str) -> TeamNames {
        match self.lookup_team(symbol) {
            Some(team) => TeamNames {
                symbol: symbol.to_string(),
                full_name: team.full_name(),
                name: team.name.clone(),
                location: team.location.clone(),
            },
            None => TeamNames {
                symbol: symbol.to_string(),
                ..TeamNames::default()
            },
        }
    }

    #[must_use]
    pub fn park_place(&self, park_id: &str) -> ParkPlace {
        match self.lookup_park(park_id) {
            Some(park) => ParkPlace {
                park_id: park_id.to_string(),
                name: park.name.clone(),
                city: park.city.clone(),
                state: park.state.clone(),
            },
            None => ParkPlace {
                park_id: park_id.to_string(),
                ..ParkPlace::default()
            },
        }
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn park_count(&self) -> usize {
        self.parks.len()
    }
}
