use serde::{Deserialize, Serialize};

/// Fielding positions as numbered on a scorecard, plus the designated hitter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Pitcher,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
    DesignatedHitter,
}

impl Position {
    pub const ALL: [Self; 10] = [
        Self::Pitcher,
        Self::Catcher,
        Self::FirstBase,
        Self::SecondBase,
        Self::ThirdBase,
        Self::Shortstop,
        Self::LeftField,
        Self::CenterField,
        Self::RightField,
        Self::DesignatedHitter,
    ];

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Pitcher),
            2 => Some(Self::Catcher),
            3 => Some(Self::FirstBase),
            4 => Some(Self::SecondBase),
            5 => Some(Self::ThirdBase),
            6 => Some(Self::Shortstop),
            7 => Some(Self::LeftField),
            8 => Some(Self::CenterField),
            9 => Some(Self::RightField),
            10 => Some(Self::DesignatedHitter),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Pitcher => 1,
            Self::Catcher => 2,
            Self::FirstBase => 3,
            Self::SecondBase => 4,
            Self::ThirdBase => 5,
            Self::Shortstop => 6,
            Self::LeftField => 7,
            Self::CenterField => 8,
            Self::RightField => 9,
            Self::DesignatedHitter => 10,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Pitcher => "Pitcher",
            Self::Catcher => "Catcher",
            Self::FirstBase => "First Baseman",
            Self::SecondBase => "Second Baseman",
            Self::ThirdBase => "Third Baseman",
            Self::Shortstop => "Shortstop",
            Self::LeftField => "Left Fielder",
            Self::CenterField => "Center Fielder",
            Self::RightField => "Right Fielder",
            Self::DesignatedHitter => "Designated Hitter",
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pitcher => "P",
            Self::Catcher => "C",
            Self::FirstBase => "1B",
            Self::SecondBase => "2B",
            Self::ThirdBase => "3B",
            Self::Shortstop => "SS",
            Self::LeftField => "LF",
            Self::CenterField => "CF",
            Self::RightField => "RF",
            Self::DesignatedHitter => "DH",
        }
    }
}
