// Dungeon classification value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DungeonKind {
    Unknown,
    Normal,
    CoinDailyOther,
    Technical,
    Etc,
}

impl DungeonKind {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(DungeonKind::Unknown),
            0 => Some(DungeonKind::Normal),
            1 => Some(DungeonKind::CoinDailyOther),
            2 => Some(DungeonKind::Technical),
            3 => Some(DungeonKind::Etc),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            DungeonKind::Unknown => -1,
            DungeonKind::Normal => 0,
            DungeonKind::CoinDailyOther => 1,
            DungeonKind::Technical => 2,
            DungeonKind::Etc => 3,
        }
    }
}
