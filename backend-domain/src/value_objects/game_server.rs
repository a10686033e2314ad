// Game server (region) value object

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameServer {
    Na,
    Jp,
    Fake,
}

impl GameServer {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameServer::Na => "NA",
            GameServer::Jp => "JP",
            GameServer::Fake => "FAKE",
        }
    }

    /// Parses a user- or catalog-supplied server code. `US` is an alias for NA.
    pub fn parse(raw: &str) -> Result<Self, ServerParseError> {
        match raw.trim().to_uppercase().as_str() {
            "NA" | "US" => Ok(GameServer::Na),
            "JP" => Ok(GameServer::Jp),
            "FAKE" => Ok(GameServer::Fake),
            other => Err(ServerParseError(other.to_string())),
        }
    }
}

impl fmt::Display for GameServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported server '{0}', pick one of NA, JP")]
pub struct ServerParseError(pub String);
