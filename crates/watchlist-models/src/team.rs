use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A person credited on a movie. Owned by exactly one movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub id: i64,
    pub movie_id: String,
    pub name: String,
    pub role: TeamRole,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Cast,
    Director,
    Writer,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized team role '{0}'")]
pub struct ParseRoleError(pub String);

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Cast => "cast",
            TeamRole::Director => "director",
            TeamRole::Writer => "writer",
        }
    }
}

impl FromStr for TeamRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cast" | "actor" | "actors" => Ok(TeamRole::Cast),
            "director" => Ok(TeamRole::Director),
            "writer" => Ok(TeamRole::Writer),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
