use bataille_core::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub player_id: PlayerId,
    pub score: u32,
}

/// A finished game as persisted: one score entry per participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub id: u32,
    pub scores: Vec<ScoreEntry>,
}

/// A score entry joined with roster data for display. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub player_id: PlayerId,
    pub player_name: String,
    pub score: u32,
    pub winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub id: u32,
    pub scores: Vec<ScoreLine>,
}
