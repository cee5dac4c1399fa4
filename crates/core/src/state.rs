use serde::{Deserialize, Serialize};

/// Coarse lifecycle phase, always derived from the current data and never
/// stored. `Saved` wins over everything once the game has been persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    PlayerSelection,
    OnGoing,
    Over,
    Saved,
}
