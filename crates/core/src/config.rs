use crate::GameError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DECK_SIZE: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    pub deck_size: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck_size: DEFAULT_DECK_SIZE,
        }
    }
}

impl GameConfig {
    pub fn with_deck_size(deck_size: u32) -> Self {
        Self { deck_size }
    }

    /// Both hands must end up equal length, so the deck size has to be even
    /// and large enough to give each player at least one card.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.deck_size < 2 {
            return Err(GameError::DeckTooSmall(self.deck_size));
        }
        if self.deck_size % 2 != 0 {
            return Err(GameError::OddDeckSize(self.deck_size));
        }
        Ok(())
    }

    pub fn hand_size(&self) -> usize {
        (self.deck_size / 2) as usize
    }
}
