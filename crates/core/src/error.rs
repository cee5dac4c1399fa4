use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("deck size {0} is odd, both hands must be equal length")]
    OddDeckSize(u32),
    #[error("deck size {0} is too small, need at least one card per hand")]
    DeckTooSmall(u32),
}
