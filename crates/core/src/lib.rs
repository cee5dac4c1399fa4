//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod deck;
pub mod error;
pub mod events;
pub mod game;
pub mod player;
pub mod rng;
pub mod rounds;
pub mod state;

pub use config::*;
pub use deck::*;
pub use error::*;
pub use events::*;
pub use game::*;
pub use player::*;
pub use rng::*;
pub use rounds::*;
pub use state::*;
