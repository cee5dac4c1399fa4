//! Roster and game-history storage behind a bounded-retry loader. The core
//! crate never touches this; the shell wires the two together.

pub mod disk;
pub mod error;
pub mod games;
pub mod loader;
pub mod players;
pub mod schema;

pub use disk::*;
pub use error::*;
pub use games::*;
pub use loader::*;
pub use players::*;
pub use schema::*;
