// Domain value objects
pub mod dungeon_kind;
pub mod event_kind;
pub mod game_server;

pub use dungeon_kind::*;
pub use event_kind::*;
pub use game_server::*;
