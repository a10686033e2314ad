// Pure domain services
pub mod event_query;
pub mod rotation;

pub use event_query::*;
pub use rotation::*;
