//! Infrastructure layer.

pub mod registry;

pub use self::registry::{InMemory, Registry};
