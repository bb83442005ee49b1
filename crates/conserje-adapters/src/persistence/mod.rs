pub mod memory;

pub use memory::{MemoryStore, StoredEvent};
