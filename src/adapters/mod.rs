// Adapters layer: concrete implementations of the domain ports.

pub mod memory_storage;
pub mod schedule_store;

pub use memory_storage::MemoryStorage;
pub use schedule_store::ScheduleStore;
