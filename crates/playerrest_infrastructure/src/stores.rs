pub mod memory;

pub use memory::InMemoryPlayerStore;
