pub mod memory;
pub mod models;
pub mod repository;
pub mod seed;

pub use memory::MemoryConnectionRepository;
pub use repository::{ConnectionRepository, DatabaseError};
