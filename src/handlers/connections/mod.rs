pub mod collection;
pub mod record;
pub mod requests;

// Re-export handler functions for use in routing
pub use collection::list as connections_list;
pub use record::get as connection_get;
pub use record::patch as connection_patch;
