// handlers/mod.rs - HTTP handlers
//
// connections: the datasource connection resource (list, show, patch)
// system:      service descriptor, health, API document
pub mod connections;
pub mod system;
