pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod shutdown;
pub mod state;
