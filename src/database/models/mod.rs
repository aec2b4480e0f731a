pub mod connection;

pub use connection::{
    parse_timestamp, Connection, ConnectionStatus, Credentials, FoundryConfig, Provider,
};
