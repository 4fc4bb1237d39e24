pub mod connection;
pub mod helpers;
mod migrations;
pub mod models;
mod repositories;
mod seed;

pub use connection::Database;
pub use seed::SeedReport;
