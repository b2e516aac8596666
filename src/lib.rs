pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
