//! HTTP handlers

pub mod health;
pub mod relay;
pub mod routes;

pub use routes::create_routes;
