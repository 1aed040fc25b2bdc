//! HTTP request handlers.

pub mod gateway;
pub mod health;

pub use gateway::gateway_handler;
pub use health::health_handler;
