//! Data Transfer Objects for the service's own endpoints.

pub mod health;
