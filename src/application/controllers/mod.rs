//! Controllers turning dispatched requests into service calls.
//!
//! [`entity_controller`] holds the method/path routing shared by all entities;
//! each entity module contributes a thin handler that binds it to a concrete
//! service and registers itself in the [`crate::application::dispatch::HandlerRegistry`].

pub mod entity_controller;
pub mod movie_controller;

pub use entity_controller::{Routed, route};
