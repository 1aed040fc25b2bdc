//! Helper functions shared across layers.
//!
//! - [`params`] - Integer parsing of loosely typed request parameters
//! - [`path_params`] - Path parameter extraction for raw HTTP requests

pub mod params;
pub mod path_params;
