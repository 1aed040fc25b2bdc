//! Infrastructure layer: concrete stores behind the domain service traits.
//!
//! # Modules
//!
//! - [`memory`] - In-memory stores guarded by async locks

pub mod memory;
