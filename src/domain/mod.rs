//! Domain layer: request view, entities, paging model and service contracts.
//!
//! # Architecture
//!
//! - [`request`] - Read-only request envelope passed through dispatch
//! - [`entities`] - Models served by the generic controller
//! - [`page`] - Pagination input and paged result model
//! - [`services`] - CRUD contract implemented by entity stores
//! - [`user`] - Actor passed to every service call
//!
//! The domain layer has no dependency on the transport or on any concrete store.

pub mod entities;
pub mod page;
pub mod request;
pub mod services;
pub mod user;
