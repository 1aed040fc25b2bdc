//! Application layer: dispatch, controllers and pagination.
//!
//! - [`dispatch`] - Route table, handler registry and dispatcher
//! - [`controllers`] - Generic entity routing and per-entity handlers
//! - [`pagination`] - Pagination engine and navigation links
//! - [`reply`] - Handler output consumed by the transport boundary

pub mod controllers;
pub mod dispatch;
pub mod pagination;
pub mod reply;
