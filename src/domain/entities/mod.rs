//! Entities served through the generic controller.
//!
//! Every entity implements [`Entity`], which gives the controller what it needs to
//! deserialize, validate and identify a request body without knowing the concrete
//! type.

pub mod movie;

pub use movie::{Movie, Person};

use serde::{Serialize, de::DeserializeOwned};
use validator::Validate;

/// A model type the generic controller can route requests for.
pub trait Entity: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static {
    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    /// Unique identifier, if assigned.
    fn id(&self) -> Option<i64>;
}
