//! Service contracts consumed by the controllers.

pub mod crud_service;

pub use crud_service::CrudService;

#[cfg(test)]
pub use crud_service::MockCrudService;
