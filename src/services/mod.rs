//! Service layer
//!
//! Business logic shared by the outer interfaces.

mod rotation_service;

pub use rotation_service::RotationService;
