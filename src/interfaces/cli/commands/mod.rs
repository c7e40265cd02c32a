//! CLI command implementations

pub mod banner;
pub mod campaign;
pub mod config_gen;
mod helpers;
pub mod place;
pub mod rotation;
