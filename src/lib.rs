//! Banner rotator - weighted banner selection with view and click caps
//!
//! Picks one banner for a display place by weighted random draw among the
//! banners that are active, inside their time window and below their caps;
//! counts impressions and clicks and deactivates a banner once a cap is hit.
//!
//! # Architecture
//! - `engine`: selection, eligibility, weighted draw, impression/click recording
//! - `storage`: `BannerStore` trait, SeaORM backend and in-memory store
//! - `services`: `RotationService` facade used by the interfaces
//! - `interfaces`: command-line interface
//! - `config`: static configuration (TOML + environment)
//! - `system`: logging setup

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
