//! # API Shared
//!
//! Shared types and utilities for the VidaLeve REST API.
//!
//! Contains:
//! - DTOs used by more than one handler (`types` module)
//! - The `HealthService`
//!
//! Used by `vidaleve-run` and `vidaleve-gateways`.

pub mod health;
pub mod types;

pub use health::{HealthRes, HealthService};
pub use types::{CustomerDetails, PurchaseType};
