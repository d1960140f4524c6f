//! # VidaLeve Core
//!
//! Core business logic for the VidaLeve GLP-1 programme:
//! - Static medication reference data and dosage sequences
//! - BMI-based medication recommendation
//! - Dosage titration advice
//! - Digital prescription identity generation (id, verification code, validity)
//!
//! **No API concerns**: HTTP servers, outbound gateway calls and persistence
//! belong in `vidaleve-run`, `vidaleve-gateways` and `vidaleve-store`.

pub mod config;
pub mod constants;
pub mod error;
pub mod medications;
pub mod prescription;
pub mod recommendation;
pub mod titration;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use medications::{find_by_commercial_name, medications, Medication};
pub use prescription::{PatientDetails, Prescription, PrescriptionService};
pub use recommendation::{classify, Recommendation};
pub use titration::{advise, TitrationDecision};
