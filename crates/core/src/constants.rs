//! Constants used throughout the VidaLeve core crate.
//!
//! This module gathers prescription display text and identity parameters so
//! the values stay consistent across the codebase.

/// Prefix for every prescription document identifier.
pub const PRESCRIPTION_ID_PREFIX: &str = "RX";

/// Number of random bytes appended to a prescription identifier.
pub const PRESCRIPTION_ID_SUFFIX_BYTES: usize = 4;

/// Length of the human-readable verification code, in hex characters.
///
/// The code is an HMAC-SHA256 digest truncated for display. Truncation makes
/// it checkable but not a full cryptographic token.
pub const VERIFICATION_CODE_LEN: usize = 16;

/// Calendar days a prescription remains valid after issue. Advisory only.
pub const PRESCRIPTION_VALIDITY_DAYS: u64 = 30;

/// Medication display text printed on every prescription document.
pub const PRESCRIPTION_MEDICATION_TEXT: &str = "GLP-1 analogue (semaglutide or liraglutide)";

/// Dosage display text printed on every prescription document.
pub const PRESCRIPTION_DOSAGE_TEXT: &str = "As directed by the prescribing clinician";

/// Usage instructions printed on every prescription document.
pub const PRESCRIPTION_INSTRUCTIONS_TEXT: &str = "Administer as prescribed. Keep refrigerated.";

/// Display name of the issuing clinician.
pub const CLINICIAN_NAME: &str = "Dr. VidaLeve";

/// Professional registration of the issuing clinician.
pub const CLINICIAN_REGISTRATION: &str = "CRM 123456/SP";

/// Expected weekly weight loss on treatment, in kilograms.
pub const EXPECTED_WEEKLY_LOSS_KG: f64 = 0.75;

/// Fraction of the expected loss that still counts as an adequate response.
pub const ADEQUATE_LOSS_FRACTION: f64 = 0.7;

/// Minimum weeks on treatment before any dose adjustment.
pub const MIN_WEEKS_BEFORE_ADJUSTMENT: u32 = 4;

/// More reported side effects than this holds the dose for review.
pub const MAX_TOLERATED_SIDE_EFFECTS: usize = 2;
