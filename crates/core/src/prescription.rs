//! Digital prescription identity generation.
//!
//! Builds the prescription document issued after a confirmed payment: a unique
//! identifier, a keyed verification code and a 30-calendar-day validity
//! window. The verification code lets a pharmacy check authenticity without
//! database access; expiry is advisory display data and is not enforced here.

use crate::config::CoreConfig;
use crate::constants::{
    CLINICIAN_NAME, CLINICIAN_REGISTRATION, PRESCRIPTION_DOSAGE_TEXT, PRESCRIPTION_ID_PREFIX,
    PRESCRIPTION_ID_SUFFIX_BYTES, PRESCRIPTION_INSTRUCTIONS_TEXT, PRESCRIPTION_MEDICATION_TEXT,
    PRESCRIPTION_VALIDITY_DAYS, VERIFICATION_CODE_LEN,
};
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Days, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Identity of the customer a prescription is issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// An issued prescription document.
///
/// Created exactly once per successful payment notification and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: String,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub verification_code: String,
    pub clinician_name: String,
    pub clinician_registration: String,
    pub checkout_id: String,
}

/// Service issuing prescription documents.
#[derive(Clone)]
pub struct PrescriptionService {
    cfg: Arc<CoreConfig>,
}

impl PrescriptionService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Issue a prescription document for a paying customer.
    ///
    /// # Arguments
    ///
    /// * `patient` - Customer identity from the payment notification.
    /// * `checkout_id` - Source transaction identifier.
    /// * `issued_at` - Wall-clock issue time; the identifier, verification
    ///   code and expiry all derive from it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimestamp` when the expiry would overflow
    /// the calendar, and `CoreError::VerificationKey` when the configured
    /// secret cannot key the HMAC.
    pub fn issue(
        &self,
        patient: PatientDetails,
        checkout_id: String,
        issued_at: DateTime<Utc>,
    ) -> CoreResult<Prescription> {
        let id = generate_prescription_id(issued_at);
        let verification_code = verification_code(
            self.cfg.prescription_secret(),
            &id,
            &patient.name,
            issued_at,
        )?;

        let expires_at = issued_at
            .checked_add_days(Days::new(PRESCRIPTION_VALIDITY_DAYS))
            .ok_or(CoreError::InvalidTimestamp)?;

        Ok(Prescription {
            id,
            patient_name: patient.name,
            patient_email: patient.email,
            patient_phone: patient.phone,
            medication: PRESCRIPTION_MEDICATION_TEXT.to_owned(),
            dosage: PRESCRIPTION_DOSAGE_TEXT.to_owned(),
            instructions: PRESCRIPTION_INSTRUCTIONS_TEXT.to_owned(),
            issued_at,
            expires_at,
            verification_code,
            clinician_name: CLINICIAN_NAME.to_owned(),
            clinician_registration: CLINICIAN_REGISTRATION.to_owned(),
            checkout_id,
        })
    }
}

/// Compose a prescription identifier: fixed prefix, millisecond issue
/// timestamp and an uppercase hex random suffix.
fn generate_prescription_id(issued_at: DateTime<Utc>) -> String {
    let mut suffix = [0u8; PRESCRIPTION_ID_SUFFIX_BYTES];
    rand::thread_rng().fill_bytes(&mut suffix);

    format!(
        "{}-{}-{}",
        PRESCRIPTION_ID_PREFIX,
        issued_at.timestamp_millis(),
        hex::encode(suffix).to_uppercase()
    )
}

/// Keyed verification code over the identifier, patient name and issue time.
///
/// HMAC-SHA256, uppercase hex, truncated to a short display length. The
/// truncation is a deliberate usability trade-off: the code is checkable but
/// not a complete cryptographic token.
fn verification_code(
    secret: &str,
    prescription_id: &str,
    patient_name: &str,
    issued_at: DateTime<Utc>,
) -> CoreResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| CoreError::VerificationKey)?;
    mac.update(
        format!(
            "{prescription_id}-{patient_name}-{}",
            issued_at.timestamp_millis()
        )
        .as_bytes(),
    );

    let digest = mac.finalize().into_bytes();
    let mut code = hex::encode(digest).to_uppercase();
    code.truncate(VERIFICATION_CODE_LEN);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn service() -> PrescriptionService {
        let cfg = CoreConfig::new("https://vidaleve.com".into(), "test-secret".into())
            .expect("config should build");
        PrescriptionService::new(Arc::new(cfg))
    }

    fn patient() -> PatientDetails {
        PatientDetails {
            name: "Maria Silva".into(),
            email: "maria@example.com".into(),
            phone: "+5511999990000".into(),
        }
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn identifier_has_prefix_timestamp_and_uppercase_suffix() {
        let prescription = service()
            .issue(patient(), "chk_1".into(), issued_at())
            .expect("issue should succeed");

        let parts: Vec<&str> = prescription.id.splitn(3, '-').collect();
        assert_eq!(parts[0], "RX");
        assert_eq!(parts[1], issued_at().timestamp_millis().to_string());
        assert_eq!(parts[2].len(), PRESCRIPTION_ID_SUFFIX_BYTES * 2);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn identifiers_are_pairwise_unique_in_a_tight_loop() {
        let now = issued_at();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(
                seen.insert(generate_prescription_id(now)),
                "duplicate prescription id generated"
            );
        }
    }

    #[test]
    fn verification_code_is_deterministic() {
        let a = verification_code("secret", "RX-1-ABCD", "Maria Silva", issued_at())
            .expect("code should derive");
        let b = verification_code("secret", "RX-1-ABCD", "Maria Silva", issued_at())
            .expect("code should derive");
        assert_eq!(a, b);
        assert_eq!(a.len(), VERIFICATION_CODE_LEN);
        assert!(a.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn verification_code_changes_with_each_input() {
        let base = verification_code("secret", "RX-1-ABCD", "Maria Silva", issued_at())
            .expect("code should derive");

        let other_id = verification_code("secret", "RX-2-ABCD", "Maria Silva", issued_at())
            .expect("code should derive");
        assert_ne!(base, other_id);

        let other_name = verification_code("secret", "RX-1-ABCD", "Joana Souza", issued_at())
            .expect("code should derive");
        assert_ne!(base, other_name);

        let later = issued_at() + chrono::Duration::milliseconds(1);
        let other_time =
            verification_code("secret", "RX-1-ABCD", "Maria Silva", later).expect("code should derive");
        assert_ne!(base, other_time);

        let other_secret = verification_code("another", "RX-1-ABCD", "Maria Silva", issued_at())
            .expect("code should derive");
        assert_ne!(base, other_secret);
    }

    #[test]
    fn expiry_is_thirty_calendar_days_after_issue() {
        let prescription = service()
            .issue(patient(), "chk_1".into(), issued_at())
            .expect("issue should succeed");
        assert_eq!(
            prescription.expires_at,
            Utc.with_ymd_and_hms(2026, 9, 27, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn expiry_crosses_a_short_month_boundary_correctly() {
        let issued = Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).unwrap();
        let prescription = service()
            .issue(patient(), "chk_1".into(), issued)
            .expect("issue should succeed");
        // February 2026 has 28 days; 30 calendar days later is 3 March.
        assert_eq!(
            prescription.expires_at,
            Utc.with_ymd_and_hms(2026, 3, 3, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn document_carries_the_constant_display_fields() {
        let prescription = service()
            .issue(patient(), "chk_42".into(), issued_at())
            .expect("issue should succeed");
        assert_eq!(prescription.medication, PRESCRIPTION_MEDICATION_TEXT);
        assert_eq!(prescription.dosage, PRESCRIPTION_DOSAGE_TEXT);
        assert_eq!(prescription.instructions, PRESCRIPTION_INSTRUCTIONS_TEXT);
        assert_eq!(prescription.clinician_name, CLINICIAN_NAME);
        assert_eq!(prescription.clinician_registration, CLINICIAN_REGISTRATION);
        assert_eq!(prescription.checkout_id, "chk_42");
    }
}
