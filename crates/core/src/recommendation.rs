//! BMI-based medication recommendation.
//!
//! A pure decision table over body-mass-index and the comorbidity flag. The
//! range conditions overlap, so evaluation order is the tie-break rule: the
//! first matching branch wins and higher-severity branches come first.

use crate::medications::{find_by_id, Medication};
use crate::{CoreError, CoreResult};
use serde::Serialize;

/// Outcome of a BMI classification.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub medication: &'static Medication,
    /// Chosen starting dosage; always a member of the medication's sequence.
    pub dosage: &'static str,
    pub reasoning: &'static str,
    /// Computed body-mass-index, kg/m².
    pub bmi: f64,
}

/// Recommend a medication and starting dosage from weight, height and
/// comorbidity status.
///
/// # Arguments
///
/// * `weight_kg` - Body weight in kilograms.
/// * `height_cm` - Height in centimetres.
/// * `has_comorbidities` - Whether a co-occurring condition was reported.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` for non-finite or non-positive weight or
/// height. The permissive NaN fallthrough of earlier designs is deliberately
/// rejected here.
pub fn classify(
    weight_kg: f64,
    height_cm: f64,
    has_comorbidities: bool,
) -> CoreResult<Recommendation> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "weight must be a positive number of kilograms, got {weight_kg}"
        )));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "height must be a positive number of centimetres, got {height_cm}"
        )));
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);

    let (medication_id, dosage, reasoning) = if bmi >= 40.0 || (bmi >= 35.0 && has_comorbidities) {
        (
            "mounjaro",
            "5mg",
            "Indicated for severely elevated BMI. Start at an intermediate dose and titrate by tolerance and response.",
        )
    } else if bmi >= 30.0 {
        (
            "ozempic",
            "0.5mg",
            "Indicated for weight control with an established safety profile. Start at a low dose.",
        )
    } else if bmi >= 27.0 && has_comorbidities {
        (
            "wegovy",
            "0.5mg",
            "Indicated for overweight with risk factors. Gradual titration recommended.",
        )
    } else {
        (
            "saxenda",
            "1.2mg",
            "Daily-administration option for gradual weight control.",
        )
    };

    // The catalogue is static, so a missing branch medication is a programming
    // error, not a runtime condition.
    let medication = find_by_id(medication_id).ok_or_else(|| {
        CoreError::InvalidInput(format!("medication {medication_id} missing from catalogue"))
    })?;

    Ok(Recommendation {
        medication,
        dosage,
        reasoning,
        bmi,
    })
}
