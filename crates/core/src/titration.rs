//! Dosage titration advice.
//!
//! A deterministic decision table over treatment progress. Rules are evaluated
//! in order; later rules are only reached when the earlier conditions do not
//! hold. An unknown medication is a normal "no adjustment" outcome, never an
//! error.

use crate::constants::{
    ADEQUATE_LOSS_FRACTION, EXPECTED_WEEKLY_LOSS_KG, MAX_TOLERATED_SIDE_EFFECTS,
    MIN_WEEKS_BEFORE_ADJUSTMENT,
};
use crate::medications::find_by_commercial_name;
use serde::Serialize;

/// Outcome of a titration review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitrationDecision {
    pub should_adjust: bool,
    /// Next dosage in the sequence; present only when adjusting.
    pub new_dosage: Option<&'static str>,
    pub reasoning: &'static str,
}

impl TitrationDecision {
    fn hold(reasoning: &'static str) -> Self {
        Self {
            should_adjust: false,
            new_dosage: None,
            reasoning,
        }
    }
}

/// Advise whether to escalate the current dosage.
///
/// # Arguments
///
/// * `current_medication` - Commercial name of the medication in use.
/// * `current_dosage` - Dosage currently taken; may be absent from the
///   medication's sequence, which simply means no next dosage exists.
/// * `weight_loss_kg` - Total loss since starting treatment. Negative values
///   (weight gain) are allowed and count as inadequate loss.
/// * `weeks_on_treatment` - Whole weeks since the first dose.
/// * `side_effects` - Reported side effects, one entry per symptom.
pub fn advise(
    current_medication: &str,
    current_dosage: &str,
    weight_loss_kg: f64,
    weeks_on_treatment: u32,
    side_effects: &[String],
) -> TitrationDecision {
    let Some(medication) = find_by_commercial_name(current_medication) else {
        return TitrationDecision::hold("Medication not found.");
    };

    if weeks_on_treatment < MIN_WEEKS_BEFORE_ADJUSTMENT {
        return TitrationDecision::hold(
            "Wait at least 4 weeks before adjusting the dose to assess the full response.",
        );
    }

    if side_effects.len() > MAX_TOLERATED_SIDE_EFFECTS {
        return TitrationDecision::hold(
            "Maintain the current dose due to side effects. Consider a reduction if symptoms persist.",
        );
    }

    let expected_loss = f64::from(weeks_on_treatment) * EXPECTED_WEEKLY_LOSS_KG;
    let losing_adequately = weight_loss_kg >= expected_loss * ADEQUATE_LOSS_FRACTION;

    if !losing_adequately {
        if let Some(next) = medication.next_dosage(current_dosage) {
            return TitrationDecision {
                should_adjust: true,
                new_dosage: Some(next),
                reasoning:
                    "Weight loss below expectation. Increase the dose gradually per the titration protocol.",
            };
        }
    }

    if losing_adequately {
        return TitrationDecision::hold(
            "Adequate weight loss. Maintain the current dose and continue monitoring.",
        );
    }

    TitrationDecision::hold("Maximum dose reached or no adjustment indicated at this time.")
}
