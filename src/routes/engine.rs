//! Clinical decision endpoints: initial recommendation and dose titration.

use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vidaleve_core::{advise, classify, CoreError, Medication};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecommendationReq {
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub has_comorbidities: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MedicationRes {
    pub id: String,
    pub commercial_name: String,
    pub active_ingredient: String,
    pub dosages: Vec<String>,
    pub manufacturer: String,
    pub administration: String,
    pub frequency: String,
    pub description: String,
}

impl From<&'static Medication> for MedicationRes {
    fn from(m: &'static Medication) -> Self {
        Self {
            id: m.id.to_owned(),
            commercial_name: m.commercial_name.to_owned(),
            active_ingredient: m.active_ingredient.to_owned(),
            dosages: m.dosages.iter().map(|d| (*d).to_owned()).collect(),
            manufacturer: m.manufacturer.to_owned(),
            administration: m.administration.to_owned(),
            frequency: m.frequency.to_owned(),
            description: m.description.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationRes {
    pub medication: MedicationRes,
    pub dosage: String,
    pub reasoning: String,
    pub bmi: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TitrationReq {
    pub current_medication: String,
    pub current_dosage: String,
    pub weight_loss_kg: f64,
    pub weeks_on_treatment: u32,
    #[serde(default)]
    pub side_effects: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TitrationRes {
    pub should_adjust: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_dosage: Option<String>,
    pub reasoning: String,
}

#[utoipa::path(
    post,
    path = "/recommendations",
    request_body = RecommendationReq,
    responses(
        (status = 200, description = "Recommended medication and starting dosage", body = RecommendationRes),
        (status = 422, description = "Measurements out of range")
    )
)]
/// Recommend a starting medication from the patient's measurements.
pub async fn recommend_medication(
    Json(req): Json<RecommendationReq>,
) -> Result<Json<RecommendationRes>, (StatusCode, String)> {
    match classify(req.weight_kg, req.height_cm, req.has_comorbidities) {
        Ok(rec) => Ok(Json(RecommendationRes {
            medication: rec.medication.into(),
            dosage: rec.dosage.to_owned(),
            reasoning: rec.reasoning.to_owned(),
            bmi: rec.bmi,
        })),
        Err(CoreError::InvalidInput(msg)) => Err((StatusCode::UNPROCESSABLE_ENTITY, msg)),
        Err(e) => {
            tracing::error!(error = %e, "recommendation failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "recommendation failed".to_owned(),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/titration",
    request_body = TitrationReq,
    responses(
        (status = 200, description = "Titration advice", body = TitrationRes)
    )
)]
/// Advise whether the current dosage should be escalated. Unknown
/// medications yield a hold decision rather than an error.
pub async fn advise_titration(Json(req): Json<TitrationReq>) -> Json<TitrationRes> {
    let decision = advise(
        &req.current_medication,
        &req.current_dosage,
        req.weight_loss_kg,
        req.weeks_on_treatment,
        &req.side_effects,
    );
    Json(TitrationRes {
        should_adjust: decision.should_adjust,
        new_dosage: decision.new_dosage.map(str::to_owned),
        reasoning: decision.reasoning.to_owned(),
    })
}
