//! Prescription issuance and delivery endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vidaleve_core::{PatientDetails, Prescription};

use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct IssuePrescriptionReq {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub checkout_id: String,
}

/// An issued prescription document.
#[derive(Debug, Serialize, ToSchema)]
pub struct PrescriptionRes {
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

impl From<Prescription> for PrescriptionRes {
    fn from(p: Prescription) -> Self {
        Self {
            id: p.id,
            patient_name: p.patient_name,
            patient_email: p.patient_email,
            patient_phone: p.patient_phone,
            medication: p.medication,
            dosage: p.dosage,
            instructions: p.instructions,
            issued_at: p.issued_at,
            expires_at: p.expires_at,
            verification_code: p.verification_code,
            clinician_name: p.clinician_name,
            clinician_registration: p.clinician_registration,
            checkout_id: p.checkout_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IssuePrescriptionRes {
    pub success: bool,
    pub prescription: PrescriptionRes,
    /// Public access URL for the document.
    pub url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendEmailReq {
    pub customer_name: String,
    pub customer_email: String,
    pub prescription_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendWhatsAppReq {
    pub customer_name: String,
    pub customer_phone: String,
    pub prescription_url: String,
}

/// Outcome of a delivery attempt. `success: false` with a message means the
/// channel is not configured; hard failures are HTTP errors instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryRes {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/prescriptions",
    request_body = IssuePrescriptionReq,
    responses(
        (status = 200, description = "Prescription issued", body = IssuePrescriptionRes),
        (status = 500, description = "Issuance failed")
    )
)]
/// Issue a prescription document.
///
/// Creates the document identity (id, verification code, validity window) and
/// returns it together with its public access URL. Persistence is owned by
/// the hosted store; the document itself is never mutated after issue.
pub async fn issue_prescription(
    State(state): State<AppState>,
    Json(req): Json<IssuePrescriptionReq>,
) -> Result<Json<IssuePrescriptionRes>, (StatusCode, &'static str)> {
    let patient = PatientDetails {
        name: req.customer_name,
        email: req.customer_email,
        phone: req.customer_phone,
    };

    match state
        .prescriptions
        .issue(patient, req.checkout_id, Utc::now())
    {
        Ok(prescription) => {
            let url = state.core_cfg.prescription_url(&prescription.id);
            Ok(Json(IssuePrescriptionRes {
                success: true,
                prescription: prescription.into(),
                url,
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to issue prescription");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to issue prescription",
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/prescriptions/send-email",
    request_body = SendEmailReq,
    responses(
        (status = 200, description = "Delivery outcome", body = DeliveryRes),
        (status = 502, description = "Email provider rejected the request")
    )
)]
/// Send the prescription access link by email.
pub async fn send_prescription_email(
    State(state): State<AppState>,
    Json(req): Json<SendEmailReq>,
) -> Result<Json<DeliveryRes>, (StatusCode, &'static str)> {
    match state
        .email
        .send_prescription_email(&req.customer_name, &req.customer_email, &req.prescription_url)
        .await
    {
        Ok(message_id) => Ok(Json(DeliveryRes {
            success: true,
            message_id: Some(message_id),
            message: None,
        })),
        Err(e) if e.is_not_configured() => {
            tracing::warn!("email delivery requested but not configured");
            Ok(Json(DeliveryRes {
                success: false,
                message_id: None,
                message: Some("email delivery is not configured".into()),
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to send prescription email");
            Err((StatusCode::BAD_GATEWAY, "failed to send email"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/prescriptions/send-whatsapp",
    request_body = SendWhatsAppReq,
    responses(
        (status = 200, description = "Delivery outcome", body = DeliveryRes),
        (status = 502, description = "Messaging provider rejected the request")
    )
)]
/// Send the prescription access link over WhatsApp.
pub async fn send_prescription_whatsapp(
    State(state): State<AppState>,
    Json(req): Json<SendWhatsAppReq>,
) -> Result<Json<DeliveryRes>, (StatusCode, &'static str)> {
    match state
        .whatsapp
        .send_prescription_message(&req.customer_name, &req.customer_phone, &req.prescription_url)
        .await
    {
        Ok(message_id) => Ok(Json(DeliveryRes {
            success: true,
            message_id: Some(message_id),
            message: None,
        })),
        Err(e) if e.is_not_configured() => {
            tracing::warn!("WhatsApp delivery requested but not configured");
            Ok(Json(DeliveryRes {
                success: false,
                message_id: None,
                message: Some("WhatsApp delivery is not configured".into()),
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to send prescription WhatsApp message");
            Err((StatusCode::BAD_GATEWAY, "failed to send WhatsApp message"))
        }
    }
}
