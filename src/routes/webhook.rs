//! Payment notification endpoint.
//!
//! On a confirmed prescription purchase this fans out to three independent
//! effects: issue the document, send the email, send the WhatsApp message.
//! The effects have no ordering dependency and a failure in one never blocks
//! or rolls back another; failures are logged and the webhook still
//! acknowledges the notification. Delivery durability is explicitly not
//! guaranteed — there is no queued retry.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vidaleve_api_shared::{CustomerDetails, PurchaseType};
use vidaleve_core::PatientDetails;
use vidaleve_gateways::GatewayError;

use crate::state::AppState;

const SIGNATURE_HEADER: &str = "x-kirvano-signature";

/// Payment processor notification payload.
///
/// Fields are optional because the payload shape is owned by the processor;
/// anything missing simply means the event is not actionable here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub metadata: Option<EventMetadata>,
    #[serde(default)]
    pub customer: Option<CustomerDetails>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EventMetadata {
    /// Purchase tag set when the checkout was created: "plan" or
    /// "prescription". Unknown tags are ignored.
    #[serde(rename = "type", default)]
    pub purchase_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}

#[utoipa::path(
    post,
    path = "/webhook",
    request_body = PaymentEvent,
    responses(
        (status = 200, description = "Notification acknowledged", body = WebhookAck),
        (status = 401, description = "Missing webhook signature")
    )
)]
/// Handle a payment notification from the checkout processor.
///
/// Confirmed prescription purchases trigger document issuance and customer
/// notification; everything else is acknowledged without side effects.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<PaymentEvent>,
) -> Result<Json<WebhookAck>, (StatusCode, &'static str)> {
    if !headers.contains_key(SIGNATURE_HEADER) {
        return Err((StatusCode::UNAUTHORIZED, "missing webhook signature"));
    }

    let completed = event.event.as_deref() == Some("checkout.completed")
        || event.status.as_deref() == Some("paid");

    if completed && is_prescription_purchase(&event) {
        match (event.customer, event.id) {
            (Some(customer), Some(checkout_id)) => {
                deliver_prescription(&state, customer, checkout_id).await;
            }
            _ => {
                tracing::warn!("prescription payment event without customer or transaction id");
            }
        }
    }

    Ok(Json(WebhookAck { received: true }))
}

fn is_prescription_purchase(event: &PaymentEvent) -> bool {
    event
        .metadata
        .as_ref()
        .and_then(|m| m.purchase_type.as_deref())
        .and_then(PurchaseType::from_tag)
        == Some(PurchaseType::Prescription)
}

/// Issue the document and notify the customer over email and WhatsApp.
///
/// The two sends run concurrently and independently; each failure is logged
/// on its own and never affects the other.
async fn deliver_prescription(state: &AppState, customer: CustomerDetails, checkout_id: String) {
    let patient = PatientDetails {
        name: customer.name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
    };

    let prescription = match state.prescriptions.issue(patient, checkout_id, Utc::now()) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "failed to issue prescription after payment");
            return;
        }
    };

    let url = state.core_cfg.prescription_url(&prescription.id);
    tracing::info!(prescription_id = %prescription.id, "prescription issued after payment");

    let (email_result, whatsapp_result) = tokio::join!(
        state
            .email
            .send_prescription_email(&customer.name, &customer.email, &url),
        state
            .whatsapp
            .send_prescription_message(&customer.name, &customer.phone, &url),
    );

    log_delivery("email", email_result);
    log_delivery("whatsapp", whatsapp_result);
}

fn log_delivery(channel: &str, result: Result<String, GatewayError>) {
    match result {
        Ok(message_id) => {
            tracing::info!(channel, message_id = %message_id, "prescription link delivered");
        }
        Err(e) if e.is_not_configured() => {
            tracing::warn!(channel, "delivery skipped: {e}");
        }
        Err(e) => {
            tracing::error!(channel, error = %e, "prescription link delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::router;
    use crate::routes::testutil::{body_json, test_state};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn prescription_event() -> serde_json::Value {
        json!({
            "id": "chk_123",
            "event": "checkout.completed",
            "metadata": { "type": "prescription", "source": "vidaleve" },
            "customer": {
                "name": "Maria Silva",
                "email": "maria@example.com",
                "phone": "11999990000"
            }
        })
    }

    async fn post_webhook(
        signed: bool,
        body: serde_json::Value,
    ) -> axum::http::Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header(header::CONTENT_TYPE, "application/json");
        if signed {
            builder = builder.header("x-kirvano-signature", "sig");
        }
        router(test_state())
            .oneshot(
                builder
                    .body(Body::from(body.to_string()))
                    .expect("request should build"),
            )
            .await
            .expect("router should answer")
    }

    #[tokio::test]
    async fn missing_signature_is_unauthorized() {
        let response = post_webhook(false, prescription_event()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn prescription_purchase_is_acknowledged_even_unconfigured() {
        // Gateways in the test state are unconfigured: issuance succeeds,
        // both sends fail, and the webhook must still acknowledge.
        let response = post_webhook(true, prescription_event()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["received"], true);
    }

    #[tokio::test]
    async fn plan_purchase_is_acknowledged_without_side_effects() {
        let response = post_webhook(
            true,
            json!({
                "id": "chk_456",
                "status": "paid",
                "metadata": { "type": "plan" },
                "customer": {
                    "name": "Maria Silva",
                    "email": "maria@example.com",
                    "phone": "11999990000"
                }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["received"], true);
    }

    #[tokio::test]
    async fn unrelated_events_are_acknowledged() {
        let response = post_webhook(true, json!({ "event": "checkout.created" })).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn prescription_event_without_customer_is_acknowledged() {
        let response = post_webhook(
            true,
            json!({
                "event": "checkout.completed",
                "metadata": { "type": "prescription" }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
