//! Payment checkout endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use vidaleve_api_shared::{CustomerDetails, PurchaseType};
use vidaleve_gateways::CheckoutRequest;

use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCheckoutReq {
    /// Amount in cents, BRL.
    pub amount_cents: u64,
    pub product_name: String,
    #[serde(rename = "type")]
    pub purchase: PurchaseType,
    pub customer: CustomerDetails,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateCheckoutRes {
    pub checkout_url: String,
    pub checkout_id: String,
}

#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CreateCheckoutReq,
    responses(
        (status = 200, description = "Checkout session created", body = CreateCheckoutRes),
        (status = 500, description = "Payment checkout not configured"),
        (status = 502, description = "Payment processor rejected the request")
    )
)]
/// Create a hosted checkout session for a plan or prescription purchase.
///
/// The customer is redirected to the returned URL; the payment processor
/// calls `/webhook` once the payment settles.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(req): Json<CreateCheckoutReq>,
) -> Result<Json<CreateCheckoutRes>, (StatusCode, &'static str)> {
    let request = CheckoutRequest {
        amount_cents: req.amount_cents,
        product_name: req.product_name,
        customer: req.customer,
        purchase: req.purchase,
    };

    match state.checkout.create_checkout(&request).await {
        Ok(session) => Ok(Json(CreateCheckoutRes {
            checkout_url: session.checkout_url,
            checkout_id: session.checkout_id,
        })),
        Err(e) if e.is_not_configured() => {
            tracing::warn!("checkout requested but payment gateway is not configured");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "payment checkout is not configured",
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create checkout");
            Err((StatusCode::BAD_GATEWAY, "failed to create checkout"))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::testutil::{post_json, test_state};
    use crate::routes::router;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn unconfigured_gateway_reports_a_server_error() {
        let response = post_json(
            router(test_state()),
            "/checkout",
            json!({
                "amount_cents": 19900,
                "product_name": "Digital prescription",
                "type": "prescription",
                "customer": {
                    "name": "Maria Silva",
                    "email": "maria@example.com",
                    "phone": "11999990000"
                }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn malformed_purchase_type_is_rejected() {
        let response = post_json(
            router(test_state()),
            "/checkout",
            json!({
                "amount_cents": 19900,
                "product_name": "Digital prescription",
                "type": "subscription",
                "customer": {
                    "name": "Maria Silva",
                    "email": "maria@example.com",
                    "phone": "11999990000"
                }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
