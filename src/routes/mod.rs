//! REST API routes.
//!
//! Handlers convert internal errors into `(StatusCode, &'static str)` pairs;
//! no failure in a handler is fatal to the process.

pub mod accounts;
pub mod checkout;
pub mod engine;
pub mod prescriptions;
pub mod webhook;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use vidaleve_api_shared::{CustomerDetails, HealthRes, HealthService, PurchaseType};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        checkout::create_checkout,
        webhook::payment_webhook,
        prescriptions::issue_prescription,
        prescriptions::send_prescription_email,
        prescriptions::send_prescription_whatsapp,
        engine::recommend_medication,
        engine::advise_titration,
        accounts::register,
        accounts::login,
        accounts::request_password_reset,
        accounts::confirm_password_reset,
        accounts::record_weight,
        accounts::weight_history,
    ),
    components(schemas(
        HealthRes,
        CustomerDetails,
        PurchaseType,
        checkout::CreateCheckoutReq,
        checkout::CreateCheckoutRes,
        webhook::PaymentEvent,
        webhook::EventMetadata,
        webhook::WebhookAck,
        prescriptions::IssuePrescriptionReq,
        prescriptions::PrescriptionRes,
        prescriptions::IssuePrescriptionRes,
        prescriptions::SendEmailReq,
        prescriptions::SendWhatsAppReq,
        prescriptions::DeliveryRes,
        engine::RecommendationReq,
        engine::MedicationRes,
        engine::RecommendationRes,
        engine::TitrationReq,
        engine::TitrationRes,
        accounts::RegisterReq,
        accounts::LoginReq,
        accounts::AccountRes,
        accounts::PlanKind,
        accounts::PasswordResetReq,
        accounts::PasswordResetConfirmReq,
        accounts::AckRes,
        accounts::WeightReq,
        accounts::WeightEntryRes,
    ))
)]
struct ApiDoc;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/checkout", post(checkout::create_checkout))
        .route("/webhook", post(webhook::payment_webhook))
        .route("/prescriptions", post(prescriptions::issue_prescription))
        .route(
            "/prescriptions/send-email",
            post(prescriptions::send_prescription_email),
        )
        .route(
            "/prescriptions/send-whatsapp",
            post(prescriptions::send_prescription_whatsapp),
        )
        .route("/recommendations", post(engine::recommend_medication))
        .route("/titration", post(engine::advise_titration))
        .route("/accounts", post(accounts::register))
        .route("/accounts/login", post(accounts::login))
        .route(
            "/accounts/password-reset",
            post(accounts::request_password_reset),
        )
        .route(
            "/accounts/password-reset/confirm",
            post(accounts::confirm_password_reset),
        )
        .route("/accounts/:id/weight", post(accounts::record_weight))
        .route("/accounts/:id/weight-history", get(accounts::weight_history))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}
