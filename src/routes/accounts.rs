//! Customer account endpoints: registration, login, password reset and
//! weight tracking.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use vidaleve_store::{PlanType, StoreError, User, WeightEntry};

use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterReq {
    pub email: String,
    pub password: String,
    pub name: String,
    pub plan_type: PlanKind,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

/// Subscription tier chosen at registration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    Basic,
    Premium,
}

impl From<PlanKind> for PlanType {
    fn from(kind: PlanKind) -> Self {
        match kind {
            PlanKind::Basic => PlanType::Basic,
            PlanKind::Premium => PlanType::Premium,
        }
    }
}

impl From<PlanType> for PlanKind {
    fn from(plan: PlanType) -> Self {
        match plan {
            PlanType::Basic => PlanKind::Basic,
            PlanType::Premium => PlanKind::Premium,
        }
    }
}

/// Account details returned to the customer. Never carries the password
/// hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountRes {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub plan_type: PlanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_medication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_dosage: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AccountRes {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            plan_type: user.plan_type.into(),
            weight_kg: user.weight_kg,
            height_cm: user.height_cm,
            target_weight_kg: user.target_weight_kg,
            current_medication: user.current_medication,
            current_dosage: user.current_dosage,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetReq {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetConfirmReq {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AckRes {
    pub success: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WeightReq {
    pub weight_kg: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeightEntryRes {
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
}

impl From<WeightEntry> for WeightEntryRes {
    fn from(entry: WeightEntry) -> Self {
        Self {
            weight_kg: entry.weight_kg,
            recorded_at: entry.recorded_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/accounts",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Account created", body = AccountRes),
        (status = 409, description = "Email already registered")
    )
)]
/// Register a new customer account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<AccountRes>), (StatusCode, &'static str)> {
    match state.accounts.register(
        &req.email,
        &req.password,
        &req.name,
        req.plan_type.into(),
        Utc::now(),
    ) {
        Ok(user) => Ok((StatusCode::CREATED, Json(user.into()))),
        Err(StoreError::DuplicateEmail) => {
            Err((StatusCode::CONFLICT, "email is already registered"))
        }
        Err(e) => {
            tracing::error!(error = %e, "registration failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "registration failed"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/accounts/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Credentials accepted", body = AccountRes),
        (status = 401, description = "Invalid email or password")
    )
)]
/// Verify credentials. Unknown email and wrong password are reported
/// identically.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<AccountRes>, (StatusCode, &'static str)> {
    match state.accounts.login(&req.email, &req.password) {
        Ok(user) => Ok(Json(user.into())),
        Err(StoreError::InvalidCredentials) => {
            Err((StatusCode::UNAUTHORIZED, "invalid email or password"))
        }
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "login failed"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/accounts/password-reset",
    request_body = PasswordResetReq,
    responses(
        (status = 200, description = "Reset requested", body = AckRes)
    )
)]
/// Start a password reset. Always reports success so the endpoint cannot
/// be used to probe which emails are registered.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetReq>,
) -> Result<Json<AckRes>, (StatusCode, &'static str)> {
    match state.accounts.request_password_reset(&req.email, Utc::now()) {
        Ok(Some(token)) => {
            // TODO: deliver the reset link through the email gateway once a
            // reset-email template exists.
            tracing::debug!(email = %req.email, token = %token, "password reset token issued");
            Ok(Json(AckRes { success: true }))
        }
        Ok(None) => Ok(Json(AckRes { success: true })),
        Err(e) => {
            tracing::error!(error = %e, "password reset request failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "password reset request failed",
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/accounts/password-reset/confirm",
    request_body = PasswordResetConfirmReq,
    responses(
        (status = 200, description = "Password updated", body = AckRes),
        (status = 400, description = "Token unknown, used or expired")
    )
)]
/// Complete a password reset with a previously issued token.
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetConfirmReq>,
) -> Result<Json<AckRes>, (StatusCode, &'static str)> {
    match state
        .accounts
        .reset_password(&req.token, &req.new_password, Utc::now())
    {
        Ok(()) => Ok(Json(AckRes { success: true })),
        Err(StoreError::InvalidToken) => {
            Err((StatusCode::BAD_REQUEST, "reset token is invalid or expired"))
        }
        Err(e) => {
            tracing::error!(error = %e, "password reset failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "password reset failed"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/accounts/{id}/weight",
    request_body = WeightReq,
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Measurement recorded", body = AckRes),
        (status = 404, description = "Account not found")
    )
)]
/// Record a weight measurement for the account.
pub async fn record_weight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<WeightReq>,
) -> Result<Json<AckRes>, (StatusCode, &'static str)> {
    match state.accounts.record_weight(id, req.weight_kg, Utc::now()) {
        Ok(()) => Ok(Json(AckRes { success: true })),
        Err(StoreError::UserNotFound) => Err((StatusCode::NOT_FOUND, "account not found")),
        Err(e) => {
            tracing::error!(error = %e, "failed to record weight");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "failed to record weight"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/accounts/{id}/weight-history",
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Measurements in recording order", body = [WeightEntryRes])
    )
)]
/// List the account's weight measurements, oldest first.
pub async fn weight_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<WeightEntryRes>>, (StatusCode, &'static str)> {
    match state.accounts.weight_history(id) {
        Ok(entries) => Ok(Json(entries.into_iter().map(Into::into).collect())),
        Err(e) => {
            tracing::error!(error = %e, "failed to load weight history");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to load weight history",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::routes::router;
    use crate::routes::testutil::{body_json, get_path, post_json, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn register_creates_an_account_without_leaking_the_hash() {
        let response = post_json(
            router(test_state()),
            "/accounts",
            json!({
                "email": "maria@example.com",
                "password": "s3cret",
                "name": "Maria Silva",
                "plan_type": "premium"
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["email"], "maria@example.com");
        assert_eq!(body["plan_type"], "premium");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let state = test_state();
        let payload = json!({
            "email": "maria@example.com",
            "password": "pw",
            "name": "Maria",
            "plan_type": "basic"
        });
        let first = post_json(router(state.clone()), "/accounts", payload.clone()).await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = post_json(router(state), "/accounts", payload).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_round_trip() {
        let state = test_state();
        post_json(
            router(state.clone()),
            "/accounts",
            json!({
                "email": "maria@example.com",
                "password": "s3cret",
                "name": "Maria",
                "plan_type": "basic"
            }),
        )
        .await;

        let ok = post_json(
            router(state.clone()),
            "/accounts/login",
            json!({ "email": "maria@example.com", "password": "s3cret" }),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);

        let bad = post_json(
            router(state),
            "/accounts/login",
            json!({ "email": "maria@example.com", "password": "wrong" }),
        )
        .await;
        assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reset_request_never_reveals_registration_status() {
        let response = post_json(
            router(test_state()),
            "/accounts/password-reset",
            json!({ "email": "nobody@example.com" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn bogus_reset_token_is_a_bad_request() {
        let response = post_json(
            router(test_state()),
            "/accounts/password-reset/confirm",
            json!({ "token": "not-a-token", "new_password": "pw" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn weight_tracking_round_trip() {
        let state = test_state();
        let created = post_json(
            router(state.clone()),
            "/accounts",
            json!({
                "email": "maria@example.com",
                "password": "pw",
                "name": "Maria",
                "plan_type": "basic"
            }),
        )
        .await;
        let id = body_json(created).await["id"]
            .as_str()
            .expect("id should be a string")
            .to_owned();

        let recorded = post_json(
            router(state.clone()),
            &format!("/accounts/{id}/weight"),
            json!({ "weight_kg": 88.5 }),
        )
        .await;
        assert_eq!(recorded.status(), StatusCode::OK);

        let history = get_path(router(state), &format!("/accounts/{id}/weight-history")).await;
        assert_eq!(history.status(), StatusCode::OK);
        let body = body_json(history).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["weight_kg"], 88.5);
    }

    #[tokio::test]
    async fn weight_for_an_unknown_account_is_not_found() {
        let response = post_json(
            router(test_state()),
            "/accounts/00000000-0000-0000-0000-000000000000/weight",
            json!({ "weight_kg": 88.5 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
