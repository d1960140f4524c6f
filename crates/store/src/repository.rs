//! Repository trait over the hosted user store.
//!
//! Operations mirror what the account flows need: user lookup and insertion,
//! weight tracking, and password-reset token management. Implementations must
//! be safe to share across request handlers.

use crate::StoreResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription plan chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Basic,
    Premium,
}

/// A registered customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub plan_type: PlanType,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub current_medication: Option<String>,
    pub current_dosage: Option<String>,
    pub treatment_started_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One weight measurement in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
}

/// A single-use password-reset token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

/// Storage operations required by the account flows.
pub trait UserRepository: Send + Sync {
    fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>>;
    fn insert_user(&self, user: User) -> StoreResult<()>;

    /// Update the user's current weight and bump `updated_at`.
    fn update_user_weight(
        &self,
        user_id: Uuid,
        weight_kg: f64,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
    fn append_weight_history(&self, entry: WeightEntry) -> StoreResult<()>;
    /// Full weight history for a user, ordered by `recorded_at` ascending.
    fn weight_history(&self, user_id: Uuid) -> StoreResult<Vec<WeightEntry>>;

    fn update_user_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        at: DateTime<Utc>,
    ) -> StoreResult<()>;
    fn insert_reset_token(&self, token: ResetToken) -> StoreResult<()>;
    /// Find an unused reset token by its token string. Expiry is checked by
    /// the caller against its own clock.
    fn find_active_reset_token(&self, token: &str) -> StoreResult<Option<ResetToken>>;
    fn mark_token_used(&self, token_id: Uuid) -> StoreResult<()>;
}
