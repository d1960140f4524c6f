//! Account flows over the user repository.
//!
//! Registration, login, password reset and weight tracking. Every outcome the
//! customer can cause (duplicate email, wrong password, expired token) is a
//! typed `StoreError`, never a panic.

use crate::password::{hash_password, verify_password};
use crate::repository::{PlanType, ResetToken, User, UserRepository, WeightEntry};
use crate::{StoreError, StoreResult};
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Hours a password-reset token stays valid.
const RESET_TOKEN_VALIDITY_HOURS: i64 = 1;

/// Characters in a password-reset token.
const RESET_TOKEN_LEN: usize = 32;

/// Service handling customer account operations.
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// `StoreError::DuplicateEmail` when the email is already registered;
    /// `StoreError::InvalidCredentials` never — that is a login-only outcome.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        plan_type: PlanType,
        now: DateTime<Utc>,
    ) -> StoreResult<User> {
        if self.repo.find_user_by_email(email)?.is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            name: name.to_owned(),
            password_hash: hash_password(password),
            plan_type,
            weight_kg: None,
            height_cm: None,
            target_weight_kg: None,
            current_medication: None,
            current_dosage: None,
            treatment_started_at: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.insert_user(user.clone())?;
        Ok(user)
    }

    /// Verify credentials and return the matching user.
    ///
    /// Unknown email and wrong password produce the same
    /// `StoreError::InvalidCredentials`, so the response does not reveal
    /// which one failed.
    pub fn login(&self, email: &str, password: &str) -> StoreResult<User> {
        let Some(user) = self.repo.find_user_by_email(email)? else {
            return Err(StoreError::InvalidCredentials);
        };

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    /// Start a password reset.
    ///
    /// Returns the generated token for delivery to the customer, or `None`
    /// when the email is unknown — reported as success upstream so the
    /// endpoint does not reveal whether an email is registered.
    pub fn request_password_reset(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<String>> {
        let Some(user) = self.repo.find_user_by_email(email)? else {
            return Ok(None);
        };

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RESET_TOKEN_LEN)
            .map(char::from)
            .collect();

        self.repo.insert_reset_token(ResetToken {
            id: Uuid::new_v4(),
            user_id: user.id,
            token: token.clone(),
            expires_at: now + Duration::hours(RESET_TOKEN_VALIDITY_HOURS),
            used: false,
            created_at: now,
        })?;

        Ok(Some(token))
    }

    /// Complete a password reset.
    ///
    /// The token must exist, be unused and unexpired. The token is marked
    /// used only after the new hash is stored.
    pub fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let Some(reset) = self.repo.find_active_reset_token(token)? else {
            return Err(StoreError::InvalidToken);
        };

        if reset.expires_at < now {
            return Err(StoreError::InvalidToken);
        }

        self.repo
            .update_user_password(reset.user_id, hash_password(new_password), now)?;
        self.repo.mark_token_used(reset.id)?;
        Ok(())
    }

    /// Record a new weight measurement: updates the user record and appends
    /// to the history.
    pub fn record_weight(
        &self,
        user_id: Uuid,
        weight_kg: f64,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.repo.update_user_weight(user_id, weight_kg, now)?;
        self.repo.append_weight_history(WeightEntry {
            user_id,
            weight_kg,
            recorded_at: now,
        })
    }

    pub fn weight_history(&self, user_id: Uuid) -> StoreResult<Vec<WeightEntry>> {
        self.repo.weight_history(user_id)
    }

    pub fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        self.repo.find_user_by_id(user_id)
    }
}
