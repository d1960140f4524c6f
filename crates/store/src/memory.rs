//! In-memory repository implementation.
//!
//! Backs the server when no hosted store is wired up, and every test. All
//! state lives behind one mutex; operations are short and never block on I/O.

use crate::repository::{ResetToken, User, UserRepository, WeightEntry};
use crate::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    history: Vec<WeightEntry>,
    tokens: Vec<ResetToken>,
}

/// Mutex-backed store of users, weight history and reset tokens.
#[derive(Default)]
pub struct InMemoryRepository {
    inner: Mutex<Inner>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".into()))
    }
}

impl UserRepository for InMemoryRepository {
    fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.lock()?;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    fn find_user_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let inner = self.lock()?;
        Ok(inner.users.get(&user_id).cloned())
    }

    fn insert_user(&self, user: User) -> StoreResult<()> {
        let mut inner = self.lock()?;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        inner.users.insert(user.id, user);
        Ok(())
    }

    fn update_user_weight(
        &self,
        user_id: Uuid,
        weight_kg: f64,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let user = inner.users.get_mut(&user_id).ok_or(StoreError::UserNotFound)?;
        user.weight_kg = Some(weight_kg);
        user.updated_at = at;
        Ok(())
    }

    fn append_weight_history(&self, entry: WeightEntry) -> StoreResult<()> {
        let mut inner = self.lock()?;
        inner.history.push(entry);
        Ok(())
    }

    fn weight_history(&self, user_id: Uuid) -> StoreResult<Vec<WeightEntry>> {
        let inner = self.lock()?;
        let mut entries: Vec<WeightEntry> = inner
            .history
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.recorded_at);
        Ok(entries)
    }

    fn update_user_password(
        &self,
        user_id: Uuid,
        password_hash: String,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let user = inner.users.get_mut(&user_id).ok_or(StoreError::UserNotFound)?;
        user.password_hash = password_hash;
        user.updated_at = at;
        Ok(())
    }

    fn insert_reset_token(&self, token: ResetToken) -> StoreResult<()> {
        let mut inner = self.lock()?;
        inner.tokens.push(token);
        Ok(())
    }

    fn find_active_reset_token(&self, token: &str) -> StoreResult<Option<ResetToken>> {
        let inner = self.lock()?;
        Ok(inner
            .tokens
            .iter()
            .find(|t| t.token == token && !t.used)
            .cloned())
    }

    fn mark_token_used(&self, token_id: Uuid) -> StoreResult<()> {
        let mut inner = self.lock()?;
        let token = inner
            .tokens
            .iter_mut()
            .find(|t| t.id == token_id)
            .ok_or(StoreError::InvalidToken)?;
        token.used = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::PlanType;

    fn user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: email.into(),
            name: "Test User".into(),
            password_hash: "hash".into(),
            plan_type: PlanType::Basic,
            weight_kg: None,
            height_cm: None,
            target_weight_kg: None,
            current_medication: None,
            current_dosage: None,
            treatment_started_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn insert_rejects_duplicate_email() {
        let repo = InMemoryRepository::new();
        repo.insert_user(user("a@example.com")).expect("first insert");
        let err = repo
            .insert_user(user("a@example.com"))
            .expect_err("duplicate email should be rejected");
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[test]
    fn weight_history_is_scoped_and_ordered() {
        let repo = InMemoryRepository::new();
        let a = user("a@example.com");
        let b = user("b@example.com");
        let a_id = a.id;
        let b_id = b.id;
        repo.insert_user(a).expect("insert a");
        repo.insert_user(b).expect("insert b");

        let base = Utc::now();
        for (user_id, offset_days, weight) in
            [(a_id, 2, 90.0), (b_id, 1, 70.0), (a_id, 0, 92.0)]
        {
            repo.append_weight_history(WeightEntry {
                user_id,
                weight_kg: weight,
                recorded_at: base + chrono::Duration::days(offset_days),
            })
            .expect("append entry");
        }

        let history = repo.weight_history(a_id).expect("history should load");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].weight_kg, 92.0);
        assert_eq!(history[1].weight_kg, 90.0);
    }

    #[test]
    fn used_tokens_are_not_active() {
        let repo = InMemoryRepository::new();
        let token = ResetToken {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token: "tok".into(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
            used: false,
            created_at: Utc::now(),
        };
        let token_id = token.id;
        repo.insert_reset_token(token).expect("insert token");

        assert!(repo
            .find_active_reset_token("tok")
            .expect("lookup should succeed")
            .is_some());

        repo.mark_token_used(token_id).expect("mark used");
        assert!(repo
            .find_active_reset_token("tok")
            .expect("lookup should succeed")
            .is_none());
    }
}
