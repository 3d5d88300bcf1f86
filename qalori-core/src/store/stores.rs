//! The profile, plan and hydration stores.
//!
//! Each store owns exactly one key. They share a backend but nothing else:
//! clearing one never touches another.

use std::sync::Arc;

use tracing::{error, info};

use super::persistent::PersistentStore;
use super::storage::KeyValueStore;
use super::StorageKey;
use crate::models::{DailyPlan, HydrationData, UserProfile};

/// The user's profile, absent until onboarding completes.
pub struct ProfileStore(PersistentStore<Option<UserProfile>>);

impl ProfileStore {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        Self(PersistentStore::open_optional(backend, StorageKey::UserProfile))
    }

    pub fn get(&self) -> Option<&UserProfile> {
        self.0.get().as_ref()
    }

    /// Replaces the stored profile wholesale.
    pub fn set(&mut self, profile: UserProfile) {
        self.0.set(Some(profile));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Today's meal plan, absent until one has been generated.
pub struct PlanStore(PersistentStore<Option<DailyPlan>>);

impl PlanStore {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        Self(PersistentStore::open_optional(backend, StorageKey::DailyPlan))
    }

    pub fn get(&self) -> Option<&DailyPlan> {
        self.0.get().as_ref()
    }

    pub fn set(&mut self, plan: DailyPlan) {
        self.0.set(Some(plan));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Water intake counter.
pub struct HydrationStore(PersistentStore<HydrationData>);

impl HydrationStore {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        Self(PersistentStore::open(
            backend,
            StorageKey::HydrationData,
            HydrationData::default,
        ))
    }

    pub fn data(&self) -> HydrationData {
        *self.0.get()
    }

    /// Adds a signed amount of water in ml. Consumption never drops below zero.
    pub fn add_water(&mut self, amount_ml: i32) -> HydrationData {
        self.0.update(|data| {
            data.add_water(amount_ml);
            *data
        })
    }

    pub fn reset_hydration(&mut self) -> HydrationData {
        self.0.update(|data| {
            data.reset();
            *data
        })
    }
}

/// Removes every persisted key, one at a time.
///
/// Failures are logged; the remaining keys are still attempted.
pub fn clear_all(backend: &dyn KeyValueStore) {
    for key in StorageKey::ALL {
        match backend.remove(key) {
            Ok(()) => info!(key = %key, "cleared"),
            Err(e) => error!(key = %key, error = %e, "error clearing stored value"),
        }
    }
}
