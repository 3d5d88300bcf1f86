//! Day-scoped workout calorie accumulator.
//!
//! The stored total belongs to one local calendar day. It is **Fresh** when
//! its date stamp is today and **Stale** otherwise. Every read and every
//! mutation first brings a stale total forward to today with zero calories,
//! then applies the requested change. There is no background job: nothing
//! runs while the application is closed, so the check has to be lazy.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::models::{WorkoutData, WorkoutDetails};
use crate::store::{KeyValueStore, PersistentStore, StorageKey};

/// Source of "today" in the local timezone.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub struct WorkoutAccumulator<C: Clock = SystemClock> {
    store: PersistentStore<WorkoutData>,
    clock: C,
}

impl WorkoutAccumulator<SystemClock> {
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<C: Clock> WorkoutAccumulator<C> {
    pub fn with_clock(backend: Arc<dyn KeyValueStore>, clock: C) -> Self {
        let today = clock.today();
        let store = PersistentStore::open(backend, StorageKey::WorkoutData, || {
            WorkoutData::empty(today)
        });
        Self { store, clock }
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Today's total, rolling a stale one over first.
    pub fn current(&mut self) -> WorkoutData {
        self.roll_over();
        *self.store.get()
    }

    pub fn calories_burned(&mut self) -> f64 {
        self.current().calories_burned
    }

    /// Adds one session to today's total.
    ///
    /// Returns the calories added, or `None` (and changes nothing) when the
    /// details don't yield a positive burn.
    pub fn log_workout(&mut self, details: &WorkoutDetails) -> Option<f64> {
        let burn = details.session_burn()?;
        self.roll_over();

        let total = self.store.update(|data| {
            data.calories_burned += burn;
            data.calories_burned
        });

        info!(burn, total, "workout logged");
        Some(burn)
    }

    /// Clears today's total regardless of its state.
    pub fn reset_workout(&mut self) {
        let today = self.clock.today();
        if !self.roll_over() {
            self.store.set(WorkoutData::empty(today));
        }
        info!(%today, "workouts cleared");
    }

    /// Stale to Fresh. Returns true when a rollover happened.
    fn roll_over(&mut self) -> bool {
        let today = self.clock.today();
        if self.store.get().is_for(today) {
            return false;
        }

        debug!(
            stale = %self.store.get().date,
            %today,
            "discarding workout total from a previous day"
        );
        self.store.set(WorkoutData::empty(today));
        true
    }
}
