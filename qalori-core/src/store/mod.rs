//! Local persistence.
//!
//! Every slice of state lives under its own key, stored as one JSON
//! document per key:
//!
//! ```text
//! ~/.local/share/qalori/
//! ├── userProfile.json      # UserProfile, absent until onboarding
//! ├── dailyPlan.json        # DailyPlan, absent until generated
//! ├── hydrationData.json    # HydrationData, default {consumed: 0, goal: 2500}
//! └── workoutData.json      # WorkoutData, default {caloriesBurned: 0, date: today}
//! ```

mod key;
mod memory;
mod persistent;
mod storage;
mod stores;

pub use key::StorageKey;
pub use memory::MemoryStorage;
pub use persistent::PersistentStore;
pub use storage::{FileStorage, KeyValueStore, StorageError};
pub use stores::{clear_all, HydrationStore, PlanStore, ProfileStore};
