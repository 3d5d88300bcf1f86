//! Qalori Core Library
//!
//! Models, calorie math, persistence and AI orchestration for the Qalori
//! nutrition planner.

pub mod accumulator;
pub mod ai;
pub mod chat;
pub mod energy;
pub mod models;
pub mod orchestrator;
pub mod store;

pub use accumulator::{Clock, FixedClock, SystemClock, WorkoutAccumulator};
pub use ai::{AiCollaborator, AiError, ChatMessage, ChatRole, GeminiClient};
pub use chat::{ChatSession, CHAT_ERROR_REPLY};
pub use energy::{compute_bmr, compute_session_burn, compute_tdee, CalorieBalance};
pub use models::{
    ActivityLevel, DailyPlan, Exercise, Goal, HydrationData, Macros, Meal, MealSlot, ProfileError,
    Sex, UserProfile, WorkoutData, WorkoutDetails,
};
pub use orchestrator::{PlanError, PlanOrchestrator, Progress, LOADING_QUOTES};
pub use store::{
    clear_all, FileStorage, HydrationStore, KeyValueStore, MemoryStorage, PersistentStore,
    PlanStore, ProfileStore, StorageError, StorageKey,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
