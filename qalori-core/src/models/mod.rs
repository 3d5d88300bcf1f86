mod daily_plan;
mod exercise;
mod hydration;
mod meal;
mod meal_slot;
mod profile;
mod workout;

pub use daily_plan::DailyPlan;
pub use exercise::{Exercise, EXERCISES};
pub use hydration::{HydrationData, BOTTLE_ML, DEFAULT_WATER_GOAL_ML, GLASS_ML};
pub use meal::{Macros, Meal};
pub use meal_slot::MealSlot;
pub use profile::{
    ActivityLevel, Goal, ProfileError, Sex, UserProfile, DIETARY_PREFERENCE_OPTIONS,
};
pub use workout::{WorkoutData, WorkoutDetails};
