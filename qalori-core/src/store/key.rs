//! Storage keys for persisted state.

use std::fmt;

/// Keys under which each slice of state is persisted. No two stores share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    UserProfile,
    DailyPlan,
    HydrationData,
    WorkoutData,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::UserProfile,
        StorageKey::DailyPlan,
        StorageKey::HydrationData,
        StorageKey::WorkoutData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::UserProfile => "userProfile",
            StorageKey::DailyPlan => "dailyPlan",
            StorageKey::HydrationData => "hydrationData",
            StorageKey::WorkoutData => "workoutData",
        }
    }

    /// Returns the filename for this key.
    pub fn filename(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_filename() {
        assert_eq!(StorageKey::UserProfile.filename(), "userProfile.json");
        assert_eq!(StorageKey::DailyPlan.filename(), "dailyPlan.json");
        assert_eq!(StorageKey::HydrationData.filename(), "hydrationData.json");
        assert_eq!(StorageKey::WorkoutData.filename(), "workoutData.json");
    }
}
