use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::energy::compute_session_burn;

/// Calories burned by workouts on a single local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutData {
    pub calories_burned: f64,
    /// Local day the total belongs to (YYYY-MM-DD).
    pub date: NaiveDate,
}

impl WorkoutData {
    /// An empty total stamped with `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            calories_burned: 0.0,
            date,
        }
    }

    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

impl fmt::Display for WorkoutData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} kcal burned on {}", self.calories_burned, self.date)
    }
}

/// How a single workout session is described when logging it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    /// Calories entered directly by the user.
    Manual { calories: f64 },
    /// Calories estimated from duration, MET value and body weight.
    Activity {
        duration_minutes: f64,
        met: f64,
        weight_kg: f64,
    },
}

impl WorkoutDetails {
    /// Calories burned by this session, or `None` when the details do not
    /// yield a positive amount.
    pub fn session_burn(&self) -> Option<f64> {
        let burn = match *self {
            WorkoutDetails::Manual { calories } => calories,
            WorkoutDetails::Activity {
                duration_minutes,
                met,
                weight_kg,
            } => {
                if duration_minutes <= 0.0 || met <= 0.0 || weight_kg <= 0.0 {
                    return None;
                }
                compute_session_burn(duration_minutes, met, weight_kg)
            }
        };
        (burn.is_finite() && burn > 0.0).then_some(burn)
    }
}
