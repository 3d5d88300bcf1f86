use serde::{Deserialize, Serialize};
use std::fmt;

/// Default daily water goal in ml.
pub const DEFAULT_WATER_GOAL_ML: u32 = 2500;
/// One glass of water in ml.
pub const GLASS_ML: i32 = 250;
/// One bottle of water in ml.
pub const BOTTLE_ML: i32 = 500;

/// Water consumed today against a daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationData {
    /// ml, never negative
    pub consumed: u32,
    /// ml
    pub goal: u32,
}

impl Default for HydrationData {
    fn default() -> Self {
        Self {
            consumed: 0,
            goal: DEFAULT_WATER_GOAL_ML,
        }
    }
}

impl HydrationData {
    /// Applies a signed delta in ml, flooring the result at zero.
    pub fn add_water(&mut self, amount_ml: i32) {
        let next = i64::from(self.consumed) + i64::from(amount_ml);
        self.consumed = next.clamp(0, i64::from(u32::MAX)) as u32;
    }

    /// Zeroes consumption, keeping the goal.
    pub fn reset(&mut self) {
        self.consumed = 0;
    }

    /// Progress toward the goal; 0 when the goal is 0.
    pub fn percentage(&self) -> f64 {
        if self.goal == 0 {
            0.0
        } else {
            f64::from(self.consumed) / f64::from(self.goal) * 100.0
        }
    }
}

impl fmt::Display for HydrationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ml / {} ml ({:.0}%)",
            self.consumed,
            self.goal,
            self.percentage()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goal() {
        let data = HydrationData::default();
        assert_eq!(data.consumed, 0);
        assert_eq!(data.goal, 2500);
    }

    #[test]
    fn test_add_water() {
        let mut data = HydrationData::default();
        data.add_water(GLASS_ML);
        data.add_water(BOTTLE_ML);
        assert_eq!(data.consumed, 750);
    }

    #[test]
    fn test_add_water_floors_at_zero() {
        let mut data = HydrationData {
            consumed: 100,
            goal: 2500,
        };
        data.add_water(-250);
        assert_eq!(data.consumed, 0);
    }

    #[test]
    fn test_reset_keeps_goal() {
        let mut data = HydrationData {
            consumed: 1200,
            goal: 3000,
        };
        data.reset();
        assert_eq!(data, HydrationData { consumed: 0, goal: 3000 });
    }

    #[test]
    fn test_percentage() {
        let data = HydrationData {
            consumed: 1250,
            goal: 2500,
        };
        assert_eq!(data.percentage(), 50.0);

        let no_goal = HydrationData {
            consumed: 500,
            goal: 0,
        };
        assert_eq!(no_goal.percentage(), 0.0);
    }

    #[test]
    fn test_display() {
        let data = HydrationData {
            consumed: 500,
            goal: 2500,
        };
        assert_eq!(format!("{}", data), "500 ml / 2500 ml (20%)");
    }
}
