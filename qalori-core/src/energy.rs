//! Energy expenditure formulas.
//!
//! Basal metabolic rate uses the Mifflin-St Jeor equation:
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting energy
//! expenditure. *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!
//! Exercise burn uses the MET approximation
//! `kcal/min = MET * weight_kg * 3.5 / 200`.

use serde::Serialize;

use crate::models::{Sex, UserProfile};

/// Basal metabolic rate in kcal/day.
pub fn compute_bmr(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * f64::from(profile.age);
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total daily energy expenditure adjusted for the profile's goal, in kcal/day.
pub fn compute_tdee(profile: &UserProfile) -> f64 {
    let maintenance = compute_bmr(profile) * profile.activity_level.multiplier();
    maintenance + profile.goal.calorie_adjustment()
}

/// Calories burned by one exercise session, rounded to the nearest kcal.
pub fn compute_session_burn(duration_minutes: f64, met: f64, weight_kg: f64) -> f64 {
    ((met * weight_kg * 3.5 / 200.0) * duration_minutes).round()
}

/// Where the day stands against the calorie target once workouts are counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieBalance {
    pub target: f64,
    pub consumed: f64,
    pub burned: f64,
}

impl CalorieBalance {
    pub fn new(target: f64, consumed: f64, burned: f64) -> Self {
        Self {
            target,
            consumed,
            burned,
        }
    }

    /// Target raised by the calories burned in workouts.
    pub fn net_target(&self) -> f64 {
        self.target + self.burned
    }

    pub fn remaining(&self) -> f64 {
        self.net_target() - self.consumed
    }

    pub fn percentage(&self) -> f64 {
        let net = self.net_target();
        if net > 0.0 {
            self.consumed / net * 100.0
        } else {
            0.0
        }
    }

    pub fn goal_reached(&self) -> bool {
        self.remaining() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Goal};

    fn profile(sex: Sex, goal: Goal) -> UserProfile {
        UserProfile::new(
            25,
            70.0,
            175.0,
            sex,
            ActivityLevel::ModeratelyActive,
            goal,
            vec!["Vegan".to_string()],
            "",
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_bmr_male() {
        let bmr = compute_bmr(&profile(Sex::Male, Goal::MaintainWeight));
        assert_eq!(bmr, 1673.75);
    }

    #[test]
    fn test_bmr_female() {
        let bmr = compute_bmr(&profile(Sex::Female, Goal::MaintainWeight));
        assert_eq!(bmr, 1673.75 - 166.0);
    }

    #[test]
    fn test_tdee_goal_adjustments() {
        let maintain = compute_tdee(&profile(Sex::Male, Goal::MaintainWeight));
        let lose = compute_tdee(&profile(Sex::Male, Goal::LoseWeight));
        let gain = compute_tdee(&profile(Sex::Male, Goal::GainWeight));

        assert!(close(maintain, 2594.31), "maintain = {}", maintain);
        assert!(close(lose, 2094.31), "lose = {}", lose);
        assert!(close(gain, 3094.31), "gain = {}", gain);
    }

    #[test]
    fn test_tdee_uses_activity_multiplier() {
        let mut p = profile(Sex::Male, Goal::MaintainWeight);
        p.activity_level = ActivityLevel::Sedentary;
        assert!(close(compute_tdee(&p), 1673.75 * 1.2));

        p.activity_level = ActivityLevel::SuperActive;
        assert!(close(compute_tdee(&p), 1673.75 * 1.9));
    }

    #[test]
    fn test_session_burn() {
        assert_eq!(compute_session_burn(30.0, 9.8, 70.0), 360.0);
        assert_eq!(compute_session_burn(60.0, 3.5, 80.0), 294.0);
        assert_eq!(compute_session_burn(0.0, 9.8, 70.0), 0.0);
    }

    #[test]
    fn test_calorie_balance() {
        let balance = CalorieBalance::new(2000.0, 1100.0, 300.0);
        assert_eq!(balance.net_target(), 2300.0);
        assert_eq!(balance.remaining(), 1200.0);
        assert!(!balance.goal_reached());
        assert!(close(balance.percentage(), 1100.0 / 2300.0 * 100.0));
    }

    #[test]
    fn test_calorie_balance_goal_reached() {
        let balance = CalorieBalance::new(1800.0, 1800.0, 0.0);
        assert_eq!(balance.remaining(), 0.0);
        assert!(balance.goal_reached());

        let zero = CalorieBalance::new(0.0, 100.0, 0.0);
        assert_eq!(zero.percentage(), 0.0);
    }
}
