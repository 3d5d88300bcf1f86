use serde::{Deserialize, Serialize};
use std::fmt;

use super::meal::{Macros, Meal};
use super::meal_slot::MealSlot;

/// A full day of six meals plus the day's totals.
///
/// `total_calories` and `total_macros` always equal the sum over the six
/// slots: every constructor and mutator here recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub breakfast: Meal,
    pub morning_snack: Meal,
    pub lunch: Meal,
    pub afternoon_snack: Meal,
    pub dinner: Meal,
    pub evening_snack: Meal,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub total_macros: Macros,
}

impl DailyPlan {
    pub fn new(
        breakfast: Meal,
        morning_snack: Meal,
        lunch: Meal,
        afternoon_snack: Meal,
        dinner: Meal,
        evening_snack: Meal,
    ) -> Self {
        let mut plan = Self {
            breakfast,
            morning_snack,
            lunch,
            afternoon_snack,
            dinner,
            evening_snack,
            total_calories: 0.0,
            total_macros: Macros::default(),
        };
        plan.recompute_totals();
        plan
    }

    pub fn meal(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::MorningSnack => &self.morning_snack,
            MealSlot::Lunch => &self.lunch,
            MealSlot::AfternoonSnack => &self.afternoon_snack,
            MealSlot::Dinner => &self.dinner,
            MealSlot::EveningSnack => &self.evening_snack,
        }
    }

    fn meal_mut(&mut self, slot: MealSlot) -> &mut Meal {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::MorningSnack => &mut self.morning_snack,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::AfternoonSnack => &mut self.afternoon_snack,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::EveningSnack => &mut self.evening_snack,
        }
    }

    /// Slots paired with their meals, in serving order.
    pub fn meals(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.meal(slot)))
    }

    /// Recomputes the day's totals from the six slots, discarding whatever
    /// totals were there before.
    pub fn recompute_totals(&mut self) {
        self.total_calories = MealSlot::ALL
            .iter()
            .map(|slot| self.meal(*slot).calories)
            .sum();
        self.total_macros = MealSlot::ALL
            .iter()
            .map(|slot| &self.meal(*slot).macros)
            .sum();
    }

    /// Returns a copy of the plan with `slot` replaced and totals recomputed.
    pub fn with_meal(&self, slot: MealSlot, meal: Meal) -> DailyPlan {
        let mut plan = self.clone();
        *plan.meal_mut(slot) = meal;
        plan.recompute_totals();
        plan
    }

    /// Returns a copy of the plan with the image of `slot` set.
    pub fn with_image(&self, slot: MealSlot, image_url: Option<String>) -> DailyPlan {
        let mut plan = self.clone();
        plan.meal_mut(slot).image_url = image_url;
        plan
    }

    /// Recipe names of every slot except `slot`.
    pub fn other_recipe_names(&self, slot: MealSlot) -> Vec<&str> {
        self.meals()
            .filter(|(s, _)| *s != slot)
            .map(|(_, meal)| meal.recipe_name.as_str())
            .collect()
    }

    /// Calories of the slots marked as eaten. Each slot counts once.
    pub fn logged_calories(&self, eaten: &[MealSlot]) -> f64 {
        self.meals()
            .filter(|(slot, _)| eaten.contains(slot))
            .map(|(_, meal)| meal.calories)
            .sum()
    }
}

impl fmt::Display for DailyPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Daily Plan")?;
        writeln!(f, "===============")?;
        for (slot, meal) in self.meals() {
            let image = if meal.has_image() { "" } else { " (image pending)" };
            writeln!(
                f,
                "{:<16} {:<40} {:>5.0} kcal{}",
                slot.label(),
                meal.recipe_name,
                meal.calories,
                image
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {:.0} kcal ({})", self.total_calories, self.total_macros)?;
        Ok(())
    }
}
