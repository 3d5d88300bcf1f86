use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Macronutrients in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

impl<'a> Sum<&'a Macros> for Macros {
    fn sum<I: Iterator<Item = &'a Macros>>(iter: I) -> Self {
        iter.fold(Macros::default(), |acc, m| acc + *m)
    }
}

impl fmt::Display for Macros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P {:.0}g / C {:.0}g / F {:.0}g",
            self.protein, self.carbs, self.fat
        )
    }
}

/// A single recipe in a daily plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub recipe_name: String,
    pub calories: f64,
    pub macros: Macros,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Filled in once image generation completes; a meal without one is valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Meal {
    pub fn new(recipe_name: impl Into<String>, calories: f64, macros: Macros) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            calories,
            macros,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            image_url: None,
        }
    }

    /// Calories and every macro are finite and non-negative.
    pub fn has_valid_nutrition(&self) -> bool {
        [
            self.calories,
            self.macros.protein,
            self.macros.carbs,
            self.macros.fat,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }

    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.recipe_name)?;
        writeln!(f, "{}", "=".repeat(self.recipe_name.len()))?;
        writeln!(f, "Calories: {:.0} kcal", self.calories)?;
        writeln!(f, "Macros: {}", self.macros)?;

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
            }
        }

        if !self.instructions.is_empty() {
            writeln!(f, "\nInstructions:")?;
            for (i, step) in self.instructions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, step)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_sum() {
        let all = [
            Macros::new(10.0, 20.0, 5.0),
            Macros::new(1.5, 2.5, 0.5),
            Macros::default(),
        ];
        let total: Macros = all.iter().sum();
        assert_eq!(total, Macros::new(11.5, 22.5, 5.5));
    }

    #[test]
    fn test_meal_new() {
        let meal = Meal::new("Oatmeal", 350.0, Macros::new(12.0, 55.0, 8.0));
        assert_eq!(meal.recipe_name, "Oatmeal");
        assert!(meal.ingredients.is_empty());
        assert!(!meal.has_image());
    }

    #[test]
    fn test_meal_valid_nutrition() {
        assert!(Meal::new("Water", 0.0, Macros::default()).has_valid_nutrition());

        let negative = Meal::new("Mystery", -50.0, Macros::new(1.0, 1.0, 1.0));
        assert!(!negative.has_valid_nutrition());

        let negative_fat = Meal::new("Mystery", 50.0, Macros::new(1.0, 1.0, -0.5));
        assert!(!negative_fat.has_valid_nutrition());
    }

    #[test]
    fn test_meal_empty_image_is_not_an_image() {
        let mut meal = Meal::new("Toast", 200.0, Macros::default());
        meal.image_url = Some(String::new());
        assert!(!meal.has_image());
    }

    #[test]
    fn test_meal_display() {
        let mut meal = Meal::new("Lentil Soup", 420.0, Macros::new(22.0, 60.0, 9.0));
        meal.ingredients = vec!["1 cup lentils".to_string()];
        meal.instructions = vec!["Rinse lentils".to_string(), "Simmer".to_string()];

        let output = format!("{}", meal);
        assert!(output.contains("Lentil Soup"));
        assert!(output.contains("420 kcal"));
        assert!(output.contains("  - 1 cup lentils"));
        assert!(output.contains("  2. Simmer"));
    }

    #[test]
    fn test_meal_parses_collaborator_json_without_image() {
        let json = r#"{
            "recipeName": "Greek Yogurt Parfait",
            "calories": 250,
            "macros": {"protein": 15, "carbs": 30, "fat": 6},
            "ingredients": ["yogurt", "berries"],
            "instructions": ["Layer everything"]
        }"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.recipe_name, "Greek Yogurt Parfait");
        assert_eq!(meal.calories, 250.0);
        assert!(meal.image_url.is_none());

        let out = serde_json::to_value(&meal).unwrap();
        assert!(out.get("imageUrl").is_none());
    }
}
