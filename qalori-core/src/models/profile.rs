use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or parsing a user profile.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Age must be a positive number of years")]
    InvalidAge,

    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("Height must be a positive number of centimeters, got {0}")]
    InvalidHeight(f64),

    #[error("At least one dietary preference is required")]
    MissingDietaryPreferences,

    #[error("Invalid sex '{0}'. Valid options: male, female")]
    UnknownSex(String),

    #[error(
        "Invalid activity level '{0}'. Valid options: sedentary, lightly-active, \
         moderately-active, very-active, super-active"
    )]
    UnknownActivityLevel(String),

    #[error("Invalid goal '{0}'. Valid options: lose-weight, maintain-weight, gain-weight")]
    UnknownGoal(String),
}

/// Dietary preferences offered during onboarding. Free-form values are also accepted.
pub const DIETARY_PREFERENCE_OPTIONS: &[&str] = &[
    "Vegetarian",
    "Vegan",
    "Non-vegetarian",
    "Halal",
    "Kosher",
    "Gluten-Free",
    "Dairy-Free",
    "Low-Carb",
    "Pescatarian",
];

/// Lowercases and strips separators so "Lightly-Active", "lightly_active"
/// and "lightlyActive" all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Sex {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(ProfileError::UnknownSex(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    SuperActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::SuperActive,
    ];

    /// TDEE multiplier applied to the basal metabolic rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::SuperActive => 1.9,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => "Lightly active (exercise 1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately active (exercise 3-5 days/week)",
            ActivityLevel::VeryActive => "Very active (exercise 6-7 days a week)",
            ActivityLevel::SuperActive => "Super active (very hard exercise & physical job)",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for ActivityLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightlyactive" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderatelyactive" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "veryactive" => Ok(ActivityLevel::VeryActive),
            "superactive" => Ok(ActivityLevel::SuperActive),
            _ => Err(ProfileError::UnknownActivityLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    LoseWeight,
    MaintainWeight,
    GainWeight,
}

impl Goal {
    /// Daily calorie adjustment applied on top of maintenance calories.
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::LoseWeight => -500.0,
            Goal::MaintainWeight => 0.0,
            Goal::GainWeight => 500.0,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::LoseWeight => write!(f, "Lose Weight"),
            Goal::MaintainWeight => write!(f, "Maintain Weight"),
            Goal::GainWeight => write!(f, "Gain Weight"),
        }
    }
}

impl FromStr for Goal {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "loseweight" | "lose" => Ok(Goal::LoseWeight),
            "maintainweight" | "maintain" => Ok(Goal::MaintainWeight),
            "gainweight" | "gain" => Ok(Goal::GainWeight),
            _ => Err(ProfileError::UnknownGoal(s.to_string())),
        }
    }
}

/// Biometric and dietary profile collected during onboarding.
///
/// A profile is replaced wholesale, never edited field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub dietary_preferences: Vec<String>,
    /// Comma-separated, advisory only.
    #[serde(default)]
    pub allergies: String,
}

impl UserProfile {
    /// Builds a validated profile.
    ///
    /// Dietary preferences are trimmed and de-duplicated (case-insensitively,
    /// first spelling wins); at least one must remain.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: u32,
        weight: f64,
        height: f64,
        sex: Sex,
        activity_level: ActivityLevel,
        goal: Goal,
        dietary_preferences: Vec<String>,
        allergies: impl Into<String>,
    ) -> Result<Self, ProfileError> {
        let mut preferences: Vec<String> = Vec::new();
        for pref in dietary_preferences {
            let pref = pref.trim();
            if pref.is_empty() {
                continue;
            }
            if !preferences.iter().any(|p| p.eq_ignore_ascii_case(pref)) {
                preferences.push(pref.to_string());
            }
        }

        let profile = Self {
            age,
            weight,
            height,
            sex,
            activity_level,
            goal,
            dietary_preferences: preferences,
            allergies: allergies.into().trim().to_string(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Checks the numeric ranges and the dietary preference requirement.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age == 0 {
            return Err(ProfileError::InvalidAge);
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ProfileError::InvalidWeight(self.weight));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ProfileError::InvalidHeight(self.height));
        }
        if self.dietary_preferences.is_empty() {
            return Err(ProfileError::MissingDietaryPreferences);
        }
        Ok(())
    }

    /// Individual allergy entries from the comma-separated free text.
    pub fn allergy_list(&self) -> Vec<&str> {
        self.allergies
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile")?;
        writeln!(f, "=======")?;
        writeln!(f, "Age: {} years", self.age)?;
        writeln!(f, "Sex: {}", self.sex)?;
        writeln!(f, "Height: {} cm", self.height)?;
        writeln!(f, "Weight: {} kg", self.weight)?;
        writeln!(f, "Activity: {}", self.activity_level)?;
        writeln!(f, "Goal: {}", self.goal)?;
        writeln!(
            f,
            "Dietary preferences: {}",
            self.dietary_preferences.join(", ")
        )?;
        if self.allergies.is_empty() {
            writeln!(f, "Allergies: None")?;
        } else {
            writeln!(f, "Allergies: {}", self.allergies)?;
        }
        Ok(())
    }
}
