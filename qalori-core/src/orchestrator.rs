//! Meal plan orchestration.
//!
//! Turns a profile and its calorie target into a [`DailyPlan`] by asking the
//! AI collaborator for structured JSON, then decorates each meal with an
//! image. Image failures never fail a plan: the slot is simply left without
//! one.

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::ai::{prompts, schema, AiCollaborator, AiError};
use crate::models::{DailyPlan, Meal, MealSlot, UserProfile};

/// Messages shown while a plan is being generated.
pub const LOADING_QUOTES: [&str; 8] = [
    "The first wealth is health.",
    "To keep the body in good health is a duty.",
    "Let food be thy medicine and medicine be thy food.",
    "A healthy outside starts from the inside.",
    "Take care of your body. It's the only place you have to live.",
    "Success is the sum of small efforts, repeated day in and day out.",
    "Cooking up your perfect day...",
    "Gathering the freshest ideas for you...",
];

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Received an invalid format from the AI for the {what}.")]
    InvalidFormat { what: &'static str },

    #[error(transparent)]
    Collaborator(#[from] AiError),
}

/// A point on the plan generation progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub percentage: u8,
    pub message: String,
}

impl Progress {
    pub fn new(percentage: u8, message: impl Into<String>) -> Self {
        Self {
            percentage,
            message: message.into(),
        }
    }
}

pub struct PlanOrchestrator<'a> {
    ai: &'a dyn AiCollaborator,
}

impl<'a> PlanOrchestrator<'a> {
    pub fn new(ai: &'a dyn AiCollaborator) -> Self {
        Self { ai }
    }

    /// Generates a full day and its six images.
    ///
    /// `on_progress` sees non-decreasing percentages from 0 to 100. It is not
    /// called with 100 when generation fails.
    pub async fn request_plan(
        &self,
        profile: &UserProfile,
        tdee: f64,
        on_progress: &mut (dyn FnMut(Progress) + Send),
    ) -> Result<DailyPlan, PlanError> {
        on_progress(Progress::new(0, "Getting ready..."));
        on_progress(Progress::new(10, LOADING_QUOTES[0]));

        let prompt = prompts::plan_prompt(profile, tdee);
        let text = self
            .ai
            .generate_json(&prompt, &schema::daily_plan_schema())
            .await?;

        on_progress(Progress::new(25, LOADING_QUOTES[1]));
        let mut plan: DailyPlan = parse(&text, "meal plan")?;
        for (slot, meal) in plan.meals() {
            check_nutrition(meal, slot, "meal plan")?;
        }
        plan.recompute_totals();

        on_progress(Progress::new(35, LOADING_QUOTES[2]));
        let images = join_all(
            MealSlot::ALL
                .iter()
                .map(|slot| self.meal_image(&plan.meal(*slot).recipe_name)),
        )
        .await;

        on_progress(Progress::new(95, LOADING_QUOTES[3]));
        for (slot, image) in MealSlot::ALL.into_iter().zip(images) {
            plan = plan.with_image(slot, image);
        }

        info!(
            total_calories = plan.total_calories,
            target = tdee,
            "meal plan generated"
        );
        on_progress(Progress::new(100, "Done!"));
        Ok(plan)
    }

    /// Asks for a replacement for `slot`. The returned meal has no image.
    pub async fn request_swap(
        &self,
        profile: &UserProfile,
        tdee: f64,
        slot: MealSlot,
        current: &DailyPlan,
    ) -> Result<Meal, PlanError> {
        let prompt = prompts::swap_prompt(profile, tdee, slot, current);
        let text = self
            .ai
            .generate_json(&prompt, &schema::meal_schema())
            .await?;

        let mut meal: Meal = parse(&text, "meal swap")?;
        check_nutrition(&meal, slot, "meal swap")?;
        meal.image_url = None;
        debug!(%slot, recipe = %meal.recipe_name, "swap suggested");
        Ok(meal)
    }

    /// Image for a recipe, or `None` on any failure.
    pub async fn meal_image(&self, recipe_name: &str) -> Option<String> {
        match self
            .ai
            .generate_image(&prompts::image_prompt(recipe_name))
            .await
        {
            Ok(image) => image,
            Err(e) => {
                warn!(recipe = recipe_name, error = %e, "image generation failed");
                None
            }
        }
    }

    /// Replaces `slot` in two stages.
    ///
    /// The new meal is committed without an image as soon as it arrives, then
    /// committed again once its image is ready. A failed swap commits nothing.
    /// Returns the final plan.
    pub async fn swap_meal(
        &self,
        profile: &UserProfile,
        tdee: f64,
        slot: MealSlot,
        current: &DailyPlan,
        commit: &mut (dyn FnMut(&DailyPlan) + Send),
    ) -> Result<DailyPlan, PlanError> {
        let meal = self.request_swap(profile, tdee, slot, current).await?;
        let recipe = meal.recipe_name.clone();

        let plan = current.with_meal(slot, meal);
        commit(&plan);

        match self.meal_image(&recipe).await {
            Some(image) => {
                let plan = plan.with_image(slot, Some(image));
                commit(&plan);
                Ok(plan)
            }
            None => Ok(plan),
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(text: &str, what: &'static str) -> Result<T, PlanError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        error!(error = %e, response = %text, "failed to parse {} JSON", what);
        PlanError::InvalidFormat { what }
    })
}

fn check_nutrition(meal: &Meal, slot: MealSlot, what: &'static str) -> Result<(), PlanError> {
    if meal.has_valid_nutrition() {
        return Ok(());
    }
    error!(
        %slot,
        recipe = %meal.recipe_name,
        calories = meal.calories,
        "negative nutrition values in {}",
        what
    );
    Err(PlanError::InvalidFormat { what })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;
    use crate::models::{ActivityLevel, Goal, Macros, Sex};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// In-process collaborator returning canned responses.
    struct FakeAi {
        json: Mutex<Vec<Result<String, AiError>>>,
        fail_images_for: Vec<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeAi {
        fn new(responses: Vec<Result<String, AiError>>) -> Self {
            Self {
                json: Mutex::new(responses),
                fail_images_for: Vec::new(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing_images(mut self, recipes: Vec<&'static str>) -> Self {
            self.fail_images_for = recipes;
            self
        }
    }

    #[async_trait]
    impl AiCollaborator for FakeAi {
        async fn generate_json(&self, prompt: &str, _schema: &Value) -> Result<String, AiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.json.lock().unwrap().remove(0)
        }

        async fn generate_image(&self, prompt: &str) -> Result<Option<String>, AiError> {
            if self.fail_images_for.iter().any(|r| prompt.contains(r)) {
                return Err(AiError::EmptyResponse);
            }
            let start = prompt.find('"').unwrap() + 1;
            let end = prompt[start..].find('"').unwrap() + start;
            Ok(Some(format!("data:image/jpeg;base64,{}", &prompt[start..end])))
        }

        async fn chat(&self, _system: &str, _history: &[ChatMessage]) -> Result<String, AiError> {
            unreachable!()
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new(
            30,
            70.0,
            175.0,
            Sex::Male,
            ActivityLevel::ModeratelyActive,
            Goal::MaintainWeight,
            vec!["Non-vegetarian".to_string()],
            "",
        )
        .unwrap()
    }

    fn meal_json(name: &str, calories: f64) -> Value {
        json!({
            "recipeName": name,
            "calories": calories,
            "macros": { "protein": 20.0, "carbs": 30.0, "fat": 10.0 },
            "ingredients": ["thing"],
            "instructions": ["cook it"]
        })
    }

    fn plan_json() -> String {
        json!({
            "breakfast": meal_json("Oatmeal", 400.0),
            "morningSnack": meal_json("Apple", 100.0),
            "lunch": meal_json("Chicken Salad", 600.0),
            "afternoonSnack": meal_json("Yogurt", 150.0),
            "dinner": meal_json("Salmon", 700.0),
            "eveningSnack": meal_json("Almonds", 200.0),
            "totalCalories": 9999.0,
            "totalMacros": { "protein": 1.0, "carbs": 1.0, "fat": 1.0 }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_request_plan_progress_and_images() {
        let ai = FakeAi::new(vec![Ok(format!("  {}\n", plan_json()))]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let mut seen = Vec::new();
        let plan = orchestrator
            .request_plan(&profile(), 2594.31, &mut |p| seen.push(p))
            .await
            .unwrap();

        let percentages: Vec<u8> = seen.iter().map(|p| p.percentage).collect();
        assert_eq!(percentages, vec![0, 10, 25, 35, 95, 100]);
        assert_eq!(seen.last().unwrap().message, "Done!");
        assert_eq!(seen[1].message, LOADING_QUOTES[0]);

        assert_eq!(plan.total_calories, 2150.0);
        assert_eq!(plan.total_macros, Macros::new(120.0, 180.0, 60.0));
        assert_eq!(
            plan.dinner.image_url.as_deref(),
            Some("data:image/jpeg;base64,Salmon")
        );
        assert!(plan.meals().all(|(_, meal)| meal.has_image()));

        let prompts = ai.prompts.lock().unwrap();
        assert!(prompts[0].contains("approximately 2594 calories"));
    }

    #[tokio::test]
    async fn test_request_plan_image_failure_is_not_fatal() {
        let ai = FakeAi::new(vec![Ok(plan_json())]).failing_images(vec!["Salmon", "Apple"]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let plan = orchestrator
            .request_plan(&profile(), 2500.0, &mut |_| {})
            .await
            .unwrap();

        assert!(plan.dinner.image_url.is_none());
        assert!(plan.morning_snack.image_url.is_none());
        assert!(plan.lunch.has_image());
    }

    #[tokio::test]
    async fn test_request_plan_invalid_json() {
        let ai = FakeAi::new(vec![Ok("I'm sorry, here is a plan: ...".to_string())]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let mut seen = Vec::new();
        let err = orchestrator
            .request_plan(&profile(), 2500.0, &mut |p| seen.push(p.percentage))
            .await
            .unwrap_err();

        assert!(matches!(err, PlanError::InvalidFormat { what: "meal plan" }));
        assert_eq!(
            err.to_string(),
            "Received an invalid format from the AI for the meal plan."
        );
        assert!(!seen.contains(&100));
    }

    #[tokio::test]
    async fn test_request_plan_rejects_negative_nutrition() {
        let mut plan: Value = serde_json::from_str(&plan_json()).unwrap();
        plan["lunch"]["macros"]["protein"] = json!(-12.0);
        let ai = FakeAi::new(vec![Ok(plan.to_string())]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let err = orchestrator
            .request_plan(&profile(), 2500.0, &mut |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidFormat { what: "meal plan" }));
    }

    #[tokio::test]
    async fn test_request_plan_collaborator_error() {
        let ai = FakeAi::new(vec![Err(AiError::MissingApiKey)]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let err = orchestrator
            .request_plan(&profile(), 2500.0, &mut |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::Collaborator(AiError::MissingApiKey)));
    }

    async fn initial_plan() -> DailyPlan {
        let ai = FakeAi::new(vec![Ok(plan_json())]);
        PlanOrchestrator::new(&ai)
            .request_plan(&profile(), 2500.0, &mut |_| {})
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_swap_meal_two_stage_commit() {
        let plan = initial_plan().await;
        let mut swapped = meal_json("Steak", 850.0);
        swapped["imageUrl"] = json!("data:image/png;base64,ignored");
        let ai = FakeAi::new(vec![Ok(swapped.to_string())]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let mut commits = Vec::new();
        let result = orchestrator
            .swap_meal(&profile(), 2500.0, MealSlot::Dinner, &plan, &mut |p| {
                commits.push(p.clone())
            })
            .await
            .unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].dinner.recipe_name, "Steak");
        assert!(commits[0].dinner.image_url.is_none());
        assert_eq!(
            commits[1].dinner.image_url.as_deref(),
            Some("data:image/jpeg;base64,Steak")
        );
        assert_eq!(result, commits[1]);
        assert_eq!(result.total_calories, 2150.0 - 700.0 + 850.0);
        assert_eq!(result.breakfast, plan.breakfast);

        let prompts = ai.prompts.lock().unwrap();
        assert!(prompts[0].contains("my dinner: \"Salmon\""));
        assert!(prompts[0].contains("Oatmeal, Apple, Chicken Salad, Yogurt, Almonds"));
    }

    #[tokio::test]
    async fn test_swap_meal_image_failure_keeps_stage_one() {
        let plan = initial_plan().await;
        let ai = FakeAi::new(vec![Ok(meal_json("Tofu Stir Fry", 650.0).to_string())])
            .failing_images(vec!["Tofu Stir Fry"]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let mut commits = 0;
        let result = orchestrator
            .swap_meal(&profile(), 2500.0, MealSlot::Dinner, &plan, &mut |_| {
                commits += 1
            })
            .await
            .unwrap();

        assert_eq!(commits, 1);
        assert_eq!(result.dinner.recipe_name, "Tofu Stir Fry");
        assert!(result.dinner.image_url.is_none());
    }

    #[tokio::test]
    async fn test_swap_meal_invalid_json_commits_nothing() {
        let plan = initial_plan().await;
        let ai = FakeAi::new(vec![Ok("{\"recipeName\": 42}".to_string())]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let mut commits = 0;
        let err = orchestrator
            .swap_meal(&profile(), 2500.0, MealSlot::Lunch, &plan, &mut |_| {
                commits += 1
            })
            .await
            .unwrap_err();

        assert_eq!(commits, 0);
        assert_eq!(
            err.to_string(),
            "Received an invalid format from the AI for the meal swap."
        );
    }

    #[tokio::test]
    async fn test_swap_meal_negative_calories_commits_nothing() {
        let plan = initial_plan().await;
        let ai = FakeAi::new(vec![Ok(meal_json("Anti-Cake", -300.0).to_string())]);
        let orchestrator = PlanOrchestrator::new(&ai);

        let mut commits = 0;
        let err = orchestrator
            .swap_meal(&profile(), 2500.0, MealSlot::Dinner, &plan, &mut |_| {
                commits += 1
            })
            .await
            .unwrap_err();

        assert_eq!(commits, 0);
        assert!(matches!(err, PlanError::InvalidFormat { what: "meal swap" }));
    }

    #[tokio::test]
    async fn test_repeated_swaps_keep_totals_consistent() {
        let mut plan = initial_plan().await;
        let ai = FakeAi::new(vec![
            Ok(meal_json("Pancakes", 500.0).to_string()),
            Ok(meal_json("Eggs", 300.0).to_string()),
            Ok(meal_json("Smoothie", 250.0).to_string()),
        ]);
        let orchestrator = PlanOrchestrator::new(&ai);

        for _ in 0..3 {
            plan = orchestrator
                .swap_meal(&profile(), 2500.0, MealSlot::Breakfast, &plan, &mut |_| {})
                .await
                .unwrap();
        }

        assert_eq!(plan.breakfast.recipe_name, "Smoothie");
        assert_eq!(plan.total_calories, 2150.0 - 400.0 + 250.0);
        let sum: f64 = plan.meals().map(|(_, m)| m.calories).sum();
        assert_eq!(plan.total_calories, sum);
    }
}
