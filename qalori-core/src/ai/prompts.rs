//! Prompt text sent to the AI collaborator.

use crate::models::{DailyPlan, MealSlot, UserProfile};

/// System instruction for the nutrition chat assistant.
pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a friendly and helpful nutrition and fitness \
assistant for the Qalori app. Provide encouraging and accurate information. Keep answers concise \
and easy to understand. Use emojis to make the conversation more engaging.";

fn preferences(profile: &UserProfile) -> String {
    if profile.dietary_preferences.is_empty() {
        "None".to_string()
    } else {
        profile.dietary_preferences.join(", ")
    }
}

fn allergies(profile: &UserProfile) -> String {
    let list = profile.allergy_list();
    if list.is_empty() {
        "None".to_string()
    } else {
        list.join(", ")
    }
}

/// Prompt asking for a full six-meal day close to `tdee` kcal.
pub fn plan_prompt(profile: &UserProfile, tdee: f64) -> String {
    let target = tdee.round();
    format!(
        "Create a daily meal plan for a {age}-year-old {sex} who is {height} cm tall and weighs {weight} kg.\n\
         Their activity level is \"{activity}\" and their primary goal is to \"{goal}\".\n\
         The target daily calorie intake is approximately {target:.0} calories.\n\
         \n\
         Dietary Preferences: {prefs}.\n\
         Allergies: {allergies}. Please strictly avoid any ingredients related to these allergies.\n\
         \n\
         The plan should include 6 meals (breakfast, morning snack, lunch, afternoon snack, dinner, and evening snack).\n\
         For each meal, provide a recipe name, total calories, macronutrient breakdown (protein, carbs, fat in grams), \
         a list of ingredients, and step-by-step cooking instructions.\n\
         Also, calculate the total calories and macros for the entire day.\n\
         Ensure the total calories for the day are close to the target of {target:.0} kcal.\n\
         Provide the response in a valid JSON format that adheres to the provided schema.",
        age = profile.age,
        sex = profile.sex.to_string().to_lowercase(),
        height = profile.height,
        weight = profile.weight,
        activity = profile.activity_level,
        goal = profile.goal,
        target = target,
        prefs = preferences(profile),
        allergies = allergies(profile),
    )
}

/// Prompt asking for a replacement for one slot.
///
/// The new meal must differ from the slot's current meal and from every other
/// meal of the day. This is only asked for, never checked.
pub fn swap_prompt(profile: &UserProfile, tdee: f64, slot: MealSlot, plan: &DailyPlan) -> String {
    let current = plan.meal(slot);
    let others = plan.other_recipe_names(slot).join(", ");
    format!(
        "I need to swap a meal in my daily plan. My profile is: {age}-year-old {sex}, {height}cm, {weight}kg. \
         Goal: {goal}. Activity: {activity}.\n\
         My daily calorie target is ~{target:.0} kcal.\n\
         Dietary Preferences: {prefs}.\n\
         Allergies: {allergies}.\n\
         \n\
         The meal to swap is my {slot}: \"{name}\". It has {calories} calories.\n\
         My other meals for the day are: {others}.\n\
         \n\
         Please suggest a NEW and DIFFERENT {slot} recipe that has a similar calorie count ({calories} kcal) \
         and macronutrient profile.\n\
         It must not be \"{name}\" or any of my other meals for the day.\n\
         Provide the response as a single JSON object for the new meal, following the provided schema.",
        age = profile.age,
        sex = profile.sex.to_string().to_lowercase(),
        height = profile.height,
        weight = profile.weight,
        goal = profile.goal,
        activity = profile.activity_level,
        target = tdee.round(),
        prefs = preferences(profile),
        allergies = allergies(profile),
        slot = slot,
        name = current.recipe_name,
        calories = current.calories,
        others = others,
    )
}

/// Prompt for a food photograph of a recipe.
pub fn image_prompt(recipe_name: &str) -> String {
    format!(
        "A delicious, professionally photographed image of \"{}\" on a clean plate or bowl, \
         presented appetizingly with good lighting, ready to eat.",
        recipe_name
    )
}
