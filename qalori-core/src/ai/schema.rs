//! Response schemas passed to the text model.
//!
//! These use the Gemini `responseSchema` dialect (upper-case type names).

use serde_json::{json, Value};

use crate::models::MealSlot;

fn macros_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "protein": { "type": "NUMBER" },
            "carbs": { "type": "NUMBER" },
            "fat": { "type": "NUMBER" }
        },
        "required": ["protein", "carbs", "fat"]
    })
}

/// Schema for a single meal.
pub fn meal_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": { "type": "STRING" },
            "calories": { "type": "NUMBER" },
            "macros": macros_schema(),
            "ingredients": { "type": "ARRAY", "items": { "type": "STRING" } },
            "instructions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["recipeName", "calories", "macros", "ingredients", "instructions"]
    })
}

/// Schema for a full day: the six slots plus totals.
pub fn daily_plan_schema() -> Value {
    let mut properties = serde_json::Map::new();
    for slot in MealSlot::ALL {
        properties.insert(slot.key().to_string(), meal_schema());
    }
    properties.insert("totalCalories".to_string(), json!({ "type": "NUMBER" }));
    properties.insert("totalMacros".to_string(), macros_schema());

    let mut required: Vec<&str> = MealSlot::ALL.iter().map(|s| s.key()).collect();
    required.extend(["totalCalories", "totalMacros"]);

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required
    })
}
