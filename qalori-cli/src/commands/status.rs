use clap::Args;
use qalori_core::{
    compute_tdee, CalorieBalance, HydrationStore, MealSlot, PlanStore, ProfileStore,
    WorkoutAccumulator,
};
use serde::Serialize;

use super::water::progress_bar;
use super::{open_storage, require_profile, OutputFormat};
use crate::config::Config;

/// Dashboard summary for today
#[derive(Args)]
pub struct StatusCommand {
    /// Meal slots you have eaten so far (can be repeated)
    #[arg(long = "eaten", value_name = "SLOT")]
    pub eaten: Vec<MealSlot>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    target: f64,
    net_target: f64,
    consumed: f64,
    burned: f64,
    remaining: f64,
    percentage: f64,
    goal_reached: bool,
    water_consumed: u32,
    water_goal: u32,
}

impl StatusCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let backend = open_storage(config);
        let profile = require_profile(&ProfileStore::open(backend.clone()))?;
        let plans = PlanStore::open(backend.clone());
        let hydration = HydrationStore::open(backend.clone()).data();
        let burned = WorkoutAccumulator::open(backend).calories_burned();

        let tdee = compute_tdee(&profile);
        let consumed = plans
            .get()
            .map(|plan| plan.logged_calories(&self.eaten))
            .unwrap_or(0.0);
        let balance = CalorieBalance::new(tdee, consumed, burned);

        match self.format {
            OutputFormat::Json => {
                let report = StatusReport {
                    target: balance.target,
                    net_target: balance.net_target(),
                    consumed: balance.consumed,
                    burned: balance.burned,
                    remaining: balance.remaining(),
                    percentage: balance.percentage(),
                    goal_reached: balance.goal_reached(),
                    water_consumed: hydration.consumed,
                    water_goal: hydration.goal,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                println!("Today");
                println!("=====\n");
                println!("Target:    {:>6.0} kcal", balance.target);
                println!("Burned:    {:>6.0} kcal", balance.burned);
                println!("Net goal:  {:>6.0} kcal", balance.net_target());
                println!("Eaten:     {:>6.0} kcal", balance.consumed);
                if balance.goal_reached() {
                    println!("Goal reached!");
                } else {
                    println!("Remaining: {:>6.0} kcal", balance.remaining());
                }
                println!("{}", progress_bar(balance.percentage()));
                println!();
                println!("Water: {}", hydration);
                println!("{}", progress_bar(hydration.percentage()));

                if plans.get().is_none() {
                    println!("\nNo plan yet. Run 'qalori plan generate' to create one.");
                }
            }
        }
        Ok(())
    }
}
