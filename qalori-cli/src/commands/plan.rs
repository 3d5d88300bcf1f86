use clap::{Args, Subcommand};
use qalori_core::{
    compute_tdee, KeyValueStore, MealSlot, PlanOrchestrator, PlanStore, ProfileStore, Progress,
    UserProfile,
};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::error;

use super::{open_storage, require_profile, runtime, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Generate a new daily plan (replaces the current one on success)
    Generate,

    /// Show the current daily plan
    Show {
        /// Show full recipe for one meal (e.g. lunch, morning-snack)
        #[arg(long, short)]
        meal: Option<MealSlot>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Replace one meal with a different recipe of similar calories
    Swap {
        /// Meal slot (breakfast, morning-snack, lunch, afternoon-snack, dinner, evening-snack)
        slot: MealSlot,
    },
}

impl PlanCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let backend = open_storage(config);

        match &self.command {
            PlanSubcommand::Generate => {
                let profile = require_profile(&ProfileStore::open(backend.clone()))?;
                generate_plan(config, backend, &profile)
            }

            PlanSubcommand::Show { meal, format } => {
                let plans = PlanStore::open(backend);
                let plan = match plans.get() {
                    Some(plan) => plan,
                    None => {
                        println!("No plan yet. Run 'qalori plan generate' to create one.");
                        return Ok(());
                    }
                };

                match (format, meal) {
                    (OutputFormat::Json, Some(slot)) => {
                        println!("{}", serde_json::to_string_pretty(plan.meal(*slot))?);
                    }
                    (OutputFormat::Json, None) => {
                        println!("{}", serde_json::to_string_pretty(plan)?);
                    }
                    (OutputFormat::Text, Some(slot)) => {
                        println!("{}\n", slot.label());
                        print!("{}", plan.meal(*slot));
                    }
                    (OutputFormat::Text, None) => {
                        print!("{}", plan);
                    }
                }
                Ok(())
            }

            PlanSubcommand::Swap { slot } => {
                let profile = require_profile(&ProfileStore::open(backend.clone()))?;
                let mut plans = PlanStore::open(backend);
                let current = plans
                    .get()
                    .cloned()
                    .ok_or("No plan yet. Run 'qalori plan generate' to create one.")?;

                let ai = config.gemini_client()?;
                let orchestrator = PlanOrchestrator::new(&ai);
                let tdee = compute_tdee(&profile);

                println!(
                    "Swapping {} ({})...",
                    slot.label(),
                    current.meal(*slot).recipe_name
                );

                let rt = runtime()?;
                let result = rt.block_on(orchestrator.swap_meal(
                    &profile,
                    tdee,
                    *slot,
                    &current,
                    &mut |plan| plans.set(plan.clone()),
                ));

                match result {
                    Ok(plan) => {
                        let meal = plan.meal(*slot);
                        println!(
                            "New {}: {} ({:.0} kcal)",
                            slot.label(),
                            meal.recipe_name,
                            meal.calories
                        );
                        if !meal.has_image() {
                            println!("(no image available)");
                        }
                        println!("Daily total: {:.0} kcal", plan.total_calories);
                        Ok(())
                    }
                    Err(e) => {
                        error!(error = %e, %slot, "meal swap failed");
                        Err("Sorry, we couldn't swap the meal right now. Please try again.".into())
                    }
                }
            }
        }
    }
}

/// Generates a plan for `profile` and stores it, printing progress.
///
/// An existing plan is only replaced when generation succeeds.
pub(crate) fn generate_plan(
    config: &Config,
    backend: Arc<dyn KeyValueStore>,
    profile: &UserProfile,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut plans = PlanStore::open(backend);
    let regenerating = plans.get().is_some();

    let ai = config.gemini_client()?;
    let orchestrator = PlanOrchestrator::new(&ai);
    let tdee = compute_tdee(profile);

    let rt = runtime()?;
    let result = rt.block_on(orchestrator.request_plan(profile, tdee, &mut print_progress));

    match result {
        Ok(plan) => {
            println!();
            print!("{}", plan);
            println!("Target: {:.0} kcal", tdee);
            plans.set(plan);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "meal plan generation failed");
            if regenerating {
                Err("Failed to regenerate meal plan. Please try again later.".into())
            } else {
                Err(
                    "Failed to generate meal plan. Please check your API key and try again. \
                     Run 'qalori reset' to start over."
                        .into(),
                )
            }
        }
    }
}

fn print_progress(progress: Progress) {
    println!("[{:>3}%] {}", progress.percentage, progress.message);
    let _ = io::stdout().flush();
}
