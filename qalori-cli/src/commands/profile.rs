use clap::{Args, Subcommand};
use qalori_core::models::DIETARY_PREFERENCE_OPTIONS;
use qalori_core::{
    compute_bmr, compute_tdee, ActivityLevel, Goal, ProfileStore, Sex, UserProfile,
};

use super::plan::generate_plan;
use super::{open_storage, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Save your profile and generate a meal plan for it
    Set {
        /// Age in years
        #[arg(long)]
        age: u32,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Sex (male, female)
        #[arg(long)]
        sex: Sex,

        /// Activity level (sedentary, lightly-active, moderately-active, very-active, super-active)
        #[arg(long)]
        activity: ActivityLevel,

        /// Goal (lose-weight, maintain-weight, gain-weight)
        #[arg(long)]
        goal: Goal,

        /// Dietary preference (can be repeated, e.g. Vegetarian, Halal, Low-Carb)
        #[arg(long = "diet", value_name = "PREF", required = true)]
        diet: Vec<String>,

        /// Allergies, comma-separated
        #[arg(long, default_value = "")]
        allergies: String,

        /// Save the profile without generating a plan
        #[arg(long)]
        no_generate: bool,
    },

    /// Show your profile and calorie target
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ProfileCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let backend = open_storage(config);

        match &self.command {
            ProfileSubcommand::Set {
                age,
                weight,
                height,
                sex,
                activity,
                goal,
                diet,
                allergies,
                no_generate,
            } => {
                let profile = UserProfile::new(
                    *age,
                    *weight,
                    *height,
                    *sex,
                    *activity,
                    *goal,
                    diet.clone(),
                    allergies.as_str(),
                )?;

                for pref in &profile.dietary_preferences {
                    if !DIETARY_PREFERENCE_OPTIONS
                        .iter()
                        .any(|o| o.eq_ignore_ascii_case(pref))
                    {
                        println!(
                            "Note: '{}' is not a standard option ({}).",
                            pref,
                            DIETARY_PREFERENCE_OPTIONS.join(", ")
                        );
                    }
                }

                let mut profiles = ProfileStore::open(backend.clone());
                profiles.set(profile.clone());
                println!("Saved profile.");
                println!("Daily calorie target: {:.0} kcal", compute_tdee(&profile));

                if *no_generate {
                    return Ok(());
                }

                println!();
                generate_plan(config, backend, &profile)
            }

            ProfileSubcommand::Show { format } => {
                let profiles = ProfileStore::open(backend);
                let profile = match profiles.get() {
                    Some(profile) => profile,
                    None => {
                        println!("No profile found. Run 'qalori profile set' to create one.");
                        return Ok(());
                    }
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(profile)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", profile);
                        println!();
                        println!("BMR: {:.0} kcal", compute_bmr(profile));
                        println!("Daily target: {:.0} kcal", compute_tdee(profile));
                    }
                }
                Ok(())
            }
        }
    }
}
