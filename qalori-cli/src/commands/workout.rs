use clap::{Args, Subcommand};
use qalori_core::models::EXERCISES;
use qalori_core::{Exercise, ProfileStore, WorkoutAccumulator, WorkoutDetails};

use super::{open_storage, require_profile, OutputFormat};
use crate::config::Config;

const NOTHING_TO_LOG: &str = "Nothing to log: calories burned must be positive.";

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Log a workout session
    Log {
        /// Exercise name (see 'qalori workout exercises'); "None" clears today's workouts
        #[arg(long, short)]
        exercise: Option<String>,

        /// Duration in minutes
        #[arg(long, short)]
        duration: Option<f64>,

        /// Calories burned, entered directly (takes priority over exercise + duration when positive)
        #[arg(long)]
        calories: Option<f64>,
    },

    /// Clear today's logged workouts
    Reset,

    /// Show calories burned today
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List exercises and their MET values
    Exercises,
}

impl WorkoutCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let backend = open_storage(config);

        match &self.command {
            WorkoutSubcommand::Log {
                exercise,
                duration,
                calories,
            } => {
                let mut workouts = WorkoutAccumulator::open(backend.clone());

                let manual = calories
                    .map(|calories| WorkoutDetails::Manual { calories })
                    .filter(|details| details.session_burn().is_some());

                let details = match manual {
                    Some(details) => details,
                    None => {
                        let Some(name) = exercise.as_deref() else {
                            return Err(match calories {
                                Some(_) => NOTHING_TO_LOG.into(),
                                None => "Provide --calories, or --exercise with --duration.".into(),
                            });
                        };
                        let exercise = Exercise::find(name).ok_or_else(|| {
                            format!(
                                "Unknown exercise '{}'. Run 'qalori workout exercises' to list them.",
                                name
                            )
                        })?;

                        if exercise.is_none() {
                            workouts.reset_workout();
                            println!("Cleared today's workouts.");
                            return Ok(());
                        }

                        let duration = duration.ok_or("Provide --duration in minutes.")?;
                        let profile = require_profile(&ProfileStore::open(backend))?;
                        WorkoutDetails::Activity {
                            duration_minutes: duration,
                            met: exercise.met,
                            weight_kg: profile.weight,
                        }
                    }
                };

                match workouts.log_workout(&details) {
                    Some(burn) => {
                        println!("Logged {:.0} kcal.", burn);
                        println!("Burned today: {:.0} kcal", workouts.calories_burned());
                        Ok(())
                    }
                    None => Err(NOTHING_TO_LOG.into()),
                }
            }

            WorkoutSubcommand::Reset => {
                let mut workouts = WorkoutAccumulator::open(backend);
                workouts.reset_workout();
                println!("Cleared today's workouts.");
                Ok(())
            }

            WorkoutSubcommand::Show { format } => {
                let mut workouts = WorkoutAccumulator::open(backend);
                let today = workouts.current();
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&today)?),
                    OutputFormat::Text => println!("{}", today),
                }
                Ok(())
            }

            WorkoutSubcommand::Exercises => {
                for exercise in EXERCISES {
                    println!("{}", exercise);
                }
                Ok(())
            }
        }
    }
}
