use clap::{Args, Subcommand};
use qalori_core::models::{BOTTLE_ML, GLASS_ML};
use qalori_core::{HydrationData, HydrationStore};

use super::{open_storage, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct WaterCommand {
    #[command(subcommand)]
    pub command: WaterSubcommand,
}

#[derive(Subcommand)]
pub enum WaterSubcommand {
    /// Add water in ml (negative amounts remove water)
    Add {
        /// Amount in ml
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },

    /// Add a glass of water (250 ml)
    Glass,

    /// Add a bottle of water (500 ml)
    Bottle,

    /// Remove a glass of water (250 ml)
    RemoveGlass,

    /// Show today's water intake
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Reset water intake to zero
    Reset,
}

impl WaterCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut hydration = HydrationStore::open(open_storage(config));

        let data = match &self.command {
            WaterSubcommand::Add { amount } => hydration.add_water(*amount),
            WaterSubcommand::Glass => hydration.add_water(GLASS_ML),
            WaterSubcommand::Bottle => hydration.add_water(BOTTLE_ML),
            WaterSubcommand::RemoveGlass => hydration.add_water(-GLASS_ML),
            WaterSubcommand::Reset => hydration.reset_hydration(),
            WaterSubcommand::Show { format } => {
                let data = hydration.data();
                if let OutputFormat::Json = format {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                    return Ok(());
                }
                data
            }
        };

        print_hydration(&data);
        Ok(())
    }
}

fn print_hydration(data: &HydrationData) {
    println!("Water: {}", data);
    println!("{}", progress_bar(data.percentage()));
}

/// Fixed-width bar, capped at full.
pub(crate) fn progress_bar(percentage: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}
