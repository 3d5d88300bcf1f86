use clap::Args;
use qalori_core::clear_all;
use std::io::{self, Write};

use super::open_storage;
use crate::config::Config;

/// Delete your profile, plan, water and workout data
#[derive(Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

impl ResetCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        if !self.force {
            print!("Delete all Qalori data and start over? [y/N] ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Reset cancelled.");
                return Ok(());
            }
        }

        let backend = open_storage(config);
        clear_all(&*backend);
        println!("All data cleared. Run 'qalori profile set' to start over.");
        Ok(())
    }
}
