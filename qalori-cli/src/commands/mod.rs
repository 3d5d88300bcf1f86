mod chat;
mod config_cmd;
mod plan;
mod profile;
mod reset;
mod status;
mod water;
mod workout;

use clap::ValueEnum;
use qalori_core::{FileStorage, KeyValueStore, ProfileStore, UserProfile};
use std::sync::Arc;

use crate::config::Config;

pub use chat::ChatCommand;
pub use config_cmd::ConfigCommand;
pub use plan::PlanCommand;
pub use profile::ProfileCommand;
pub use reset::ResetCommand;
pub use status::StatusCommand;
pub use water::WaterCommand;
pub use workout::WorkoutCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// File-backed key-value store rooted at the configured data directory.
pub fn open_storage(config: &Config) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStorage::new(config.data_dir.value.clone()))
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    tokio::runtime::Runtime::new().map_err(|e| format!("Failed to start runtime: {}", e).into())
}

pub(crate) fn require_profile(
    profiles: &ProfileStore,
) -> Result<UserProfile, Box<dyn std::error::Error>> {
    profiles
        .get()
        .cloned()
        .ok_or_else(|| "No profile found. Run 'qalori profile set' first.".into())
}
