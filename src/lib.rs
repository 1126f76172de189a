// WinTweak - tiered Windows 11 configuration tweaks
//
// This is the library crate containing the catalog, the orchestration engine
// and the services it drives. The binary crate (main.rs) is a thin CLI.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use catalog::TweakCatalog;
pub use config::ConfigManager;
pub use models::{OptimizerSettings, Selection, Tier, TweakDefinition};
pub use orchestrator::{ApplyReport, Optimizer, RestoreReport};
pub use state::{Notification, OrchestrationContext, OrchestrationError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
