pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::anthropic::AnthropicGenerator;
pub use adapters::storage::LocalStorage;
pub use adapters::wardrobe::WardrobeRepository;
pub use adapters::weather::OpenWeatherMapClient;
pub use config::StylistConfig;
pub use core::agent::OutfitAgent;
pub use core::location::RegexLocationExtractor;
pub use core::recommender::Recommender;
pub use core::service::{ServiceDefaults, StylistService};
pub use utils::error::{Result, StylistError};
