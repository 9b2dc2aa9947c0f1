pub mod agent;
pub mod composer;
pub mod filter;
pub mod location;
pub mod occasion;
pub mod preferences;
pub mod recommender;
pub mod service;

pub use crate::domain::model::{
    Garment, Occasion, OutfitCombination, OutfitRequest, OutfitResponse, Wardrobe, WeatherReading,
};
pub use crate::domain::ports::{
    ConfigProvider, LocationExtractor, Storage, TextGenerator, WeatherProvider,
};
pub use crate::utils::error::Result;
