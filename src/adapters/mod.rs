// Adapters layer: concrete implementations for external systems (storage, weather, text generation).

pub mod anthropic;
pub mod storage;
pub mod wardrobe;
pub mod weather;
