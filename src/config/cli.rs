use crate::domain::model::{Garment, OutfitRequest};
use crate::utils::error::{Result, StylistError};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "outfit-stylist")]
#[command(about = "Recommend outfits from your wardrobe for the weather and the occasion")]
pub struct CliArgs {
    /// What you are dressing for, e.g. "job interview tomorrow in Boston"
    #[arg(short, long)]
    pub message: String,

    /// Wardrobe owner (defaults to the configured user)
    #[arg(short, long)]
    pub user: Option<String>,

    #[arg(short, long)]
    pub gender: Option<String>,

    /// Preferred color, used as a soft hint
    #[arg(long)]
    pub color: Option<String>,

    /// Garment JSON to use as the top of every outfit
    #[arg(long)]
    pub lock_top: Option<String>,

    /// Garment JSON to use as the bottom of every outfit
    #[arg(long)]
    pub lock_bottom: Option<String>,

    /// Keep wardrobe order instead of shuffling
    #[arg(long)]
    pub no_shuffle: bool,

    /// Skip the weather lookup and use this temperature
    #[arg(long, allow_hyphen_values = true)]
    pub celsius: Option<i32>,

    #[arg(short, long, default_value = "stylist.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    pub fn to_request(&self) -> Result<OutfitRequest> {
        Ok(OutfitRequest {
            message: self.message.clone(),
            gender: self.gender.clone(),
            color: self.color.clone(),
            lock_top: parse_locked("lock_top", self.lock_top.as_deref())?,
            lock_bottom: parse_locked("lock_bottom", self.lock_bottom.as_deref())?,
            user: self.user.clone(),
        })
    }
}

fn parse_locked(field: &str, raw: Option<&str>) -> Result<Option<Garment>> {
    raw.map(|json| {
        serde_json::from_str(json).map_err(|e| StylistError::ValidationError {
            message: format!("{} is not a valid garment: {}", field, e),
        })
    })
    .transpose()
}
