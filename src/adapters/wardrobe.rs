use crate::core::Storage;
use crate::domain::model::Wardrobe;
use crate::utils::error::{Result, StylistError};
use crate::utils::validation::validate_user_id;

pub fn metadata_path(user: &str) -> String {
    format!("{}_metadata.json", user.to_lowercase())
}

/// 每次請求重新讀取，不快取也不寫回
pub struct WardrobeRepository<S: Storage> {
    storage: S,
}

impl<S: Storage> WardrobeRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load(&self, user: &str) -> Result<Wardrobe> {
        validate_user_id(user)?;

        let path = metadata_path(user);
        let bytes = self.storage.read_file(&path).await.map_err(|e| match e {
            StylistError::ObjectNotFound { .. } => StylistError::UserNotFound {
                user: user.to_string(),
            },
            other => other,
        })?;

        let wardrobe: Wardrobe = serde_json::from_slice(&bytes)?;
        tracing::debug!("Loaded {} garments from {}", wardrobe.len(), path);
        Ok(wardrobe)
    }
}
