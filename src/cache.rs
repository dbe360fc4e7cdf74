//! Asset-caching collaborator contract: turns raw asset handles into richer
//! value objects (local file paths, durations). Best-effort speed-up only;
//! no caching behavior is imposed on implementations.

use std::path::PathBuf;

use crate::events::AlbumAsset;
use crate::library::types::AssetRef;

/// A video asset enriched with locally-resolved metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    pub asset: AssetRef,
    pub path: Option<PathBuf>,
    pub duration_secs: Option<f64>,
}

impl VideoFile {
    pub fn new(asset: AssetRef) -> Self {
        Self {
            asset,
            path: None,
            duration_secs: None,
        }
    }
}

/// A photo asset enriched with locally-resolved metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoFile {
    pub asset: AssetRef,
    pub path: Option<PathBuf>,
}

impl PhotoFile {
    pub fn new(asset: AssetRef) -> Self {
        Self { asset, path: None }
    }
}

impl AlbumAsset for VideoFile {
    fn asset(&self) -> &AssetRef {
        &self.asset
    }
}

impl AlbumAsset for PhotoFile {
    fn asset(&self) -> &AssetRef {
        &self.asset
    }
}

#[async_trait::async_trait]
pub trait AssetCache: Send + Sync {
    /// Convert raw video asset handles into enriched value objects.
    async fn fetch_videos(&self, assets: Vec<AssetRef>) -> Vec<VideoFile>;

    /// Convert raw photo asset handles into enriched value objects.
    async fn fetch_photos(&self, assets: Vec<AssetRef>) -> Vec<PhotoFile>;
}
