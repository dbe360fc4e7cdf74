//! Typed asset events published on the reconciler's broadcast channels, plus
//! helpers for keeping subscriber-side asset lists in sync with them.

use crate::library::types::AssetRef;

/// Why an asset event occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// First population of the album snapshots after startup.
    InitialLoad,
    /// The app's own capture flow wrote to the album.
    UserCapture,
    /// Something outside the app changed the album (e.g. the system
    /// photos app).
    ExternalChange,
}

/// One normalized change to the observed album, for one media kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEvent {
    Added(Vec<AssetRef>, EventSource),
    Deleted(Vec<AssetRef>, EventSource),
}

impl AssetEvent {
    pub fn assets(&self) -> &[AssetRef] {
        match self {
            AssetEvent::Added(assets, _) | AssetEvent::Deleted(assets, _) => assets,
        }
    }

    pub fn source(&self) -> EventSource {
        match self {
            AssetEvent::Added(_, source) | AssetEvent::Deleted(_, source) => *source,
        }
    }

    pub fn is_addition(&self) -> bool {
        matches!(self, AssetEvent::Added(..))
    }
}

/// Anything that wraps an [`AssetRef`], such as the enriched value objects
/// returned by the caching collaborator.
pub trait AlbumAsset {
    fn asset(&self) -> &AssetRef;
}

impl AlbumAsset for AssetRef {
    fn asset(&self) -> &AssetRef {
        self
    }
}

/// List-maintenance helpers for subscribers holding a `Vec` of assets.
pub trait RemoveDeleted: Sized {
    /// Drop every item whose identifier matches `asset`.
    fn remove(self, asset: &AssetRef) -> Self;

    /// Drop every item deleted according to `event`. Identity for `Added`
    /// events.
    fn remove_deleted_in(self, event: &AssetEvent) -> Self;
}

impl<T: AlbumAsset> RemoveDeleted for Vec<T> {
    fn remove(self, asset: &AssetRef) -> Self {
        self.into_iter()
            .filter(|item| item.asset().local_id != asset.local_id)
            .collect()
    }

    fn remove_deleted_in(self, event: &AssetEvent) -> Self {
        let AssetEvent::Deleted(deleted, _) = event else {
            return self;
        };
        self.into_iter()
            .filter(|item| {
                !deleted
                    .iter()
                    .any(|d| d.local_id == item.asset().local_id)
            })
            .collect()
    }
}
