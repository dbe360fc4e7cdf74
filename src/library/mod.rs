//! Photo-library collaborator contract. The real backend (authorization,
//! persistent storage, change-notification delivery) lives outside this
//! crate; the reconciler only depends on this trait.

pub mod types;

use std::path::Path;

use crate::error::AlbumError;
use self::types::{AlbumHandle, FetchSnapshot, MediaKind};

/// Access level requested from the platform library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// May only add new assets.
    AddOnly,
    /// Full read/write access, required for queries.
    ReadWrite,
}

/// Outcome of an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Authorized,
}

impl AuthorizationStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, AuthorizationStatus::Authorized)
    }
}

/// Minimal async surface the reconciler needs from the platform photo
/// library. Implementations must deliver change notifications serially.
#[async_trait::async_trait]
pub trait PhotoLibrary: Send + Sync {
    /// Request authorization at the given access level.
    async fn request_authorization(&self, level: AccessLevel) -> AuthorizationStatus;

    /// Resolve the named album, creating it if it does not exist yet.
    async fn resolve_album(&self, name: &str) -> Result<AlbumHandle, AlbumError>;

    /// Query the album for assets of one media kind, most recent first.
    /// A `limit` of 0 means "no limit".
    async fn fetch_assets(
        &self,
        album: &AlbumHandle,
        kind: MediaKind,
        limit: usize,
    ) -> Result<FetchSnapshot, AlbumError>;

    /// Add the video file at `path` to the album.
    async fn add_video(&self, album: &AlbumHandle, path: &Path) -> Result<(), AlbumError>;

    /// Add an in-memory image to the album.
    async fn add_image(&self, album: &AlbumHandle, data: &[u8]) -> Result<(), AlbumError>;

    /// Register interest in change notifications. Must be idempotent:
    /// registering twice does not duplicate delivery.
    fn register_change_observer(&self);
}
