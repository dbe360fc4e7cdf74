//! album-sync — saves captured photos and videos into a named photo-library
//! album and re-emits every change to that album as a normalized, typed event
//! stream.
//!
//! The platform photo library and the asset-caching layer are injected
//! collaborators ([`PhotoLibrary`], [`AssetCache`]); this crate owns the
//! reconciliation logic in between: two cached fetch snapshots (video and
//! photo), a once-only initial-load gate, and a capture-in-flight flag used
//! to classify each detected insertion or removal as an initial load, an
//! in-app capture, or an external change made behind the app's back.

#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod library;
pub mod reconciler;

pub use cache::{AssetCache, PhotoFile, VideoFile};
pub use config::ReconcilerConfig;
pub use error::AlbumError;
pub use events::{AlbumAsset, AssetEvent, EventSource, RemoveDeleted};
pub use library::types::{
    AlbumHandle, AssetRef, FetchChangeDetails, FetchSnapshot, LibraryChange, MediaKind, SnapshotId,
};
pub use library::{AccessLevel, AuthorizationStatus, PhotoLibrary};
pub use reconciler::AlbumReconciler;
