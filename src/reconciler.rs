//! Album reconciler — owns the resolved album handle and the two cached
//! fetch snapshots (video, photo), classifies every library change
//! notification by its origin, and republishes normalized [`AssetEvent`]s on
//! two broadcast channels.
//!
//! Provenance classification rests on two flags: `has_initialized` gates the
//! one-time `InitialLoad` burst (a single flag across both media kinds, so
//! interleaved population of the two snapshots cannot double-fire it), and
//! `is_capturing` is true exactly while the reconciler's own write is in
//! flight, so an insertion observed during that window is attributed to the
//! in-app capture rather than to an external actor.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, error};

use crate::cache::{AssetCache, PhotoFile, VideoFile};
use crate::config::ReconcilerConfig;
use crate::error::AlbumError;
use crate::events::{AssetEvent, EventSource};
use crate::library::types::{AlbumHandle, AssetRef, FetchSnapshot, LibraryChange, MediaKind};
use crate::library::{AccessLevel, PhotoLibrary};

enum WriteRequest<'a> {
    Video(&'a Path),
    Image(&'a [u8]),
}

#[derive(Default)]
struct ReconcilerState {
    album: Option<AlbumHandle>,
    video_snapshot: Option<FetchSnapshot>,
    photo_snapshot: Option<FetchSnapshot>,
    has_initialized: bool,
    is_capturing: bool,
}

pub struct AlbumReconciler {
    library: Arc<dyn PhotoLibrary>,
    cache: Arc<dyn AssetCache>,
    album_name: String,
    state: Mutex<ReconcilerState>,
    video_events: broadcast::Sender<AssetEvent>,
    photo_events: broadcast::Sender<AssetEvent>,
}

impl AlbumReconciler {
    pub fn new(
        config: ReconcilerConfig,
        library: Arc<dyn PhotoLibrary>,
        cache: Arc<dyn AssetCache>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let (video_events, _) = broadcast::channel(config.event_capacity);
        let (photo_events, _) = broadcast::channel(config.event_capacity);
        Ok(Self {
            library,
            cache,
            album_name: config.album_name,
            state: Mutex::new(ReconcilerState::default()),
            video_events,
            photo_events,
        })
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    /// Subscribe to video asset events. Late subscribers miss prior events.
    pub fn subscribe_video_events(&self) -> broadcast::Receiver<AssetEvent> {
        self.video_events.subscribe()
    }

    /// Subscribe to photo asset events. Late subscribers miss prior events.
    pub fn subscribe_photo_events(&self) -> broadcast::Receiver<AssetEvent> {
        self.photo_events.subscribe()
    }

    /// Save the video file at `path` into the album.
    ///
    /// The capture flag is held for the full duration of the platform write
    /// so the resulting change notification is attributed to this call.
    /// Failures are logged and propagated.
    pub async fn add_video(&self, path: &Path) -> Result<(), AlbumError> {
        self.state().is_capturing = true;
        let result = self.run_write(WriteRequest::Video(path)).await;
        self.state().is_capturing = false;

        if let Err(error) = &result {
            error!("failed to add video to album '{}': {error}", self.album_name);
        }
        result
    }

    /// Save an in-memory image into the album. Same contract as
    /// [`Self::add_video`].
    pub async fn add_image(&self, data: &[u8]) -> Result<(), AlbumError> {
        self.state().is_capturing = true;
        let result = self.run_write(WriteRequest::Image(data)).await;
        self.state().is_capturing = false;

        if let Err(error) = &result {
            error!("failed to add image to album '{}': {error}", self.album_name);
        }
        result
    }

    /// Fetch up to `limit` videos from the album (0 = no limit), enriched by
    /// the caching collaborator. Never fails: any error is logged and an
    /// empty list returned.
    pub async fn fetch_video_files(&self, limit: usize) -> Vec<VideoFile> {
        match self.run_read(MediaKind::Video, limit).await {
            Ok(assets) => self.cache.fetch_videos(assets).await,
            Err(error) => {
                error!("video fetch from album '{}' failed: {error}", self.album_name);
                Vec::new()
            }
        }
    }

    /// Fetch up to `limit` photos from the album (0 = no limit), enriched by
    /// the caching collaborator. Never fails: any error is logged and an
    /// empty list returned.
    pub async fn fetch_photo_files(&self, limit: usize) -> Vec<PhotoFile> {
        match self.run_read(MediaKind::Image, limit).await {
            Ok(assets) => self.cache.fetch_photos(assets).await,
            Err(error) => {
                error!("photo fetch from album '{}' failed: {error}", self.album_name);
                Vec::new()
            }
        }
    }

    /// Entry point for change notifications from the platform library.
    ///
    /// Each media kind with a live snapshot is checked against the
    /// notification; a snapshot the notification does not concern is a
    /// normal no-op.
    pub fn handle_library_change(&self, change: &LibraryChange) {
        self.apply_change(change, MediaKind::Video);
        self.apply_change(change, MediaKind::Image);
    }

    fn apply_change(&self, change: &LibraryChange, kind: MediaKind) {
        let (inserted, removed, source) = {
            let mut state = self.state();
            let slot = match kind {
                MediaKind::Video => &mut state.video_snapshot,
                MediaKind::Image => &mut state.photo_snapshot,
            };
            let Some(snapshot) = slot.as_ref() else {
                return;
            };
            let Some(details) = change.details_for(snapshot) else {
                return;
            };
            let inserted = details.inserted.clone();
            let removed = details.removed.clone();
            *slot = Some(details.after.clone());

            let source = if state.is_capturing {
                EventSource::UserCapture
            } else {
                EventSource::ExternalChange
            };
            (inserted, removed, source)
        };

        if !inserted.is_empty() {
            self.publish(kind, AssetEvent::Added(inserted, source));
        }
        if !removed.is_empty() {
            // The capture path only ever adds; removals are always external.
            self.publish(kind, AssetEvent::Deleted(removed, EventSource::ExternalChange));
        }
    }

    async fn run_write(&self, request: WriteRequest<'_>) -> Result<(), AlbumError> {
        loop {
            let status = self
                .library
                .request_authorization(AccessLevel::AddOnly)
                .await;
            if !status.is_granted() {
                let err = AlbumError::AccessDenied(AccessLevel::AddOnly);
                error!("album write rejected: {err}");
                return Err(err);
            }

            let album = self.state().album.clone();
            let Some(album) = album else {
                let resolved = self.library.resolve_album(&self.album_name).await?;
                self.state().album = Some(resolved);
                // Retry the whole operation once; the handle is now cached.
                continue;
            };

            self.ensure_latest_fetch_results(&album).await;
            return match request {
                WriteRequest::Video(path) => self.library.add_video(&album, path).await,
                WriteRequest::Image(data) => self.library.add_image(&album, data).await,
            };
        }
    }

    async fn run_read(&self, kind: MediaKind, limit: usize) -> Result<Vec<AssetRef>, AlbumError> {
        loop {
            let status = self
                .library
                .request_authorization(AccessLevel::ReadWrite)
                .await;
            if !status.is_granted() {
                let err = AlbumError::AccessDenied(AccessLevel::ReadWrite);
                error!("album read rejected: {err}");
                return Err(err);
            }

            let album = self.state().album.clone();
            let Some(album) = album else {
                let resolved = self.library.resolve_album(&self.album_name).await?;
                self.state().album = Some(resolved);
                continue;
            };

            self.ensure_latest_fetch_results(&album).await;
            let snapshot = self.library.fetch_assets(&album, kind, limit).await?;
            return Ok(snapshot.assets().to_vec());
        }
    }

    /// Populate each unset snapshot with a full query and emit the one-time
    /// `InitialLoad` batch.
    ///
    /// Whether initial events should fire is captured once at entry, before
    /// either snapshot is touched, so the photo branch can neither suppress
    /// nor duplicate the video branch's initial event regardless of which
    /// populates first.
    async fn ensure_latest_fetch_results(&self, album: &AlbumHandle) {
        let (should_send_initial, video_unset, photo_unset) = {
            let state = self.state();
            let should = !state.has_initialized
                && (state.video_snapshot.is_none() || state.photo_snapshot.is_none());
            (
                should,
                state.video_snapshot.is_none(),
                state.photo_snapshot.is_none(),
            )
        };

        if video_unset {
            match self.library.fetch_assets(album, MediaKind::Video, 0).await {
                Ok(snapshot) => {
                    let initial = (should_send_initial && !snapshot.is_empty())
                        .then(|| snapshot.assets().to_vec());
                    self.state().video_snapshot = Some(snapshot);
                    if let Some(assets) = initial {
                        self.publish(
                            MediaKind::Video,
                            AssetEvent::Added(assets, EventSource::InitialLoad),
                        );
                    }
                    self.library.register_change_observer();
                }
                Err(error) => {
                    debug!("initial video query for album '{}' failed: {error}", album.name);
                }
            }
        }

        if photo_unset {
            match self.library.fetch_assets(album, MediaKind::Image, 0).await {
                Ok(snapshot) => {
                    let initial = (should_send_initial && !snapshot.is_empty())
                        .then(|| snapshot.assets().to_vec());
                    self.state().photo_snapshot = Some(snapshot);
                    if let Some(assets) = initial {
                        self.publish(
                            MediaKind::Image,
                            AssetEvent::Added(assets, EventSource::InitialLoad),
                        );
                    }
                    self.library.register_change_observer();
                }
                Err(error) => {
                    debug!("initial photo query for album '{}' failed: {error}", album.name);
                }
            }
        }

        if should_send_initial {
            self.state().has_initialized = true;
        }
    }

    fn publish(&self, kind: MediaKind, event: AssetEvent) {
        // A send error just means nobody is subscribed yet.
        let _ = match kind {
            MediaKind::Video => self.video_events.send(event),
            MediaKind::Image => self.photo_events.send(event),
        };
    }

    fn state(&self) -> MutexGuard<'_, ReconcilerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for AlbumReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumReconciler")
            .field("album_name", &self.album_name)
            .finish_non_exhaustive()
    }
}
