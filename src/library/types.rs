//! Value types shared between the photo-library collaborator contract and the
//! reconciler: asset handles, fetch snapshots, and change notifications.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// The two media kinds the album reconciler observes. Anything else the
/// platform may store (audio, unknown) is filtered out at the library
/// boundary and never reaches the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Image,
}

/// Opaque handle to one asset in the platform photo library.
///
/// Identity is the platform-assigned `local_id`; event-driven list filtering
/// compares ids only, never the metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub local_id: String,
    pub kind: MediaKind,
    pub created_at: Option<DateTime<Utc>>,
}

impl AssetRef {
    pub fn new(local_id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            local_id: local_id.into(),
            kind,
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Opaque reference to a named collection in the platform photo library.
/// Resolved (or created) once per reconciler lifetime and cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumHandle {
    pub id: String,
    pub name: String,
}

impl AlbumHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Process-unique identity for a [`FetchSnapshot`], used to correlate change
/// notifications with the snapshot they diff against. Stand-in for the
/// platform's fetch-result object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotId(u64);

static NEXT_SNAPSHOT_ID: AtomicU64 = AtomicU64::new(1);

impl SnapshotId {
    fn next() -> Self {
        SnapshotId(NEXT_SNAPSHOT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An ordered, immutable view of the assets of one media kind in the album
/// at a point in time. Replaced wholesale whenever a change notification or
/// explicit refresh occurs.
#[derive(Debug, Clone)]
pub struct FetchSnapshot {
    id: SnapshotId,
    kind: MediaKind,
    assets: Vec<AssetRef>,
}

impl FetchSnapshot {
    pub fn new(kind: MediaKind, assets: Vec<AssetRef>) -> Self {
        Self {
            id: SnapshotId::next(),
            kind,
            assets,
        }
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// The per-snapshot delta carried by a [`LibraryChange`]: what was inserted,
/// removed, changed, or moved since the correlated snapshot was taken, plus
/// the replacement snapshot reflecting the post-change state.
#[derive(Debug, Clone)]
pub struct FetchChangeDetails {
    pub inserted: Vec<AssetRef>,
    pub removed: Vec<AssetRef>,
    pub changed: Vec<AssetRef>,
    pub moved: Vec<(usize, usize)>,
    pub after: FetchSnapshot,
}

impl FetchChangeDetails {
    /// Details describing only insertions relative to `after`.
    pub fn inserted(after: FetchSnapshot, inserted: Vec<AssetRef>) -> Self {
        Self {
            inserted,
            removed: Vec::new(),
            changed: Vec::new(),
            moved: Vec::new(),
            after,
        }
    }

    /// Details describing only removals relative to `after`.
    pub fn removed(after: FetchSnapshot, removed: Vec<AssetRef>) -> Self {
        Self {
            inserted: Vec::new(),
            removed,
            changed: Vec::new(),
            moved: Vec::new(),
            after,
        }
    }
}

/// One change notification from the platform library.
///
/// Deltas are keyed by the id of the previously-cached snapshot; a snapshot
/// the notification knows nothing about simply yields no details, which the
/// reconciler treats as a no-op.
#[derive(Debug, Clone, Default)]
pub struct LibraryChange {
    details: HashMap<SnapshotId, FetchChangeDetails>,
}

impl LibraryChange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the delta computed against `snapshot`.
    pub fn with_details(mut self, snapshot: &FetchSnapshot, details: FetchChangeDetails) -> Self {
        self.details.insert(snapshot.id(), details);
        self
    }

    /// Look up the delta for a cached snapshot, if this notification
    /// concerns it.
    pub fn details_for(&self, snapshot: &FetchSnapshot) -> Option<&FetchChangeDetails> {
        self.details.get(&snapshot.id())
    }
}
