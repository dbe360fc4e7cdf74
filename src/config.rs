use serde::Deserialize;

/// Default capacity of each broadcast event channel. A lagging subscriber
/// that falls more than this many events behind starts losing the oldest.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Construction-time settings for an [`crate::AlbumReconciler`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Name of the album to save captures into and observe.
    pub album_name: String,
    /// Capacity of the video and photo broadcast channels.
    pub event_capacity: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            album_name: "Captures".to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ReconcilerConfig {
    pub fn new(album_name: impl Into<String>) -> Self {
        Self {
            album_name: album_name.into(),
            ..Self::default()
        }
    }

    /// Reject configurations the reconciler cannot operate with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.album_name.trim().is_empty() {
            anyhow::bail!("album_name must not be empty");
        }
        if self.event_capacity == 0 {
            anyhow::bail!("event_capacity must be at least 1");
        }
        Ok(())
    }
}
