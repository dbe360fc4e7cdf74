use thiserror::Error;

use crate::library::AccessLevel;

#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("photo library access denied for {0:?} level")]
    AccessDenied(AccessLevel),
    #[error("could not resolve or create album '{0}'")]
    AlbumResolution(String),
    /// Underlying platform write/query failure, passed through unchanged.
    #[error(transparent)]
    Platform(#[from] anyhow::Error),
}
