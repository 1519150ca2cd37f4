//! Port to the album and media store.
//!
//! The core never enumerates media: it only loads albums and hands bulk move
//! instructions to the store.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::{Album, TimeRange};

pub mod memory;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("album {folder_name} not found")]
    AlbumNotFound { folder_name: String },
    #[error("album {folder_name} still contains {media_count} media")]
    AlbumNotEmpty {
        folder_name: String,
        media_count: usize,
    },
    #[error("album {folder_name} already exists")]
    AlbumAlreadyExists { folder_name: String },
    #[error(transparent)]
    Other(#[from] eyre::Report),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Selection of media to move: media in any of `album_folder_names`, dated
/// within `time_range` if set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateMediaFilter {
    pub time_range: Option<TimeRange>,
    pub album_folder_names: BTreeSet<String>,
}

impl UpdateMediaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn within_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.time_range = Some(TimeRange::new(start, end));
        self
    }

    pub fn with_album(mut self, folder_name: impl Into<String>) -> Self {
        self.album_folder_names.insert(folder_name.into());
        self
    }

    pub fn with_albums(mut self, folder_names: impl IntoIterator<Item = String>) -> Self {
        self.album_folder_names.extend(folder_names);
        self
    }

    pub fn matches(&self, folder_name: &str, date: DateTime<Utc>) -> bool {
        self.album_folder_names.contains(folder_name)
            && self
                .time_range
                .map_or(true, |time_range| time_range.contains(date))
    }
}

/// Receipt of a bulk move recorded by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTransaction {
    pub transaction_id: String,
    pub moved_count: usize,
}

/// Album and media store of the catalog.
///
/// Implementations decide how writes are made durable and whether concurrent
/// callers are serialized.
pub trait AlbumRepository {
    /// Point-in-time snapshot of every album of `owner`, in no particular order.
    fn find_all_albums(&self, owner: &str) -> Result<Vec<Album>>;

    fn find_album(&self, owner: &str, folder_name: &str) -> Result<Album>;

    fn insert_album(&self, album: &Album) -> Result<()>;

    /// Stores name and dates of the album identified by owner and folder name.
    fn update_album(&self, album: &Album) -> Result<()>;

    /// Fails with [`RepositoryError::AlbumNotEmpty`] while media remain in the album.
    fn delete_empty_album(&self, owner: &str, folder_name: &str) -> Result<()>;

    /// Moves every media of `owner` matching `filter` into `target_folder_name`
    /// and records the move for housekeeping. Must be idempotent.
    fn update_medias(
        &self,
        owner: &str,
        filter: &UpdateMediaFilter,
        target_folder_name: &str,
    ) -> Result<MoveTransaction>;
}

impl<R: AlbumRepository + ?Sized> AlbumRepository for &R {
    fn find_all_albums(&self, owner: &str) -> Result<Vec<Album>> {
        (**self).find_all_albums(owner)
    }

    fn find_album(&self, owner: &str, folder_name: &str) -> Result<Album> {
        (**self).find_album(owner, folder_name)
    }

    fn insert_album(&self, album: &Album) -> Result<()> {
        (**self).insert_album(album)
    }

    fn update_album(&self, album: &Album) -> Result<()> {
        (**self).update_album(album)
    }

    fn delete_empty_album(&self, owner: &str, folder_name: &str) -> Result<()> {
        (**self).delete_empty_album(owner, folder_name)
    }

    fn update_medias(
        &self,
        owner: &str,
        filter: &UpdateMediaFilter,
        target_folder_name: &str,
    ) -> Result<MoveTransaction> {
        (**self).update_medias(owner, filter, target_folder_name)
    }
}
