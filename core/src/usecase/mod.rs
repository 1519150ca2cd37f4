//! Album lifecycle: create, rename, resize and delete albums while keeping
//! every media attributed to the most specific album covering its date.
//!
//! Each operation loads its own snapshot of the owner's albums, builds a
//! [`Timeline`] from it and translates the affected segments into bulk
//! [`AlbumRepository::update_medias`] calls. Move instructions already issued
//! are not rolled back when a later call fails; every call is scoped to one
//! segment and idempotent, so retrying the whole operation is safe.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::Config,
    model::{generate_folder_name, Album, DEFAULT_FOLDER_DATE_FORMAT},
    repository::{AlbumRepository, MoveTransaction, RepositoryError, UpdateMediaFilter},
    timeline::{PrioritySegment, Timeline, TimelineError},
};

mod create;
mod delete;
mod rename;
#[cfg(test)]
mod test;
mod update;

pub use create::CreateAlbum;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("album name must not be blank")]
    BlankName,
    #[error("album {0} date is missing")]
    MissingDate(&'static str),
    #[error("album end {end} must be after its start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("no folder name can be derived from album name {0:?}")]
    InvalidFolderName(String),
    #[error(transparent)]
    Timeline(#[from] TimelineError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::Repository(RepositoryError::AlbumNotFound { .. })
        )
    }

    pub fn is_not_empty(&self) -> bool {
        matches!(
            self,
            CatalogError::Repository(RepositoryError::AlbumNotEmpty { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Album lifecycle operations of one owner's catalog.
#[derive(Debug)]
pub struct AlbumLifecycle<R> {
    repository: R,
    owner: String,
    folder_date_format: String,
}

impl<R: AlbumRepository> AlbumLifecycle<R> {
    pub fn new(repository: R, owner: impl Into<String>) -> Self {
        AlbumLifecycle {
            repository,
            owner: owner.into(),
            folder_date_format: DEFAULT_FOLDER_DATE_FORMAT.to_owned(),
        }
    }

    pub fn from_config(repository: R, config: &Config) -> Self {
        AlbumLifecycle {
            repository,
            owner: config.catalog.owner.clone(),
            folder_date_format: config.catalog.folder_date_format.clone(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn find_album(&self, folder_name: &str) -> Result<Album> {
        Ok(self.repository.find_album(&self.owner, folder_name)?)
    }

    /// All albums of the owner, ordered by start date then folder name.
    pub fn list_albums(&self) -> Result<Vec<Album>> {
        Ok(self.timeline()?.albums().to_vec())
    }

    /// Album a media taken at `date` belongs to.
    pub fn album_for(&self, date: DateTime<Utc>) -> Result<Option<Album>> {
        Ok(self.timeline()?.find_at(date).cloned())
    }

    fn timeline(&self) -> Result<Timeline> {
        let albums = self.repository.find_all_albums(&self.owner)?;
        Ok(Timeline::from_unsorted(albums)?)
    }

    fn folder_name_for(&self, name: &str, start: DateTime<Utc>) -> Result<String> {
        generate_folder_name(name, start, &self.folder_date_format)
            .ok_or_else(|| CatalogError::InvalidFolderName(name.to_owned()))
    }

    /// Moves the media of `sources` dated within `segment` to the segment's
    /// winner. Nothing is issued when no source is left besides the winner.
    fn reassign(
        &self,
        segment: &PrioritySegment,
        mut sources: BTreeSet<String>,
    ) -> Result<Option<MoveTransaction>> {
        let Some(target) = segment.winner() else {
            return Ok(None);
        };
        sources.remove(&target.folder_name);
        if sources.is_empty() {
            return Ok(None);
        }
        let filter = UpdateMediaFilter::new()
            .within_range(segment.start, segment.end)
            .with_albums(sources);
        let transaction = self
            .repository
            .update_medias(&self.owner, &filter, &target.folder_name)?;
        debug!(
            range = %segment.time_range(),
            sources = ?filter.album_folder_names,
            target = %target.folder_name,
            transaction_id = %transaction.transaction_id,
            moved = transaction.moved_count,
            "reassigned media"
        );
        Ok(Some(transaction))
    }
}

/// Folder names of every album of `segment` but its winner.
fn losing_folder_names(segment: &PrioritySegment) -> BTreeSet<String> {
    segment
        .albums
        .iter()
        .skip(1)
        .map(|album| album.folder_name.clone())
        .collect()
}

fn validate_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if end <= start {
        return Err(CatalogError::InvalidRange { start, end });
    }
    Ok(())
}
