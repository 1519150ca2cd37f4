use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::{losing_folder_names, validate_range, AlbumLifecycle, CatalogError, Result};
use crate::{
    model::Album,
    repository::{AlbumRepository, RepositoryError},
    timeline::Timeline,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlbum {
    pub name: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Used instead of the folder name generated from name and start date
    pub forced_folder_name: Option<String>,
}

impl<R: AlbumRepository> AlbumLifecycle<R> {
    /// Creates an album and moves into it the media of every album it now wins over.
    #[instrument(skip(self), level = "debug")]
    pub fn create(&self, create_album: CreateAlbum) -> Result<Album> {
        let name = create_album.name.trim();
        if name.is_empty() {
            return Err(CatalogError::BlankName);
        }
        let start = create_album.start.ok_or(CatalogError::MissingDate("start"))?;
        let end = create_album.end.ok_or(CatalogError::MissingDate("end"))?;
        validate_range(start, end)?;
        let folder_name = match create_album.forced_folder_name.as_deref().map(str::trim) {
            Some(forced) if !forced.is_empty() => forced.to_owned(),
            Some(forced) => return Err(CatalogError::InvalidFolderName(forced.to_owned())),
            None => self.folder_name_for(name, start)?,
        };
        let album = Album {
            owner: self.owner.clone(),
            folder_name,
            name: name.to_owned(),
            start,
            end,
        };

        let existing = self.repository.find_all_albums(&self.owner)?;
        if existing.iter().any(|a| a.folder_name == album.folder_name) {
            return Err(RepositoryError::AlbumAlreadyExists {
                folder_name: album.folder_name,
            }
            .into());
        }
        let timeline = Timeline::from_unsorted(existing)?.with_album(album.clone())?;

        self.repository.insert_album(&album)?;

        let mut moved = 0;
        for segment in timeline.find_for_album(&album.folder_name) {
            if let Some(transaction) = self.reassign(&segment, losing_folder_names(&segment))? {
                moved += transaction.moved_count;
            }
        }
        info!(folder_name = %album.folder_name, moved, "created album");
        Ok(album)
    }
}
