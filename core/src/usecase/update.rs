use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::{losing_folder_names, validate_range, AlbumLifecycle, Result};
use crate::{
    model::{Album, TimeRange},
    repository::{AlbumRepository, RepositoryError},
    timeline::Timeline,
};

impl<R: AlbumRepository> AlbumLifecycle<R> {
    /// Moves the dates of an album and re-attributes the media of the dates
    /// that changed hands, in both directions.
    #[instrument(skip(self), level = "debug")]
    pub fn update_album(
        &self,
        folder_name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Album> {
        validate_range(start, end)?;
        let mut albums = self.repository.find_all_albums(&self.owner)?;
        let album = albums
            .iter_mut()
            .find(|album| album.folder_name == folder_name)
            .ok_or_else(|| RepositoryError::AlbumNotFound {
                folder_name: folder_name.to_owned(),
            })?;
        let previous_range = album.time_range();
        let new_range = TimeRange::new(start, end);
        if previous_range == new_range {
            return Ok(album.clone());
        }
        album.start = start;
        album.end = end;
        let updated: Album = album.clone();

        let timeline = Timeline::from_unsorted(albums)?;
        for changed in previous_range.plus(&new_range) {
            for segment in timeline.find_between(changed.start, changed.end) {
                let mut sources = losing_folder_names(&segment);
                sources.insert(updated.folder_name.clone());
                self.reassign(&segment, sources)?;
            }
        }
        self.repository.update_album(&updated)?;
        info!(folder_name, from = %previous_range, to = %new_range, "updated album dates");
        Ok(updated)
    }
}
