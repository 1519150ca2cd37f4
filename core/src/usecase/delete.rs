use tracing::{info, instrument};

use super::{losing_folder_names, AlbumLifecycle, Result};
use crate::{
    repository::{AlbumRepository, RepositoryError},
    timeline::Timeline,
};

impl<R: AlbumRepository> AlbumLifecycle<R> {
    /// Deletes an album.
    ///
    /// Unless `empty_only` is set, its media are first handed over to the albums
    /// winning its time range once it is gone. Media no other album covers stay
    /// where they are, and the deletion fails as the album is not empty.
    #[instrument(skip(self), level = "debug")]
    pub fn delete(&self, folder_name: &str, empty_only: bool) -> Result<()> {
        if !empty_only {
            let mut albums = self.repository.find_all_albums(&self.owner)?;
            let idx = albums
                .iter()
                .position(|album| album.folder_name == folder_name)
                .ok_or_else(|| RepositoryError::AlbumNotFound {
                    folder_name: folder_name.to_owned(),
                })?;
            let removed = albums.swap_remove(idx);
            let timeline = Timeline::from_unsorted(albums)?;
            for segment in timeline.find_between(removed.start, removed.end) {
                let mut sources = losing_folder_names(&segment);
                sources.insert(removed.folder_name.clone());
                self.reassign(&segment, sources)?;
            }
        }
        self.repository
            .delete_empty_album(&self.owner, folder_name)?;
        info!(folder_name, "deleted album");
        Ok(())
    }
}
