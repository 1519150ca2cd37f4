use tracing::{info, instrument};

use super::{AlbumLifecycle, CatalogError, Result};
use crate::{
    model::Album,
    repository::{AlbumRepository, UpdateMediaFilter},
};

impl<R: AlbumRepository> AlbumLifecycle<R> {
    /// Renames an album, moving it to a folder derived from `new_name` when
    /// `rename_folder` is set.
    ///
    /// The dates are kept so the new folder wins exactly where the old one did:
    /// all of its media move at once without looking at the timeline.
    #[instrument(skip(self), level = "debug")]
    pub fn rename(&self, folder_name: &str, new_name: &str, rename_folder: bool) -> Result<Album> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CatalogError::BlankName);
        }
        let album = self.repository.find_album(&self.owner, folder_name)?;
        let new_folder_name = if rename_folder {
            self.folder_name_for(new_name, album.start)?
        } else {
            album.folder_name.clone()
        };

        if new_folder_name == album.folder_name {
            let renamed = Album {
                name: new_name.to_owned(),
                ..album
            };
            self.repository.update_album(&renamed)?;
            info!(folder_name, name = new_name, "renamed album");
            return Ok(renamed);
        }

        let renamed = Album {
            folder_name: new_folder_name,
            name: new_name.to_owned(),
            ..album
        };
        self.repository.insert_album(&renamed)?;
        let transaction = self.repository.update_medias(
            &self.owner,
            &UpdateMediaFilter::new().with_album(folder_name),
            &renamed.folder_name,
        )?;
        self.repository
            .delete_empty_album(&self.owner, folder_name)?;
        info!(
            folder_name,
            new_folder_name = %renamed.folder_name,
            moved = transaction.moved_count,
            "renamed album and its folder"
        );
        Ok(renamed)
    }
}
