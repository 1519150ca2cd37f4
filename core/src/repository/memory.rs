use chrono::{DateTime, Utc};
use eyre::eyre;
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};
use tracing::instrument;

use super::{
    AlbumRepository, MoveTransaction, RepositoryError, Result, UpdateMediaFilter,
};
use crate::model::{Album, MediaId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: MediaId,
    pub owner: String,
    pub folder_name: String,
    pub date_time: DateTime<Utc>,
}

/// A bulk move as recorded by [`InMemoryRepository::update_medias`], the
/// instruction a housekeeping process applies to the archived files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMove {
    pub transaction_id: String,
    pub owner: String,
    pub filter: UpdateMediaFilter,
    pub target_folder_name: String,
    pub media_ids: Vec<MediaId>,
}

#[derive(Debug, Default)]
struct State {
    /// keyed by (owner, folder_name)
    albums: BTreeMap<(String, String), Album>,
    medias: Vec<Media>,
    moves: Vec<RecordedMove>,
    last_media_id: i64,
}

/// [`AlbumRepository`] keeping everything in memory, each call atomic.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Other(eyre!("in-memory repository lock poisoned")))
    }

    /// Indexes a media into `folder_name`, which does not need to exist.
    pub fn add_media(
        &self,
        owner: &str,
        folder_name: &str,
        date_time: DateTime<Utc>,
    ) -> Result<MediaId> {
        let mut state = self.lock()?;
        state.last_media_id += 1;
        let id = MediaId(state.last_media_id);
        state.medias.push(Media {
            id,
            owner: owner.to_owned(),
            folder_name: folder_name.to_owned(),
            date_time,
        });
        Ok(id)
    }

    /// Media currently in `folder_name`, ordered by date
    pub fn medias_in(&self, owner: &str, folder_name: &str) -> Result<Vec<Media>> {
        let state = self.lock()?;
        let mut medias: Vec<Media> = state
            .medias
            .iter()
            .filter(|media| media.owner == owner && media.folder_name == folder_name)
            .cloned()
            .collect();
        medias.sort_by_key(|media| (media.date_time, media.id));
        Ok(medias)
    }

    /// Every move recorded so far, oldest first
    pub fn transactions(&self) -> Result<Vec<RecordedMove>> {
        Ok(self.lock()?.moves.clone())
    }
}

impl AlbumRepository for InMemoryRepository {
    fn find_all_albums(&self, owner: &str) -> Result<Vec<Album>> {
        let state = self.lock()?;
        Ok(state
            .albums
            .values()
            .filter(|album| album.owner == owner)
            .cloned()
            .collect())
    }

    fn find_album(&self, owner: &str, folder_name: &str) -> Result<Album> {
        let state = self.lock()?;
        state
            .albums
            .get(&(owner.to_owned(), folder_name.to_owned()))
            .cloned()
            .ok_or_else(|| RepositoryError::AlbumNotFound {
                folder_name: folder_name.to_owned(),
            })
    }

    #[instrument(skip(self), level = "trace")]
    fn insert_album(&self, album: &Album) -> Result<()> {
        let mut state = self.lock()?;
        let key = (album.owner.clone(), album.folder_name.clone());
        if state.albums.contains_key(&key) {
            return Err(RepositoryError::AlbumAlreadyExists {
                folder_name: album.folder_name.clone(),
            });
        }
        state.albums.insert(key, album.clone());
        Ok(())
    }

    #[instrument(skip(self), level = "trace")]
    fn update_album(&self, album: &Album) -> Result<()> {
        let mut state = self.lock()?;
        match state
            .albums
            .get_mut(&(album.owner.clone(), album.folder_name.clone()))
        {
            Some(stored) => {
                *stored = album.clone();
                Ok(())
            }
            None => Err(RepositoryError::AlbumNotFound {
                folder_name: album.folder_name.clone(),
            }),
        }
    }

    #[instrument(skip(self), level = "trace")]
    fn delete_empty_album(&self, owner: &str, folder_name: &str) -> Result<()> {
        let mut state = self.lock()?;
        let key = (owner.to_owned(), folder_name.to_owned());
        if !state.albums.contains_key(&key) {
            return Err(RepositoryError::AlbumNotFound {
                folder_name: folder_name.to_owned(),
            });
        }
        let media_count = state
            .medias
            .iter()
            .filter(|media| media.owner == owner && media.folder_name == folder_name)
            .count();
        if media_count > 0 {
            return Err(RepositoryError::AlbumNotEmpty {
                folder_name: folder_name.to_owned(),
                media_count,
            });
        }
        state.albums.remove(&key);
        Ok(())
    }

    #[instrument(skip(self), level = "trace")]
    fn update_medias(
        &self,
        owner: &str,
        filter: &UpdateMediaFilter,
        target_folder_name: &str,
    ) -> Result<MoveTransaction> {
        if filter.album_folder_names.is_empty() {
            return Err(RepositoryError::Other(eyre!(
                "media filter must select at least one album"
            )));
        }
        let mut state = self.lock()?;
        let mut media_ids = Vec::new();
        for media in state.medias.iter_mut() {
            if media.owner == owner
                && media.folder_name != target_folder_name
                && filter.matches(&media.folder_name, media.date_time)
            {
                media.folder_name = target_folder_name.to_owned();
                media_ids.push(media.id);
            }
        }
        let transaction_id = format!("tx-{:06}", state.moves.len() + 1);
        let moved_count = media_ids.len();
        state.moves.push(RecordedMove {
            transaction_id: transaction_id.clone(),
            owner: owner.to_owned(),
            filter: filter.clone(),
            target_folder_name: target_folder_name.to_owned(),
            media_ids,
        });
        Ok(MoveTransaction {
            transaction_id,
            moved_count,
        })
    }
}
