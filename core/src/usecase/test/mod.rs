use chrono::{DateTime, Utc};
use claims::assert_ok;

use super::AlbumLifecycle;
use crate::{
    model::{Album, TimeRange},
    repository::{
        memory::InMemoryRepository, AlbumRepository, MoveTransaction, RepositoryError,
        UpdateMediaFilter,
    },
    timeline::Timeline,
};

pub use crate::timeline::test::{album, christmas_fixture, date};


pub const OWNER: &str = "tony@stark.com";

/// Move as seen by the housekeeping: time window, source folders, target folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub range: Option<TimeRange>,
    pub sources: Vec<String>,
    pub target: String,
}

pub fn moving(range: Option<(&str, &str)>, sources: &[&str], target: &str) -> Move {
    Move {
        range: range.map(|(start, end)| TimeRange::new(date(start), date(end))),
        sources: sources.iter().map(|s| s.to_string()).collect(),
        target: target.to_owned(),
    }
}

/// Lifecycle over an in-memory repository holding `albums` and media given
/// as `(folder_name, date)`.
pub fn lifecycle_with(
    albums: &[Album],
    medias: &[(&str, &str)],
) -> AlbumLifecycle<InMemoryRepository> {
    let repository = InMemoryRepository::new();
    for album in albums {
        assert_ok!(repository.insert_album(album));
    }
    for (folder_name, at) in medias {
        let _ = assert_ok!(repository.add_media(OWNER, folder_name, date(at)));
    }
    AlbumLifecycle::new(repository, OWNER)
}

pub fn moves(lifecycle: &AlbumLifecycle<InMemoryRepository>) -> Vec<Move> {
    assert_ok!(lifecycle.repository().transactions())
        .into_iter()
        .map(|recorded| Move {
            range: recorded.filter.time_range,
            sources: recorded.filter.album_folder_names.into_iter().collect(),
            target: recorded.target_folder_name,
        })
        .collect()
}

pub fn media_dates(
    lifecycle: &AlbumLifecycle<InMemoryRepository>,
    folder_name: &str,
) -> Vec<DateTime<Utc>> {
    assert_ok!(lifecycle.repository().medias_in(OWNER, folder_name))
        .into_iter()
        .map(|media| media.date_time)
        .collect()
}

pub fn dates(dates: &[&str]) -> Vec<DateTime<Utc>> {
    dates.iter().map(|d| date(d)).collect()
}

pub fn current_timeline(lifecycle: &AlbumLifecycle<InMemoryRepository>) -> Timeline {
    let albums = assert_ok!(lifecycle.repository().find_all_albums(OWNER));
    assert_ok!(Timeline::from_unsorted(albums))
}

/// Delegates to an in-memory repository, failing every media update after
/// the first `allowed_updates`.
pub struct FailingRepository {
    pub inner: InMemoryRepository,
    pub allowed_updates: usize,
    pub updates: std::sync::atomic::AtomicUsize,
}

impl AlbumRepository for FailingRepository {
    fn find_all_albums(&self, owner: &str) -> crate::repository::Result<Vec<Album>> {
        self.inner.find_all_albums(owner)
    }

    fn find_album(&self, owner: &str, folder_name: &str) -> crate::repository::Result<Album> {
        self.inner.find_album(owner, folder_name)
    }

    fn insert_album(&self, album: &Album) -> crate::repository::Result<()> {
        self.inner.insert_album(album)
    }

    fn update_album(&self, album: &Album) -> crate::repository::Result<()> {
        self.inner.update_album(album)
    }

    fn delete_empty_album(&self, owner: &str, folder_name: &str) -> crate::repository::Result<()> {
        self.inner.delete_empty_album(owner, folder_name)
    }

    fn update_medias(
        &self,
        owner: &str,
        filter: &UpdateMediaFilter,
        target_folder_name: &str,
    ) -> crate::repository::Result<MoveTransaction> {
        let done = self
            .updates
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if done >= self.allowed_updates {
            return Err(RepositoryError::Other(eyre::eyre!("storage unavailable")));
        }
        self.inner.update_medias(owner, filter, target_folder_name)
    }
}
