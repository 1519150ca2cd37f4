//! Partition of the time axis into segments of constant album membership.
//!
//! A [`Timeline`] is built once from a snapshot of albums and never mutated
//! afterwards. Every instant covered by at least one album belongs to exactly
//! one [`Segment`], whose albums are sorted winner first. Instants covered by
//! no album fall into gaps between segments and have no winner.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::collections::HashSet;
use thiserror::Error;
use tracing::instrument;

use crate::model::{Album, TimeRange};

mod builder;
mod query;
mod queue;
#[cfg(test)]
pub(crate) mod test;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("album {folder_name} ends at {end} which is not after its start {start}")]
    InvalidRange {
        folder_name: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("albums must be sorted by start date: {next} starts before {previous}")]
    NotSortedByStart { previous: String, next: String },
    #[error("album folder {0} appears more than once")]
    DuplicateFolderName(String),
}

/// Maximal sub-range `[from, to)` during which the set of active albums is constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    /// Albums containing `[from, to)`, priority winner first
    pub albums: Vec<Album>,
}

impl Segment {
    pub fn winner(&self) -> Option<&Album> {
        self.albums.first()
    }
}

/// Query result, detached from the [`Timeline`] it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrioritySegment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Priority winner first
    pub albums: Vec<Album>,
}

impl PrioritySegment {
    pub fn winner(&self) -> Option<&Album> {
        self.albums.first()
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    albums: Vec<Album>,
    segments: Vec<Segment>,
}

impl Timeline {
    /// Builds the timeline of `albums`, which must be sorted by start date.
    #[instrument(skip(albums), fields(albums = albums.len()), level = "debug")]
    pub fn build(albums: Vec<Album>) -> Result<Timeline, TimelineError> {
        validate(&albums)?;
        let segments = builder::sweep(&albums);
        Ok(Timeline { albums, segments })
    }

    /// Sorts `albums` by start date (then folder name) and builds the timeline.
    pub fn from_unsorted(mut albums: Vec<Album>) -> Result<Timeline, TimelineError> {
        albums.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| a.folder_name.cmp(&b.folder_name))
        });
        Timeline::build(albums)
    }

    /// New timeline with `album` added, `self` is left untouched.
    pub fn with_album(&self, album: Album) -> Result<Timeline, TimelineError> {
        let mut albums = self.albums.clone();
        albums.push(album);
        Timeline::from_unsorted(albums)
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

fn validate(albums: &[Album]) -> Result<(), TimelineError> {
    if let Some(album) = albums.iter().find(|album| album.end <= album.start) {
        return Err(TimelineError::InvalidRange {
            folder_name: album.folder_name.clone(),
            start: album.start,
            end: album.end,
        });
    }
    if let Some((previous, next)) = albums
        .iter()
        .tuple_windows()
        .find(|(previous, next)| next.start < previous.start)
    {
        return Err(TimelineError::NotSortedByStart {
            previous: previous.folder_name.clone(),
            next: next.folder_name.clone(),
        });
    }
    let mut seen: HashSet<&str> = HashSet::with_capacity(albums.len());
    for album in albums {
        if !seen.insert(&album.folder_name) {
            return Err(TimelineError::DuplicateFolderName(album.folder_name.clone()));
        }
    }
    Ok(())
}
