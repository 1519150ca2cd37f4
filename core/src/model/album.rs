use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::TimeRange;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Album {
    pub owner: String,
    /// Unique (per owner) and immutable, the key media are attached to
    pub folder_name: String,
    pub name: String,
    pub start: DateTime<Utc>,
    /// Exclusive
    pub end: DateTime<Utc>,
}

impl Album {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date < self.end
    }

    /// Total order between albums competing for the same instant.
    ///
    /// `Ordering::Less` means `self` wins over `other`: shorter albums first,
    /// then the later start, then the later end, then the smaller name and
    /// finally the smaller folder name.
    pub fn priority_cmp(&self, other: &Album) -> Ordering {
        self.duration()
            .cmp(&other.duration())
            .then_with(|| other.start.cmp(&self.start))
            .then_with(|| other.end.cmp(&self.end))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.folder_name.cmp(&other.folder_name))
    }
}
