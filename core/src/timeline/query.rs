use chrono::{DateTime, Utc};

use super::{PrioritySegment, Segment, Timeline};
use crate::model::Album;

impl Timeline {
    /// Album media dated `date` belong to, `None` if no album covers it.
    pub fn find_at(&self, date: DateTime<Utc>) -> Option<&Album> {
        let idx = self.segments.partition_point(|segment| segment.to <= date);
        self.segments
            .get(idx)?
            .albums
            .iter()
            .find(|album| album.contains(date))
    }

    /// Segments overlapping `[start, end)`, clipped to it. Gaps yield nothing.
    pub fn find_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<PrioritySegment> {
        if end <= start {
            return Vec::new();
        }
        let first = self.segments.partition_point(|segment| segment.to <= start);
        self.segments[first..]
            .iter()
            .take_while(|segment| segment.from < end)
            .map(|segment| priority_segment(segment, segment.from.max(start), segment.to.min(end)))
            .collect()
    }

    /// Segments currently won by the album stored in `folder_name`.
    pub fn find_for_album(&self, folder_name: &str) -> Vec<PrioritySegment> {
        self.segments
            .iter()
            .filter(|segment| {
                segment
                    .winner()
                    .is_some_and(|winner| winner.folder_name == folder_name)
            })
            .map(|segment| priority_segment(segment, segment.from, segment.to))
            .collect()
    }
}

fn priority_segment(segment: &Segment, start: DateTime<Utc>, end: DateTime<Utc>) -> PrioritySegment {
    let mut albums = segment.albums.clone();
    albums.sort_by(|a, b| a.priority_cmp(b));
    PrioritySegment { start, end, albums }
}
