use chrono::{DateTime, Utc};

use super::{
    queue::{ByPriority, ClosingKey, IndexedQueue},
    Segment,
};
use crate::model::Album;

/// Sweep-line state: albums active at the sweep position, indexed twice.
struct Sweep {
    closing: IndexedQueue<ClosingKey>,
    priority: IndexedQueue<ByPriority>,
    /// Start of the segment being accumulated, `None` while no album is active
    open_from: Option<DateTime<Utc>>,
    segments: Vec<Segment>,
}

/// `albums` must be validated: sorted by start, non-empty ranges, unique folder names.
pub(super) fn sweep(albums: &[Album]) -> Vec<Segment> {
    let mut sweep = Sweep {
        closing: IndexedQueue::new(),
        priority: IndexedQueue::new(),
        open_from: None,
        segments: Vec::new(),
    };
    for album in albums {
        sweep.close_until(Some(album.start));
        // the active set changes at album.start
        sweep.emit_until(album.start);
        sweep.open(album);
    }
    sweep.close_until(None);
    sweep.segments
}

impl Sweep {
    fn open(&mut self, album: &Album) {
        self.closing.push(ClosingKey::from(album));
        self.priority.push(ByPriority(album.clone()));
        self.open_from = Some(album.start);
    }

    /// Closes every active album ending at or before `limit` (all of them for `None`).
    fn close_until(&mut self, limit: Option<DateTime<Utc>>) {
        while let Some(head) = self.closing.peek() {
            let end = head.end;
            if limit.is_some_and(|limit| end > limit) {
                break;
            }
            self.emit_until(end);
            if let Some(closed) = self.closing.pop() {
                self.priority.remove(&closed.folder_name);
            }
            if self.priority.is_empty() {
                self.open_from = None;
            }
        }
    }

    /// Appends the open segment up to `to`, snapshotting the active albums, and
    /// opens the next one at `to`.
    fn emit_until(&mut self, to: DateTime<Utc>) {
        let Some(from) = self.open_from else {
            return;
        };
        if from >= to {
            return;
        }
        self.segments.push(Segment {
            from,
            to,
            albums: self.priority.iter().map(|key| key.0.clone()).collect(),
        });
        self.open_from = Some(to);
    }
}
