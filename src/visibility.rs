//! Tracks which gallery tile is most visible inside the gallery viewport.
//!
//! Tiles are observed at fixed thresholds. A notification batch only carries the
//! tiles whose threshold crossing changed since the previous batch; the first
//! batch after subscribing carries every tile.

use crate::layout::TileExtent;

pub const THRESHOLDS: [f32; 3] = [0.25, 0.5, 0.75];

/// One observation inside a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub index: usize,
    pub ratio: f32,
    pub intersecting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossing {
    intersecting: bool,
    threshold_index: usize,
}

impl Crossing {
    fn of(ratio: f32) -> Self {
        Self {
            intersecting: ratio > 0.0,
            threshold_index: THRESHOLDS.iter().filter(|t| ratio >= **t).count(),
        }
    }
}

/// Live subscription over a set of tiles. Dropping it unsubscribes.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    last: Vec<Option<Crossing>>,
}

impl VisibilityTracker {
    pub fn observe(count: usize) -> Self {
        Self {
            last: vec![None; count],
        }
    }

    /// Entries whose crossing changed for the viewport `[start, start + width)`.
    pub fn batch(&mut self, tiles: &[TileExtent], start: f32, width: f32) -> Vec<Entry> {
        if self.last.len() != tiles.len() {
            self.last.resize(tiles.len(), None);
        }
        let mut entries = Vec::new();
        for (index, (tile, last)) in tiles.iter().zip(self.last.iter_mut()).enumerate() {
            let ratio = tile.visible_ratio(start, width);
            let crossing = Crossing::of(ratio);
            if *last != Some(crossing) {
                *last = Some(crossing);
                entries.push(Entry {
                    index,
                    ratio,
                    intersecting: crossing.intersecting,
                });
            }
        }
        entries
    }

    /// Run one notification and return the tile whose title should become active.
    pub fn notify(&mut self, tiles: &[TileExtent], start: f32, width: f32) -> Option<usize> {
        select_best(&self.batch(tiles, start, width))
    }
}

/// The intersecting entry with the strictly largest ratio; the first one wins ties.
pub fn select_best(entries: &[Entry]) -> Option<usize> {
    let mut best: Option<&Entry> = None;
    for entry in entries.iter().filter(|e| e.intersecting) {
        if best.is_none_or(|b| entry.ratio > b.ratio) {
            best = Some(entry);
        }
    }
    best.map(|e| e.index)
}
