//! One canonical horizontal offset mirrored onto two scroll surfaces.
//!
//! The gallery and the scrollbar strip both report their offset when they move.
//! Programmatic writes are remembered per surface so the echo they produce is
//! absorbed instead of being mirrored back.

/// Offsets closer than this are treated as equal.
const ECHO_TOLERANCE: f32 = 0.5;

/// Pointer travel under which a press/release pair counts as a click.
pub const CLICK_SLOP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Gallery,
    Bar,
}

impl Surface {
    fn index(self) -> usize {
        match self {
            Surface::Gallery => 0,
            Surface::Bar => 1,
        }
    }

    pub fn other(self) -> Surface {
        match self {
            Surface::Gallery => Surface::Bar,
            Surface::Bar => Surface::Gallery,
        }
    }
}

/// Programmatic writes needed to bring the surfaces to the canonical offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyncWrites {
    pub gallery: Option<f32>,
    pub bar: Option<f32>,
}

impl SyncWrites {
    fn set(&mut self, surface: Surface, x: f32) {
        match surface {
            Surface::Gallery => self.gallery = Some(x),
            Surface::Bar => self.bar = Some(x),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gallery.is_none() && self.bar.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Surface, f32)> + '_ {
        [
            self.gallery.map(|x| (Surface::Gallery, x)),
            self.bar.map(|x| (Surface::Bar, x)),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Default)]
pub struct ScrollBridge {
    offset: f32,
    content_width: f32,
    viewport_width: f32,
    pending: [Option<f32>; 2],
    mirror_writes: usize,
}

impl ScrollBridge {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Full scrollable width; the strip's spacer is sized to this.
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Number of user-driven scrolls mirrored onto the other surface.
    pub fn mirror_writes(&self) -> usize {
        self.mirror_writes
    }

    fn write(&mut self, writes: &mut SyncWrites, surface: Surface, x: f32) {
        self.pending[surface.index()] = Some(x);
        writes.set(surface, x);
    }

    fn write_both(&mut self, x: f32) -> SyncWrites {
        let mut writes = SyncWrites::default();
        self.write(&mut writes, Surface::Gallery, x);
        self.write(&mut writes, Surface::Bar, x);
        writes
    }

    /// Update the measured extent; re-clamps the offset if it shrank.
    pub fn set_extent(&mut self, content_width: f32, viewport_width: f32) -> SyncWrites {
        self.content_width = content_width.max(0.0);
        self.viewport_width = viewport_width.max(0.0);
        let clamped = self.offset.clamp(0.0, self.max_offset());
        if (clamped - self.offset).abs() > f32::EPSILON {
            self.offset = clamped;
            return self.write_both(clamped);
        }
        SyncWrites::default()
    }

    pub fn scroll_to(&mut self, x: f32) -> SyncWrites {
        let x = x.clamp(0.0, self.max_offset());
        if (x - self.offset).abs() <= f32::EPSILON {
            return SyncWrites::default();
        }
        self.offset = x;
        self.write_both(x)
    }

    pub fn scroll_by(&mut self, dx: f32) -> SyncWrites {
        self.scroll_to(self.offset + dx)
    }

    /// Smallest scroll that shows `[start, end)` with `margin` to spare.
    /// The leading edge wins when the range is wider than the viewport.
    pub fn reveal(&mut self, start: f32, end: f32, margin: f32) -> SyncWrites {
        if start - margin < self.offset {
            self.scroll_to(start - margin)
        } else if end + margin > self.offset + self.viewport_width {
            self.scroll_to(end + margin - self.viewport_width)
        } else {
            SyncWrites::default()
        }
    }

    /// A surface reported its offset. Echoes of our own writes are absorbed;
    /// anything else becomes canonical and is mirrored to the other surface.
    pub fn surface_scrolled(&mut self, surface: Surface, x: f32) -> SyncWrites {
        let slot = surface.index();
        if let Some(expected) = self.pending[slot].take() {
            if (expected - x).abs() <= ECHO_TOLERANCE {
                return SyncWrites::default();
            }
        }
        if (x - self.offset).abs() <= ECHO_TOLERANCE {
            return SyncWrites::default();
        }

        self.offset = x.max(0.0);
        self.mirror_writes += 1;
        let mut writes = SyncWrites::default();
        self.write(&mut writes, surface.other(), self.offset);
        writes
    }
}

/// Click-and-drag panning state, alive between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPan {
    start_x: f32,
    start_offset: f32,
    travel: f32,
}

impl DragPan {
    pub fn begin(pointer_x: f32, offset: f32) -> Self {
        Self {
            start_x: pointer_x,
            start_offset: offset,
            travel: 0.0,
        }
    }

    /// Offset for the current pointer position: dragging right scrolls left.
    pub fn offset_at(&mut self, pointer_x: f32) -> f32 {
        let walk = pointer_x - self.start_x;
        self.travel = self.travel.max(walk.abs());
        self.start_offset - walk
    }

    pub fn is_click(&self) -> bool {
        self.travel < CLICK_SLOP
    }
}
