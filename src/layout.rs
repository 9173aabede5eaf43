use iced::Size;

/// Lower bound on the gallery height.
pub const MIN_AVAILABLE_HEIGHT: f32 = 160.0;
/// Vertical space kept free below the gallery for the scrollbar strip and padding.
pub const PADDING_RESERVE: f32 = 24.0;
/// Masthead height assumed until the header reports its measured size.
pub const HEADER_HEIGHT: f32 = 112.0;

/// Horizontal padding at both ends of the gallery track.
pub const EDGE_MARGIN: f32 = 40.0;
/// Slot between two tiles, holding the dot marker.
pub const TILE_GAP: f32 = 56.0;
/// Caption line under each image.
pub const CAPTION_HEIGHT: f32 = 28.0;
/// Aspect used while an image is loading or failed.
pub const PLACEHOLDER_ASPECT: f32 = 4.0 / 3.0;
pub const BAR_HEIGHT: f32 = 10.0;

const MIN_IMAGE_HEIGHT: f32 = 48.0;

/// `max(160, viewport - header - 24)`.
pub fn available_height(viewport_height: f32, header_height: f32) -> f32 {
    (viewport_height - header_height - PADDING_RESERVE).max(MIN_AVAILABLE_HEIGHT)
}

/// Derived layout owned by the view state and handed to the widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub viewport: Size,
    pub header_height: f32,
    pub available_height: f32,
}

impl LayoutState {
    pub fn new(viewport: Size) -> Self {
        let mut layout = Self {
            viewport,
            header_height: HEADER_HEIGHT,
            available_height: 0.0,
        };
        layout.recompute();
        layout
    }

    pub fn recompute(&mut self) {
        self.available_height = available_height(self.viewport.height, self.header_height);
    }

    /// Store a measured header height. Returns whether anything changed.
    pub fn set_header_height(&mut self, height: f32) -> bool {
        if (height - self.header_height).abs() < 0.5 {
            return false;
        }
        self.header_height = height.max(0.0);
        self.recompute();
        true
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.recompute();
    }

    /// Height of the image part of a tile.
    pub fn image_height(&self) -> f32 {
        (self.available_height - CAPTION_HEIGHT).max(MIN_IMAGE_HEIGHT)
    }
}

/// Horizontal placement of one tile in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileExtent {
    pub x: f32,
    pub width: f32,
}

impl TileExtent {
    pub fn end(&self) -> f32 {
        self.x + self.width
    }

    /// Fraction of the tile inside `[start, start + width)`.
    pub fn visible_ratio(&self, start: f32, width: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        let overlap = self.end().min(start + width) - self.x.max(start);
        (overlap / self.width).clamp(0.0, 1.0)
    }
}

/// Geometry of the whole gallery row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub tiles: Vec<TileExtent>,
    pub content_width: f32,
    pub tile_height: f32,
}

impl Track {
    /// Lay tiles out left to right from their aspect ratios.
    pub fn measure(aspects: impl IntoIterator<Item = f32>, image_height: f32) -> Self {
        let mut tiles = Vec::new();
        let mut x = EDGE_MARGIN;
        for (i, aspect) in aspects.into_iter().enumerate() {
            if i > 0 {
                x += TILE_GAP;
            }
            let aspect = if aspect > 0.0 { aspect } else { PLACEHOLDER_ASPECT };
            let width = (image_height * aspect).round();
            tiles.push(TileExtent { x, width });
            x += width;
        }
        Self {
            tiles,
            content_width: x + EDGE_MARGIN,
            tile_height: image_height + CAPTION_HEIGHT,
        }
    }

    /// Tile under a point given in content coordinates.
    pub fn hit(&self, content_x: f32, y: f32) -> Option<usize> {
        if y < 0.0 || y > self.tile_height {
            return None;
        }
        self.tiles
            .iter()
            .position(|t| content_x >= t.x && content_x < t.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_height_subtracts_header_and_reserve() {
        assert_eq!(available_height(800.0, 112.0), 664.0);
    }

    #[test]
    fn available_height_has_a_floor() {
        assert_eq!(available_height(200.0, 112.0), MIN_AVAILABLE_HEIGHT);
        assert_eq!(available_height(0.0, 112.0), MIN_AVAILABLE_HEIGHT);
    }

    #[test]
    fn resize_recomputes() {
        let mut layout = LayoutState::new(Size::new(1280.0, 800.0));
        assert_eq!(layout.available_height, 664.0);
        layout.resize(Size::new(1280.0, 600.0));
        assert_eq!(layout.available_height, 464.0);
    }

    #[test]
    fn measured_header_replaces_estimate() {
        let mut layout = LayoutState::new(Size::new(1280.0, 800.0));
        assert!(layout.set_header_height(144.0));
        assert_eq!(layout.available_height, 632.0);
        assert!(!layout.set_header_height(144.2));
        assert_eq!(layout.header_height, 144.0);
    }

    #[test]
    fn measure_places_tiles_with_gaps() {
        let track = Track::measure([2.0, 0.5], 100.0);
        assert_eq!(track.tiles[0], TileExtent { x: 40.0, width: 200.0 });
        assert_eq!(track.tiles[1], TileExtent { x: 296.0, width: 50.0 });
        assert_eq!(track.content_width, 386.0);
        assert_eq!(track.tile_height, 100.0 + CAPTION_HEIGHT);
    }

    #[test]
    fn unknown_aspect_uses_placeholder() {
        let track = Track::measure([0.0], 300.0);
        assert_eq!(track.tiles[0].width, 400.0);
    }

    #[test]
    fn visible_ratio_partial_and_outside() {
        let tile = TileExtent { x: 100.0, width: 200.0 };
        assert_eq!(tile.visible_ratio(0.0, 1000.0), 1.0);
        assert_eq!(tile.visible_ratio(250.0, 1000.0), 0.25);
        assert_eq!(tile.visible_ratio(0.0, 150.0), 0.25);
        assert_eq!(tile.visible_ratio(400.0, 100.0), 0.0);
    }

    #[test]
    fn hit_maps_points_to_tiles() {
        let track = Track::measure([1.0, 1.0], 100.0);
        assert_eq!(track.hit(50.0, 10.0), Some(0));
        // Inside the gap between tiles.
        assert_eq!(track.hit(150.0, 10.0), None);
        assert_eq!(track.hit(200.0, 10.0), Some(1));
        // Below the caption.
        assert_eq!(track.hit(50.0, 500.0), None);
    }
}
