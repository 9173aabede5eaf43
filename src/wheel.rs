//! Wheel input normalization shared by the gallery and the scrollbar strip.

use iced::mouse::ScrollDelta;

/// Multiplier applied to vertical wheel motion turned sideways.
/// Below 1 so it reads slower than native horizontal scrolling.
pub const WHEEL_MULTIPLIER: f32 = 0.45;

/// Pixels per wheel line.
pub const LINE_HEIGHT: f32 = 16.0;

/// Pixels per notch for the legacy `detail` variant.
const DETAIL_NOTCH: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaMode {
    Pixel,
    Line,
    // iced has no page-sized deltas; kept for replayed browser input.
    #[allow(dead_code)]
    Page,
}

/// Raw wheel input. Positive `delta_y` means "scroll down".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelInput {
    Standard {
        delta_x: f32,
        delta_y: f32,
        mode: DeltaMode,
    },
    // The legacy encodings never come from iced; replayed browser input uses them.
    /// Signed magnitude where positive means "scroll up" (120 per notch).
    #[allow(dead_code)]
    LegacyWheelDelta(f32),
    /// Small notch count where positive means "scroll down".
    #[allow(dead_code)]
    LegacyDetail(f32),
}

impl From<ScrollDelta> for WheelInput {
    /// iced reports wheel-up as positive y, so both axes are flipped.
    fn from(delta: ScrollDelta) -> Self {
        match delta {
            ScrollDelta::Lines { x, y } => WheelInput::Standard {
                delta_x: -x,
                delta_y: -y,
                mode: DeltaMode::Line,
            },
            ScrollDelta::Pixels { x, y } => WheelInput::Standard {
                delta_x: -x,
                delta_y: -y,
                mode: DeltaMode::Pixel,
            },
        }
    }
}

/// What to do with a wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    /// Zoom gesture or nothing to do; leave the offset alone.
    Ignored,
    /// Vertical motion turned into this horizontal adjustment.
    Intercept(f32),
    /// Horizontal motion applied as-is.
    PassThrough(f32),
}

impl WheelAction {
    pub fn horizontal_delta(self) -> Option<f32> {
        match self {
            WheelAction::Ignored => None,
            WheelAction::Intercept(dx) | WheelAction::PassThrough(dx) => Some(dx),
        }
    }
}

fn mode_factor(mode: DeltaMode, viewport_height: f32) -> f32 {
    match mode {
        DeltaMode::Pixel => 1.0,
        DeltaMode::Line => LINE_HEIGHT,
        DeltaMode::Page => viewport_height,
    }
}

pub fn normalize(input: WheelInput, zoom_modifier: bool, viewport_height: f32) -> WheelAction {
    if zoom_modifier {
        return WheelAction::Ignored;
    }
    match input {
        WheelInput::Standard {
            delta_x,
            delta_y,
            mode,
        } => {
            let factor = mode_factor(mode, viewport_height);
            let (x, y) = (delta_x * factor, delta_y * factor);
            if y.abs() > x.abs() {
                WheelAction::Intercept(y * WHEEL_MULTIPLIER)
            } else if x != 0.0 {
                WheelAction::PassThrough(x)
            } else {
                WheelAction::Ignored
            }
        }
        WheelInput::LegacyWheelDelta(wheel_delta) => legacy(-wheel_delta),
        WheelInput::LegacyDetail(detail) => legacy(detail * DETAIL_NOTCH),
    }
}

fn legacy(delta_y: f32) -> WheelAction {
    if delta_y == 0.0 {
        WheelAction::Ignored
    } else {
        WheelAction::Intercept(delta_y * WHEEL_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(delta_x: f32, delta_y: f32) -> WheelInput {
        WheelInput::Standard {
            delta_x,
            delta_y,
            mode: DeltaMode::Pixel,
        }
    }

    #[test]
    fn vertical_pixels_are_damped() {
        assert_eq!(
            normalize(pixels(0.0, 100.0), false, 800.0),
            WheelAction::Intercept(45.0)
        );
    }

    #[test]
    fn zoom_modifier_is_never_intercepted() {
        assert_eq!(normalize(pixels(0.0, 100.0), true, 800.0), WheelAction::Ignored);
        assert_eq!(
            normalize(WheelInput::LegacyWheelDelta(120.0), true, 800.0),
            WheelAction::Ignored
        );
    }

    #[test]
    fn line_mode_scales_by_line_height() {
        let input = WheelInput::Standard {
            delta_x: 0.0,
            delta_y: 3.0,
            mode: DeltaMode::Line,
        };
        assert_eq!(
            normalize(input, false, 800.0),
            WheelAction::Intercept(3.0 * 16.0 * WHEEL_MULTIPLIER)
        );
    }

    #[test]
    fn page_mode_scales_by_viewport_height() {
        let input = WheelInput::Standard {
            delta_x: 0.0,
            delta_y: -1.0,
            mode: DeltaMode::Page,
        };
        assert_eq!(
            normalize(input, false, 600.0),
            WheelAction::Intercept(-600.0 * WHEEL_MULTIPLIER)
        );
    }

    #[test]
    fn horizontal_dominant_passes_through() {
        assert_eq!(
            normalize(pixels(30.0, 10.0), false, 800.0),
            WheelAction::PassThrough(30.0)
        );
        // A tie is not vertical-dominant.
        assert_eq!(
            normalize(pixels(-5.0, 5.0), false, 800.0),
            WheelAction::PassThrough(-5.0)
        );
        assert_eq!(normalize(pixels(0.0, 0.0), false, 800.0), WheelAction::Ignored);
    }

    #[test]
    fn legacy_variants_share_the_damping() {
        // One notch down in each legacy encoding.
        assert_eq!(
            normalize(WheelInput::LegacyWheelDelta(-120.0), false, 800.0),
            WheelAction::Intercept(120.0 * WHEEL_MULTIPLIER)
        );
        assert_eq!(
            normalize(WheelInput::LegacyDetail(3.0), false, 800.0),
            WheelAction::Intercept(120.0 * WHEEL_MULTIPLIER)
        );
        assert_eq!(
            normalize(WheelInput::LegacyDetail(0.0), false, 800.0),
            WheelAction::Ignored
        );
    }

    #[test]
    fn iced_deltas_are_flipped_to_scroll_down_positive() {
        let down = WheelInput::from(ScrollDelta::Lines { x: 0.0, y: -1.0 });
        assert_eq!(
            normalize(down, false, 800.0),
            WheelAction::Intercept(16.0 * WHEEL_MULTIPLIER)
        );
        let swipe = WheelInput::from(ScrollDelta::Pixels { x: -12.0, y: 2.0 });
        assert_eq!(normalize(swipe, false, 800.0), WheelAction::PassThrough(12.0));
    }
}
