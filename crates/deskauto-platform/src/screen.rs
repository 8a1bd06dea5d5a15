//! Pixel frames and the live-OS-state provider trait.

use crate::geometry::{Point, Rect};

/// A captured region of the screen.
///
/// Row-major RGBA, 4 bytes per pixel, alpha always 255 (the sources we
/// capture from have no alpha channel). Allocated fresh per capture.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Bytes per row.
    pub fn stride(&self) -> u32 {
        self.width * 4
    }

    /// Byte length of a `width x height` 32-bit buffer, or `None` for
    /// zero/negative dimensions or an overflowing product. Capture
    /// callers check this before touching any native API.
    pub fn byte_len(width: i32, height: i32) -> Option<usize> {
        if width <= 0 || height <= 0 {
            return None;
        }
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)
    }

    /// Build an RGBA frame from a top-down 32-bit BGRA buffer, forcing
    /// the alpha channel fully opaque (device captures carry none).
    pub fn from_bgra(width: u32, height: u32, bgra: &[u8]) -> Frame {
        let mut data = vec![0u8; bgra.len()];
        for (dst, src) in data.chunks_exact_mut(4).zip(bgra.chunks_exact(4)) {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = 0xFF;
        }
        Frame {
            width,
            height,
            data,
        }
    }
}

/// Live ambient OS state the drivers consult on every call.
///
/// Button-swap state, display geometry, and the cursor position are
/// user-reconfigurable at any time, so implementations must re-query
/// the OS rather than cache. Test code substitutes a deterministic
/// implementation.
pub trait SystemState {
    /// Width and height of the primary display in pixels.
    fn primary_display_size(&self) -> (i32, i32);

    /// Top-left origin of the virtual desktop relative to the primary
    /// monitor. Often negative with monitors placed left/above.
    fn virtual_desktop_offset(&self) -> Point;

    /// Size of the virtual desktop (union of all monitors).
    fn virtual_desktop_size(&self) -> (i32, i32);

    /// Whether the user has swapped the left and right mouse buttons.
    fn buttons_swapped(&self) -> bool;

    /// Bounds of the `index`-th monitor (0 = first enumerated).
    /// Out-of-range or negative indices yield `Rect::EMPTY`.
    fn display_bounds(&self, index: i32) -> Rect;

    /// Current cursor position in screen pixels.
    fn cursor_position(&self) -> Point;

    /// Move the cursor. Best-effort; the OS reports no failure here.
    fn set_cursor_position(&self, p: Point);
}

/// Whether `(x, y)` lies within the primary display.
///
/// Deliberately checks the primary display only, not the virtual
/// desktop; points on a secondary monitor report false.
pub fn on_screen(state: &dyn SystemState, x: i32, y: i32) -> bool {
    let (width, height) = state.primary_display_size();
    0 <= x && x < width && 0 <= y && y < height
}

/// Whether the whole `w x h` region anchored at `(x, y)` lies on the
/// primary display. Checks both corners, same as the per-point test.
pub fn region_on_screen(state: &dyn SystemState, x: i32, y: i32, w: i32, h: i32) -> bool {
    on_screen(state, x, y) && on_screen(state, x + w - 1, y + h - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockState;

    #[test]
    fn test_on_screen_center() {
        let state = MockState::with_display(1920, 1080);
        assert!(on_screen(&state, 960, 540));
    }

    #[test]
    fn test_on_screen_rejects_negative() {
        let state = MockState::with_display(1920, 1080);
        assert!(!on_screen(&state, -1, 540));
        assert!(!on_screen(&state, 960, -1));
    }

    #[test]
    fn test_on_screen_edges() {
        let state = MockState::with_display(1920, 1080);
        assert!(on_screen(&state, 0, 0));
        assert!(on_screen(&state, 1919, 1079));
        assert!(!on_screen(&state, 1920, 540));
        assert!(!on_screen(&state, 960, 1080));
    }

    #[test]
    fn test_byte_len_rejects_empty_and_negative() {
        assert_eq!(Frame::byte_len(0, 10), None);
        assert_eq!(Frame::byte_len(10, 0), None);
        assert_eq!(Frame::byte_len(-5, 10), None);
        assert_eq!(Frame::byte_len(10, -5), None);
        assert_eq!(Frame::byte_len(3, 2), Some(24));
    }

    #[test]
    fn test_from_bgra_swaps_channels_and_forces_alpha() {
        // one blue pixel, one red pixel, both with garbage alpha
        let bgra = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x7F];
        let frame = Frame::from_bgra(2, 1, &bgra);
        assert_eq!(frame.data, [0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0xFF]);
        assert_eq!(frame.stride(), 8);
    }

    #[test]
    fn test_region_on_screen_far_corner() {
        let state = MockState::with_display(100, 100);
        assert!(region_on_screen(&state, 0, 0, 100, 100));
        assert!(!region_on_screen(&state, 50, 50, 51, 10));
        assert!(!region_on_screen(&state, 50, 50, 10, 51));
    }
}
