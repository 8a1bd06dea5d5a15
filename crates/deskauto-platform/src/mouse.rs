//! Mouse driver: button normalization, clicks, scrolling, cursor
//! movement, and smooth drags. All coordinate math runs against the
//! live primary-display size so behavior tracks display reconfiguration
//! between calls.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::InputError;
use crate::geometry::{self, lerp, Point};
use crate::input::{ButtonAction, MouseButton, MouseSink, WheelAxis};
use crate::screen::SystemState;

/// One wheel notch in raw OS wheel units.
pub const WHEEL_DELTA: i32 = 120;

/// Drags at or under this duration jump straight to the target.
const MIN_DRAG_DURATION: f64 = 0.1;

/// Floor on the per-step sleep during an interpolated drag.
const MIN_DRAG_SLEEP: f64 = 0.001;

pub struct Mouse {
    state: Box<dyn SystemState>,
    sink: Box<dyn MouseSink>,
}

impl Mouse {
    pub fn new(state: Box<dyn SystemState>, sink: Box<dyn MouseSink>) -> Self {
        Self { state, sink }
    }

    /// Resolve a logical button to a physical one. Primary/Secondary
    /// re-query the OS swap setting on every call rather than caching,
    /// so the result tracks live user settings.
    fn normalize(&self, button: MouseButton) -> Result<MouseButton, InputError> {
        match button {
            MouseButton::Left
            | MouseButton::Middle
            | MouseButton::Right
            | MouseButton::X1
            | MouseButton::X2 => Ok(button),
            MouseButton::Primary => {
                if self.state.buttons_swapped() {
                    Ok(MouseButton::Right)
                } else {
                    Ok(MouseButton::Left)
                }
            }
            MouseButton::Secondary => {
                if self.state.buttons_swapped() {
                    Ok(MouseButton::Left)
                } else {
                    Ok(MouseButton::Right)
                }
            }
        }
    }

    /// Convert pixel coordinates to the 0..=65535 absolute space,
    /// against the primary-display size at call time.
    fn to_absolute(&self, x: i32, y: i32) -> (i32, i32) {
        let (width, height) = self.state.primary_display_size();
        let nx = (x as i64 * 65535 / (width - 1).max(1) as i64) as i32;
        let ny = (y as i64 * 65535 / (height - 1).max(1) as i64) as i32;
        (nx, ny)
    }

    /// Press the button down at `(x, y)`. Emission is best-effort;
    /// only an unrecognized button is reported.
    pub fn mouse_down(&self, button: MouseButton, x: i32, y: i32) -> Result<(), InputError> {
        let button = self.normalize(button)?;
        let pos = self.to_absolute(x, y);
        self.sink.button(button, ButtonAction::Press, pos);
        Ok(())
    }

    /// Release the button at `(x, y)`.
    pub fn mouse_up(&self, button: MouseButton, x: i32, y: i32) -> Result<(), InputError> {
        let button = self.normalize(button)?;
        let pos = self.to_absolute(x, y);
        self.sink.button(button, ButtonAction::Release, pos);
        Ok(())
    }

    /// `clicks` down+up pairs at `(x, y)`, cursor relocating before
    /// each. Restricted to the three main buttons.
    pub fn click_at(
        &self,
        button: MouseButton,
        x: i32,
        y: i32,
        clicks: u32,
    ) -> Result<(), InputError> {
        match button {
            MouseButton::Left | MouseButton::Right | MouseButton::Middle => {}
            other => return Err(InputError::UnsupportedButton(other)),
        }
        let pos = self.to_absolute(x, y);
        self.sink.click(button, pos, clicks);
        Ok(())
    }

    pub fn click(&self, button: MouseButton, x: i32, y: i32) -> Result<(), InputError> {
        self.click_at(button, x, y, 1)
    }

    pub fn double_click(&self, button: MouseButton, x: i32, y: i32) -> Result<(), InputError> {
        self.click_at(button, x, y, 2)
    }

    pub fn triple_click(&self, button: MouseButton, x: i32, y: i32) -> Result<(), InputError> {
        self.click_at(button, x, y, 3)
    }

    pub fn left_click(&self, x: i32, y: i32) -> Result<(), InputError> {
        self.click(MouseButton::Left, x, y)
    }

    pub fn right_click(&self, x: i32, y: i32) -> Result<(), InputError> {
        self.click(MouseButton::Right, x, y)
    }

    pub fn middle_click(&self, x: i32, y: i32) -> Result<(), InputError> {
        self.click(MouseButton::Middle, x, y)
    }

    /// Click with the logical primary button (left unless swapped).
    pub fn primary_click(&self, x: i32, y: i32) -> Result<(), InputError> {
        let button = self.normalize(MouseButton::Primary)?;
        self.click(button, x, y)
    }

    /// Click with the logical secondary button (right unless swapped).
    pub fn secondary_click(&self, x: i32, y: i32) -> Result<(), InputError> {
        let button = self.normalize(MouseButton::Secondary)?;
        self.click(button, x, y)
    }

    /// Vertical scroll of `notches` wheel notches (120 units each).
    pub fn scroll(&self, x: i32, y: i32, notches: i32) {
        let pos = self.clamp_and_convert(x, y);
        self.sink.wheel(WheelAxis::Vertical, pos, notches * WHEEL_DELTA);
    }

    pub fn vertical_scroll(&self, x: i32, y: i32, notches: i32) {
        self.scroll(x, y, notches);
    }

    /// Vertical scroll with the caller's exact wheel delta, unscaled.
    pub fn scroll_raw(&self, x: i32, y: i32, delta: i32) {
        let pos = self.clamp_and_convert(x, y);
        self.sink.wheel(WheelAxis::Vertical, pos, delta);
    }

    /// Horizontal scroll; the delta is passed through unscaled.
    pub fn horizontal_scroll(&self, x: i32, y: i32, delta: i32) {
        let pos = self.clamp_and_convert(x, y);
        self.sink.wheel(WheelAxis::Horizontal, pos, delta);
    }

    fn clamp_and_convert(&self, x: i32, y: i32) -> (i32, i32) {
        let (width, height) = self.state.primary_display_size();
        let p = geometry::clamp_to_display(Point::new(x, y), width, height);
        self.to_absolute(p.x, p.y)
    }

    /// Current cursor position in screen pixels.
    pub fn position(&self) -> Point {
        self.state.cursor_position()
    }

    pub fn set_cursor_position(&self, x: i32, y: i32) {
        self.state.set_cursor_position(Point::new(x, y));
    }

    /// Move the cursor by `(dx, dy)` from its current position,
    /// clamped into the primary-display bounds.
    pub fn move_by(&self, dx: i32, dy: i32) {
        let current = self.state.cursor_position();
        let (width, height) = self.state.primary_display_size();
        let target = geometry::clamp_to_display(
            Point::new(current.x + dx, current.y + dy),
            width,
            height,
        );
        self.state.set_cursor_position(target);
    }

    /// Press the button at the current position, sweep the cursor to
    /// `(x, y)` over `duration` seconds, and release.
    ///
    /// A drag to the current position is a no-op (the button is never
    /// pressed). Durations at or under 0.1 s jump straight to the
    /// target; longer drags interpolate with one step per pixel of the
    /// larger display dimension, stretching steps when the per-step
    /// sleep would drop under a millisecond.
    pub fn drag_to(
        &self,
        x: i32,
        y: i32,
        duration: f64,
        button: MouseButton,
    ) -> Result<(), InputError> {
        match button {
            MouseButton::Left | MouseButton::Right | MouseButton::Middle => {}
            other => return Err(InputError::UnsupportedButton(other)),
        }

        let start = self.state.cursor_position();
        let target = Point::new(x, y);
        if start == target {
            return Ok(());
        }

        self.mouse_down(button, start.x, start.y)
            .map_err(|e| InputError::ButtonPress(Box::new(e)))?;

        if duration <= MIN_DRAG_DURATION {
            self.state.set_cursor_position(target);
            return self
                .mouse_up(button, x, y)
                .map_err(|e| InputError::ButtonRelease(Box::new(e)));
        }

        let (width, height) = self.state.primary_display_size();
        let mut steps = i64::from(width.max(height).max(1));
        let mut sleep_secs = duration / steps as f64;
        if sleep_secs < MIN_DRAG_SLEEP {
            steps = (duration / MIN_DRAG_SLEEP) as i64;
            sleep_secs = duration / steps as f64;
        }
        debug!(steps, sleep_secs, "interpolated drag");

        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let (fx, fy) = lerp(start, target, t);
            self.state
                .set_cursor_position(Point::new((fx + 0.5) as i32, (fy + 0.5) as i32));
            thread::sleep(Duration::from_secs_f64(sleep_secs));
        }

        // Rounding along the sweep can land a pixel off; end exactly
        // on the target before releasing.
        self.state.set_cursor_position(target);
        self.mouse_up(button, x, y)
            .map_err(|e| InputError::ButtonRelease(Box::new(e)))
    }
}
