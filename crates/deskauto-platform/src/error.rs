//! Error taxonomy shared by the drivers and the capture engine.

use thiserror::Error;

use crate::input::MouseButton;

/// Failures surfaced by the mouse and keyboard drivers.
#[derive(Debug, Error)]
pub enum InputError {
    /// Unrecognized logical button. The closed `MouseButton` enum
    /// makes this unreachable from the drivers in this crate; it is
    /// kept for callers that surface button values from untyped
    /// sources (wire formats, scripts) and need the same taxonomy.
    #[error("invalid mouse button: {0:?}")]
    InvalidButton(MouseButton),

    /// Valid button, but disallowed for this operation (e.g. X1 on click).
    #[error("mouse button must be one of Left, Right, or Middle; received {0:?}")]
    UnsupportedButton(MouseButton),

    /// The character has no virtual-key mapping in the active layout.
    #[error("there is no virtual key code for {0:?}")]
    NoVirtualKey(char),

    /// Empty key set passed to a hotkey chord.
    #[error("no keys provided for hotkey")]
    NoKeys,

    /// The OS accepted fewer input events than were submitted.
    #[error("input injection rejected {rejected} of {submitted} events")]
    Injection { submitted: usize, rejected: usize },

    /// Drag sequencing: the initial button press failed.
    #[error("failed to press mouse button down: {0}")]
    ButtonPress(#[source] Box<InputError>),

    /// Drag sequencing: the final button release failed.
    #[error("failed to release mouse button: {0}")]
    ButtonRelease(#[source] Box<InputError>),
}

/// Failures surfaced by the screen-capture engine.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Zero or negative area, or a width*height*4 byte count that
    /// does not fit in memory. Raised before any native call.
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Allocation { width: i32, height: i32 },

    /// A device-context / bitmap / blit / pixel-read step failed;
    /// carries the last OS error code.
    #[error("{call} failed (os error {code})")]
    Native { call: &'static str, code: u32 },

    /// The requested region does not lie on the primary display.
    #[error("coordinates are off-screen")]
    OutOfBounds,

    /// Monitor index out of range.
    #[error("no display at index {0}")]
    InvalidDisplay(i32),
}
