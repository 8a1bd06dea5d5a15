//! Input data model and the raw event-emission traits the OS-specific
//! crate implements.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A mouse button, physical or logical.
///
/// `Primary` and `Secondary` are logical roles: they resolve to the
/// physical left/right button at call time based on a live query of
/// the OS button-swap setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// First extra button (usually "back").
    X1,
    /// Second extra button (usually "forward").
    X2,
    /// Left unless the user swapped buttons, then right.
    Primary,
    /// Right unless the user swapped buttons, then left.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelAxis {
    Vertical,
    Horizontal,
}

/// Raw mouse event emission.
///
/// Positions are in the OS normalized 0..=65535 absolute coordinate
/// space; the driver converts from pixels before calling in. Emission
/// is fire-and-forget: the OS offers no error channel for synthetic
/// mouse events, so these methods cannot fail.
pub trait MouseSink {
    /// Emit a single button transition at `pos`. Only physical buttons
    /// reach the sink (the driver normalizes logical ones first). The
    /// event carries no move flag, so the cursor stays where it is;
    /// click batches are the only relocating events.
    fn button(&self, button: MouseButton, action: ButtonAction, pos: (i32, i32));

    /// Emit `count` down+up pairs at `pos`, each pair tagged so the
    /// cursor visibly relocates before the click.
    fn click(&self, button: MouseButton, pos: (i32, i32), count: u32);

    /// Emit a wheel event. `delta` is in raw OS wheel units.
    fn wheel(&self, axis: WheelAxis, pos: (i32, i32), delta: i32);
}

/// Raw keyboard event emission and layout queries.
pub trait KeySink {
    /// Emit a virtual-key transition. Fails only when the OS accepts
    /// fewer events than were submitted (e.g. blocked by input
    /// isolation); there is no richer error channel.
    fn key(&self, vk: u16, action: KeyAction) -> Result<(), InputError>;

    /// Look up the virtual key for a character in the active keyboard
    /// layout. The raw value keeps the OS convention of carrying the
    /// required shift state above bit 8; `None` means no mapping.
    fn vk_for_char(&self, c: char) -> Option<u16>;
}
