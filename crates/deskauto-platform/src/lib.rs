// Platform-neutral layer: data model, driver logic, and the traits the
// OS-specific crate implements.

pub mod error;
pub mod geometry;
pub mod input;
pub mod keyboard;
pub mod keys;
pub mod mouse;
pub mod screen;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{CaptureError, InputError};
pub use geometry::{Point, Rect};
pub use screen::{Frame, SystemState};
