//! Process-wide DPI awareness opt-in.

use std::sync::Once;

use tracing::{debug, warn};

use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};

static DPI_INIT: Once = Once::new();

/// Opt the process into Per-Monitor V2 DPI awareness so metrics,
/// cursor coordinates, and captures are in physical pixels.
///
/// Idempotent; call once at startup before creating any window. The
/// setting has process lifetime and no teardown.
pub fn ensure_dpi_aware() {
    DPI_INIT.call_once(|| unsafe {
        match SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) {
            Ok(()) => debug!("per-monitor v2 DPI awareness set"),
            // Fails when a manifest or an earlier call already fixed
            // the awareness; coordinates may then be scaled.
            Err(e) => warn!("SetProcessDpiAwarenessContext: {e}"),
        }
    });
}
