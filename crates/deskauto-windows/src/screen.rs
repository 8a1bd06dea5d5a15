//! Live system state via GetSystemMetrics, EnumDisplayMonitors, and
//! the cursor APIs. Every query goes to the OS; nothing is cached, so
//! results track display and mouse-setting changes between calls.

use tracing::debug;

use deskauto_platform::geometry::{self, Point, Rect};
use deskauto_platform::screen::SystemState;

use windows::Win32::Foundation::{BOOL, LPARAM, POINT, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{EnumDisplayMonitors, HDC, HMONITOR};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SetCursorPos, SM_CXSCREEN, SM_CXVIRTUALSCREEN, SM_CYSCREEN,
    SM_CYVIRTUALSCREEN, SM_SWAPBUTTON, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

/// `SystemState` backed by the Win32 metrics and cursor APIs.
pub struct Win32SystemState;

impl SystemState for Win32SystemState {
    fn primary_display_size(&self) -> (i32, i32) {
        unsafe {
            (
                GetSystemMetrics(SM_CXSCREEN),
                GetSystemMetrics(SM_CYSCREEN),
            )
        }
    }

    fn virtual_desktop_offset(&self) -> Point {
        unsafe {
            Point::new(
                GetSystemMetrics(SM_XVIRTUALSCREEN),
                GetSystemMetrics(SM_YVIRTUALSCREEN),
            )
        }
    }

    fn virtual_desktop_size(&self) -> (i32, i32) {
        unsafe {
            (
                GetSystemMetrics(SM_CXVIRTUALSCREEN),
                GetSystemMetrics(SM_CYVIRTUALSCREEN),
            )
        }
    }

    fn buttons_swapped(&self) -> bool {
        unsafe { GetSystemMetrics(SM_SWAPBUTTON) != 0 }
    }

    fn display_bounds(&self, index: i32) -> Rect {
        let rects: Vec<Rect> = enumerate_monitor_rects()
            .iter()
            .map(|r| Rect::from_corners(r.left, r.top, r.right, r.bottom))
            .collect();
        geometry::rect_at(&rects, index)
    }

    fn cursor_position(&self) -> Point {
        let mut pt = POINT::default();
        if let Err(e) = unsafe { GetCursorPos(&mut pt) } {
            debug!("GetCursorPos: {e}");
        }
        Point::new(pt.x, pt.y)
    }

    fn set_cursor_position(&self, p: Point) {
        if let Err(e) = unsafe { SetCursorPos(p.x, p.y) } {
            debug!("SetCursorPos({}, {}): {e}", p.x, p.y);
        }
    }
}

unsafe extern "system" fn collect_monitor(
    _monitor: HMONITOR,
    _hdc: HDC,
    rect: *mut RECT,
    data: LPARAM,
) -> BOOL {
    let rects = &mut *(data.0 as *mut Vec<RECT>);
    rects.push(*rect);
    TRUE
}

/// Enumerate all monitors into a plain list, hiding the Win32 callback
/// mechanism behind a synchronous collect.
fn enumerate_monitor_rects() -> Vec<RECT> {
    let mut rects: Vec<RECT> = Vec::new();
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(collect_monitor),
            LPARAM(&mut rects as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        debug!("EnumDisplayMonitors reported failure");
    }
    rects
}
