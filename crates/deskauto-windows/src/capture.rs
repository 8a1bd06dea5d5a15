//! GDI screen capture: desktop regions, whole displays, and individual
//! windows, returned as RGBA frames.
//!
//! Every native handle acquired here is wrapped in a guard so it is
//! released exactly once, in reverse acquisition order, on success and
//! on every error path.

use std::ffi::c_void;
use std::mem;

use deskauto_platform::error::CaptureError;
use deskauto_platform::geometry::Rect;
use deskauto_platform::screen::{self, Frame, SystemState};

use windows::Win32::Foundation::{GetLastError, HWND, LPARAM, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject,
    GetDC, GetDIBits, GetWindowDC, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
    DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetDesktopWindow, GetWindowRect, PrintWindow, SendMessageW, PRINT_WINDOW_FLAGS, WM_PRINT,
};

use crate::screen::Win32SystemState;

// PrintWindow flag asking DWM for the full composed content; newer
// than the flags the windows crate exposes by name.
const PW_RENDERFULLCONTENT: PRINT_WINDOW_FLAGS = PRINT_WINDOW_FLAGS(2);

// WM_PRINT draw options (winuser.h PRF_*).
const PRF_NONCLIENT: isize = 0x0002;
const PRF_CLIENT: isize = 0x0004;
const PRF_ERASEBKGND: isize = 0x0008;
const PRF_CHILDREN: isize = 0x0010;

fn native(call: &'static str) -> CaptureError {
    let code = unsafe { GetLastError() }.0;
    CaptureError::Native { call, code }
}

/// Releases a window/screen DC obtained with GetDC/GetWindowDC.
struct WindowDc {
    hwnd: HWND,
    hdc: HDC,
}

impl Drop for WindowDc {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(self.hwnd, self.hdc);
        }
    }
}

/// Deletes a memory DC from CreateCompatibleDC.
struct MemDc(HDC);

impl Drop for MemDc {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteDC(self.0);
        }
    }
}

/// Deletes a GDI bitmap.
struct GdiBitmap(HBITMAP);

impl Drop for GdiBitmap {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.0);
        }
    }
}

/// Restores the previously selected object on drop.
struct Selected {
    hdc: HDC,
    old: HGDIOBJ,
}

impl Selected {
    unsafe fn select(hdc: HDC, bitmap: HBITMAP) -> Self {
        let old = SelectObject(hdc, bitmap);
        Self { hdc, old }
    }
}

impl Drop for Selected {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.hdc, self.old);
        }
    }
}

/// Top-down 32-bit header for reading pixels back as BGRA.
fn top_down_bgra_header(width: i32, height: i32) -> BITMAPINFO {
    BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height,
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Capture the `width x height` desktop region anchored at `(x, y)`.
///
/// Fails with `Allocation` before any native call when the region has
/// zero or negative area; native failures carry the last OS error.
pub fn capture(x: i32, y: i32, width: i32, height: i32) -> Result<Frame, CaptureError> {
    let byte_len =
        Frame::byte_len(width, height).ok_or(CaptureError::Allocation { width, height })?;

    unsafe {
        let desktop = GetDesktopWindow();
        let hdc = GetDC(desktop);
        if hdc.is_invalid() {
            return Err(native("GetDC"));
        }
        let screen_dc = WindowDc { hwnd: desktop, hdc };

        let hdc = CreateCompatibleDC(screen_dc.hdc);
        if hdc.is_invalid() {
            return Err(native("CreateCompatibleDC"));
        }
        let mem_dc = MemDc(hdc);

        let bitmap = CreateCompatibleBitmap(screen_dc.hdc, width, height);
        if bitmap.is_invalid() {
            return Err(native("CreateCompatibleBitmap"));
        }
        let bitmap = GdiBitmap(bitmap);
        let _selected = Selected::select(mem_dc.0, bitmap.0);

        BitBlt(mem_dc.0, 0, 0, width, height, screen_dc.hdc, x, y, SRCCOPY).map_err(|e| {
            CaptureError::Native {
                call: "BitBlt",
                code: e.code().0 as u32,
            }
        })?;

        let mut bmi = top_down_bgra_header(width, height);
        let mut bgra = vec![0u8; byte_len];
        let lines = GetDIBits(
            screen_dc.hdc,
            bitmap.0,
            0,
            height as u32,
            Some(bgra.as_mut_ptr().cast()),
            &mut bmi,
            DIB_RGB_COLORS,
        );
        if lines == 0 {
            return Err(native("GetDIBits"));
        }

        Ok(Frame::from_bgra(width as u32, height as u32, &bgra))
    }
}

/// Capture a window by handle, including its non-client area.
///
/// Tries PrintWindow with full-content rendering first; windows that
/// refuse it (some hardware-accelerated or legacy renderers) get a
/// synchronous WM_PRINT covering background, client, children, and
/// non-client regions instead.
pub fn capture_window(hwnd: HWND) -> Result<Frame, CaptureError> {
    unsafe {
        let mut rc = RECT::default();
        GetWindowRect(hwnd, &mut rc).map_err(|e| CaptureError::Native {
            call: "GetWindowRect",
            code: e.code().0 as u32,
        })?;
        let (width, height) = (rc.right - rc.left, rc.bottom - rc.top);
        let byte_len =
            Frame::byte_len(width, height).ok_or(CaptureError::Allocation { width, height })?;

        let hdc = GetWindowDC(hwnd);
        if hdc.is_invalid() {
            return Err(native("GetWindowDC"));
        }
        let window_dc = WindowDc { hwnd, hdc };

        let hdc = CreateCompatibleDC(window_dc.hdc);
        if hdc.is_invalid() {
            return Err(native("CreateCompatibleDC"));
        }
        let mem_dc = MemDc(hdc);

        let bmi = top_down_bgra_header(width, height);
        let mut bits: *mut c_void = std::ptr::null_mut();
        let dib = CreateDIBSection(window_dc.hdc, &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
            .map_err(|e| CaptureError::Native {
                call: "CreateDIBSection",
                code: e.code().0 as u32,
            })?;
        let dib = GdiBitmap(dib);
        if bits.is_null() {
            return Err(native("CreateDIBSection"));
        }
        let _selected = Selected::select(mem_dc.0, dib.0);

        if !PrintWindow(hwnd, mem_dc.0, PW_RENDERFULLCONTENT).as_bool() {
            let flags = PRF_ERASEBKGND | PRF_CHILDREN | PRF_CLIENT | PRF_NONCLIENT;
            SendMessageW(
                hwnd,
                WM_PRINT,
                WPARAM(mem_dc.0 .0 as usize),
                LPARAM(flags),
            );
        }

        let bgra = std::slice::from_raw_parts(bits as *const u8, byte_len);
        Ok(Frame::from_bgra(width as u32, height as u32, bgra))
    }
}

/// Like [`capture`], but only after verifying both corners of the
/// region lie on the primary display; otherwise no native call is made.
pub fn screen_shot(x: i32, y: i32, width: i32, height: i32) -> Result<Frame, CaptureError> {
    if !screen::region_on_screen(&Win32SystemState, x, y, width, height) {
        return Err(CaptureError::OutOfBounds);
    }
    capture(x, y, width, height)
}

/// Capture the region described by `rect`.
pub fn capture_rect(rect: Rect) -> Result<Frame, CaptureError> {
    capture(rect.left, rect.top, rect.width, rect.height)
}

/// Capture the display at `index` (0 = first enumerated monitor).
pub fn capture_display(index: i32) -> Result<Frame, CaptureError> {
    let bounds = Win32SystemState.display_bounds(index);
    if bounds.is_empty() {
        return Err(CaptureError::InvalidDisplay(index));
    }
    capture_rect(bounds)
}

/// Capture the whole primary display.
pub fn capture_primary_display() -> Result<Frame, CaptureError> {
    let (width, height) = Win32SystemState.primary_display_size();
    capture(0, 0, width, height)
}
