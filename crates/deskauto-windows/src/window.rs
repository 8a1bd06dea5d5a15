//! Synthetic input delivered to a specific window by handle, bypassing
//! z-order and focus. All messages go through SendMessageTimeoutW with
//! SMTO_ABORTIFHUNG so a hung target cannot block the caller.

use std::thread;
use std::time::Duration;

use windows::Win32::Foundation::{HWND, LPARAM, POINT, RECT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    MapVirtualKeyW, MAPVK_VK_TO_VSC, VIRTUAL_KEY, VK_DELETE, VK_DIVIDE, VK_DOWN, VK_END, VK_HOME,
    VK_INSERT, VK_LEFT, VK_NEXT, VK_NUMLOCK, VK_PRIOR, VK_RCONTROL, VK_RIGHT, VK_RMENU, VK_UP,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetClientRect, MapWindowPoints, SendMessageTimeoutW, SMTO_ABORTIFHUNG, WM_CHAR, WM_KEYDOWN,
    WM_KEYUP, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
};

/// Bound on synchronous message delivery to unresponsive windows.
const MESSAGE_TIMEOUT_MS: u32 = 2000;

/// winuser.h MK_LBUTTON, the wParam for a left-button drag/click.
const MK_LBUTTON: usize = 0x0001;

/// Keys whose hardware scan code needs the extended bit (bit 24) in
/// key-message lParams: the navigation cluster, keypad divide and
/// numlock, and the right-hand modifier variants.
const EXTENDED_KEYS: [VIRTUAL_KEY; 14] = [
    VK_INSERT, VK_DELETE, VK_HOME, VK_END, VK_PRIOR, VK_NEXT, VK_LEFT, VK_RIGHT, VK_UP, VK_DOWN,
    VK_DIVIDE, VK_NUMLOCK, VK_RCONTROL, VK_RMENU,
];

fn send_message_timeout(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) {
    unsafe {
        SendMessageTimeoutW(
            hwnd,
            msg,
            wparam,
            lparam,
            SMTO_ABORTIFHUNG,
            MESSAGE_TIMEOUT_MS,
            None,
        );
    }
}

/// Build the key-message lParam: repeat count 1, the hardware scan
/// code, the extended bit where the key needs it, and for key-up the
/// previous-key-state and transition bits the message contract requires.
fn key_lparam(vk: VIRTUAL_KEY, key_up: bool) -> LPARAM {
    let scan = unsafe { MapVirtualKeyW(vk.0 as u32, MAPVK_VK_TO_VSC) };
    let mut lp: u32 = 1 | (scan << 16);
    if EXTENDED_KEYS.contains(&vk) {
        lp |= 1 << 24;
    }
    if key_up {
        lp |= 1 << 30;
        lp |= 1 << 31;
    }
    LPARAM(lp as i32 as isize)
}

/// Send WM_KEYDOWN for a virtual key to a specific window.
pub fn vkey_down_hwnd(hwnd: HWND, vk: u16) {
    let vk = VIRTUAL_KEY(vk);
    send_message_timeout(hwnd, WM_KEYDOWN, WPARAM(vk.0 as usize), key_lparam(vk, false));
}

/// Send WM_KEYUP for a virtual key to a specific window.
pub fn vkey_up_hwnd(hwnd: HWND, vk: u16) {
    let vk = VIRTUAL_KEY(vk);
    send_message_timeout(hwnd, WM_KEYUP, WPARAM(vk.0 as usize), key_lparam(vk, true));
}

/// Deliver `text` to a window as WM_CHAR messages, one per UTF-16
/// unit; characters outside the basic plane go as a surrogate pair.
/// Control characters are skipped. Sleeps `interval` after each
/// character when nonzero.
pub fn write_to_hwnd(hwnd: HWND, text: &str, interval: Duration) {
    let mut units = [0u16; 2];
    for c in text.chars() {
        if c.is_control() {
            continue;
        }
        for &unit in c.encode_utf16(&mut units).iter() {
            send_message_timeout(hwnd, WM_CHAR, WPARAM(unit as usize), LPARAM(1));
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
}

/// Clamp client coordinates into the window's client area. Passes the
/// point through unchanged when the client rect cannot be read.
fn clamp_to_client(hwnd: HWND, x: i32, y: i32) -> (i32, i32) {
    let mut rc = RECT::default();
    if unsafe { GetClientRect(hwnd, &mut rc) }.is_err() {
        return (x, y);
    }
    let w = rc.right - rc.left;
    let h = rc.bottom - rc.top;
    (x.clamp(0, (w - 1).max(0)), y.clamp(0, (h - 1).max(0)))
}

/// Left-click a window at a *screen* point, regardless of z-order: the
/// point is mapped into the window's client space, clamped into the
/// client rect, and delivered as move/down/up messages.
pub fn click_hwnd(hwnd: HWND, screen_x: i32, screen_y: i32) {
    let mut pts = [POINT {
        x: screen_x,
        y: screen_y,
    }];
    unsafe {
        MapWindowPoints(None, hwnd, &mut pts);
    }
    let (cx, cy) = clamp_to_client(hwnd, pts[0].x, pts[0].y);

    let lp = LPARAM(((cx as u16 as u32) | ((cy as u16 as u32) << 16)) as i32 as isize);
    send_message_timeout(hwnd, WM_MOUSEMOVE, WPARAM(0), lp);
    send_message_timeout(hwnd, WM_LBUTTONDOWN, WPARAM(MK_LBUTTON), lp);
    send_message_timeout(hwnd, WM_LBUTTONUP, WPARAM(0), lp);
}
