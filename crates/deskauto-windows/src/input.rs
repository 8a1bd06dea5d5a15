//! SendInput-backed event sinks and the driver factories.

use std::mem;

use tracing::debug;

use deskauto_platform::error::InputError;
use deskauto_platform::input::{ButtonAction, KeyAction, KeySink, MouseButton, MouseSink, WheelAxis};
use deskauto_platform::keyboard::Keyboard;
use deskauto_platform::mouse::Mouse;

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, VkKeyScanW, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT,
    KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_HWHEEL,
    MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP,
    MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_WHEEL,
    MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{XBUTTON1, XBUTTON2};

use crate::screen::Win32SystemState;

/// Mouse driver wired to the live Win32 state and SendInput.
pub fn mouse() -> Mouse {
    Mouse::new(Box::new(Win32SystemState), Box::new(SendInputMouseSink))
}

/// Keyboard driver wired to SendInput and the active keyboard layout.
pub fn keyboard() -> Keyboard {
    Keyboard::new(Box::new(SendInputKeySink))
}

fn mouse_input(pos: (i32, i32), flags: MOUSE_EVENT_FLAGS, data: u32) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: pos.0,
                dy: pos.1,
                mouseData: data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn send(inputs: &[INPUT]) -> usize {
    let sent = unsafe { SendInput(inputs, mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        debug!(
            sent,
            submitted = inputs.len(),
            "SendInput accepted fewer events than submitted"
        );
    }
    sent as usize
}

/// Fire-and-forget mouse emission via SendInput.
pub struct SendInputMouseSink;

impl SendInputMouseSink {
    fn transition_flags(button: MouseButton, action: ButtonAction) -> Option<(MOUSE_EVENT_FLAGS, u32)> {
        Some(match (button, action) {
            (MouseButton::Left, ButtonAction::Press) => (MOUSEEVENTF_LEFTDOWN, 0),
            (MouseButton::Left, ButtonAction::Release) => (MOUSEEVENTF_LEFTUP, 0),
            (MouseButton::Right, ButtonAction::Press) => (MOUSEEVENTF_RIGHTDOWN, 0),
            (MouseButton::Right, ButtonAction::Release) => (MOUSEEVENTF_RIGHTUP, 0),
            (MouseButton::Middle, ButtonAction::Press) => (MOUSEEVENTF_MIDDLEDOWN, 0),
            (MouseButton::Middle, ButtonAction::Release) => (MOUSEEVENTF_MIDDLEUP, 0),
            (MouseButton::X1, ButtonAction::Press) => (MOUSEEVENTF_XDOWN, XBUTTON1 as u32),
            (MouseButton::X1, ButtonAction::Release) => (MOUSEEVENTF_XUP, XBUTTON1 as u32),
            (MouseButton::X2, ButtonAction::Press) => (MOUSEEVENTF_XDOWN, XBUTTON2 as u32),
            (MouseButton::X2, ButtonAction::Release) => (MOUSEEVENTF_XUP, XBUTTON2 as u32),
            // Logical buttons never reach the sink; the driver
            // normalizes them first.
            (MouseButton::Primary | MouseButton::Secondary, _) => return None,
        })
    }
}

impl MouseSink for SendInputMouseSink {
    fn button(&self, button: MouseButton, action: ButtonAction, pos: (i32, i32)) {
        let Some((flags, data)) = Self::transition_flags(button, action) else {
            debug!(?button, "unnormalized logical button reached the sink");
            return;
        };
        send(&[mouse_input(pos, flags, data)]);
    }

    fn click(&self, button: MouseButton, pos: (i32, i32), count: u32) {
        let Some((down, _)) = Self::transition_flags(button, ButtonAction::Press) else {
            return;
        };
        let Some((up, _)) = Self::transition_flags(button, ButtonAction::Release) else {
            return;
        };
        let mut inputs = Vec::with_capacity(count as usize * 2);
        for _ in 0..count {
            // ABSOLUTE|MOVE on each pair so the cursor visibly
            // relocates before every click.
            inputs.push(mouse_input(pos, down | MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_MOVE, 0));
            inputs.push(mouse_input(pos, up | MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_MOVE, 0));
        }
        send(&inputs);
    }

    fn wheel(&self, axis: WheelAxis, pos: (i32, i32), delta: i32) {
        let flags = match axis {
            WheelAxis::Vertical => MOUSEEVENTF_WHEEL,
            WheelAxis::Horizontal => MOUSEEVENTF_HWHEEL,
        };
        send(&[mouse_input(pos, flags, delta as u32)]);
    }
}

/// Keyboard emission via SendInput plus layout lookups via VkKeyScanW.
pub struct SendInputKeySink;

impl KeySink for SendInputKeySink {
    fn key(&self, vk: u16, action: KeyAction) -> Result<(), InputError> {
        let flags = match action {
            KeyAction::Press => KEYBD_EVENT_FLAGS(0),
            KeyAction::Release => KEYEVENTF_KEYUP,
        };
        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(vk),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };
        if send(&[input]) != 1 {
            return Err(InputError::Injection {
                submitted: 1,
                rejected: 1,
            });
        }
        Ok(())
    }

    fn vk_for_char(&self, c: char) -> Option<u16> {
        let mut units = [0u16; 2];
        let encoded = c.encode_utf16(&mut units);
        if encoded.len() != 1 {
            // No single-unit layout entry exists for non-BMP characters.
            return None;
        }
        let raw = unsafe { VkKeyScanW(encoded[0]) };
        if raw == -1 {
            None
        } else {
            Some(raw as u16)
        }
    }
}
