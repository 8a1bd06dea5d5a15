//! Virtual-key codes for the keys the drivers are commonly asked to
//! press. Values follow the Win32 VK_* table.

pub const BACKSPACE: u16 = 0x08;
pub const TAB: u16 = 0x09;
pub const ENTER: u16 = 0x0D;
pub const SHIFT: u16 = 0x10;
pub const CONTROL: u16 = 0x11;
pub const ALT: u16 = 0x12;
pub const PAUSE: u16 = 0x13;
pub const CAPS_LOCK: u16 = 0x14;
pub const ESCAPE: u16 = 0x1B;
pub const SPACE: u16 = 0x20;
pub const PAGE_UP: u16 = 0x21;
pub const PAGE_DOWN: u16 = 0x22;
pub const END: u16 = 0x23;
pub const HOME: u16 = 0x24;
pub const LEFT: u16 = 0x25;
pub const UP: u16 = 0x26;
pub const RIGHT: u16 = 0x27;
pub const DOWN: u16 = 0x28;
pub const PRINT_SCREEN: u16 = 0x2C;
pub const INSERT: u16 = 0x2D;
pub const DELETE: u16 = 0x2E;

// Digits share the ASCII codes '0'..='9'.
pub const KEY_0: u16 = 0x30;
pub const KEY_1: u16 = 0x31;
pub const KEY_2: u16 = 0x32;
pub const KEY_3: u16 = 0x33;
pub const KEY_4: u16 = 0x34;
pub const KEY_5: u16 = 0x35;
pub const KEY_6: u16 = 0x36;
pub const KEY_7: u16 = 0x37;
pub const KEY_8: u16 = 0x38;
pub const KEY_9: u16 = 0x39;

// Letters share the ASCII codes 'A'..='Z'.
pub const A: u16 = 0x41;
pub const B: u16 = 0x42;
pub const C: u16 = 0x43;
pub const D: u16 = 0x44;
pub const E: u16 = 0x45;
pub const F: u16 = 0x46;
pub const G: u16 = 0x47;
pub const H: u16 = 0x48;
pub const I: u16 = 0x49;
pub const J: u16 = 0x4A;
pub const K: u16 = 0x4B;
pub const L: u16 = 0x4C;
pub const M: u16 = 0x4D;
pub const N: u16 = 0x4E;
pub const O: u16 = 0x4F;
pub const P: u16 = 0x50;
pub const Q: u16 = 0x51;
pub const R: u16 = 0x52;
pub const S: u16 = 0x53;
pub const T: u16 = 0x54;
pub const U: u16 = 0x55;
pub const V: u16 = 0x56;
pub const W: u16 = 0x57;
pub const X: u16 = 0x58;
pub const Y: u16 = 0x59;
pub const Z: u16 = 0x5A;

pub const LEFT_WIN: u16 = 0x5B;
pub const RIGHT_WIN: u16 = 0x5C;
pub const APPS: u16 = 0x5D;

pub const NUMPAD_0: u16 = 0x60;
pub const NUMPAD_1: u16 = 0x61;
pub const NUMPAD_2: u16 = 0x62;
pub const NUMPAD_3: u16 = 0x63;
pub const NUMPAD_4: u16 = 0x64;
pub const NUMPAD_5: u16 = 0x65;
pub const NUMPAD_6: u16 = 0x66;
pub const NUMPAD_7: u16 = 0x67;
pub const NUMPAD_8: u16 = 0x68;
pub const NUMPAD_9: u16 = 0x69;
pub const MULTIPLY: u16 = 0x6A;
pub const ADD: u16 = 0x6B;
pub const SUBTRACT: u16 = 0x6D;
pub const DECIMAL: u16 = 0x6E;
pub const DIVIDE: u16 = 0x6F;

pub const F1: u16 = 0x70;
pub const F2: u16 = 0x71;
pub const F3: u16 = 0x72;
pub const F4: u16 = 0x73;
pub const F5: u16 = 0x74;
pub const F6: u16 = 0x75;
pub const F7: u16 = 0x76;
pub const F8: u16 = 0x77;
pub const F9: u16 = 0x78;
pub const F10: u16 = 0x79;
pub const F11: u16 = 0x7A;
pub const F12: u16 = 0x7B;

pub const NUM_LOCK: u16 = 0x90;
pub const SCROLL_LOCK: u16 = 0x91;
pub const LEFT_SHIFT: u16 = 0xA0;
pub const RIGHT_SHIFT: u16 = 0xA1;
pub const LEFT_CONTROL: u16 = 0xA2;
pub const RIGHT_CONTROL: u16 = 0xA3;
pub const LEFT_ALT: u16 = 0xA4;
pub const RIGHT_ALT: u16 = 0xA5;
