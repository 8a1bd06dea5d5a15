//! Keyboard driver: character and virtual-key press sequencing,
//! hold/release with compensating cleanup, string typing, and hotkey
//! chords.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::InputError;
use crate::input::{KeyAction, KeySink};
use crate::keys;

/// Characters that need Shift held on a US layout: the number-row
/// symbols and shifted punctuation.
const SHIFT_CHARS: &str = "~!@#$%^&*()_+{}|:\"<>?";

/// The layout query sets this bit when the mapped key needs Shift.
const SHIFT_VK_BIT: u16 = 0x100;

/// Whether typing `c` requires the Shift key: shifted punctuation, or
/// an uppercase letter distinguishable from its lowercase form.
fn requires_shift(c: char) -> bool {
    SHIFT_CHARS.contains(c) || c.is_uppercase()
}

pub struct Keyboard {
    sink: Box<dyn KeySink>,
}

impl Keyboard {
    pub fn new(sink: Box<dyn KeySink>) -> Self {
        Self { sink }
    }

    /// Resolve a character to its virtual key and shift requirement,
    /// reconciling the layout's shift bit with the punctuation set.
    fn resolve(&self, c: char) -> Result<(u16, bool), InputError> {
        let mut shift = requires_shift(c);
        let mut vk = self
            .sink
            .vk_for_char(c)
            .ok_or(InputError::NoVirtualKey(c))?;
        if vk > SHIFT_VK_BIT {
            vk -= SHIFT_VK_BIT;
            shift = true;
        }
        Ok((vk, shift))
    }

    /// Press the key for `c`, preceded by a Shift press when needed.
    pub fn key_down(&self, c: char) -> Result<(), InputError> {
        let (vk, shift) = self.resolve(c)?;
        if shift {
            self.sink.key(keys::SHIFT, KeyAction::Press)?;
        }
        self.sink.key(vk, KeyAction::Press)
    }

    /// Release the key for `c`. Note the release order: Shift goes up
    /// *before* the main key, not mirror-symmetric with the press.
    pub fn key_up(&self, c: char) -> Result<(), InputError> {
        let (vk, shift) = self.resolve(c)?;
        if shift {
            self.sink.key(keys::SHIFT, KeyAction::Release)?;
        }
        self.sink.key(vk, KeyAction::Release)
    }

    /// Press a virtual key directly. No shift inference; the caller
    /// sequences explicit modifiers.
    pub fn vkey_down(&self, vk: u16) -> Result<(), InputError> {
        self.sink.key(vk, KeyAction::Press)
    }

    /// Release a virtual key directly.
    pub fn vkey_up(&self, vk: u16) -> Result<(), InputError> {
        self.sink.key(vk, KeyAction::Release)
    }

    /// Type every character of `text` in order, `presses` times over,
    /// sleeping `interval` between repetitions (not between characters
    /// and not after the final repetition).
    pub fn press(&self, text: &str, presses: u32, interval: Duration) -> Result<(), InputError> {
        for i in 0..presses {
            for c in text.chars() {
                self.key_down(c)?;
                self.key_up(c)?;
            }
            if i + 1 < presses {
                thread::sleep(interval);
            }
        }
        Ok(())
    }

    /// `press` over explicit virtual keys, each down immediately
    /// followed by up.
    pub fn vpress(&self, presses: u32, interval: Duration, vks: &[u16]) -> Result<(), InputError> {
        for i in 0..presses {
            for &vk in vks {
                self.vkey_down(vk)?;
                self.vkey_up(vk)?;
            }
            if i + 1 < presses {
                thread::sleep(interval);
            }
        }
        Ok(())
    }

    /// Press the keys down in order and hand ownership of the held set
    /// to the returned handle. If any press fails mid-sequence, every
    /// key pressed so far is released (reverse order, errors ignored)
    /// before the error is returned — no partially-held state survives.
    pub fn hold(&self, vks: &[u16]) -> Result<Hold<'_>, InputError> {
        let mut pressed: Vec<u16> = Vec::with_capacity(vks.len());
        for &vk in vks {
            if let Err(e) = self.vkey_down(vk) {
                for &held in pressed.iter().rev() {
                    let _ = self.vkey_up(held);
                }
                return Err(e);
            }
            pressed.push(vk);
        }
        Ok(Hold {
            keyboard: self,
            keys: pressed,
        })
    }

    /// Type `text` character by character, sleeping `interval_ms`
    /// milliseconds after each one. (`press` takes a `Duration`; this
    /// keeps the historical millisecond parameter.)
    pub fn type_write(&self, text: &str, interval_ms: u64) -> Result<(), InputError> {
        let mut buf = [0u8; 4];
        for c in text.chars() {
            self.press(c.encode_utf8(&mut buf), 1, Duration::ZERO)?;
            if interval_ms > 0 {
                thread::sleep(Duration::from_millis(interval_ms));
            }
        }
        Ok(())
    }

    /// Alias for [`Keyboard::type_write`].
    pub fn write(&self, text: &str, interval_ms: u64) -> Result<(), InputError> {
        self.type_write(text, interval_ms)
    }

    /// Chorded shortcut: press every key in argument order, then
    /// release in reverse order, sleeping `interval` after each
    /// transition in both phases.
    pub fn hot_key(&self, interval: Duration, vks: &[u16]) -> Result<(), InputError> {
        if vks.is_empty() {
            return Err(InputError::NoKeys);
        }
        debug!(?vks, "hotkey chord");
        for &vk in vks {
            self.vkey_down(vk)?;
            thread::sleep(interval);
        }
        for &vk in vks.iter().rev() {
            self.vkey_up(vk)?;
            thread::sleep(interval);
        }
        Ok(())
    }
}

/// An ordered set of keys held down via [`Keyboard::hold`].
pub struct Hold<'a> {
    keyboard: &'a Keyboard,
    keys: Vec<u16>,
}

impl std::fmt::Debug for Hold<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hold")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl Hold<'_> {
    /// Release all held keys in reverse press order. Fails fast on the
    /// first release that the OS rejects, leaving the remaining keys
    /// (including the failed one) logically held for a retry. After a
    /// full release the set is empty and further calls are no-ops.
    pub fn release(&mut self) -> Result<(), InputError> {
        while let Some(vk) = self.keys.pop() {
            if let Err(e) = self.keyboard.vkey_up(vk) {
                self.keys.push(vk);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Drop for Hold<'_> {
    fn drop(&mut self) {
        // Best-effort cleanup for holds abandoned without release().
        for &vk in self.keys.iter().rev() {
            let _ = self.keyboard.vkey_up(vk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockKeySink;

    fn keyboard_with(sink: MockKeySink) -> Keyboard {
        Keyboard::new(Box::new(sink))
    }

    #[test]
    fn test_shift_chars_emit_shift_first_both_directions() {
        // Layout entries deliberately lack the shift bit so the
        // punctuation set alone must force Shift.
        let entries: Vec<(char, u16)> = SHIFT_CHARS
            .chars()
            .enumerate()
            .map(|(i, c)| (c, 0x20 + i as u16))
            .collect();
        let sink = MockKeySink::with_layout(&entries);
        let kb = keyboard_with(sink.clone());

        for (c, vk) in entries {
            sink.events.borrow_mut().clear();
            kb.key_down(c).unwrap();
            kb.key_up(c).unwrap();
            let events = sink.events.borrow();
            assert_eq!(
                *events,
                vec![
                    (keys::SHIFT, KeyAction::Press),
                    (vk, KeyAction::Press),
                    (keys::SHIFT, KeyAction::Release),
                    (vk, KeyAction::Release),
                ],
                "character {c:?}"
            );
        }
    }

    #[test]
    fn test_layout_shift_bit_forces_shift() {
        // 'a' is not a shift character, but the layout says the mapped
        // key needs Shift; the bit is cleared and Shift emitted.
        let sink = MockKeySink::with_layout(&[('a', 0x100 + keys::A)]);
        let kb = keyboard_with(sink.clone());
        kb.key_down('a').unwrap();
        assert_eq!(
            *sink.events.borrow(),
            vec![(keys::SHIFT, KeyAction::Press), (keys::A, KeyAction::Press)]
        );
    }

    #[test]
    fn test_plain_character_no_shift() {
        let sink = MockKeySink::with_layout(&[('a', keys::A)]);
        let kb = keyboard_with(sink.clone());
        kb.key_down('a').unwrap();
        kb.key_up('a').unwrap();
        assert_eq!(
            *sink.events.borrow(),
            vec![(keys::A, KeyAction::Press), (keys::A, KeyAction::Release)]
        );
    }

    #[test]
    fn test_unmapped_character_errors() {
        let kb = keyboard_with(MockKeySink::default());
        assert!(matches!(
            kb.key_down('€'),
            Err(InputError::NoVirtualKey('€'))
        ));
    }

    #[test]
    fn test_press_repeats_without_trailing_sleep() {
        let sink = MockKeySink::with_layout(&[('a', keys::A), ('b', keys::B)]);
        let kb = keyboard_with(sink.clone());
        kb.press("ab", 2, Duration::ZERO).unwrap();
        let expected_once = [
            (keys::A, KeyAction::Press),
            (keys::A, KeyAction::Release),
            (keys::B, KeyAction::Press),
            (keys::B, KeyAction::Release),
        ];
        let events = sink.events.borrow();
        assert_eq!(events.len(), 8);
        assert_eq!(events[..4], expected_once);
        assert_eq!(events[4..], expected_once);
    }

    #[test]
    fn test_vpress_sequences_each_key() {
        let sink = MockKeySink::default();
        let kb = keyboard_with(sink.clone());
        kb.vpress(1, Duration::ZERO, &[keys::F5, keys::ENTER]).unwrap();
        assert_eq!(
            *sink.events.borrow(),
            vec![
                (keys::F5, KeyAction::Press),
                (keys::F5, KeyAction::Release),
                (keys::ENTER, KeyAction::Press),
                (keys::ENTER, KeyAction::Release),
            ]
        );
    }

    #[test]
    fn test_hold_release_reverse_order_and_double_release() {
        let sink = MockKeySink::default();
        let kb = keyboard_with(sink.clone());
        let mut hold = kb.hold(&[keys::CONTROL, keys::SHIFT, keys::T]).unwrap();
        hold.release().unwrap();
        assert_eq!(
            *sink.events.borrow(),
            vec![
                (keys::CONTROL, KeyAction::Press),
                (keys::SHIFT, KeyAction::Press),
                (keys::T, KeyAction::Press),
                (keys::T, KeyAction::Release),
                (keys::SHIFT, KeyAction::Release),
                (keys::CONTROL, KeyAction::Release),
            ]
        );
        // second release is a safe no-op
        hold.release().unwrap();
        assert_eq!(sink.events.borrow().len(), 6);
    }

    #[test]
    fn test_hold_failure_releases_pressed_keys() {
        let sink = MockKeySink::default();
        sink.fail_after(2);
        let kb = keyboard_with(sink.clone());
        let err = kb.hold(&[keys::A, keys::B, keys::C]).unwrap_err();
        assert!(matches!(err, InputError::Injection { .. }));
        assert_eq!(
            *sink.events.borrow(),
            vec![
                (keys::A, KeyAction::Press),
                (keys::B, KeyAction::Press),
                (keys::B, KeyAction::Release),
                (keys::A, KeyAction::Release),
            ]
        );
    }

    #[test]
    fn test_hold_drop_releases_remaining_keys() {
        let sink = MockKeySink::default();
        let kb = keyboard_with(sink.clone());
        drop(kb.hold(&[keys::ALT, keys::TAB]).unwrap());
        assert_eq!(
            *sink.events.borrow(),
            vec![
                (keys::ALT, KeyAction::Press),
                (keys::TAB, KeyAction::Press),
                (keys::TAB, KeyAction::Release),
                (keys::ALT, KeyAction::Release),
            ]
        );
    }

    #[test]
    fn test_hot_key_presses_in_order_releases_reversed() {
        let sink = MockKeySink::default();
        let kb = keyboard_with(sink.clone());
        kb.hot_key(Duration::ZERO, &[keys::A, keys::B, keys::C]).unwrap();
        assert_eq!(
            *sink.events.borrow(),
            vec![
                (keys::A, KeyAction::Press),
                (keys::B, KeyAction::Press),
                (keys::C, KeyAction::Press),
                (keys::C, KeyAction::Release),
                (keys::B, KeyAction::Release),
                (keys::A, KeyAction::Release),
            ]
        );
    }

    #[test]
    fn test_hot_key_rejects_empty_set() {
        let kb = keyboard_with(MockKeySink::default());
        assert!(matches!(
            kb.hot_key(Duration::ZERO, &[]),
            Err(InputError::NoKeys)
        ));
    }

    #[test]
    fn test_type_write_presses_each_character() {
        let sink = MockKeySink::with_layout(&[('h', keys::H), ('i', keys::I)]);
        let kb = keyboard_with(sink.clone());
        kb.type_write("hi", 0).unwrap();
        assert_eq!(
            *sink.events.borrow(),
            vec![
                (keys::H, KeyAction::Press),
                (keys::H, KeyAction::Release),
                (keys::I, KeyAction::Press),
                (keys::I, KeyAction::Release),
            ]
        );
    }
}
