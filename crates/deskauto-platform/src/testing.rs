//! Deterministic `SystemState` and sink implementations for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::InputError;
use crate::geometry::{Point, Rect};
use crate::input::{ButtonAction, KeyAction, KeySink, MouseButton, MouseSink, WheelAxis};
use crate::screen::SystemState;

/// Scripted system state with a readable/writable cursor.
#[derive(Clone)]
pub struct MockState {
    pub size: (i32, i32),
    pub swapped: bool,
    pub displays: Vec<Rect>,
    cursor: Rc<Cell<Point>>,
}

impl MockState {
    pub fn with_display(width: i32, height: i32) -> Self {
        Self {
            size: (width, height),
            swapped: false,
            displays: vec![Rect {
                left: 0,
                top: 0,
                width,
                height,
            }],
            cursor: Rc::new(Cell::new(Point::new(0, 0))),
        }
    }

    pub fn put_cursor(&self, x: i32, y: i32) {
        self.cursor.set(Point::new(x, y));
    }
}

impl SystemState for MockState {
    fn primary_display_size(&self) -> (i32, i32) {
        self.size
    }

    fn virtual_desktop_offset(&self) -> Point {
        Point::new(0, 0)
    }

    fn virtual_desktop_size(&self) -> (i32, i32) {
        self.size
    }

    fn buttons_swapped(&self) -> bool {
        self.swapped
    }

    fn display_bounds(&self, index: i32) -> Rect {
        crate::geometry::rect_at(&self.displays, index)
    }

    fn cursor_position(&self) -> Point {
        self.cursor.get()
    }

    fn set_cursor_position(&self, p: Point) {
        self.cursor.set(p);
    }
}

/// Everything a `MouseSink` was asked to emit, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MouseEvent {
    Button {
        button: MouseButton,
        action: ButtonAction,
        pos: (i32, i32),
    },
    Click {
        button: MouseButton,
        pos: (i32, i32),
        count: u32,
    },
    Wheel {
        axis: WheelAxis,
        pos: (i32, i32),
        delta: i32,
    },
}

#[derive(Clone, Default)]
pub struct MockMouseSink {
    pub events: Rc<RefCell<Vec<MouseEvent>>>,
}

impl MouseSink for MockMouseSink {
    fn button(&self, button: MouseButton, action: ButtonAction, pos: (i32, i32)) {
        self.events
            .borrow_mut()
            .push(MouseEvent::Button { button, action, pos });
    }

    fn click(&self, button: MouseButton, pos: (i32, i32), count: u32) {
        self.events
            .borrow_mut()
            .push(MouseEvent::Click { button, pos, count });
    }

    fn wheel(&self, axis: WheelAxis, pos: (i32, i32), delta: i32) {
        self.events
            .borrow_mut()
            .push(MouseEvent::Wheel { axis, pos, delta });
    }
}

/// Key sink with a scripted layout table and an optional injection
/// failure after N accepted events.
#[derive(Clone, Default)]
pub struct MockKeySink {
    pub events: Rc<RefCell<Vec<(u16, KeyAction)>>>,
    pub layout: Rc<RefCell<HashMap<char, u16>>>,
    pub accept_limit: Rc<Cell<Option<usize>>>,
}

impl MockKeySink {
    pub fn with_layout(entries: &[(char, u16)]) -> Self {
        let sink = Self::default();
        sink.layout.borrow_mut().extend(entries.iter().copied());
        sink
    }

    /// Reject every key press after the first `n` presses have been
    /// accepted. Releases always go through, so compensating cleanup
    /// stays observable.
    pub fn fail_after(&self, n: usize) {
        self.accept_limit.set(Some(n));
    }
}

impl KeySink for MockKeySink {
    fn key(&self, vk: u16, action: KeyAction) -> Result<(), InputError> {
        if let (Some(limit), KeyAction::Press) = (self.accept_limit.get(), action) {
            let presses = self
                .events
                .borrow()
                .iter()
                .filter(|(_, a)| *a == KeyAction::Press)
                .count();
            if presses >= limit {
                return Err(InputError::Injection {
                    submitted: 1,
                    rejected: 1,
                });
            }
        }
        self.events.borrow_mut().push((vk, action));
        Ok(())
    }

    fn vk_for_char(&self, c: char) -> Option<u16> {
        self.layout.borrow().get(&c).copied()
    }
}
