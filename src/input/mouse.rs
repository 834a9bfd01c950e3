//! Mouse event types.

use crate::buffer::Point;
use bitflags::bitflags;

bitflags! {
    /// Mouse buttons held or involved in an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        /// Left button, button 1.
        const LEFT = 0b0000_0001;
        /// Middle button, button 2.
        const MIDDLE = 0b0000_0010;
        /// Right button, button 3.
        const RIGHT = 0b0000_0100;
    }
}

/// Kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed.
    Press,
    /// Button released.
    Release,
    /// Moved with buttons held.
    Drag,
    /// Scroll wheel up.
    ScrollUp,
    /// Scroll wheel down.
    ScrollDown,
}

/// A mouse event in window pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub pos: Point,
    /// For presses and releases the button involved; for drags the buttons
    /// held.
    pub buttons: Buttons,
    pub kind: MouseEventKind,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(pos: Point, buttons: Buttons, kind: MouseEventKind) -> Self {
        Self { pos, buttons, kind }
    }

    #[must_use]
    pub const fn press(pos: Point, button: Buttons) -> Self {
        Self::new(pos, button, MouseEventKind::Press)
    }

    #[must_use]
    pub const fn release(pos: Point, button: Buttons) -> Self {
        Self::new(pos, button, MouseEventKind::Release)
    }

    #[must_use]
    pub const fn drag(pos: Point, buttons: Buttons) -> Self {
        Self::new(pos, buttons, MouseEventKind::Drag)
    }

    #[must_use]
    pub const fn scroll_up(pos: Point) -> Self {
        Self::new(pos, Buttons::empty(), MouseEventKind::ScrollUp)
    }

    #[must_use]
    pub const fn scroll_down(pos: Point) -> Self {
        Self::new(pos, Buttons::empty(), MouseEventKind::ScrollDown)
    }

    /// Check if this is a press event.
    #[must_use]
    pub fn is_press(&self) -> bool {
        self.kind == MouseEventKind::Press
    }

    /// Check if this is a wheel event.
    #[must_use]
    pub const fn is_scroll(&self) -> bool {
        matches!(
            self.kind,
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        )
    }

    /// The same event shifted by `-origin`, i.e. relative to a widget placed
    /// at `origin`.
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Self {
        Self {
            pos: self.pos - origin,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_event() {
        let event = MouseEvent::press(Point::new(10, 5), Buttons::LEFT);
        assert_eq!(event.pos, Point::new(10, 5));
        assert!(event.is_press());
        assert!(!event.is_scroll());
    }

    #[test]
    fn test_scroll_events() {
        assert!(MouseEvent::scroll_up(Point::ZERO).is_scroll());
        assert!(MouseEvent::scroll_down(Point::ZERO).is_scroll());
        assert!(MouseEvent::scroll_down(Point::ZERO).buttons.is_empty());
    }

    #[test]
    fn test_drag_carries_held_buttons() {
        let event = MouseEvent::drag(Point::new(1, 1), Buttons::LEFT | Buttons::RIGHT);
        assert!(event.buttons.contains(Buttons::LEFT));
        assert!(!event.buttons.contains(Buttons::MIDDLE));
    }

    #[test]
    fn test_relative_to() {
        let event = MouseEvent::release(Point::new(30, 40), Buttons::MIDDLE);
        let local = event.relative_to(Point::new(10, 10));
        assert_eq!(local.pos, Point::new(20, 30));
        assert_eq!(local.buttons, Buttons::MIDDLE);
        assert_eq!(local.kind, MouseEventKind::Release);
    }
}
