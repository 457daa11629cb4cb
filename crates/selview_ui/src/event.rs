use crate::{Point, Size};

/// Input events delivered by the host, already decoded into widget terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    MousePressed {
        button: MouseButton,
        position: Point,
    },
    /// Mouse button released.
    MouseReleased {
        button: MouseButton,
        position: Point,
    },
    /// Mouse moved, with the set of buttons currently held.
    MouseMoved { position: Point, held: MouseButtons },
    /// The widget was resized.
    Resized { size: Size },
}

impl Event {
    /// Pointer position carried by mouse events.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::MousePressed { position, .. }
            | Event::MouseReleased { position, .. }
            | Event::MouseMoved { position, .. } => Some(*position),
            Event::Resized { .. } => None,
        }
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// The button that drives selection gestures.
    pub const PRIMARY: MouseButton = MouseButton::Left;
}

/// The set of mouse buttons held during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl MouseButtons {
    pub const NONE: MouseButtons = MouseButtons {
        left: false,
        right: false,
        middle: false,
    };

    /// Only the primary button held.
    pub fn primary() -> Self {
        Self {
            left: true,
            ..Self::NONE
        }
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
            MouseButton::Other(_) => false,
        }
    }

    pub fn with(mut self, button: MouseButton) -> Self {
        match button {
            MouseButton::Left => self.left = true,
            MouseButton::Right => self.right = true,
            MouseButton::Middle => self.middle = true,
            MouseButton::Other(_) => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_contains() {
        let held = MouseButtons::NONE.with(MouseButton::Right);
        assert!(held.contains(MouseButton::Right));
        assert!(!held.contains(MouseButton::PRIMARY));
        assert!(MouseButtons::primary().contains(MouseButton::Left));
        assert!(!MouseButtons::primary().with(MouseButton::Other(4)).contains(MouseButton::Other(4)));
    }

    #[test]
    fn test_event_position() {
        let ev = Event::MouseMoved {
            position: Point::new(3.0, 4.0),
            held: MouseButtons::NONE,
        };
        assert_eq!(ev.position(), Some(Point::new(3.0, 4.0)));
        assert_eq!(
            Event::Resized {
                size: Size::new(1.0, 1.0)
            }
            .position(),
            None
        );
    }
}
