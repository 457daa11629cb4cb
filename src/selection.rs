//! Mouse-driven selection rectangle.
//!
//! The selection is stored in origin-image coordinates only: the drag anchor
//! and the current drag cursor. Its display rectangle is derived from the
//! current [`Scale`] whenever it is needed, so resizing the widget can never
//! make the two representations drift apart.

use selview_ui::{MouseButton, MouseButtons, Point};

use crate::coords::{from_image_rect, to_image_point, Rect, Scale};

/// A selection in origin-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    anchor: Point,
    cursor: Point,
}

impl Selection {
    fn at(point: Point) -> Self {
        Self {
            anchor: point,
            cursor: point,
        }
    }

    /// Where the drag started, in image coordinates.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Where the drag currently ends, in image coordinates.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The normalized selection rectangle in image coordinates.
    pub fn image_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.cursor).normalized()
    }

    /// The selection rectangle in display coordinates for `scale`.
    pub fn display_rect(&self, scale: Scale) -> Rect {
        from_image_rect(self.image_rect(), scale)
    }
}

/// Phase of the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// What a handled mouse event did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new zero-size selection was anchored at the press point.
    Started,
    /// The far corner followed the pointer.
    Updated,
    /// The drag ended; the selection is final.
    Finished,
}

/// State machine turning press/move/release into a selection.
///
/// Every method takes the current scale; `None` means no image is loaded and
/// makes the event a no-op.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Option<Selection>,
    phase: DragPhase,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Drop the selection and any drag in progress.
    pub fn clear(&mut self) {
        self.selection = None;
        self.phase = DragPhase::Idle;
    }

    /// Replace the selection with a finished one covering `rect` (image space).
    pub fn select_image_rect(&mut self, rect: Rect) {
        let rect = rect.normalized();
        self.selection = Some(Selection {
            anchor: rect.top_left(),
            cursor: rect.bottom_right(),
        });
        self.phase = DragPhase::Idle;
    }

    /// Primary press anchors a new selection. A press during a drag restarts it.
    pub fn press(
        &mut self,
        position: Point,
        button: MouseButton,
        scale: Option<Scale>,
    ) -> Option<Transition> {
        let scale = scale?;
        if button != MouseButton::PRIMARY {
            return None;
        }
        self.selection = Some(Selection::at(to_image_point(position, scale)));
        self.phase = DragPhase::Dragging;
        Some(Transition::Started)
    }

    /// Moving with the primary button held drags the far corner.
    pub fn drag_to(
        &mut self,
        position: Point,
        held: MouseButtons,
        scale: Option<Scale>,
    ) -> Option<Transition> {
        let scale = scale?;
        if !held.contains(MouseButton::PRIMARY) || !self.is_dragging() {
            return None;
        }
        let selection = self.selection.as_mut()?;
        selection.cursor = to_image_point(position, scale);
        Some(Transition::Updated)
    }

    /// Primary release places the far corner and ends the drag.
    pub fn release(
        &mut self,
        position: Point,
        button: MouseButton,
        scale: Option<Scale>,
    ) -> Option<Transition> {
        let scale = scale?;
        if button != MouseButton::PRIMARY || !self.is_dragging() {
            return None;
        }
        let selection = self.selection.as_mut()?;
        selection.cursor = to_image_point(position, scale);
        self.phase = DragPhase::Idle;
        Some(Transition::Finished)
    }
}
