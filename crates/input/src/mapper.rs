use crate::action::Action;
use glam::Vec2;

/// Keys the viewer binds. Everything else maps to [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F1,
    R,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

/// Window-system independent input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    ButtonPressed(PointerButton),
    ButtonReleased(PointerButton),
    /// Cursor position in physical pixels.
    CursorMoved(Vec2),
    /// Wheel motion in lines; positive scrolls away from the user.
    Wheel(f32),
    /// The cursor left the window.
    CursorLeft,
}

/// Turns a stream of [`InputEvent`]s into [`Action`]s.
///
/// Dragging with the primary button orbits; the wheel zooms. While the UI
/// owns the pointer (`set_captured(true)`), pointer events produce
/// [`Action::Noop`] and any drag in progress is dropped.
#[derive(Debug)]
pub struct InputMapper {
    /// Zoom amount per wheel line.
    pub zoom_per_line: f32,
    dragging: bool,
    captured: bool,
    last_cursor: Option<Vec2>,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self {
            zoom_per_line: 0.1,
            dragging: false,
            captured: false,
            last_cursor: None,
        }
    }
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mark whether another consumer (the debug panel) owns the pointer.
    pub fn set_captured(&mut self, captured: bool) {
        if captured && self.dragging {
            tracing::debug!("pointer captured by UI, ending drag");
            self.dragging = false;
        }
        self.captured = captured;
    }

    pub fn handle(&mut self, event: InputEvent) -> Action {
        match event {
            InputEvent::KeyPressed(Key::F1) => Action::TogglePanel,
            InputEvent::KeyPressed(Key::R) => Action::ResetParameters,
            InputEvent::KeyPressed(Key::Escape) => Action::Quit,
            InputEvent::KeyPressed(Key::Other) => Action::Noop,
            InputEvent::ButtonPressed(PointerButton::Primary) if !self.captured => {
                self.dragging = true;
                Action::Noop
            }
            InputEvent::ButtonReleased(PointerButton::Primary) => {
                self.dragging = false;
                Action::Noop
            }
            InputEvent::ButtonPressed(_) | InputEvent::ButtonReleased(_) => Action::Noop,
            InputEvent::CursorMoved(pos) => {
                let previous = self.last_cursor.replace(pos);
                match previous {
                    Some(last) if self.dragging => {
                        let delta = pos - last;
                        if delta == Vec2::ZERO {
                            Action::Noop
                        } else {
                            Action::Orbit {
                                dx: delta.x,
                                dy: delta.y,
                            }
                        }
                    }
                    _ => Action::Noop,
                }
            }
            InputEvent::CursorLeft => {
                self.last_cursor = None;
                Action::Noop
            }
            InputEvent::Wheel(lines) if !self.captured && lines.is_finite() && lines != 0.0 => {
                Action::Zoom(lines * self.zoom_per_line)
            }
            InputEvent::Wheel(_) => Action::Noop,
        }
    }
}
