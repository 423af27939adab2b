//! Events the host shell feeds into the frame loop.
//!
//! The shell translates windowing-layer input into these variants each
//! frame. Handlers match explicitly and ignore the kinds they do not
//! consume.

/// Keys the editor binds.
///
/// Anything the scene does not react to is dropped at translation time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    /// Toggles the demo cube's idle spin.
    Space,
    /// Resets the camera framing.
    R,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier key state, delivered as a whole when it changes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    /// Host window resized. Zero dimensions signal a minimized or
    /// degenerate window and are ignored by handlers.
    WindowResize { width: u32, height: u32 },
    /// Pointer position in logical pixels.
    MouseMoved { x: f32, y: f32 },
    /// Scroll wheel delta in logical pixels.
    MouseScrolled { dx: f32, dy: f32 },
    MouseButtonPressed { button: MouseButton },
    MouseButtonReleased { button: MouseButton },
    KeyPressed { key: Key, repeat: bool },
    KeyReleased { key: Key },
    ModifiersChanged(Modifiers),
}
