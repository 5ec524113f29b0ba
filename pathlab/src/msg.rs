//! Input events delivered to the demonstrator: [`Msg`], [`Key`],
//! [`MouseAction`].

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
}

/// An input message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    KeyDown(Key),
    /// A mouse event at terminal column `x`, line `y`.
    Mouse { action: MouseAction, x: i32, y: i32 },
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// Sent once when the loop starts.
    Init,
    /// Request to quit, e.g. from Ctrl+C.
    Quit,
}

impl Msg {
    pub fn char(c: char) -> Self {
        Self::KeyDown(Key::Char(c))
    }

    /// Left click at a terminal position.
    pub fn click(x: i32, y: i32) -> Self {
        Self::Mouse {
            action: MouseAction::Main,
            x,
            y,
        }
    }
}
