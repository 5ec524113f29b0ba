//! The [`Cell`] type: one grid position with its classification and
//! transient search status.

use crate::pos::Pos;

/// Traversal status of a cell during a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Unvisited,
    /// Discovered, in the frontier.
    Open,
    /// Expanded. May still be re-opened by a cheaper route.
    Closed,
}

/// A single grid cell.
///
/// Classification flags are changed through [`Grid`](crate::Grid) edit
/// operations, which keep the start/end uniqueness invariants. Search status
/// and the path flag are owned by the search engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Pos,
    pub(crate) wall: bool,
    pub(crate) start: bool,
    pub(crate) end: bool,
    pub(crate) path: bool,
    pub(crate) status: Status,
}

impl Cell {
    pub(crate) const fn new(pos: Pos) -> Self {
        Self {
            pos,
            wall: false,
            start: false,
            end: false,
            path: false,
            status: Status::Unvisited,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub const fn is_wall(&self) -> bool {
        self.wall
    }

    #[inline]
    pub const fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub const fn is_end(&self) -> bool {
        self.end
    }

    /// Whether the cell lies strictly inside the last path found.
    #[inline]
    pub const fn is_path(&self) -> bool {
        self.path
    }

    #[inline]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == Status::Open
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.status == Status::Closed
    }

    /// ASCII representation, by display priority:
    /// start `S`, end `E`, path `*`, closed `x`, open `o`, wall `#`, floor `.`.
    pub fn glyph(&self) -> char {
        if self.start {
            'S'
        } else if self.end {
            'E'
        } else if self.path {
            '*'
        } else if self.status == Status::Closed {
            'x'
        } else if self.status == Status::Open {
            'o'
        } else if self.wall {
            '#'
        } else {
            '.'
        }
    }

    pub(crate) fn clear_search_state(&mut self) {
        self.status = Status::Unvisited;
        self.path = false;
    }
}
