//! Geometry state carried by every object: position and the three sizes.
//!
//! Sizes live outside the attribute table. Attributes such as `RASTERSIZE`
//! and `NATURALSIZE` are thin handlers over these fields.

use std::ops::{Add, Sub};

use crate::attr::convert::{int_int_to_str, str_to_int_int};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A position in pixels relative to the parent's client area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Parse `"x,y"`. Missing components are `0`.
    pub fn parse(s: &str) -> Option<Position> {
        match str_to_int_int(s, ',') {
            (None, None) => None,
            (x, y) => Some(Position::new(x.unwrap_or(0), y.unwrap_or(0))),
        }
    }

    pub fn to_attr_string(self) -> String {
        int_int_to_str(self.x, self.y, ',')
    }
}

impl Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A size in pixels. A zero component means "not specified".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Parse `"WxH"`. Either side may be omitted (`"x20"`), giving `0`.
    pub fn parse(s: &str) -> Option<Size> {
        match str_to_int_int(s, 'x') {
            (None, None) => None,
            (w, h) => Some(Size::new(w.unwrap_or(0).max(0), h.unwrap_or(0).max(0))),
        }
    }

    pub fn to_attr_string(self) -> String {
        int_int_to_str(self.width, self.height, 'x')
    }

    /// Component-wise maximum, used to apply a user size over a natural size.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size { width: self.width - rhs.width, height: self.height - rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Per-object geometry, kept separate from the attribute table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Geometry {
    /// Size requested by the application (`RASTERSIZE`).
    pub user: Size,
    /// Size the object would like, as computed by its driver.
    pub natural: Size,
    /// Size actually assigned by layout.
    pub current: Size,
    pub position: Position,
}

impl Geometry {
    /// The natural size with any user-requested components taking priority.
    pub fn effective_natural(&self) -> Size {
        Size::new(
            if self.user.width > 0 { self.user.width } else { self.natural.width },
            if self.user.height > 0 { self.user.height } else { self.natural.height },
        )
    }
}
