//! Core geometry types: Point, Size, Rect, Extent, ViewPort.
//!
//! Coordinates are signed terminal cells. Widget positions are relative to the
//! parent container's content area; a container scrolls that content area by
//! shifting its [`ViewPort`].

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position or displacement in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Convert to a [`Rect`] positioned at the origin.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { x: 0, y: 0, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// An empty rectangle at the origin.
    pub const EMPTY: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from a corner and a size.
    #[inline]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive).
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive).
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Whether the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the cell (x, y) lies inside this rectangle.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection of two rectangles.
    ///
    /// Returns [`Rect::EMPTY`] if they do not overlap.
    #[inline]
    pub const fn intersection(self, other: Rect) -> Rect {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Rect::EMPTY
        } else {
            Rect { x: x1, y: y1, width: w, height: h }
        }
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// A requested dimension: a fixed number of cells or "auto-size".
///
/// For a widget's requested size, `Auto` means "use the natural (wish) size".
/// For a wish size, `Auto` means "take all the space the parent offers".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Extent {
    Fixed(i32),
    #[default]
    Auto,
}

impl Extent {
    /// The fixed value, if any.
    #[inline]
    pub const fn fixed(self) -> Option<i32> {
        match self {
            Extent::Fixed(n) => Some(n),
            Extent::Auto => None,
        }
    }
}

impl From<i32> for Extent {
    fn from(n: i32) -> Self {
        Extent::Fixed(n)
    }
}

/// A pair of [`Extent`]s.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Extents {
    pub width: Extent,
    pub height: Extent,
}

impl Extents {
    /// Auto-size in both directions.
    pub const AUTO: Extents = Extents { width: Extent::Auto, height: Extent::Auto };

    #[inline]
    pub const fn new(width: Extent, height: Extent) -> Self {
        Self { width, height }
    }

    /// Fixed size in both directions.
    #[inline]
    pub const fn fixed(width: i32, height: i32) -> Self {
        Self { width: Extent::Fixed(width), height: Extent::Fixed(height) }
    }
}

// ---------------------------------------------------------------------------
// ViewPort
// ---------------------------------------------------------------------------

/// The part of a widget that is visible on screen.
///
/// `(view_x, view_y, view_width, view_height)` is a window into the widget's
/// own coordinate space; `(screen_x, screen_y)` is where the top-left cell of
/// that window lands on the physical screen. A widget draws in its own
/// coordinates and the viewport discards everything outside the window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewPort {
    pub screen_x: i32,
    pub screen_y: i32,
    pub view_x: i32,
    pub view_y: i32,
    pub view_width: i32,
    pub view_height: i32,
}

impl ViewPort {
    #[inline]
    pub const fn new(
        screen_x: i32,
        screen_y: i32,
        view_x: i32,
        view_y: i32,
        view_width: i32,
        view_height: i32,
    ) -> Self {
        Self { screen_x, screen_y, view_x, view_y, view_width, view_height }
    }

    /// A fully visible area of `size` whose origin sits at `screen` position.
    #[inline]
    pub const fn at(screen: Point, size: Size) -> Self {
        Self::new(screen.x, screen.y, 0, 0, size.width, size.height)
    }

    /// Whether nothing of the widget is visible.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.view_width <= 0 || self.view_height <= 0
    }

    /// The visible window in widget coordinates.
    #[inline]
    pub const fn view_rect(&self) -> Rect {
        Rect::new(self.view_x, self.view_y, self.view_width, self.view_height)
    }

    /// Shift the visible window by a scroll offset.
    ///
    /// The screen placement stays the same; the content moves underneath it.
    #[inline]
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.view_x += dx;
        self.view_y += dy;
    }

    /// Map a widget-local cell to its screen cell, or `None` if it is clipped.
    #[inline]
    pub fn to_screen(&self, x: i32, y: i32) -> Option<Point> {
        if self.view_rect().contains(x, y) {
            Some(Point::new(
                self.screen_x + x - self.view_x,
                self.screen_y + y - self.view_y,
            ))
        } else {
            None
        }
    }

    /// Compute the viewport of a child occupying `child` (in this viewport's
    /// coordinate space, i.e. the parent's content coordinates).
    ///
    /// The child's visible window is its rectangle intersected with this
    /// visible window, expressed in the child's own coordinates. A child that
    /// lies completely outside gets a zero-extent viewport.
    pub fn child_viewport(&self, child: Rect) -> ViewPort {
        let view_x2 = self.view_x + self.view_width;
        let view_y2 = self.view_y + self.view_height;

        let mut screen_x = self.screen_x + child.x - self.view_x;
        let mut screen_y = self.screen_y + child.y - self.view_y;

        let mut view_x = 0;
        let mut view_y = 0;
        let mut view_width = child.width;
        let mut view_height = child.height;

        if self.view_x > child.x {
            view_x = self.view_x - child.x;
            screen_x += view_x;
            if view_x > child.width {
                view_x = child.width;
            }
            view_width -= view_x;
        }
        if self.view_y > child.y {
            view_y = self.view_y - child.y;
            screen_y += view_y;
            if view_y > child.height {
                view_y = child.height;
            }
            view_height -= view_y;
        }

        if child.right() > view_x2 {
            view_width = (view_width - (child.right() - view_x2)).max(0);
        }
        if child.bottom() > view_y2 {
            view_height = (view_height - (child.bottom() - view_y2)).max(0);
        }

        ViewPort::new(screen_x, screen_y, view_x, view_y, view_width, view_height)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Point / Size ─────────────────────────────────────────────────

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3, 4);
        let b = Point::new(1, 1);
        assert_eq!(a + b, Point::new(4, 5));
        assert_eq!(a - b, Point::new(2, 3));
        assert_eq!(-a, Point::new(-3, -4));
    }

    #[test]
    fn size_emptiness() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(5, 0).is_empty());
        assert!(Size::new(-1, 3).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    // ── Rect ─────────────────────────────────────────────────────────

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 10, 5);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 8);
        assert_eq!(r.origin(), Point::new(2, 3));
        assert_eq!(r.size(), Size::new(10, 5));
    }

    #[test]
    fn rect_contains() {
        let r = Rect::new(0, 0, 4, 2);
        assert!(r.contains(0, 0));
        assert!(r.contains(3, 1));
        assert!(!r.contains(4, 1));
        assert!(!r.contains(0, 2));
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Rect::new(5, 5, 5, 5));
        assert_eq!(a.intersection(Rect::new(10, 0, 3, 3)), Rect::EMPTY);
    }

    // ── Extent ───────────────────────────────────────────────────────

    #[test]
    fn extent_defaults_to_auto() {
        assert_eq!(Extent::default(), Extent::Auto);
        assert_eq!(Extents::default(), Extents::AUTO);
        assert_eq!(Extent::from(7).fixed(), Some(7));
        assert_eq!(Extent::Auto.fixed(), None);
    }

    // ── ViewPort ─────────────────────────────────────────────────────

    #[test]
    fn to_screen_clips_outside_view() {
        let vp = ViewPort::new(10, 5, 2, 0, 3, 1);
        assert_eq!(vp.to_screen(2, 0), Some(Point::new(10, 5)));
        assert_eq!(vp.to_screen(4, 0), Some(Point::new(12, 5)));
        assert_eq!(vp.to_screen(1, 0), None);
        assert_eq!(vp.to_screen(5, 0), None);
        assert_eq!(vp.to_screen(2, 1), None);
    }

    #[test]
    fn scroll_moves_content_not_screen() {
        let mut vp = ViewPort::at(Point::new(1, 1), Size::new(5, 5));
        vp.scroll(0, 3);
        assert_eq!(vp.screen_y, 1);
        assert_eq!(vp.view_y, 3);
        assert_eq!(vp.to_screen(0, 3), Some(Point::new(1, 1)));
    }

    #[test]
    fn child_fully_inside() {
        let parent = ViewPort::at(Point::new(10, 10), Size::new(20, 10));
        let child = parent.child_viewport(Rect::new(2, 3, 5, 2));
        assert_eq!(child, ViewPort::new(12, 13, 0, 0, 5, 2));
    }

    #[test]
    fn child_clipped_on_the_left_and_top() {
        let mut parent = ViewPort::at(Point::new(0, 0), Size::new(10, 10));
        parent.scroll(3, 2);
        let child = parent.child_viewport(Rect::new(1, 1, 5, 5));
        // Columns 0..2 and row 0 of the child are scrolled away.
        assert_eq!(child, ViewPort::new(0, 0, 2, 1, 3, 4));
    }

    #[test]
    fn child_clipped_on_the_right_and_bottom() {
        let parent = ViewPort::at(Point::new(0, 0), Size::new(10, 4));
        let child = parent.child_viewport(Rect::new(8, 2, 5, 5));
        assert_eq!(child, ViewPort::new(8, 2, 0, 0, 2, 2));
    }

    #[test]
    fn child_outside_has_zero_extent() {
        let parent = ViewPort::at(Point::new(0, 0), Size::new(10, 4));
        assert!(parent.child_viewport(Rect::new(12, 0, 3, 3)).is_empty());
        assert!(parent.child_viewport(Rect::new(0, 6, 3, 3)).is_empty());

        let mut scrolled = parent;
        scrolled.scroll(20, 0);
        assert!(scrolled.child_viewport(Rect::new(0, 0, 3, 3)).is_empty());
    }

    #[test]
    fn nested_viewports_compose() {
        let outer = ViewPort::at(Point::new(5, 5), Size::new(10, 10));
        let middle = outer.child_viewport(Rect::new(2, 2, 6, 6));
        let inner = middle.child_viewport(Rect::new(1, 1, 2, 2));
        assert_eq!(inner.to_screen(0, 0), Some(Point::new(8, 8)));
    }
}
