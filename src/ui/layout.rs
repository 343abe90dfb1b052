//! Layout: pane geometry for the dashboard.
//!
//! Computed once at startup and again on terminal resize. No tree
//! traversal at render time, just four rectangles.

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Interior of a bordered pane (one cell of frame on each side).
    #[must_use]
    pub const fn inner(&self) -> Self {
        if self.width <= 2 || self.height <= 2 {
            return Self::new(self.x, self.y, 0, 0);
        }
        Self::new(self.x + 1, self.y + 1, self.width - 2, self.height - 2)
    }

    /// Split horizontally at a given column offset.
    pub fn split_horizontal(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.width);
        (
            Self::new(self.x, self.y, at, self.height),
            Self::new(self.x + at, self.y, self.width - at, self.height),
        )
    }

    /// Split vertically at a given row offset.
    pub fn split_vertical(&self, at: u16) -> (Self, Self) {
        let at = at.min(self.height);
        (
            Self::new(self.x, self.y, self.width, at),
            Self::new(self.x, self.y + at, self.width, self.height - at),
        )
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// The four panes of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    /// One-line listen-address banner across the top.
    pub status: Rect,
    /// Event list, top-left quarter.
    pub events: Rect,
    /// Call stack of the selected event, top-right quarter.
    pub callstack: Rect,
    /// Payload of the selected event, bottom half.
    pub payload: Rect,
}

impl DashboardLayout {
    /// Compute pane geometry for a terminal of `width` x `height`.
    ///
    /// The status bar takes height/25 rows (at least one), the event list
    /// and call stack share the area down to a quarter of the screen, and
    /// the payload takes everything below.
    pub fn compute(width: u16, height: u16) -> Self {
        let screen = Rect::new(0, 0, width, height);

        let status_height = (height / 25).max(1);
        let (status, rest) = screen.split_vertical(status_height);

        let top_height = (height / 4).saturating_sub(status_height).max(3);
        let (top, payload) = rest.split_vertical(top_height);
        let (events, callstack) = top.split_horizontal(width / 2);

        Self {
            status,
            events,
            callstack,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_shrinks_by_border() {
        let r = Rect::new(2, 3, 10, 6);
        assert_eq!(r.inner(), Rect::new(3, 4, 8, 4));
    }

    #[test]
    fn inner_of_tiny_rect_is_empty() {
        assert!(Rect::new(0, 0, 2, 2).inner().is_empty());
    }

    #[test]
    fn splits_cover_the_whole_rect() {
        let r = Rect::new(0, 0, 80, 24);
        let (left, right) = r.split_horizontal(40);
        assert_eq!(left.width + right.width, 80);
        let (top, bottom) = r.split_vertical(6);
        assert_eq!(top.height + bottom.height, 24);
        assert_eq!(bottom.y, 6);
    }

    #[test]
    fn split_clamps_past_the_edge() {
        let r = Rect::new(0, 0, 10, 10);
        let (a, b) = r.split_horizontal(99);
        assert_eq!(a.width, 10);
        assert_eq!(b.width, 0);
    }

    #[test]
    fn layout_panes_tile_the_screen() {
        let l = DashboardLayout::compute(80, 24);

        assert_eq!(l.status.y, 0);
        assert!(l.status.height >= 1);
        assert_eq!(l.events.y, l.status.height);
        assert_eq!(l.callstack.y, l.events.y);
        assert_eq!(l.events.width + l.callstack.width, 80);
        assert_eq!(l.payload.y, l.events.y + l.events.height);
        assert_eq!(l.payload.y + l.payload.height, 24);
    }

    #[test]
    fn layout_survives_a_tiny_terminal() {
        let l = DashboardLayout::compute(4, 3);
        // Degenerate but well-defined: no panics, no overflow.
        assert!(l.status.height >= 1);
        assert_eq!(l.events.y, l.status.height);
    }
}
