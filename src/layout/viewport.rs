//! Viewport geometry consumed by the column sizer.

/// Scrollbar thickness assumed when the host does not measure one
pub const DEFAULT_SCROLLBAR_WIDTH: f64 = 17.0;

/// Geometry of the scrollable area the grid is drawn into.
///
/// The scroll container measured here is whichever element actually scrolls:
/// for overlays (frozen panes, sticky headers) that is the master table's
/// holder, not the overlay's own.
pub trait ViewportGeometry {
    /// Total width available to columns, in pixels.
    fn viewport_width(&self) -> f64;

    /// Height required by oversized content in the column-header row at `level`.
    fn oversized_column_header(&self, level: usize) -> Option<f64>;

    /// Visible height of the scroll container.
    fn holder_height(&self) -> f64;

    /// Full content height of the scroll container.
    fn holder_scroll_height(&self) -> f64;

    /// Thickness of a native scrollbar.
    fn scrollbar_width(&self) -> f64;

    /// True when the container's content overflows its visible height, so a
    /// scrollbar is taking horizontal space away from the columns.
    fn has_scrollbar(&self) -> bool {
        self.holder_height() < self.holder_scroll_height()
    }
}

impl<T: ViewportGeometry + ?Sized> ViewportGeometry for &T {
    fn viewport_width(&self) -> f64 {
        (**self).viewport_width()
    }

    fn oversized_column_header(&self, level: usize) -> Option<f64> {
        (**self).oversized_column_header(level)
    }

    fn holder_height(&self) -> f64 {
        (**self).holder_height()
    }

    fn holder_scroll_height(&self) -> f64 {
        (**self).holder_scroll_height()
    }

    fn scrollbar_width(&self) -> f64 {
        (**self).scrollbar_width()
    }

    fn has_scrollbar(&self) -> bool {
        (**self).has_scrollbar()
    }
}

/// Viewport state - measured by the host on each layout pass
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Viewport width in pixels
    pub width: f64,
    /// Visible height of the scroll container
    pub holder_height: f64,
    /// Content height of the scroll container
    pub holder_scroll_height: f64,
    /// Native scrollbar thickness in pixels
    pub scrollbar_width: f64,
    /// Oversized height per column-header level (0 = innermost)
    pub oversized_column_headers: Vec<Option<f64>>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default values
    pub fn new() -> Self {
        Self {
            width: 800.0,
            holder_height: 600.0,
            holder_scroll_height: 600.0,
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
            oversized_column_headers: Vec::new(),
        }
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.holder_height = height;
    }

    /// Record the measured content height of the scroll container
    pub fn set_scroll_height(&mut self, scroll_height: f64) {
        self.holder_scroll_height = scroll_height;
    }

    /// Record an oversized header height at `level`, keeping the largest seen.
    pub fn set_oversized_column_header(&mut self, level: usize, height: f64) {
        if self.oversized_column_headers.len() <= level {
            self.oversized_column_headers.resize(level + 1, None);
        }
        if let Some(slot) = self.oversized_column_headers.get_mut(level) {
            *slot = Some(slot.map_or(height, |current| current.max(height)));
        }
    }

    /// Forget all oversized header heights (e.g. after the header content changed).
    pub fn reset_oversized_column_headers(&mut self) {
        self.oversized_column_headers.clear();
    }

    /// Whether a scrollbar currently occupies space
    pub fn has_horizontal_scrollbar(&self) -> bool {
        self.has_scrollbar()
    }
}

impl ViewportGeometry for Viewport {
    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn oversized_column_header(&self, level: usize) -> Option<f64> {
        self.oversized_column_headers.get(level).copied().flatten()
    }

    fn holder_height(&self) -> f64 {
        self.holder_height
    }

    fn holder_scroll_height(&self) -> f64 {
        self.holder_scroll_height
    }

    fn scrollbar_width(&self) -> f64 {
        self.scrollbar_width
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_scrollbar_detection() {
        let mut viewport = Viewport::new();
        assert!(!viewport.has_horizontal_scrollbar());

        viewport.set_scroll_height(1200.0);
        assert!(viewport.has_horizontal_scrollbar());

        viewport.resize(800.0, 1200.0);
        assert!(!viewport.has_horizontal_scrollbar());
    }

    #[test]
    fn test_oversized_headers_grow() {
        let mut viewport = Viewport::new();
        assert_eq!(viewport.oversized_column_header(0), None);

        viewport.set_oversized_column_header(2, 40.0);
        assert_eq!(viewport.oversized_column_headers.len(), 3);
        assert_eq!(viewport.oversized_column_header(1), None);
        assert_eq!(viewport.oversized_column_header(2), Some(40.0));

        // Only grows
        viewport.set_oversized_column_header(2, 30.0);
        assert_eq!(viewport.oversized_column_header(2), Some(40.0));
        viewport.set_oversized_column_header(2, 55.0);
        assert_eq!(viewport.oversized_column_header(2), Some(55.0));

        viewport.reset_oversized_column_headers();
        assert_eq!(viewport.oversized_column_header(2), None);
    }
}
