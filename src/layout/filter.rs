//! Translation between source columns and rendered columns.

/// Maps a source column (position in the full data set) to its rendered
/// position among the columns currently drawn.
pub trait IndexMapper {
    /// Rendered index for `source_index`, or `None` if it is not rendered.
    fn source_to_rendered(&self, source_index: usize) -> Option<usize>;
}

impl<T: IndexMapper + ?Sized> IndexMapper for &T {
    fn source_to_rendered(&self, source_index: usize) -> Option<usize> {
        (**self).source_to_rendered(source_index)
    }
}

/// Column window of a scrolled grid.
///
/// Rendered indices count data columns from the first one drawn; "row-headed"
/// indices additionally count the leading row-header columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnFilter {
    /// Source index of the first rendered column
    pub offset: usize,
    /// Number of rendered data columns
    pub total: usize,
    /// Number of row-header columns drawn before the data columns
    pub row_headers: usize,
}

impl ColumnFilter {
    pub fn new(offset: usize, total: usize, row_headers: usize) -> Self {
        Self {
            offset,
            total,
            row_headers,
        }
    }

    /// Source index of the rendered column at `rendered_index`
    pub fn rendered_to_source(&self, rendered_index: usize) -> Option<usize> {
        if rendered_index >= self.total {
            return None;
        }
        rendered_index.checked_add(self.offset)
    }

    /// Rendered index of `source_index`, `None` outside the window
    pub fn source_to_rendered(&self, source_index: usize) -> Option<usize> {
        source_index
            .checked_sub(self.offset)
            .filter(|rendered| *rendered < self.total)
    }

    /// Source index for a visible position that counts row-header columns first.
    ///
    /// Returns `None` for positions that are row headers.
    pub fn visible_row_headed_to_source(&self, visible_index: usize) -> Option<usize> {
        visible_index
            .checked_sub(self.row_headers)
            .and_then(|rendered| self.rendered_to_source(rendered))
    }

    /// Visible position (row headers first) of `source_index`
    pub fn source_to_visible_row_headed(&self, source_index: usize) -> Option<usize> {
        self.source_to_rendered(source_index)
            .and_then(|rendered| rendered.checked_add(self.row_headers))
    }
}

impl IndexMapper for ColumnFilter {
    fn source_to_rendered(&self, source_index: usize) -> Option<usize> {
        ColumnFilter::source_to_rendered(self, source_index)
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
    fn test_rendered_source_translation() {
        let filter = ColumnFilter::new(10, 5, 1);

        assert_eq!(filter.rendered_to_source(0), Some(10));
        assert_eq!(filter.rendered_to_source(4), Some(14));
        assert_eq!(filter.rendered_to_source(5), None);

        assert_eq!(filter.source_to_rendered(10), Some(0));
        assert_eq!(filter.source_to_rendered(14), Some(4));
        assert_eq!(filter.source_to_rendered(9), None);
        assert_eq!(filter.source_to_rendered(15), None);
    }

    #[test]
    fn test_row_headed_translation() {
        let filter = ColumnFilter::new(3, 4, 2);

        assert_eq!(filter.visible_row_headed_to_source(0), None);
        assert_eq!(filter.visible_row_headed_to_source(1), None);
        assert_eq!(filter.visible_row_headed_to_source(2), Some(3));
        assert_eq!(filter.source_to_visible_row_headed(3), Some(2));
        assert_eq!(filter.source_to_visible_row_headed(6), Some(5));
        assert_eq!(filter.source_to_visible_row_headed(7), None);
    }

    #[test]
    fn test_trait_dispatch_matches_inherent() {
        let filter = ColumnFilter::new(2, 3, 0);
        let mapper: &dyn IndexMapper = &filter;
        for source in 0..8 {
            assert_eq!(
                mapper.source_to_rendered(source),
                filter.source_to_rendered(source)
            );
        }
    }
}
