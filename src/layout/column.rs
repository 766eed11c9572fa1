//! Column width resolution.
//!
//! [`ColumnSizer`] reconciles the configured column widths, the stretching
//! plan and row-header overrides into one width per column. Data column
//! widths are resolved on demand on every call; row-header widths are built
//! once per layout pass by [`ColumnSizer::calculate_widths`] and read from an
//! immutable [`HeaderWidths`] snapshot until the next rebuild.

use std::ops::Range;
use std::sync::Arc;

use super::filter::IndexMapper;
use super::stretch::StretchCalculator;
use super::viewport::ViewportGeometry;
use crate::error::Result;
use crate::settings::{non_zero, RowHeaderWidth, SettingsProvider};

/// Row-header width used when neither the setting nor the override hook provide one.
///
/// Matches the default header row height of the host grid, not its default
/// column width.
pub const ROW_HEADER_WIDTH_FALLBACK: f64 = 50.0;

/// Each cell's width includes its right border; the first column's left border
/// is drawn by no one else and is added here.
const LEFT_BORDER_WIDTH: f64 = 1.0;

/// Row-header widths keyed by rendered position, produced by one rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderWidths {
    widths: Vec<Option<f64>>,
}

impl HeaderWidths {
    /// Width of the row-header column at `rendered_index`
    pub fn get(&self, rendered_index: usize) -> Option<f64> {
        self.widths.get(rendered_index).copied().flatten()
    }

    /// Number of row-header positions covered by this snapshot
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Iterate `(rendered_index, width)` for positions that resolved to a width
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.widths
            .iter()
            .enumerate()
            .filter_map(|(index, width)| width.map(|w| (index, w)))
    }

    /// Sum of all resolved row-header widths
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, width)| width).sum()
    }
}

/// Resolves column widths and header geometry for one grid.
///
/// Owns (or borrows, since the collaborator traits are implemented for
/// references) its settings, index mapper and viewport. The stretch
/// calculator is passed per call because it may not exist before the first
/// layout pass.
pub struct ColumnSizer<S, M, V> {
    settings: S,
    mapper: M,
    viewport: V,
    header_widths: Arc<HeaderWidths>,
}

impl<S, M, V> ColumnSizer<S, M, V>
where
    S: SettingsProvider,
    M: IndexMapper,
    V: ViewportGeometry,
{
    pub fn new(settings: S, mapper: M, viewport: V) -> Self {
        Self {
            settings,
            mapper,
            viewport,
            header_widths: Arc::new(HeaderWidths::default()),
        }
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut S {
        &mut self.settings
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut M {
        &mut self.mapper
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Configured width of a source column.
    ///
    /// Zero, NaN and missing widths fall back to the default column width,
    /// which may itself be unset.
    ///
    /// # Errors
    /// Propagates failures of a computed width setting.
    pub fn get_width(&self, source_index: usize) -> Result<Option<f64>> {
        let width = match self.settings.column_width() {
            Some(setting) => setting.resolve(source_index)?,
            None => None,
        };
        Ok(non_zero(width).or_else(|| self.settings.default_column_width()))
    }

    /// Width of a source column after stretching.
    ///
    /// Without a calculator, or when it leaves the column alone, this is the
    /// configured width.
    ///
    /// # Errors
    /// Propagates failures of a computed width setting.
    pub fn get_stretched_column_width(
        &self,
        source_index: usize,
        calculator: Option<&dyn StretchCalculator>,
    ) -> Result<Option<f64>> {
        let base = self
            .get_width(source_index)?
            .or_else(|| self.settings.default_column_width());
        let Some(mut width) = base else {
            return Ok(None);
        };

        if let Some(calculator) = calculator {
            if let Some(stretched) =
                non_zero(calculator.stretched_column_width(source_index, width))
            {
                width = stretched;
            }
        }

        Ok(Some(width.max(0.0)))
    }

    /// Stretched widths for a run of source columns.
    ///
    /// # Errors
    /// Propagates failures of a computed width setting.
    pub fn stretched_widths(
        &self,
        sources: Range<usize>,
        calculator: Option<&dyn StretchCalculator>,
    ) -> Result<Vec<Option<f64>>> {
        sources
            .map(|source| self.get_stretched_column_width(source, calculator))
            .collect()
    }

    /// Height of the column-header row at `level`.
    ///
    /// Oversized header content can grow a row above the default row height
    /// but never shrink it.
    pub fn get_header_height(&self, level: usize) -> Option<f64> {
        let height = self.settings.default_row_height();
        match self.viewport.oversized_column_header(level) {
            Some(oversized) => Some(match non_zero(height) {
                Some(height) => height.max(oversized),
                None => oversized,
            }),
            None => height,
        }
    }

    /// Cached header width for a source column, looked up by its rendered index.
    ///
    /// `None` if the column is not rendered or the last
    /// [`calculate_widths`](Self::calculate_widths) did not cover it.
    pub fn get_header_width(&self, source_index: usize) -> Option<f64> {
        self.mapper
            .source_to_rendered(source_index)
            .and_then(|rendered| self.header_widths.get(rendered))
    }

    /// Current header-width snapshot.
    pub fn header_widths(&self) -> Arc<HeaderWidths> {
        Arc::clone(&self.header_widths)
    }

    /// Rebuild the stretching plan and the header-width snapshot for a layout pass.
    ///
    /// Must run before header widths or stretched widths of this pass are read.
    pub fn calculate_widths(&mut self, calculator: Option<&mut dyn StretchCalculator>) {
        let scrollbar_compensation = if self.viewport.has_scrollbar() {
            self.viewport.scrollbar_width()
        } else {
            0.0
        };
        let available_width = self.viewport.viewport_width() - scrollbar_compensation;

        match calculator {
            Some(calculator) => calculator.refresh_stretching(available_width),
            None => tracing::debug!(available_width, "no stretch calculator yet"),
        }

        let raw = self.settings.row_header_width();
        let row_header_width = self
            .settings
            .modify_row_header_width(raw)
            .unwrap_or(RowHeaderWidth::Uniform(ROW_HEADER_WIDTH_FALLBACK));
        let default_column_width = self.settings.default_column_width();
        let row_headers = self.settings.row_header_count();

        let widths = (0..row_headers)
            .map(|position| {
                let width = row_header_width.at(position).or(default_column_width)?;
                Some(if position == 0 {
                    width + LEFT_BORDER_WIDTH
                } else {
                    width
                })
            })
            .collect();

        self.header_widths = Arc::new(HeaderWidths { widths });

        tracing::debug!(
            available_width,
            scrollbar_compensation,
            row_headers,
            "rebuilt header widths"
        );
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
    use crate::layout::{ColumnFilter, ColumnStretcher, StretchMode, Viewport};
    use crate::settings::{GridSettings, WidthSetting};

    fn sizer(settings: GridSettings) -> ColumnSizer<GridSettings, ColumnFilter, Viewport> {
        ColumnSizer::new(settings, ColumnFilter::new(0, 100, 0), Viewport::new())
    }

    #[test]
    fn test_get_width_fixed() {
        let sizer = sizer(GridSettings::new().with_column_width(WidthSetting::Fixed(80.0)));
        assert_eq!(sizer.get_width(0).unwrap(), Some(80.0));
        assert_eq!(sizer.get_width(42).unwrap(), Some(80.0));
    }

    #[test]
    fn test_get_width_zero_falls_back() {
        let sizer = sizer(
            GridSettings::new()
                .with_column_width(WidthSetting::PerIndex(vec![Some(0.0), None, Some(30.0)]))
                .with_default_column_width(Some(64.0)),
        );
        assert_eq!(sizer.get_width(0).unwrap(), Some(64.0));
        assert_eq!(sizer.get_width(1).unwrap(), Some(64.0));
        assert_eq!(sizer.get_width(2).unwrap(), Some(30.0));
        assert_eq!(sizer.get_width(3).unwrap(), Some(64.0));
    }

    #[test]
    fn test_get_width_without_default() {
        let sizer = sizer(GridSettings::new().with_default_column_width(None));
        assert_eq!(sizer.get_width(0).unwrap(), None);
        assert_eq!(sizer.get_stretched_column_width(0, None).unwrap(), None);
    }

    #[test]
    fn test_stretched_width_uses_plan() {
        let sizer = sizer(GridSettings::new().with_column_width(WidthSetting::Fixed(100.0)));
        let mut stretcher = ColumnStretcher::new(StretchMode::Last, vec![100.0, 100.0]);
        stretcher.refresh_stretching(300.0);

        assert_eq!(
            sizer.get_stretched_column_width(0, Some(&stretcher)).unwrap(),
            Some(100.0)
        );
        assert_eq!(
            sizer.get_stretched_column_width(1, Some(&stretcher)).unwrap(),
            Some(200.0)
        );
    }

    #[test]
    fn test_header_height() {
        let mut sizer = sizer(GridSettings::new().with_default_row_height(Some(23.0)));
        assert_eq!(sizer.get_header_height(0), Some(23.0));

        sizer.viewport_mut().set_oversized_column_header(0, 40.0);
        sizer.viewport_mut().set_oversized_column_header(1, 10.0);
        assert_eq!(sizer.get_header_height(0), Some(40.0));
        assert_eq!(sizer.get_header_height(1), Some(23.0));

        sizer.settings_mut().default_row_height = None;
        assert_eq!(sizer.get_header_height(1), Some(10.0));
        assert_eq!(sizer.get_header_height(2), None);
    }

    #[test]
    fn test_calculate_widths_fallback_literal() {
        let mut sizer = sizer(GridSettings::new().with_row_headers(2));
        sizer.calculate_widths(None);

        let widths = sizer.header_widths();
        assert_eq!(widths.get(0), Some(ROW_HEADER_WIDTH_FALLBACK + 1.0));
        assert_eq!(widths.get(1), Some(ROW_HEADER_WIDTH_FALLBACK));
        assert_eq!(widths.total(), ROW_HEADER_WIDTH_FALLBACK * 2.0 + 1.0);
    }

    #[test]
    fn test_rebuild_replaces_snapshot() {
        let mut sizer = sizer(
            GridSettings::new()
                .with_row_header_width(RowHeaderWidth::Uniform(40.0))
                .with_row_headers(3),
        );
        sizer.calculate_widths(None);
        let before = sizer.header_widths();
        assert_eq!(before.len(), 3);

        sizer.settings_mut().row_headers = 1;
        sizer.calculate_widths(None);

        // Readers holding the old snapshot keep a consistent view
        assert_eq!(before.get(2), Some(40.0));
        let after = sizer.header_widths();
        assert_eq!(after.len(), 1);
        assert_eq!(after.get(2), None);
        assert_eq!(sizer.get_header_width(2), None);
    }

    #[test]
    fn test_missing_row_header_and_default_leaves_gap() {
        let mut sizer = sizer(
            GridSettings::new()
                .with_row_header_width(RowHeaderWidth::PerPosition(vec![None, Some(20.0)]))
                .with_default_column_width(None)
                .with_row_headers(2),
        );
        sizer.calculate_widths(None);
        assert_eq!(sizer.get_header_width(0), None);
        assert_eq!(sizer.get_header_width(1), Some(20.0));
        assert_eq!(sizer.header_widths().iter().count(), 1);
    }
}
