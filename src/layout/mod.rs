//! Column geometry for a virtualized grid.
//!
//! This module handles:
//! - Resolving column widths from settings, with optional stretching
//! - Caching row-header widths once per layout pass
//! - Column-header row heights grown by oversized content
//! - Mapping source columns to rendered columns

mod column;
mod filter;
mod stretch;
mod viewport;

pub use column::{ColumnSizer, HeaderWidths, ROW_HEADER_WIDTH_FALLBACK};
pub use filter::{ColumnFilter, IndexMapper};
pub use stretch::{ColumnStretcher, StretchCalculator, StretchMode};
pub use viewport::{Viewport, ViewportGeometry, DEFAULT_SCROLLBAR_WIDTH};
