//! gridsizer - column geometry for virtualized grids
//!
//! Resolves how wide each column of a scrollable grid is drawn and how tall
//! its column-header rows are:
//! - Fixed, per-column or computed width settings with a default fallback
//! - Optional stretching of columns into leftover viewport width
//! - Row-header widths cached per layout pass, with an override hook
//! - Header rows grown to fit oversized content
//!
//! # Usage
//!
//! ```
//! use gridsizer::layout::{ColumnFilter, ColumnSizer, ColumnStretcher, StretchMode, Viewport};
//! use gridsizer::settings::{GridSettings, RowHeaderWidth, WidthSetting};
//!
//! # fn main() -> gridsizer::error::Result<()> {
//! let settings = GridSettings::new()
//!     .with_column_width(WidthSetting::Fixed(100.0))
//!     .with_row_header_width(RowHeaderWidth::Uniform(40.0))
//!     .with_row_headers(1);
//! let mut sizer = ColumnSizer::new(settings, ColumnFilter::new(0, 10, 1), Viewport::new());
//! let mut stretcher = ColumnStretcher::new(StretchMode::Last, vec![100.0; 4]);
//!
//! sizer.calculate_widths(Some(&mut stretcher));
//!
//! assert_eq!(sizer.get_header_width(0), Some(41.0));
//! assert_eq!(sizer.get_stretched_column_width(3, Some(&stretcher))?, Some(500.0));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod layout;
pub mod settings;

pub use error::{GridError, Result};
pub use layout::{ColumnSizer, HeaderWidths};
pub use settings::{GridSettings, RowHeaderWidth, SettingsProvider, WidthSetting};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
