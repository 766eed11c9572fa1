//! Grid sizing settings.
//!
//! The resolver only ever sees settings through [`SettingsProvider`]. The
//! concrete [`GridSettings`] covers the common case: a JSON-loadable settings
//! document plus an optional code-only override hook for row-header widths.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GridError, Result};

/// Default column width in pixels when the host does not configure one
pub const DEFAULT_COLUMN_WIDTH: f64 = 50.0;

/// Default row (and column-header row) height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 23.0;

/// Signature of a computed width setting: source column index to width.
pub type WidthFn = Arc<dyn Fn(usize) -> Result<Option<f64>> + Send + Sync>;

/// Signature of the row-header width override hook.
pub type RowHeaderWidthHook =
    Arc<dyn Fn(Option<RowHeaderWidth>) -> Option<RowHeaderWidth> + Send + Sync>;

/// Per-column width configuration.
#[derive(Clone)]
pub enum WidthSetting {
    /// Same width for every column
    Fixed(f64),
    /// Width per source index; missing or `None` entries fall back to the default
    PerIndex(Vec<Option<f64>>),
    /// Width computed from the source index
    Computed(WidthFn),
}

impl WidthSetting {
    /// Wrap a closure as a computed width setting.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(usize) -> Result<Option<f64>> + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Raw width for a source column, before any default is applied.
    ///
    /// # Errors
    /// Returns whatever a [`WidthSetting::Computed`] callback fails with.
    pub fn resolve(&self, source_index: usize) -> Result<Option<f64>> {
        match self {
            Self::Fixed(width) => Ok(Some(*width)),
            Self::PerIndex(widths) => Ok(widths.get(source_index).copied().flatten()),
            Self::Computed(f) => f(source_index),
        }
    }
}

impl fmt::Debug for WidthSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(width) => f.debug_tuple("Fixed").field(width).finish(),
            Self::PerIndex(widths) => f.debug_tuple("PerIndex").field(widths).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Serialized form of a [`WidthSetting`]; computed settings have none.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WidthSettingRepr {
    Fixed(f64),
    PerIndex(Vec<Option<f64>>),
}

impl Serialize for WidthSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(width) => WidthSettingRepr::Fixed(*width).serialize(serializer),
            Self::PerIndex(widths) => {
                WidthSettingRepr::PerIndex(widths.clone()).serialize(serializer)
            }
            Self::Computed(_) => Err(serde::ser::Error::custom(
                "computed column widths cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for WidthSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match WidthSettingRepr::deserialize(deserializer)? {
            WidthSettingRepr::Fixed(width) => Self::Fixed(width),
            WidthSettingRepr::PerIndex(widths) => Self::PerIndex(widths),
        })
    }
}

/// Row-header width configuration: one width for all row-header columns or one per position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowHeaderWidth {
    Uniform(f64),
    PerPosition(Vec<Option<f64>>),
}

impl RowHeaderWidth {
    /// Width configured for the row-header column at `position`, if any.
    pub fn at(&self, position: usize) -> Option<f64> {
        match self {
            Self::Uniform(width) => Some(*width),
            Self::PerPosition(widths) => widths.get(position).copied().flatten(),
        }
    }
}

/// Read access to the settings the resolver depends on.
pub trait SettingsProvider {
    /// Per-column width setting, if any.
    fn column_width(&self) -> Option<&WidthSetting>;

    /// Width used when a column has no usable width of its own.
    fn default_column_width(&self) -> Option<f64>;

    /// Configured row height, also the minimum column-header row height.
    fn default_row_height(&self) -> Option<f64>;

    /// Raw row-header width setting, before the override hook runs.
    fn row_header_width(&self) -> Option<RowHeaderWidth>;

    /// Number of leading row-header columns.
    fn row_header_count(&self) -> usize;

    /// Gives host code a chance to replace or veto the row-header width.
    fn modify_row_header_width(&self, width: Option<RowHeaderWidth>) -> Option<RowHeaderWidth> {
        width
    }
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for &T {
    fn column_width(&self) -> Option<&WidthSetting> {
        (**self).column_width()
    }

    fn default_column_width(&self) -> Option<f64> {
        (**self).default_column_width()
    }

    fn default_row_height(&self) -> Option<f64> {
        (**self).default_row_height()
    }

    fn row_header_width(&self) -> Option<RowHeaderWidth> {
        (**self).row_header_width()
    }

    fn row_header_count(&self) -> usize {
        (**self).row_header_count()
    }

    fn modify_row_header_width(&self, width: Option<RowHeaderWidth>) -> Option<RowHeaderWidth> {
        (**self).modify_row_header_width(width)
    }
}

/// Settings document for a grid.
///
/// Loaded from JSON with [`GridSettings::from_json`] or assembled in code with
/// the `with_*` builders. Missing fields take the crate defaults; an explicit
/// `null` clears them.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_width: Option<WidthSetting>,
    pub default_column_width: Option<f64>,
    pub default_row_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_header_width: Option<RowHeaderWidth>,
    /// Number of row-header columns
    pub row_headers: usize,
    #[serde(skip)]
    row_header_width_hook: Option<RowHeaderWidthHook>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GridSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridSettings")
            .field("column_width", &self.column_width)
            .field("default_column_width", &self.default_column_width)
            .field("default_row_height", &self.default_row_height)
            .field("row_header_width", &self.row_header_width)
            .field("row_headers", &self.row_headers)
            .field("row_header_width_hook", &self.row_header_width_hook.is_some())
            .finish()
    }
}

impl GridSettings {
    /// Settings with the crate defaults and no row headers
    pub fn new() -> Self {
        Self {
            column_width: None,
            default_column_width: Some(DEFAULT_COLUMN_WIDTH),
            default_row_height: Some(DEFAULT_ROW_HEIGHT),
            row_header_width: None,
            row_headers: 0,
            row_header_width_hook: None,
        }
    }

    /// Parse a settings document.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] if the document is not valid JSON or has
    /// the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_column_width(mut self, width: WidthSetting) -> Self {
        self.column_width = Some(width);
        self
    }

    pub fn with_default_column_width(mut self, width: Option<f64>) -> Self {
        self.default_column_width = width;
        self
    }

    pub fn with_default_row_height(mut self, height: Option<f64>) -> Self {
        self.default_row_height = height;
        self
    }

    pub fn with_row_header_width(mut self, width: RowHeaderWidth) -> Self {
        self.row_header_width = Some(width);
        self
    }

    pub fn with_row_headers(mut self, count: usize) -> Self {
        self.row_headers = count;
        self
    }

    /// Install the row-header width override hook.
    pub fn on_modify_row_header_width<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<RowHeaderWidth>) -> Option<RowHeaderWidth> + Send + Sync + 'static,
    {
        self.row_header_width_hook = Some(Arc::new(hook));
        self
    }

    /// Check every literal width for values no column can be drawn with.
    ///
    /// Computed settings are not evaluated.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidSetting`] for the first negative or
    /// non-finite width found.
    pub fn validate(&self) -> Result<()> {
        match &self.column_width {
            Some(WidthSetting::Fixed(width)) => check_width("columnWidth", *width)?,
            Some(WidthSetting::PerIndex(widths)) => {
                for width in widths.iter().flatten() {
                    check_width("columnWidth", *width)?;
                }
            }
            Some(WidthSetting::Computed(_)) | None => {}
        }
        if let Some(width) = self.default_column_width {
            check_width("defaultColumnWidth", width)?;
        }
        if let Some(height) = self.default_row_height {
            check_width("defaultRowHeight", height)?;
        }
        match &self.row_header_width {
            Some(RowHeaderWidth::Uniform(width)) => check_width("rowHeaderWidth", *width)?,
            Some(RowHeaderWidth::PerPosition(widths)) => {
                for width in widths.iter().flatten() {
                    check_width("rowHeaderWidth", *width)?;
                }
            }
            None => {}
        }
        Ok(())
    }
}

fn check_width(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidSetting { name, value })
    }
}

impl SettingsProvider for GridSettings {
    fn column_width(&self) -> Option<&WidthSetting> {
        self.column_width.as_ref()
    }

    fn default_column_width(&self) -> Option<f64> {
        self.default_column_width
    }

    fn default_row_height(&self) -> Option<f64> {
        self.default_row_height
    }

    fn row_header_width(&self) -> Option<RowHeaderWidth> {
        self.row_header_width.clone()
    }

    fn row_header_count(&self) -> usize {
        self.row_headers
    }

    fn modify_row_header_width(&self, width: Option<RowHeaderWidth>) -> Option<RowHeaderWidth> {
        match &self.row_header_width_hook {
            Some(hook) => hook(width),
            None => width,
        }
    }
}

/// Treat zero and NaN like a missing width.
pub(crate) fn non_zero(width: Option<f64>) -> Option<f64> {
    width.filter(|w| *w != 0.0 && !w.is_nan())
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
    fn test_defaults() {
        let settings = GridSettings::default();
        assert!(settings.column_width.is_none());
        assert_eq!(settings.default_column_width, Some(DEFAULT_COLUMN_WIDTH));
        assert_eq!(settings.default_row_height, Some(DEFAULT_ROW_HEIGHT));
        assert_eq!(settings.row_headers, 0);
    }

    #[test]
    fn test_from_json_fixed_width() {
        let settings = GridSettings::from_json(r#"{"columnWidth": 120, "rowHeaders": 2}"#).unwrap();
        assert!(matches!(settings.column_width, Some(WidthSetting::Fixed(w)) if w == 120.0));
        assert_eq!(settings.row_headers, 2);
        // Untouched fields keep their defaults
        assert_eq!(settings.default_column_width, Some(DEFAULT_COLUMN_WIDTH));
    }

    #[test]
    fn test_from_json_arrays() {
        let settings = GridSettings::from_json(
            r#"{"columnWidth": [80, null, 40], "rowHeaderWidth": [10, null, 20], "defaultRowHeight": null}"#,
        )
        .unwrap();
        match settings.column_width {
            Some(WidthSetting::PerIndex(widths)) => {
                assert_eq!(widths, vec![Some(80.0), None, Some(40.0)]);
            }
            other => panic!("unexpected column width: {other:?}"),
        }
        assert_eq!(
            settings.row_header_width,
            Some(RowHeaderWidth::PerPosition(vec![Some(10.0), None, Some(20.0)]))
        );
        assert_eq!(settings.default_row_height, None);
    }

    #[test]
    fn test_from_json_rejects_bad_shape() {
        let err = GridSettings::from_json(r#"{"columnWidth": "wide"}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_resolve_per_index_out_of_bounds() {
        let setting = WidthSetting::PerIndex(vec![Some(30.0)]);
        assert_eq!(setting.resolve(0).unwrap(), Some(30.0));
        assert_eq!(setting.resolve(5).unwrap(), None);
    }

    #[test]
    fn test_resolve_computed_error_propagates() {
        let setting = WidthSetting::computed(|index| {
            Err(GridError::WidthCallback {
                index,
                message: "boom".to_string(),
            })
        });
        let err = setting.resolve(3).unwrap_err();
        assert!(matches!(err, GridError::WidthCallback { index: 3, .. }));
    }

    #[test]
    fn test_computed_is_not_serializable() {
        let settings = GridSettings::new().with_column_width(WidthSetting::computed(|_| Ok(None)));
        assert!(serde_json::to_string(&settings).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(GridSettings::new().validate().is_ok());

        let bad = GridSettings::new().with_column_width(WidthSetting::PerIndex(vec![
            Some(10.0),
            Some(-1.0),
        ]));
        let err = bad.validate().unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidSetting {
                name: "columnWidth",
                ..
            }
        ));

        let bad = GridSettings::new().with_row_header_width(RowHeaderWidth::Uniform(f64::NAN));
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_modify_hook() {
        let settings = GridSettings::new()
            .with_row_header_width(RowHeaderWidth::Uniform(40.0))
            .on_modify_row_header_width(|width| match width {
                Some(RowHeaderWidth::Uniform(w)) => Some(RowHeaderWidth::Uniform(w * 2.0)),
                other => other,
            });
        let raw = settings.row_header_width();
        assert_eq!(
            settings.modify_row_header_width(raw),
            Some(RowHeaderWidth::Uniform(80.0))
        );
    }

    #[test]
    fn test_non_zero() {
        assert_eq!(non_zero(Some(0.0)), None);
        assert_eq!(non_zero(Some(f64::NAN)), None);
        assert_eq!(non_zero(None), None);
        assert_eq!(non_zero(Some(12.0)), Some(12.0));
    }
}
