//! Column stretching.
//!
//! Stretching hands out viewport width left over after every column got its
//! configured width. It never shrinks columns.

use serde::{Deserialize, Serialize};

/// Redistributes slack viewport width across source columns.
pub trait StretchCalculator {
    /// Rebuild the stretching plan for `available_width` pixels.
    fn refresh_stretching(&mut self, available_width: f64);

    /// Stretched width for a column, or `None` to keep `base_width` as is.
    fn stretched_column_width(&self, source_index: usize, base_width: f64) -> Option<f64>;
}

/// Which columns receive slack width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StretchMode {
    /// Columns keep their configured widths
    #[default]
    None,
    /// Every column grows proportionally to its width
    All,
    /// The last column takes all of the slack
    Last,
}

#[derive(Debug, Clone, PartialEq)]
enum StretchPlan {
    Empty,
    All { ratio: f64, widths: Vec<f64> },
    Last { width: f64 },
}

/// [`StretchCalculator`] over a known set of base column widths.
#[derive(Debug, Clone)]
pub struct ColumnStretcher {
    mode: StretchMode,
    widths: Vec<f64>,
    plan: StretchPlan,
}

impl ColumnStretcher {
    /// Create a stretcher for columns whose base widths are `widths`
    /// (indexed by source column).
    pub fn new(mode: StretchMode, widths: Vec<f64>) -> Self {
        Self {
            mode,
            widths,
            plan: StretchPlan::Empty,
        }
    }

    pub fn mode(&self) -> StretchMode {
        self.mode
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    /// Replace the base widths. The current plan is discarded until the next refresh.
    pub fn set_column_widths(&mut self, widths: Vec<f64>) {
        self.widths = widths;
        self.plan = StretchPlan::Empty;
    }

    /// True when the last refresh produced any adjustment
    pub fn is_stretching(&self) -> bool {
        self.plan != StretchPlan::Empty
    }

    fn plan_all(&self, available_width: f64, total: f64) -> StretchPlan {
        let ratio = available_width / total;
        let mut widths: Vec<f64> = self.widths.iter().map(|w| (w * ratio).round()).collect();
        let planned: f64 = widths.iter().sum();
        // Rounding drift goes to the last column so the plan fills the viewport exactly
        if let Some(last) = widths.last_mut() {
            *last += available_width - planned;
        }
        StretchPlan::All { ratio, widths }
    }

    fn plan_last(&self, available_width: f64, total: f64) -> StretchPlan {
        match self.widths.last() {
            Some(last) => StretchPlan::Last {
                width: last + (available_width - total),
            },
            None => StretchPlan::Empty,
        }
    }
}

impl StretchCalculator for ColumnStretcher {
    fn refresh_stretching(&mut self, available_width: f64) {
        let total: f64 = self.widths.iter().sum();
        self.plan = if !available_width.is_finite() || available_width <= 0.0 || total <= 0.0 {
            StretchPlan::Empty
        } else if total >= available_width {
            // Nothing left over to hand out
            StretchPlan::Empty
        } else {
            match self.mode {
                StretchMode::None => StretchPlan::Empty,
                StretchMode::All => self.plan_all(available_width, total),
                StretchMode::Last => self.plan_last(available_width, total),
            }
        };
        tracing::trace!(
            mode = ?self.mode,
            available_width,
            total,
            stretching = self.is_stretching(),
            "refreshed stretching plan"
        );
    }

    fn stretched_column_width(&self, source_index: usize, base_width: f64) -> Option<f64> {
        match &self.plan {
            StretchPlan::Empty => None,
            StretchPlan::All { ratio, widths } => {
                let registered = self.widths.get(source_index)?;
                if (registered - base_width).abs() > f64::EPSILON {
                    return Some((base_width * ratio).round());
                }
                widths.get(source_index).copied()
            }
            StretchPlan::Last { width } => {
                (source_index + 1 == self.widths.len()).then_some(*width)
            }
        }
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
    fn test_none_mode_never_stretches() {
        let mut stretcher = ColumnStretcher::new(StretchMode::None, vec![50.0, 50.0]);
        stretcher.refresh_stretching(1000.0);
        assert!(!stretcher.is_stretching());
        assert_eq!(stretcher.stretched_column_width(0, 50.0), None);
    }

    #[test]
    fn test_all_mode_fills_viewport_exactly() {
        let mut stretcher = ColumnStretcher::new(StretchMode::All, vec![50.0, 50.0, 50.0]);
        stretcher.refresh_stretching(301.0);

        let widths: Vec<f64> = (0..3)
            .map(|i| stretcher.stretched_column_width(i, 50.0).unwrap())
            .collect();
        assert_eq!(widths[0], 100.0);
        assert_eq!(widths[1], 100.0);
        // Last column absorbs rounding drift
        assert_eq!(widths[2], 101.0);
        assert_eq!(widths.iter().sum::<f64>(), 301.0);
    }

    #[test]
    fn test_all_mode_scales_unregistered_base() {
        let mut stretcher = ColumnStretcher::new(StretchMode::All, vec![100.0, 100.0]);
        stretcher.refresh_stretching(400.0);
        assert_eq!(stretcher.stretched_column_width(0, 30.0), Some(60.0));
        assert_eq!(stretcher.stretched_column_width(2, 100.0), None);
    }

    #[test]
    fn test_last_mode() {
        let mut stretcher = ColumnStretcher::new(StretchMode::Last, vec![100.0, 100.0]);
        stretcher.refresh_stretching(350.0);
        assert_eq!(stretcher.stretched_column_width(0, 100.0), None);
        assert_eq!(stretcher.stretched_column_width(1, 100.0), Some(250.0));
    }

    #[test]
    fn test_no_slack_means_no_plan() {
        let mut stretcher = ColumnStretcher::new(StretchMode::All, vec![300.0, 300.0]);
        stretcher.refresh_stretching(500.0);
        assert!(!stretcher.is_stretching());
        assert_eq!(stretcher.stretched_column_width(0, 300.0), None);

        stretcher.refresh_stretching(f64::INFINITY);
        assert!(!stretcher.is_stretching());
    }

    #[test]
    fn test_set_column_widths_discards_plan() {
        let mut stretcher = ColumnStretcher::new(StretchMode::Last, vec![10.0]);
        stretcher.refresh_stretching(100.0);
        assert!(stretcher.is_stretching());

        stretcher.set_column_widths(vec![10.0, 10.0]);
        assert!(!stretcher.is_stretching());
        assert_eq!(stretcher.column_count(), 2);
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: StretchMode = serde_json::from_str("\"last\"").unwrap();
        assert_eq!(mode, StretchMode::Last);
    }
}
