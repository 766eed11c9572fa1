//! End-to-end layout pass tests
//!
//! Drives a full pass the way a renderer does: settings loaded from JSON,
//! stretcher built from the resolved widths, header widths rebuilt, then
//! per-column lookups.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use test_case::test_case;

use gridsizer::layout::{ColumnFilter, ColumnSizer, ColumnStretcher, StretchMode, Viewport};
use gridsizer::GridSettings;

const SETTINGS: &str = r#"{
    "columnWidth": [120, null, 80, 0],
    "defaultColumnWidth": 100,
    "defaultRowHeight": 25,
    "rowHeaderWidth": 45,
    "rowHeaders": 1
}"#;

fn base_widths(sizer: &ColumnSizer<GridSettings, ColumnFilter, Viewport>, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| sizer.get_width(i).unwrap().unwrap_or(0.0))
        .collect()
}

#[test]
fn test_json_settings_resolve() {
    let settings = GridSettings::from_json(SETTINGS).unwrap();
    settings.validate().unwrap();
    let sizer = ColumnSizer::new(settings, ColumnFilter::new(0, 4, 1), Viewport::new());

    assert_eq!(base_widths(&sizer, 4), vec![120.0, 100.0, 80.0, 100.0]);
    assert_eq!(sizer.get_header_height(0), Some(25.0));
}

#[test_case(StretchMode::None, vec![120.0, 100.0, 80.0, 100.0]; "no stretching")]
#[test_case(StretchMode::Last, vec![120.0, 100.0, 80.0, 483.0]; "last column takes slack")]
#[test_case(StretchMode::All, vec![235.0, 196.0, 157.0, 195.0]; "proportional")]
fn test_full_pass(mode: StretchMode, expected: Vec<f64>) {
    let settings = GridSettings::from_json(SETTINGS).unwrap();
    let mut viewport = Viewport::new();
    viewport.resize(800.0, 400.0);
    viewport.set_scroll_height(1000.0);
    let mut sizer = ColumnSizer::new(settings, ColumnFilter::new(0, 4, 1), viewport);

    let mut stretcher = ColumnStretcher::new(mode, base_widths(&sizer, 4));
    sizer.calculate_widths(Some(&mut stretcher));

    let widths: Vec<f64> = sizer
        .stretched_widths(0..4, Some(&stretcher))
        .unwrap()
        .into_iter()
        .map(|w| w.unwrap())
        .collect();
    assert_eq!(widths, expected);

    if mode != StretchMode::None {
        // Stretched columns fill the viewport minus the scrollbar
        assert_eq!(widths.iter().sum::<f64>(), 783.0);
    }
    assert_eq!(sizer.get_header_width(0), Some(46.0));
}

#[test]
fn test_scrolled_window_header_lookup() {
    let settings = GridSettings::from_json(r#"{"rowHeaderWidth": [60, 30], "rowHeaders": 2}"#)
        .unwrap();
    let mut sizer = ColumnSizer::new(settings, ColumnFilter::new(10, 20, 2), Viewport::new());
    sizer.calculate_widths(None);

    // Source 10 is the first rendered column, source 11 the second
    assert_eq!(sizer.get_header_width(10), Some(61.0));
    assert_eq!(sizer.get_header_width(11), Some(30.0));
    assert_eq!(sizer.get_header_width(9), None);

    // Scrolling moves the window; the snapshot is keyed by rendered index
    sizer.mapper_mut().offset = 12;
    assert_eq!(sizer.get_header_width(12), Some(61.0));
    assert_eq!(sizer.get_header_width(10), None);
}

#[test]
fn test_viewport_change_needs_rebuild() {
    let settings = GridSettings::from_json(SETTINGS).unwrap();
    let mut sizer = ColumnSizer::new(settings, ColumnFilter::new(0, 4, 1), Viewport::new());
    let mut stretcher = ColumnStretcher::new(StretchMode::Last, base_widths(&sizer, 4));

    sizer.calculate_widths(Some(&mut stretcher));
    assert_eq!(
        sizer.get_stretched_column_width(3, Some(&stretcher)).unwrap(),
        Some(500.0)
    );

    sizer.viewport_mut().resize(1000.0, 600.0);
    // Plan is stale until the next pass
    assert_eq!(
        sizer.get_stretched_column_width(3, Some(&stretcher)).unwrap(),
        Some(500.0)
    );

    sizer.calculate_widths(Some(&mut stretcher));
    assert_eq!(
        sizer.get_stretched_column_width(3, Some(&stretcher)).unwrap(),
        Some(700.0)
    );
}
