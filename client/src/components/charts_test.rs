use super::*;

fn row(code: &str, count: u64) -> ChartRow {
    ChartRow {
        code: code.to_owned(),
        label: code.to_owned(),
        count,
        color: "#000",
    }
}

// =============================================================
// bar_layout
// =============================================================

#[test]
fn bar_layout_empty_rows() {
    assert!(bar_layout(&[], 400.0, 200.0).is_empty());
}

#[test]
fn bar_layout_scales_to_largest_count() {
    let bars = bar_layout(&[row("car", 10), row("bus", 5)], 400.0, 200.0);
    assert_eq!(bars.len(), 2);
    assert!((bars[0].height - 200.0).abs() < 1e-9);
    assert!((bars[0].y - 0.0).abs() < 1e-9);
    assert!((bars[1].height - 100.0).abs() < 1e-9);
    assert!((bars[1].y - 100.0).abs() < 1e-9);
}

#[test]
fn bar_layout_splits_width_evenly() {
    let bars = bar_layout(&[row("a", 1), row("b", 1)], 400.0, 200.0);
    assert!((bars[0].x - BAR_GAP / 2.0).abs() < 1e-9);
    assert!((bars[1].x - (200.0 + BAR_GAP / 2.0)).abs() < 1e-9);
    assert!((bars[0].width - (200.0 - BAR_GAP)).abs() < 1e-9);
}

#[test]
fn bar_layout_all_zero_counts_are_flat() {
    let bars = bar_layout(&[row("a", 0)], 100.0, 50.0);
    assert!((bars[0].height).abs() < 1e-9);
}

// =============================================================
// pie_slices
// =============================================================

#[test]
fn pie_slices_empty_when_total_zero() {
    assert!(pie_slices(&[row("a", 0)], 10.0, 10.0, 5.0).is_empty());
}

#[test]
fn pie_slices_percentages_sum_to_hundred() {
    let slices = pie_slices(&[row("a", 1), row("b", 1), row("c", 2)], 100.0, 100.0, 50.0);
    assert_eq!(slices.len(), 3);
    let total: f64 = slices.iter().map(|s| s.percent).sum();
    assert!((total - 100.0).abs() < 1e-9);
    assert!((slices[2].percent - 50.0).abs() < 1e-9);
}

#[test]
fn pie_slices_skip_zero_rows() {
    let slices = pie_slices(&[row("a", 0), row("b", 3), row("c", 1)], 100.0, 100.0, 50.0);
    assert_eq!(slices.len(), 2);
    assert!((slices[0].percent - 75.0).abs() < 1e-9);
}

#[test]
fn pie_first_wedge_starts_at_top() {
    let slices = pie_slices(&[row("a", 1), row("b", 1)], 100.0, 100.0, 50.0);
    assert!(slices[0].path.starts_with("M 100.00 100.00 L 100.00 50.00 A"));
    assert!(slices[0].path.contains(" 0 0 1 100.00 150.00 Z"));
}

#[test]
fn pie_large_arc_flag_set_past_half() {
    let slices = pie_slices(&[row("a", 3), row("b", 1)], 100.0, 100.0, 50.0);
    assert!(slices[0].path.contains(" 0 1 1 "));
    assert!(slices[1].path.contains(" 0 0 1 "));
}

#[test]
fn pie_single_row_is_full_circle() {
    let slices = pie_slices(&[row("a", 4)], 100.0, 100.0, 50.0);
    assert_eq!(slices.len(), 1);
    assert!((slices[0].percent - 100.0).abs() < 1e-9);
    assert!(slices[0].path.starts_with("M 100.00 50.00 A"));
}
