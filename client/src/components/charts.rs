//! SVG bar and pie charts for the per-type vehicle counts.
//!
//! Geometry is computed by plain functions so it can be checked without a
//! DOM; the components only map the results onto `<rect>` and `<path>`.

#[cfg(test)]
#[path = "charts_test.rs"]
mod charts_test;

use std::f64::consts::TAU;

use leptos::prelude::*;

use crate::state::stats::ChartRow;

const BAR_WIDTH: f64 = 400.0;
const BAR_HEIGHT: f64 = 240.0;
const BAR_GAP: f64 = 12.0;
const PIE_SIZE: f64 = 240.0;

/// One positioned bar.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One pie wedge as an SVG path.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Slice {
    pub path: String,
    pub percent: f64,
}

/// Bars sharing `width` evenly, scaled so the largest count fills `height`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn bar_layout(rows: &[ChartRow], width: f64, height: f64) -> Vec<Bar> {
    if rows.is_empty() {
        return Vec::new();
    }
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0).max(1) as f64;
    let slot = width / rows.len() as f64;
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let bar_height = height * row.count as f64 / max;
            Bar {
                x: slot * index as f64 + BAR_GAP / 2.0,
                y: height - bar_height,
                width: (slot - BAR_GAP).max(1.0),
                height: bar_height,
            }
        })
        .collect()
}

/// Wedges starting at twelve o'clock, clockwise. Zero counts produce no
/// wedge; a single non-zero row is drawn as a full circle.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn pie_slices(rows: &[ChartRow], cx: f64, cy: f64, radius: f64) -> Vec<Slice> {
    let total: u64 = rows.iter().map(|r| r.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let total = total as f64;
    let point = |turn: f64| {
        let angle = turn * TAU - TAU / 4.0;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    };

    let mut start = 0.0_f64;
    let mut slices = Vec::with_capacity(rows.len());
    for row in rows.iter().filter(|r| r.count > 0) {
        let share = row.count as f64 / total;
        let path = if share >= 1.0 {
            format!(
                "M {cx:.2} {top:.2} A {radius:.2} {radius:.2} 0 1 1 {cx:.2} {bottom:.2} A {radius:.2} {radius:.2} 0 1 1 {cx:.2} {top:.2} Z",
                top = cy - radius,
                bottom = cy + radius,
            )
        } else {
            let (x0, y0) = point(start);
            let (x1, y1) = point(start + share);
            let large_arc = u8::from(share > 0.5);
            format!(
                "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
            )
        };
        slices.push(Slice {
            path,
            percent: share * 100.0,
        });
        start += share;
    }
    slices
}

#[component]
pub fn BarChart(rows: Signal<Vec<ChartRow>>) -> impl IntoView {
    let bars = move || {
        let rows = rows.get();
        let layout = bar_layout(&rows, BAR_WIDTH, BAR_HEIGHT);
        rows.into_iter().zip(layout).collect::<Vec<_>>()
    };

    view! {
        <svg class="chart chart--bar" viewBox=format!("0 0 {BAR_WIDTH} {}", BAR_HEIGHT + 24.0)>
            {move || {
                bars()
                    .into_iter()
                    .map(|(row, bar)| {
                        view! {
                            <g>
                                <rect
                                    x=format!("{:.2}", bar.x)
                                    y=format!("{:.2}", bar.y)
                                    width=format!("{:.2}", bar.width)
                                    height=format!("{:.2}", bar.height)
                                    fill=row.color
                                    rx="4"
                                >
                                    <title>{format!("{}: {}", row.label, row.count)}</title>
                                </rect>
                                <text
                                    x=format!("{:.2}", bar.x + bar.width / 2.0)
                                    y=format!("{:.2}", BAR_HEIGHT + 18.0)
                                    text-anchor="middle"
                                    class="chart__label"
                                >
                                    {row.label.clone()}
                                </text>
                            </g>
                        }
                    })
                    .collect_view()
            }}
        </svg>
    }
}

#[component]
pub fn PieChart(rows: Signal<Vec<ChartRow>>) -> impl IntoView {
    let wedges = move || {
        let rows: Vec<ChartRow> = rows.get().into_iter().filter(|r| r.count > 0).collect();
        let center = PIE_SIZE / 2.0;
        let slices = pie_slices(&rows, center, center, center - 8.0);
        rows.into_iter().zip(slices).collect::<Vec<_>>()
    };

    view! {
        <div class="chart chart--pie">
            <svg viewBox=format!("0 0 {PIE_SIZE} {PIE_SIZE}")>
                {move || {
                    wedges()
                        .into_iter()
                        .map(|(row, slice)| {
                            view! {
                                <path d=slice.path fill=row.color>
                                    <title>{format!("{}: {:.0}%", row.label, slice.percent)}</title>
                                </path>
                            }
                        })
                        .collect_view()
                }}
            </svg>
            <ul class="chart__legend">
                {move || {
                    wedges()
                        .into_iter()
                        .map(|(row, slice)| {
                            view! {
                                <li>
                                    <span class="chart__swatch" style=format!("background:{}", row.color)></span>
                                    {format!("{} {:.0}%", row.label, slice.percent)}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
