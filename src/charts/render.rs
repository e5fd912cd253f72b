//! PNG renderers for the individual chart kinds

use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::data::{density_curve, CorrelationMatrix, Histogram};
use super::palette::{coolwarm, pastel};

const FONT: &str = "sans-serif";

/// Evaluation points per density curve on the pair-plot diagonal
const DENSITY_POINTS: usize = 200;

/// One bar of a categorical bar chart
#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
    /// Optional (low, high) whisker drawn over the bar
    pub interval: Option<(f64, f64)>,
}

/// One outcome's histogram in an overlaid step chart
#[derive(Debug, Clone)]
pub struct StepSeries {
    pub label: String,
    pub color: RGBColor,
    pub histogram: Histogram,
}

/// Axis text shared by the simple charts
pub struct Labels<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
}

fn segment_label(value: &SegmentValue<i32>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

/// Vertical bars over categorical segments, with optional interval whiskers
pub fn draw_bar_chart(path: &Path, size: (u32, u32), labels: &Labels, bars: &[Bar]) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let n = bars.len().max(1) as i32;
    let top = bars
        .iter()
        .map(|b| b.interval.map_or(b.value, |(_, hi)| hi.max(b.value)))
        .fold(0.0, f64::max);
    let y_max = if top > 0.0 { top * 1.1 } else { 1.0 };
    let names: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((0..n - 1).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n as usize)
        .x_label_formatter(&|v| segment_label(v, &names))
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let i = i as i32;
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value),
            ],
            bar.color.filled(),
        );
        rect.set_margin(0, 0, 20, 20);
        rect
    }))?;

    chart.draw_series(bars.iter().enumerate().filter_map(|(i, bar)| {
        bar.interval.map(|(lo, hi)| {
            ErrorBar::new_vertical(
                SegmentValue::CenterOf(i as i32),
                lo,
                bar.value,
                hi,
                BLACK.stroke_width(2),
                14,
            )
        })
    }))?;

    root.present()?;
    Ok(())
}

/// Overlaid step histograms sharing one x axis
pub fn draw_step_histograms(
    path: &Path,
    size: (u32, u32),
    labels: &Labels,
    series: &[StepSeries],
    x_view: Range<f64>,
    x_labels: usize,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let clipped: Vec<(&StepSeries, Histogram)> = series
        .iter()
        .map(|s| (s, s.histogram.clipped(x_view.start, x_view.end)))
        .collect();
    let top = clipped
        .iter()
        .map(|(_, h)| h.max_count())
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_view, 0f64..top * 1.1)?;

    chart
        .configure_mesh()
        .x_labels(x_labels)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .draw()?;

    for (s, hist) in &clipped {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(hist.step_points(), color.stroke_width(2)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Annotated correlation heatmap with a color bar on the right
pub fn draw_heatmap(path: &Path, size: (u32, u32), title: &str, matrix: &CorrelationMatrix) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (main, side) = root.split_horizontally(size.0.saturating_sub(110));
    let n = matrix.len().max(1) as i32;
    // Row 0 is drawn at the top
    let row_labels: Vec<String> = matrix.columns.iter().rev().cloned().collect();

    let mut chart = ChartBuilder::on(&main)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n - 1).into_segmented(), (0..n - 1).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n as usize)
        .y_labels(n as usize)
        .x_label_style((FONT, 11))
        .y_label_style((FONT, 11))
        .x_label_formatter(&|v| segment_label(v, &matrix.columns))
        .y_label_formatter(&|v| segment_label(v, &row_labels))
        .draw()?;

    let size_n = matrix.len();
    let cells: Vec<(i32, i32, f64)> = (0..size_n)
        .flat_map(|r| (0..size_n).map(move |c| (r, c)))
        .map(|(r, c)| (c as i32, (size_n - 1 - r) as i32, matrix.get(r, c)))
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        let fill = if v.is_nan() { WHITE } else { coolwarm(v) };
        Rectangle::new(
            [
                (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
            ],
            fill.filled(),
        )
    }))?;

    let centered = TextStyle::from((FONT, 12).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().filter(|(_, _, v)| !v.is_nan()).map(|&(x, y, v)| {
        let style = if v.abs() > 0.6 {
            centered.color(&WHITE)
        } else {
            centered.color(&BLACK)
        };
        Text::new(
            format!("{:.2}", v),
            (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
            style,
        )
    }))?;

    draw_color_bar(&side)?;

    root.present()?;
    Ok(())
}

fn draw_color_bar(area: &DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(50)
        .margin_right(40)
        .y_label_area_size(0)
        .right_y_label_area_size(40)
        .build_cartesian_2d(0f64..1f64, -1f64..1f64)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(5)
        .draw()?;

    let steps = 100;
    bar.draw_series((0..steps).map(|i| {
        let lo = -1.0 + 2.0 * i as f64 / steps as f64;
        let hi = -1.0 + 2.0 * (i + 1) as f64 / steps as f64;
        Rectangle::new([(0.0, lo), (1.0, hi)], coolwarm((lo + hi) / 2.0).filled())
    }))?;

    Ok(())
}

/// Pair-plot variables and the outcome of each row, used only as the hue
pub struct PairData<'a> {
    pub names: &'a [&'a str],
    pub columns: &'a [Vec<Option<f64>>],
    pub outcomes: &'a [Option<i64>],
}

fn padded_range(values: &[Option<f64>]) -> Range<f64> {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    match super::data::value_range(&observed) {
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            (lo - pad)..(hi + pad)
        }
        Some((lo, _)) => (lo - 0.5)..(lo + 0.5),
        None => 0.0..1.0,
    }
}

/// Lower-triangle pair plot: per-outcome density curves on the diagonal, scatter below
pub fn draw_pairplot(path: &Path, size: (u32, u32), title: &str, data: &PairData) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, 24))?;

    let k = data.names.len();
    let ranges: Vec<Range<f64>> = data.columns.iter().map(|c| padded_range(c)).collect();
    let panels = root.split_evenly((k, k));

    for (idx, panel) in panels.iter().enumerate() {
        let (row, col) = (idx / k, idx % k);
        if col > row {
            continue;
        }
        let x_area = if row == k - 1 { 35 } else { 0 };
        let y_area = if col == 0 { 45 } else { 0 };

        if row == col {
            let by_outcome: Vec<Vec<f64>> = [false, true]
                .iter()
                .map(|survived| {
                    data.columns[col]
                        .iter()
                        .zip(data.outcomes)
                        .filter_map(|(v, o)| match (v, o) {
                            (Some(v), Some(o)) if (*o != 0) == *survived => Some(*v),
                            _ => None,
                        })
                        .collect()
                })
                .collect();
            let total = by_outcome.iter().map(Vec::len).sum::<usize>().max(1) as f64;
            let range = &ranges[col];
            let curves: Vec<Vec<(f64, f64)>> = by_outcome
                .iter()
                .map(|values| {
                    density_curve(
                        values,
                        (range.start, range.end),
                        DENSITY_POINTS,
                        values.len() as f64 / total,
                    )
                })
                .collect();
            let top = curves
                .iter()
                .flatten()
                .map(|p| p.1)
                .fold(0.0, f64::max);
            let top = if top > 0.0 { top * 1.1 } else { 1.0 };

            let mut chart = ChartBuilder::on(panel)
                .margin(4)
                .x_label_area_size(x_area)
                .y_label_area_size(y_area)
                .build_cartesian_2d(ranges[col].clone(), 0f64..top)?;
            let mut mesh = chart.configure_mesh();
            mesh.x_labels(4).y_labels(4).label_style((FONT, 10));
            if x_area > 0 {
                mesh.x_desc(data.names[col]);
            }
            if y_area > 0 {
                mesh.y_desc(data.names[row]);
            }
            mesh.draw()?;

            for (hue, curve) in curves.into_iter().enumerate() {
                let color = pastel(hue);
                chart.draw_series(
                    AreaSeries::new(curve, 0.0, color.mix(0.3)).border_style(color.stroke_width(2)),
                )?;
            }
        } else {
            let mut chart = ChartBuilder::on(panel)
                .margin(4)
                .x_label_area_size(x_area)
                .y_label_area_size(y_area)
                .build_cartesian_2d(ranges[col].clone(), ranges[row].clone())?;
            let mut mesh = chart.configure_mesh();
            mesh.x_labels(4).y_labels(4).label_style((FONT, 10));
            if x_area > 0 {
                mesh.x_desc(data.names[col]);
            }
            if y_area > 0 {
                mesh.y_desc(data.names[row]);
            }
            mesh.draw()?;

            let points = data.columns[col]
                .iter()
                .zip(&data.columns[row])
                .zip(data.outcomes)
                .filter_map(|((x, y), o)| match (x, y, o) {
                    (Some(x), Some(y), Some(o)) => Some((*x, *y, usize::from(*o != 0))),
                    _ => None,
                });
            chart.draw_series(points.map(|(x, y, hue)| Circle::new((x, y), 2, pastel(hue).filled())))?;
        }
    }

    // Legend in the empty top-right panel
    if let Some(panel) = panels.get(k.saturating_sub(1)) {
        let style = TextStyle::from((FONT, 14).into_font());
        panel.draw(&Text::new("Survived", (20, 20), style.clone()))?;
        for hue in 0..2usize {
            let y = 45 + hue as i32 * 22;
            panel.draw(&Circle::new((28, y + 7), 6, pastel(hue).filled()))?;
            panel.draw(&Text::new(hue.to_string(), (42, y), style.clone()))?;
        }
    }

    root.present()?;
    Ok(())
}
