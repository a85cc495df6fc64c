// src/report.rs
//! Comparison output: a text table for the terminal and a PNG chart.
//!
//! The chart overlays observed first-digit percentages (bars) with the
//! reference distribution (line + markers) over digits 1–9, using the
//! [`plotters`] bitmap backend at a fixed 1000x600 resolution.
//!
//! [`report`] writes the table before drawing, so a chart that cannot be
//! written never costs the user the numbers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tabled::{Table, Tabled};
use thiserror::Error;
use tracing::info;

use crate::analysis::{Comparison, DigitFrequency, ReferenceDistribution};
use crate::file;

pub const CHART_SIZE: (u32, u32) = (1000, 600);

const CHART_TITLE: &str = "First Digit of Follower Counts (Benford Analysis)";
const OBSERVED_LABEL: &str = "Observed frequency";
const REFERENCE_LABEL: &str = "Benford's Law";
const BAR_COLOR: RGBColor = RGBColor(0, 128, 128);
const BAR_HALF_WIDTH: f64 = 0.4;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot write chart to '{}': {source}", path.display())]
    Destination { path: PathBuf, source: io::Error },

    #[error("failed to draw chart: {0}")]
    Drawing(String),

    #[error("failed to write summary: {0}")]
    Summary(#[source] io::Error),
}

type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Digit")]
    digit: u8,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Observed")]
    observed: String,
    #[tabled(rename = "Benford")]
    expected: String,
    #[tabled(rename = "Deviation")]
    deviation: String,
}

/// Render the comparison as an ASCII table with a short footer.
pub fn format_table(cmp: &Comparison) -> String {
    let rows: Vec<SummaryRow> = cmp
        .rows
        .iter()
        .map(|r| SummaryRow {
            digit: r.digit,
            count: r.count,
            observed: format!("{:.2}%", r.observed),
            expected: format!("{:.2}%", r.expected),
            deviation: format!("{:+.2}", r.deviation()),
        })
        .collect();

    let title = "First-digit analysis";
    format!(
        "{}\n{}\n{}\nValid counts: {}   Mean absolute deviation: {:.2} pp",
        title,
        "=".repeat(title.len()),
        Table::new(rows),
        cmp.total,
        cmp.mean_absolute_deviation(),
    )
}

/// Compare, print the table to `summary`, then save the chart to `destination`.
pub fn report<W: Write>(
    observed: &DigitFrequency,
    reference: &ReferenceDistribution,
    destination: &Path,
    mut summary: W,
) -> Result<Comparison> {
    let cmp = Comparison::new(observed, reference);
    writeln!(summary, "{}", format_table(&cmp)).map_err(ReportError::Summary)?;
    summary.flush().map_err(ReportError::Summary)?;

    render_chart(&cmp, destination)?;
    info!(path = %destination.display(), "chart saved");
    Ok(cmp)
}

/// Draw bars (observed) and a line (reference) and save as PNG.
pub fn render_chart(cmp: &Comparison, path: &Path) -> Result<()> {
    check_destination(path)?;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let y_top = cmp
        .rows
        .iter()
        .flat_map(|r| [r.observed, r.expected])
        .fold(0.0, f64::max);
    let y_top = (y_top * 1.15).max(10.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..9.5f64, 0f64..y_top)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(9)
        .x_label_formatter(&|x| {
            if (x - x.round()).abs() < 1e-6 { format!("{:.0}", x) } else { s!() }
        })
        .x_desc("First digit (1-9)")
        .y_desc("Frequency (%)")
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(cmp.rows.iter().map(|r| {
            let x = f64::from(r.digit);
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, r.observed)],
                BAR_COLOR.mix(0.7).filled(),
            )
        }))
        .map_err(drawing)?
        .label(OBSERVED_LABEL)
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], BAR_COLOR.mix(0.7).filled()));

    let reference: Vec<(f64, f64)> = cmp.rows.iter().map(|r| (f64::from(r.digit), r.expected)).collect();
    chart
        .draw_series(LineSeries::new(reference.iter().copied(), RED.stroke_width(2)))
        .map_err(drawing)?
        .label(REFERENCE_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    chart
        .draw_series(reference.iter().map(|&(x, y)| Circle::new((x, y), 4, RED.filled())))
        .map_err(drawing)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}

fn check_destination(path: &Path) -> Result<()> {
    let fail = |source: io::Error| ReportError::Destination { path: path.to_path_buf(), source };
    if path.is_dir() {
        return Err(fail(io::Error::other("path is a directory")));
    }
    file::ensure_parent(path).map_err(fail)
}

fn drawing<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Drawing(e.to_string())
}
