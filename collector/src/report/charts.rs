//! @ai:module:intent Per-metric comparison charts across runs
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait, PlotTarget, PlotSummary
//! @ai:module:stateless true

use crate::table::AggregationTable;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// @ai:intent Where rendered charts go
#[derive(Debug, Clone)]
pub enum PlotTarget {
    /// Show each chart in a viewer and wait for the user before the next one.
    Display,
    /// Write `<metric>.png` files into a directory, created if absent.
    Directory(PathBuf),
}

/// @ai:intent Outcome of a plotting pass
#[derive(Debug, Clone, Default)]
pub struct PlotSummary {
    pub rendered: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Render one chart per requested metric
    fn plot_metrics(
        &self,
        table: &AggregationTable,
        metrics: &[String],
        target: &PlotTarget,
    ) -> Result<PlotSummary>;
}

/// @ai:intent Renders line-with-marker charts of a metric across runs
pub struct ChartGenerator {
    width: u32,
    height: u32,
}

impl ChartGenerator {
    /// @ai:intent Create a chart generator with the given image size
    /// @ai:effects pure
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// @ai:intent Draw one metric series to a PNG file
    /// @ai:pre points is non-empty and every value is finite
    /// @ai:effects fs:write
    fn draw_chart(
        &self,
        runs: &[&str],
        metric: &str,
        points: &[(usize, f64)],
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (y_min, y_max) = value_range(points);
        let label_area = runs.iter().map(|r| r.len()).max().unwrap_or(0) as u32 * 8 + 20;

        let mut chart = ChartBuilder::on(&root)
            .caption(format!("{} vs. Run", metric), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(label_area.min(self.height / 3))
            .y_label_area_size(80)
            .build_cartesian_2d((0..runs.len() as i32).into_segmented(), y_min..y_max)?;

        chart
            .configure_mesh()
            .x_labels(runs.len())
            .x_desc("Run")
            .y_desc(metric)
            .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
            .x_label_formatter(&|x: &SegmentValue<i32>| match x {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => runs
                    .get(*i as usize)
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        let series = || points.iter().map(|(i, v)| (SegmentValue::CenterOf(*i as i32), *v));

        chart.draw_series(LineSeries::new(series(), BLUE.stroke_width(2)))?;
        chart.draw_series(series().map(|p| Circle::new(p, 4, BLUE.filled())))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Render a chart to a temporary file and show it
    /// @ai:effects fs:write, process, io
    fn show_chart(&self, runs: &[&str], metric: &str, points: &[(usize, f64)]) -> Result<()> {
        let file = tempfile::Builder::new()
            .prefix("simstats-")
            .suffix(".png")
            .tempfile()?;
        self.draw_chart(runs, metric, points, file.path())?;

        open_in_viewer(viewer_command(file.path()))
            .with_context(|| format!("Failed to open viewer for {}", file.path().display()))?;

        print!("Showing '{}' - press Enter to continue...", metric);
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;

        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

/// @ai:intent Finite points of one metric column, indexed by row
/// @ai:post None when the metric is not a table column
/// @ai:effects pure
fn metric_series(table: &AggregationTable, metric: &str) -> Option<Vec<(usize, f64)>> {
    let column = table.column(metric)?;
    Some(
        column
            .into_iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.filter(|v| v.is_finite()).map(|v| (i, v)))
            .collect(),
    )
}

/// @ai:intent Padded y-axis range covering every point
/// @ai:post both bounds and their difference are finite
/// @ai:effects pure
fn value_range(points: &[(usize, f64)]) -> (f64, f64) {
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));

    // Halves keep the span finite for values near f64::MAX.
    let half_span = max / 2.0 - min / 2.0;
    let pad = if half_span > 0.0 {
        half_span * 0.2
    } else if min != 0.0 {
        min.abs() * 0.1
    } else {
        1.0
    };

    let padded = ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX));
    if (padded.1 - padded.0).is_finite() {
        return padded;
    }
    if (max - min).is_finite() {
        return (min, max);
    }

    // Plotters cannot lay out an axis wider than f64::MAX.
    (f64::MIN / 2.0, f64::MAX / 2.0)
}

/// @ai:intent File name for a metric's chart, kept inside the plots directory
/// @ai:example chart_file_name("system.cpu.ipc") -> "system.cpu.ipc.png"
/// @ai:effects pure
fn chart_file_name(metric: &str) -> String {
    let stem: String = metric
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.png", stem)
}

/// @ai:intent Run the platform opener and wait for it to hand off the file
/// @ai:effects process
fn open_in_viewer(mut command: Command) -> Result<()> {
    let status = command.status()?;
    if !status.success() {
        anyhow::bail!("{:?} exited with {}", command.get_program(), status);
    }
    Ok(())
}

fn viewer_command(path: &Path) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Render each requested metric, skipping those with no data
    /// @ai:post a metric missing from the table or with no finite value is listed in skipped
    /// @ai:effects fs:write, io
    fn plot_metrics(
        &self,
        table: &AggregationTable,
        metrics: &[String],
        target: &PlotTarget,
    ) -> Result<PlotSummary> {
        if let PlotTarget::Directory(dir) = target {
            std::fs::create_dir_all(dir)?;
        }

        let runs: Vec<&str> = table.runs().collect();
        let mut summary = PlotSummary::default();

        for metric in metrics {
            let points = match metric_series(table, metric) {
                Some(points) if !points.is_empty() => points,
                Some(_) => {
                    tracing::info!("Stat '{}' has no data, skipping plot", metric);
                    summary.skipped.push(metric.clone());
                    continue;
                }
                None => {
                    tracing::info!("Stat '{}' missing, skipping plot", metric);
                    summary.skipped.push(metric.clone());
                    continue;
                }
            };

            match target {
                PlotTarget::Directory(dir) => {
                    let path = dir.join(chart_file_name(metric));
                    self.draw_chart(&runs, metric, &points, &path)?;
                    tracing::info!("Saved {} plot to {}", metric, path.display());
                    summary.rendered.push(path);
                }
                PlotTarget::Display => self.show_chart(&runs, metric, &points)?,
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstats_parser::StatRecord;
    use tempfile::TempDir;

    fn create_test_table() -> AggregationTable {
        let mut table = AggregationTable::new(["sim_seconds", "ipc", "numCycles"]);
        for (run, seconds) in [("width4", 0.03), ("width8", 0.02), ("width12", 0.018)] {
            let record: StatRecord = [
                ("sim_seconds".to_string(), seconds),
                ("ipc".to_string(), f64::NAN),
            ]
            .into_iter()
            .collect();
            table.add(run, &record);
        }
        table
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plot_to_directory() {
        let generator = ChartGenerator::new(640, 480);
        let temp = TempDir::new().unwrap();
        let plots_dir = temp.path().join("plots");
        let table = create_test_table();

        let summary = generator
            .plot_metrics(&table, &names(&["sim_seconds"]), &PlotTarget::Directory(plots_dir.clone()))
            .unwrap();

        assert_eq!(summary.rendered, vec![plots_dir.join("sim_seconds.png")]);
        assert!(plots_dir.join("sim_seconds.png").exists());
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn test_metrics_without_data_are_skipped() {
        let generator = ChartGenerator::default();
        let temp = TempDir::new().unwrap();
        let table = create_test_table();

        let summary = generator
            .plot_metrics(
                &table,
                &names(&["numCycles", "ipc", "not_a_column"]),
                &PlotTarget::Directory(temp.path().to_path_buf()),
            )
            .unwrap();

        assert!(summary.rendered.is_empty());
        assert_eq!(summary.skipped, names(&["numCycles", "ipc", "not_a_column"]));
        assert!(!temp.path().join("numCycles.png").exists());
    }

    #[test]
    fn test_value_range_pads() {
        let (lo, hi) = value_range(&[(0, 1.0), (1, 3.0)]);
        assert!((lo - 0.8).abs() < 1e-9);
        assert!((hi - 3.2).abs() < 1e-9);

        let (lo, hi) = value_range(&[(0, 0.0)]);
        assert_eq!((lo, hi), (-1.0, 1.0));
    }

    #[test]
    fn test_value_range_stays_finite_for_extreme_values() {
        for points in [
            vec![(0, 1.7e308)],
            vec![(0, -1.7e308)],
            vec![(0, -1e308), (1, 1e308)],
            vec![(0, f64::MIN), (1, f64::MAX)],
        ] {
            let (lo, hi) = value_range(&points);
            assert!(lo.is_finite() && hi.is_finite(), "{:?} -> ({}, {})", points, lo, hi);
            assert!((hi - lo).is_finite(), "{:?} -> ({}, {})", points, lo, hi);
            assert!(lo < hi);
        }

        let (lo, hi) = value_range(&[(0, 1.7e308)]);
        assert!(lo <= 1.7e308 && 1.7e308 <= hi);
    }

    #[test]
    fn test_plot_extreme_values_to_directory() {
        let generator = ChartGenerator::new(320, 240);
        let temp = TempDir::new().unwrap();
        let mut table = AggregationTable::new(["huge", "wide"]);
        let first: StatRecord = [("huge".to_string(), 1.7e308), ("wide".to_string(), -1e308)]
            .into_iter()
            .collect();
        let second: StatRecord = [("wide".to_string(), 1e308)].into_iter().collect();
        table.add("a", &first);
        table.add("b", &second);

        let summary = generator
            .plot_metrics(
                &table,
                &names(&["huge", "wide"]),
                &PlotTarget::Directory(temp.path().to_path_buf()),
            )
            .unwrap();

        assert_eq!(summary.rendered.len(), 2);
        assert!(temp.path().join("huge.png").exists());
        assert!(temp.path().join("wide.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_open_in_viewer_waits_and_reports_failure() {
        assert!(open_in_viewer(Command::new("true")).is_ok());
        assert!(open_in_viewer(Command::new("false")).is_err());
    }

    #[test]
    fn test_viewer_command_targets_file() {
        let path = Path::new("/tmp/chart.png");
        let command = viewer_command(path);
        assert!(command.get_args().any(|arg| arg == path.as_os_str()));
    }

    #[test]
    fn test_chart_file_name() {
        assert_eq!(chart_file_name("system.cpu.ipc"), "system.cpu.ipc.png");
        assert_eq!(chart_file_name("a/b"), "a_b.png");
    }
}
