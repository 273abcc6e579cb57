//! @ai:module:intent Render the aggregation table as aligned console text
//! @ai:module:layer presentation
//! @ai:module:public_api format_table, format_skipped
//! @ai:module:stateless true

use crate::report::csv_export::RUN_COLUMN;
use crate::table::{AggregationTable, Cell};
use std::fmt::Write as FmtWrite;

/// Placeholder for an absent cell.
const ABSENT: &str = "-";

fn display_cell(cell: Cell) -> String {
    match cell {
        Some(value) => value.to_string(),
        None => ABSENT.to_string(),
    }
}

/// @ai:intent Format the table as a grid, `Run` first, one column per metric
/// @ai:effects pure
pub fn format_table(table: &AggregationTable) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.values.iter().map(|c| display_cell(*c)).collect())
        .collect();

    let run_width = table
        .runs()
        .map(str::len)
        .chain(std::iter::once(RUN_COLUMN.len()))
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = table
        .metrics()
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(metric.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();

    write!(output, "{:<width$}", RUN_COLUMN, width = run_width).unwrap();
    for (metric, width) in table.metrics().iter().zip(&widths) {
        write!(output, "  {:>width$}", metric, width = *width).unwrap();
    }
    writeln!(output).unwrap();

    let total: usize = run_width + widths.iter().map(|w| w + 2).sum::<usize>();
    writeln!(output, "{}", "-".repeat(total)).unwrap();

    for (row, values) in table.rows().iter().zip(&cells) {
        write!(output, "{:<width$}", row.run, width = run_width).unwrap();
        for (value, width) in values.iter().zip(&widths) {
            write!(output, "  {:>width$}", value, width = *width).unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}

/// @ai:intent List skipped runs with their reasons
/// @ai:post empty string when nothing was skipped
/// @ai:effects pure
pub fn format_skipped(table: &AggregationTable) -> String {
    let mut output = String::new();

    if table.skipped().is_empty() {
        return output;
    }

    writeln!(output, "Skipped runs:").unwrap();
    for skipped in table.skipped() {
        writeln!(output, "  {}: {}", skipped.run, skipped.reason).unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SkipReason;
    use pretty_assertions::assert_eq;
    use simstats_parser::StatRecord;

    #[test]
    fn test_format_table_alignment() {
        let mut table = AggregationTable::new(["ipc", "sim_insts"]);
        let a: StatRecord = [("ipc".to_string(), f64::NAN), ("sim_insts".to_string(), 1000.0)]
            .into_iter()
            .collect();
        let b: StatRecord = [("ipc".to_string(), 1.25)].into_iter().collect();
        table.add("width4", &a);
        table.add("w8", &b);

        let expected = "\
Run      ipc  sim_insts
-----------------------
width4   NaN       1000
w8      1.25          -
";
        assert_eq!(format_table(&table), expected);
    }

    #[test]
    fn test_format_skipped() {
        let mut table = AggregationTable::new(["ipc"]);
        assert_eq!(format_skipped(&table), "");

        table.missing("b", SkipReason::NoWantedMetrics);
        assert_eq!(format_skipped(&table), "Skipped runs:\n  b: no requested stats present\n");
    }
}
