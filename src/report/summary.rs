//! Cleaning summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{EncodingReport, FillReport};

/// Summary of one cleaning run
#[derive(Debug, Default)]
pub struct CleaningSummary {
    pub train_rows_in: usize,
    pub test_rows_in: usize,
    pub train_rows_out: usize,
    pub test_rows_out: usize,
    pub fills: Vec<FillReport>,
    pub dropped_columns: Vec<String>,
    pub encoding: Option<EncodingReport>,
    pub charts_written: usize,
    pub step_times: Vec<(String, Duration)>,
}

impl CleaningSummary {
    pub fn new(train_rows_in: usize, test_rows_in: usize) -> Self {
        Self {
            train_rows_in,
            test_rows_in,
            ..Default::default()
        }
    }

    pub fn set_fills(&mut self, fills: Vec<FillReport>) {
        self.fills = fills;
    }

    pub fn set_dropped_columns(&mut self, columns: &[&str]) {
        self.dropped_columns = columns.iter().map(|c| c.to_string()).collect();
    }

    pub fn set_encoding(&mut self, encoding: EncodingReport) {
        self.encoding = Some(encoding);
    }

    pub fn set_output_rows(&mut self, train_rows: usize, test_rows: usize) {
        self.train_rows_out = train_rows;
        self.test_rows_out = test_rows;
    }

    pub fn set_charts_written(&mut self, count: usize) {
        self.charts_written = count;
    }

    pub fn record_step(&mut self, step: &str, elapsed: Duration) {
        self.step_times.push((step.to_string(), elapsed));
    }

    /// Total cells filled across all imputed columns
    pub fn total_filled(&self) -> usize {
        self.fills.iter().map(|f| f.filled).sum()
    }

    /// Rows in equals rows out
    pub fn rows_preserved(&self) -> bool {
        self.train_rows_in + self.test_rows_in == self.train_rows_out + self.test_rows_out
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows In (train / test)"),
            Cell::new(format!("{} / {}", self.train_rows_in, self.test_rows_in)),
        ]);

        table.add_row(vec![
            Cell::new("🩹 Cells Filled"),
            Cell::new(self.total_filled()).fg(if self.total_filled() == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new("🗑️  Columns Dropped"),
            Cell::new(self.dropped_columns.len()).fg(Color::Red),
        ]);

        if let Some(encoding) = &self.encoding {
            table.add_row(vec![
                Cell::new("🔢 Indicator Columns"),
                Cell::new(encoding.indicator_columns.len()),
            ]);
        }

        table.add_row(vec![
            Cell::new("🖼️  Charts Written"),
            Cell::new(self.charts_written),
        ]);

        let rows_color = if self.rows_preserved() {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("✅ Rows Out (train / test)"),
            Cell::new(format!("{} / {}", self.train_rows_out, self.test_rows_out))
                .fg(rows_color)
                .add_attribute(Attribute::Bold),
        ]);

        let total: Duration = self.step_times.iter().map(|(_, d)| *d).sum();
        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format!("{:.2}s", total.as_secs_f64())),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.fills.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("IMPUTED COLUMNS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for fill in &self.fills {
                println!(
                    "        {} {} {} {} {}",
                    style("•").dim(),
                    fill.column,
                    style(format!("({})", fill.strategy)).dim(),
                    style(&fill.value).yellow(),
                    style(format!("[{} filled]", fill.filled)).dim()
                );
            }
        }

        if let Some(encoding) = &self.encoding {
            println!();
            println!(
                "      {} {}:",
                style("Encoded").yellow(),
                style(format!("({})", encoding.indicator_columns.len() + 1)).dim()
            );
            println!(
                "        {} {} → 0/1",
                style("•").dim(),
                encoding.binary_column
            );
            for column in &encoding.indicator_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
