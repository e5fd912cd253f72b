//! titanic-prep: Passenger Data Preparation CLI
//!
//! Loads the train and test manifests, fills missing values, encodes
//! categorical fields, and writes charts plus cleaned CSV files.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use titanic_prep::charts::{render_all, ChartKind};
use titanic_prep::cli::Cli;
use titanic_prep::pipeline::schema::DROPPED_COLUMNS;
use titanic_prep::pipeline::{
    dataset_stats, drop_unused_columns, encode_passengers, export_cleaned, impute_passengers,
    load_passengers, merge_train_test, split_by_origin, validate_inputs,
};
use titanic_prep::report::{export_cleaning_report, CleaningReport, CleaningSummary, RowCounts};
use titanic_prep::utils::{
    create_progress_bar, create_spinner, finish_with_success, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.train,
        &cli.test,
        &cli.images_dir,
        &cli.outputs_dir,
        !cli.no_charts,
    );

    // Step 1: Load both files
    print_step_header(1, "Load Datasets");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV files...");
    let train = load_passengers(&cli.train, cli.infer_schema_length)?;
    let test = load_passengers(&cli.test, cli.infer_schema_length)?;
    validate_inputs(&train, &test)?;
    finish_with_success(&spinner, "Datasets loaded");

    for (name, df) in [("Train", &train), ("Test", &test)] {
        let (rows, cols, memory_mb) = dataset_stats(df);
        println!(
            "    {} {}: {} rows × {} columns ({:.2} MB)",
            style("✧").cyan(),
            name,
            style(rows).yellow(),
            style(cols).yellow(),
            memory_mb
        );
    }

    let mut summary = CleaningSummary::new(train.height(), test.height());
    let elapsed = step_start.elapsed();
    summary.record_step("load", elapsed);
    print_step_time(elapsed);

    // Step 2: Combine train and test
    print_step_header(2, "Combine Train and Test");
    let step_start = Instant::now();
    let mut combined = merge_train_test(&train, &test)?;
    print_count("combined row(s)", combined.height(), Some("(train first, then test)"));
    let elapsed = step_start.elapsed();
    summary.record_step("merge", elapsed);
    print_step_time(elapsed);

    // Step 3: Fill missing values and drop unused columns
    print_step_header(3, "Missing Value Imputation");
    let step_start = Instant::now();
    let fills = impute_passengers(&mut combined)?;
    for fill in &fills {
        print_info(&format!(
            "{}: filled {} cell(s) with {} {}",
            fill.column, fill.filled, fill.strategy, fill.value
        ));
    }
    let combined = drop_unused_columns(&combined);
    print_count(
        "column(s) dropped",
        DROPPED_COLUMNS.len(),
        Some(&format!("({})", DROPPED_COLUMNS.join(", "))),
    );
    print_success("Missing values filled");
    summary.set_fills(fills.clone());
    summary.set_dropped_columns(&DROPPED_COLUMNS);
    let elapsed = step_start.elapsed();
    summary.record_step("clean", elapsed);
    print_step_time(elapsed);

    // Step 4: Encode categorical fields
    print_step_header(4, "Categorical Encoding");
    let step_start = Instant::now();
    let (combined, encoding) = encode_passengers(&combined)?;
    if encoding.unmapped > 0 {
        print_info(&format!(
            "{} value(s) in {} matched no code and were left empty",
            encoding.unmapped, encoding.binary_column
        ));
    }
    print_count(
        "indicator column(s)",
        encoding.indicator_columns.len(),
        encoding
            .dropped_level
            .as_ref()
            .map(|level| format!("(reference level '{}' dropped)", level))
            .as_deref(),
    );
    print_success("Categorical fields encoded");
    summary.set_encoding(encoding.clone());
    let elapsed = step_start.elapsed();
    summary.record_step("encode", elapsed);
    print_step_time(elapsed);

    // Step 5: Split back into train and test
    print_step_header(5, "Split by Origin");
    let step_start = Instant::now();
    let mut tables = split_by_origin(&combined)?;
    summary.set_output_rows(tables.train.height(), tables.test.height());
    print_success(&format!(
        "Train: {} rows, Test: {} rows",
        tables.train.height(),
        tables.test.height()
    ));
    let elapsed = step_start.elapsed();
    summary.record_step("split", elapsed);
    print_step_time(elapsed);

    // Step 6: Charts
    print_step_header(6, "Charts");
    let step_start = Instant::now();
    let images = if cli.no_charts {
        print_info("Chart rendering skipped (--no-charts)");
        Vec::new()
    } else {
        let pb = create_progress_bar(ChartKind::ALL.len() as u64, "Rendering charts");
        let images = render_all(&tables.train, &cli.images_dir, |_| pb.inc(1))?;
        finish_with_success(
            &pb,
            &format!("{} charts written to {}", images.len(), cli.images_dir.display()),
        );
        images
    };
    summary.set_charts_written(images.len());
    let elapsed = step_start.elapsed();
    summary.record_step("charts", elapsed);
    print_step_time(elapsed);

    // Step 7: Save cleaned tables
    print_step_header(7, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing CSV files...");
    let (train_path, test_path) = export_cleaned(&mut tables, &cli.outputs_dir)?;
    finish_with_success(
        &spinner,
        &format!("Saved to {}", cli.outputs_dir.display()),
    );

    if cli.report {
        let rows = RowCounts {
            train_in: train.height(),
            test_in: test.height(),
            train_out: tables.train.height(),
            test_out: tables.test.height(),
        };
        let report = CleaningReport::new(
            &cli.train,
            &cli.test,
            rows,
            fills,
            &DROPPED_COLUMNS,
            encoding,
        )
        .with_outputs(&[train_path, test_path], &images);
        let report_path = export_cleaning_report(&report, &cli.outputs_dir)?;
        print_success(&format!("Report written to {}", report_path.display()));
    }
    let elapsed = step_start.elapsed();
    summary.record_step("save", elapsed);
    print_step_time(elapsed);

    summary.display();
    print_completion();

    Ok(())
}
