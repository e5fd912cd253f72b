//! Integration tests that render every chart to PNG

use std::path::Path;

use tempfile::TempDir;
use titanic_prep::charts::{render_all, render_chart, ChartKind};
use titanic_prep::pipeline::prepare_passengers;

#[path = "common/mod.rs"]
mod common;

use common::*;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Machines without any system font cannot draw text; every other error fails the test
fn is_font_error(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.to_string().to_lowercase().contains("font"))
}

/// Width and height from the IHDR chunk of a PNG file
fn png_dimensions(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.len() > 24, "{} is too short to be a PNG", path.display());
    assert_eq!(bytes[..8], PNG_SIGNATURE, "{} is not a PNG", path.display());
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (width, height)
}

fn cleaned_train() -> polars::prelude::DataFrame {
    let prepared = prepare_passengers(&create_train_dataframe(), &create_test_dataframe()).unwrap();
    prepared.tables.train
}

#[test]
fn test_render_all_writes_seven_pngs() {
    let train = cleaned_train();
    let temp_dir = TempDir::new().unwrap();
    let images = temp_dir.path().join("images");

    let mut rendered = Vec::new();
    let paths = match render_all(&train, &images, |kind| rendered.push(kind)) {
        Ok(paths) => paths,
        Err(err) if is_font_error(&err) => {
            eprintln!("skipping chart rendering, no usable font: {:#}", err);
            return;
        }
        Err(err) => panic!("chart rendering failed: {:#}", err),
    };

    assert_eq!(rendered, ChartKind::ALL.to_vec(), "Callback runs once per chart, in order");
    assert_eq!(paths.len(), 7);

    for (kind, path) in ChartKind::ALL.iter().zip(&paths) {
        assert_eq!(path, &images.join(kind.file_name()));
        let size = std::fs::metadata(path).unwrap().len();
        assert!(size > 0, "{} is empty", kind.file_name());
        assert_eq!(png_dimensions(path), kind.size(), "{} has the wrong size", kind.file_name());
    }
}

#[test]
fn test_render_overwrites_existing_files() {
    let train = cleaned_train();
    let temp_dir = TempDir::new().unwrap();
    for kind in ChartKind::ALL {
        std::fs::write(temp_dir.path().join(kind.file_name()), "stale").unwrap();
    }

    match render_all(&train, temp_dir.path(), |_| {}) {
        Ok(_) => {}
        Err(err) if is_font_error(&err) => {
            eprintln!("skipping chart rendering, no usable font: {:#}", err);
            return;
        }
        Err(err) => panic!("chart rendering failed: {:#}", err),
    }

    for kind in ChartKind::ALL {
        let path = temp_dir.path().join(kind.file_name());
        assert_eq!(png_dimensions(&path), kind.size());
    }
}

#[test]
fn test_pairplot_with_unmapped_sex() {
    let mut train_input = create_train_dataframe();
    let sex = polars::prelude::Column::new("Sex".into(), ["male", "female", "unknown", "female", "male"]);
    train_input.with_column(sex).unwrap();
    let prepared = prepare_passengers(&train_input, &create_test_dataframe()).unwrap();
    assert_eq!(prepared.encoding.unmapped, 1);

    let temp_dir = TempDir::new().unwrap();
    let path = match render_chart(ChartKind::Pairplot, &prepared.tables.train, temp_dir.path()) {
        Ok(path) => path,
        Err(err) if is_font_error(&err) => {
            eprintln!("skipping chart rendering, no usable font: {:#}", err);
            return;
        }
        Err(err) => panic!("pair plot failed: {:#}", err),
    };

    assert_eq!(png_dimensions(&path), ChartKind::Pairplot.size());
}
