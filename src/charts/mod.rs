//! Charts module - descriptive plots of the cleaned training table
//!
//! Data preparation for each plot lives in [`data`] and is independent of the
//! drawing backend; [`render`] turns it into PNG files with plotters.

pub mod data;
pub mod palette;
pub mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::pipeline::schema::{AGE, FARE, PARCH, PCLASS, SEX, SIBSP};
use data::{
    correlation_matrix, histogram, numeric_values, outcome_counts, outcomes, survival_rate_by,
    value_range, values_by_outcome,
};
use palette::{pastel, DIED, SURVIVED as SURVIVED_COLOR};
use render::{Bar, Labels, PairData, StepSeries};

/// Variables shown in the pair plot, in panel order. `Survived` colors the
/// points and curves but gets no panel of its own.
pub const PAIR_COLUMNS: [&str; 6] = [AGE, FARE, PCLASS, SEX, SIBSP, PARCH];

/// The fixed set of charts produced for every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SurvivalCount,
    SurvivalBySex,
    SurvivalByPclass,
    AgeDistribution,
    FareDistribution,
    CorrelationHeatmap,
    Pairplot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::SurvivalCount,
        ChartKind::SurvivalBySex,
        ChartKind::SurvivalByPclass,
        ChartKind::AgeDistribution,
        ChartKind::FareDistribution,
        ChartKind::CorrelationHeatmap,
        ChartKind::Pairplot,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::SurvivalCount => "survival_count.png",
            ChartKind::SurvivalBySex => "survival_by_sex.png",
            ChartKind::SurvivalByPclass => "survival_by_pclass.png",
            ChartKind::AgeDistribution => "age_distribution_step_count.png",
            ChartKind::FareDistribution => "fare_distribution_by_survival.png",
            ChartKind::CorrelationHeatmap => "correlation_heatmap.png",
            ChartKind::Pairplot => "pairplot_selected.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::SurvivalCount => "Survival Count",
            ChartKind::SurvivalBySex => "Survival Rate by Sex",
            ChartKind::SurvivalByPclass => "Survival Rate by Passenger Class",
            ChartKind::AgeDistribution => "Age Distribution by Survival",
            ChartKind::FareDistribution => "Fare Distribution by Survival",
            ChartKind::CorrelationHeatmap => "Correlation Heatmap",
            ChartKind::Pairplot => "Pairplot of Titanic Features",
        }
    }

    /// Image size in pixels
    pub fn size(&self) -> (u32, u32) {
        match self {
            ChartKind::SurvivalCount | ChartKind::SurvivalBySex | ChartKind::SurvivalByPclass => {
                (600, 400)
            }
            ChartKind::AgeDistribution | ChartKind::FareDistribution => (800, 400),
            ChartKind::CorrelationHeatmap => (1000, 600),
            ChartKind::Pairplot => (1200, 1200),
        }
    }
}

/// Render every chart into `dir`, creating it when absent.
///
/// `on_rendered` is called after each chart is written, in [`ChartKind::ALL`] order.
pub fn render_all<F>(train: &DataFrame, dir: &Path, mut on_rendered: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(ChartKind),
{
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        written.push(render_chart(kind, train, dir)?);
        on_rendered(kind);
    }
    Ok(written)
}

/// Render one chart into `dir` and return its path
pub fn render_chart(kind: ChartKind, train: &DataFrame, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(kind.file_name());
    let size = kind.size();

    let rendered = match kind {
        ChartKind::SurvivalCount => {
            let counts = outcome_counts(train)?;
            let bars = vec![
                Bar {
                    label: "Died".into(),
                    value: counts.died as f64,
                    color: DIED,
                    interval: None,
                },
                Bar {
                    label: "Survived".into(),
                    value: counts.survived as f64,
                    color: SURVIVED_COLOR,
                    interval: None,
                },
            ];
            let labels = Labels {
                title: kind.title(),
                x_desc: "Survival",
                y_desc: "Count",
            };
            render::draw_bar_chart(&path, size, &labels, &bars)
        }
        ChartKind::SurvivalBySex => {
            let bars = rate_bars(train, SEX, |group| match group {
                0 => "Male".to_string(),
                1 => "Female".to_string(),
                other => other.to_string(),
            })?;
            let labels = Labels {
                title: kind.title(),
                x_desc: "Sex",
                y_desc: "Survival Rate",
            };
            render::draw_bar_chart(&path, size, &labels, &bars)
        }
        ChartKind::SurvivalByPclass => {
            let bars = rate_bars(train, PCLASS, |group| group.to_string())?;
            let labels = Labels {
                title: kind.title(),
                x_desc: "Pclass",
                y_desc: "Survival Rate",
            };
            render::draw_bar_chart(&path, size, &labels, &bars)
        }
        ChartKind::AgeDistribution => {
            let series = outcome_histograms(train, AGE, 30)?;
            let labels = Labels {
                title: kind.title(),
                x_desc: "Age",
                y_desc: "Count",
            };
            // Ticks every 10 years from 0 to 80
            render::draw_step_histograms(&path, size, &labels, &series, 0.0..85.0, 9)
        }
        ChartKind::FareDistribution => {
            let series = outcome_histograms(train, FARE, 40)?;
            let labels = Labels {
                title: kind.title(),
                x_desc: "Fare",
                y_desc: "Count",
            };
            render::draw_step_histograms(&path, size, &labels, &series, 0.0..200.0, 5)
        }
        ChartKind::CorrelationHeatmap => {
            let matrix = correlation_matrix(train)?;
            render::draw_heatmap(&path, size, kind.title(), &matrix)
        }
        ChartKind::Pairplot => {
            let columns: Vec<Vec<Option<f64>>> = PAIR_COLUMNS
                .iter()
                .map(|c| numeric_values(train, c))
                .collect::<Result<_>>()?;
            let outcomes = outcomes(train)?;
            let data = PairData {
                names: &PAIR_COLUMNS,
                columns: &columns,
                outcomes: &outcomes,
            };
            render::draw_pairplot(&path, size, kind.title(), &data)
        }
    };
    rendered.with_context(|| format!("Failed to render chart: {}", path.display()))?;

    Ok(path)
}

fn rate_bars(train: &DataFrame, column: &str, label: impl Fn(i64) -> String) -> Result<Vec<Bar>> {
    Ok(survival_rate_by(train, column)?
        .into_iter()
        .enumerate()
        .map(|(i, rate)| Bar {
            label: label(rate.group),
            value: rate.rate,
            color: pastel(i),
            interval: Some((rate.ci_low, rate.ci_high)),
        })
        .collect())
}

/// Histograms of `column` per outcome over bins shared by both outcomes
fn outcome_histograms(train: &DataFrame, column: &str, bins: usize) -> Result<Vec<StepSeries>> {
    let (died, survived) = values_by_outcome(train, column)?;
    let all: Vec<f64> = died.iter().chain(survived.iter()).copied().collect();
    let range = value_range(&all).unwrap_or((0.0, 1.0));

    Ok(vec![
        StepSeries {
            label: "Died".into(),
            color: DIED,
            histogram: histogram(&died, bins, range),
        },
        StepSeries {
            label: "Survived".into(),
            color: SURVIVED_COLOR,
            histogram: histogram(&survived, bins, range),
        },
    ])
}
