//! Static chart rendering. Pure output sinks: nothing here feeds back into
//! the pipeline.

pub mod report;

use crate::error::{PipelineError, Result};
use crate::parties::party_color;
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

fn draw_err<E: std::fmt::Display>(e: E) -> PipelineError {
    PipelineError::ChartError(e.to_string())
}

/// One bar of the average-sentiment chart.
pub struct PresidentSentiment {
    pub president: String,
    pub party: String,
    pub years: String,
    pub mean_score: f64,
}

/// Horizontal bar chart of average sentiment per president, bars colored by
/// party. `rows` should arrive sorted the way they are to be displayed.
pub fn sentiment_bar_chart(path: &Path, rows: &[PresidentSentiment]) -> Result<()> {
    if rows.is_empty() {
        return Err(PipelineError::ChartError(
            "no rows to chart; did the scoring stage produce any data?".to_string(),
        ));
    }

    let root = BitMapBackend::new(path, (1280, 60 + 28 * rows.len() as u32)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let min_score = rows
        .iter()
        .map(|r| r.mean_score)
        .fold(f64::INFINITY, f64::min)
        .min(0.0);
    let max_score = rows
        .iter()
        .map(|r| r.mean_score)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(0.0);
    let pad = ((max_score - min_score) * 0.1).max(0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Sentiment Score by President", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(280)
        .build_cartesian_2d(
            (min_score - pad)..(max_score + pad),
            (0..rows.len() as i32).into_segmented(),
        )
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows.len())
        .y_label_formatter(&|segment: &SegmentValue<i32>| {
            let index = match segment {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i,
                SegmentValue::Last => return String::new(),
            };
            rows.get(index as usize)
                .map(|row| format!("{} {}", row.president, row.years))
                .unwrap_or_default()
        })
        .x_desc("Average compound sentiment score")
        .draw()
        .map_err(draw_err)?;

    let parties: BTreeSet<&str> = rows.iter().map(|r| r.party.as_str()).collect();
    for party in parties {
        let color = party_color(party);
        chart
            .draw_series(
                rows.iter()
                    .enumerate()
                    .filter(|(_, row)| row.party == party)
                    .map(|(i, row)| {
                        Rectangle::new(
                            [
                                (0.0, SegmentValue::Exact(i as i32)),
                                (row.mean_score, SegmentValue::Exact(i as i32 + 1)),
                            ],
                            color.filled(),
                        )
                    }),
            )
            .map_err(draw_err)?
            .label(party.to_string())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
            });
    }

    // Numeric annotation at the tip of each bar.
    chart
        .draw_series(rows.iter().enumerate().map(|(i, row)| {
            Text::new(
                format!("{:.2}", row.mean_score),
                (row.mean_score, SegmentValue::CenterOf(i as i32)),
                ("sans-serif", 12),
            )
        }))
        .map_err(draw_err)?;

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Sentiment-over-time line chart for a single president. Dates are plotted
/// on a day axis labelled with the calendar date.
pub fn sentiment_trend_chart(
    path: &Path,
    president: &str,
    points: &[(NaiveDate, f64)],
) -> Result<()> {
    if points.is_empty() {
        return Err(PipelineError::ChartError(format!(
            "no dated speeches to chart for {}",
            president
        )));
    }

    let days: Vec<(i32, f64)> = points
        .iter()
        .map(|(date, score)| (date.num_days_from_ce(), *score))
        .collect();

    let x_min = days.iter().map(|(d, _)| *d).min().unwrap_or(0) - 30;
    let x_max = days.iter().map(|(d, _)| *d).max().unwrap_or(0) + 30;

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sentiment Trends for {}", president),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, -1.05f64..1.05f64)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|days: &i32| {
            NaiveDate::from_num_days_from_ce_opt(*days)
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default()
        })
        .x_desc("Date")
        .y_desc("Compound sentiment score")
        .draw()
        .map_err(draw_err)?;

    // Zero line for orientation.
    chart
        .draw_series(LineSeries::new(
            vec![(x_min, 0.0), (x_max, 0.0)],
            &RED.mix(0.6),
        ))
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(days.clone(), &BLUE))
        .map_err(draw_err)?;
    chart
        .draw_series(days.iter().map(|&(d, s)| Circle::new((d, s), 3, BLUE.filled())))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Horizontal bar chart of the most frequent keywords.
pub fn keyword_bar_chart(
    path: &Path,
    title: &str,
    counts: &[(String, usize)],
    color: RGBColor,
) -> Result<()> {
    if counts.is_empty() {
        return Err(PipelineError::ChartError(format!(
            "no keywords to chart for '{}'",
            title
        )));
    }

    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(1);

    let root = BitMapBackend::new(path, (1000, 60 + 30 * counts.len() as u32)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(140)
        .build_cartesian_2d(
            0f64..(max_count as f64 * 1.1),
            (0..counts.len() as i32).into_segmented(),
        )
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(counts.len())
        .y_label_formatter(&|segment: &SegmentValue<i32>| {
            let index = match segment {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i,
                SegmentValue::Last => return String::new(),
            };
            counts
                .get(index as usize)
                .map(|(word, _)| word.clone())
                .unwrap_or_default()
        })
        .x_desc("Occurrences")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(i as i32)),
                    (*count as f64, SegmentValue::Exact(i as i32 + 1)),
                ],
                color.filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Coherence-by-topic-count diagnostic line plot.
pub fn coherence_plot(path: &Path, points: &[(usize, f64)]) -> Result<()> {
    if points.is_empty() {
        return Err(PipelineError::ChartError(
            "no coherence scores to plot".to_string(),
        ));
    }

    let x_min = points.iter().map(|(k, _)| *k).min().unwrap_or(0);
    let x_max = points.iter().map(|(k, _)| *k).max().unwrap_or(1);
    let y_min = points.iter().map(|(_, c)| *c).fold(f64::INFINITY, f64::min);
    let y_max = points
        .iter()
        .map(|(_, c)| *c)
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((y_max - y_min) * 0.1).max(1e-3);

    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Optimal Number of Topics", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (x_min as f64 - 0.5)..(x_max as f64 + 0.5),
            (y_min - pad)..(y_max + pad),
        )
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Num Topics")
        .y_desc("Coherence score")
        .draw()
        .map_err(draw_err)?;

    let series: Vec<(f64, f64)> = points.iter().map(|&(k, c)| (k as f64, c)).collect();
    chart
        .draw_series(LineSeries::new(series.clone(), &BLUE))
        .map_err(draw_err)?;
    chart
        .draw_series(
            series
                .iter()
                .map(|&(k, c)| Circle::new((k, c), 4, BLUE.filled())),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

fn heat_color(value: f64, max_value: f64) -> RGBColor {
    let t = if max_value > 0.0 {
        (value / max_value).clamp(0.0, 1.0)
    } else {
        0.0
    };
    // Dark violet to yellow ramp.
    let lerp = |a: f64, b: f64| (a + (b - a) * t) as u8;
    RGBColor(lerp(68.0, 253.0), lerp(1.0, 231.0), lerp(84.0, 37.0))
}

/// Heatmap of mean topic weight per president, annotated per cell.
pub fn topic_heatmap(path: &Path, rows: &[(String, Vec<f64>)], num_topics: usize) -> Result<()> {
    if rows.is_empty() || num_topics == 0 {
        return Err(PipelineError::ChartError(
            "no topic distribution to chart".to_string(),
        ));
    }

    let max_value = rows
        .iter()
        .flat_map(|(_, weights)| weights.iter().copied())
        .fold(0.0f64, f64::max);

    let root = BitMapBackend::new(
        path,
        (260 + 80 * num_topics as u32, 80 + 26 * rows.len() as u32),
    )
    .into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Topic Distribution per President", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(220)
        .build_cartesian_2d(
            (0..num_topics as i32).into_segmented(),
            (0..rows.len() as i32).into_segmented(),
        )
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(num_topics)
        .y_labels(rows.len())
        .x_label_formatter(&|segment: &SegmentValue<i32>| {
            let index = match segment {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i,
                SegmentValue::Last => return String::new(),
            };
            if (index as usize) < num_topics {
                format!("Topic {}", index)
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|segment: &SegmentValue<i32>| {
            let index = match segment {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => *i,
                SegmentValue::Last => return String::new(),
            };
            rows.get(index as usize)
                .map(|(president, _)| president.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(draw_err)?;

    for (row_index, (_, weights)) in rows.iter().enumerate() {
        chart
            .draw_series(weights.iter().enumerate().map(|(topic, &weight)| {
                Rectangle::new(
                    [
                        (
                            SegmentValue::Exact(topic as i32),
                            SegmentValue::Exact(row_index as i32),
                        ),
                        (
                            SegmentValue::Exact(topic as i32 + 1),
                            SegmentValue::Exact(row_index as i32 + 1),
                        ),
                    ],
                    heat_color(weight, max_value).filled(),
                )
            }))
            .map_err(draw_err)?;

        chart
            .draw_series(weights.iter().enumerate().map(|(topic, &weight)| {
                Text::new(
                    format!("{:.2}", weight),
                    (
                        SegmentValue::CenterOf(topic as i32),
                        SegmentValue::CenterOf(row_index as i32),
                    ),
                    ("sans-serif", 11).into_font().color(&WHITE),
                )
            }))
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}
