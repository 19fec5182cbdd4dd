//! SVG charts for the dashboard: user counts, keyword / tool usage and
//! notebook title length over time.
//!
//! - Distinct series colors (Microsoft Office palette)
//! - Locale-aware count labels (`30,000` vs `30.000`)
//! - Bars run top to bottom in table order

use crate::models::{CountryCount, LongTable, TrendSeries};
use anyhow::{Result, anyhow, bail};
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
pub fn office_color(idx: usize) -> RGBColor {
    OFFICE10[idx % OFFICE10.len()]
}

/// Map a locale tag to a `num_format::Locale`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Whole-number label with thousands separators.
pub fn format_count(v: f64, locale: &Locale) -> String {
    (v.round() as i64).to_formatted_string(locale)
}

/// Rough pixel width for a category label column.
fn label_area_px(labels: &[String], font_px: u32) -> u32 {
    let chars = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    (chars * font_px * 6 / 10 + 12).clamp(40, 260)
}

/// Category label for a y value, if it sits on a category center.
/// Category `i` is drawn at `y = n - 1 - i` so the first one is on top.
fn category_at(labels: &[String], y: f64) -> String {
    let r = y.round();
    if (y - r).abs() > 1e-6 || r < 0.0 {
        return String::new();
    }
    let n = labels.len();
    let slot = r as usize;
    if slot >= n {
        return String::new();
    }
    labels[n - 1 - slot].clone()
}

/// Horizontal bar chart of users per country.
pub fn plot_country_counts<P: AsRef<Path>>(
    counts: &[CountryCount],
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    if counts.is_empty() {
        bail!("no data to plot");
    }
    let locale = map_locale(locale_tag);
    let labels: Vec<String> = counts.iter().map(|c| c.country.clone()).collect();
    let n = labels.len();
    let max = counts.iter().map(|c| c.users).max().unwrap_or(0).max(1) as f64;

    let root = SVGBackend::new(out_path.as_ref(), (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {n} Countries by Number of Kaggle Users"),
            ("sans-serif", 20),
        )
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(label_area_px(&labels, 12))
        .build_cartesian_2d(0f64..max * 1.05, -0.5f64..(n as f64 - 0.5))
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_fmt = |x: &f64| format_count(*x, locale);
    let y_fmt = |y: &f64| category_at(&labels, *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .x_desc("User Count")
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let color = office_color(0);
    chart
        .draw_series(counts.iter().enumerate().map(|(i, c)| {
            let y = (n - 1 - i) as f64;
            Rectangle::new([(0.0, y - 0.4), (c.users as f64, y + 0.4)], color.filled())
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Grouped horizontal bars: one group per entity, one bar per country.
pub fn plot_long_table<P: AsRef<Path>>(
    table: &LongTable,
    title: &str,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    if table.is_empty() {
        bail!("no data to plot");
    }
    let locale = map_locale(locale_tag);
    let labels: Vec<String> = table
        .entities()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let countries: Vec<String> = table
        .countries()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let n = labels.len();
    let max = table
        .rows
        .iter()
        .map(|r| r.value)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = SVGBackend::new(out_path.as_ref(), (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(label_area_px(&labels, 12))
        .build_cartesian_2d(0f64..max * 1.05, -0.5f64..(n as f64 - 0.5))
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_fmt = |x: &f64| format_count(*x, locale);
    let y_fmt = |y: &f64| category_at(&labels, *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .x_desc(table.value_label.as_str())
        .y_desc(table.entity_label.as_str())
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let band = 0.8 / countries.len() as f64;
    for (k, country) in countries.iter().enumerate() {
        let color = office_color(k);
        let bars: Vec<Rectangle<(f64, f64)>> = labels
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                let v = table.value(entity, country).unwrap_or(0.0);
                // first country on top within its group
                let top = (n - 1 - i) as f64 + 0.4 - band * k as f64;
                Rectangle::new([(0.0, top - band), (v, top)], color.filled())
            })
            .collect();
        chart
            .draw_series(bars)
            .map_err(|e| anyhow!("{:?}", e))?
            .label(country.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::LowerRight)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Multi-series line chart of notebook title length per year.
pub fn plot_token_trends<P: AsRef<Path>>(
    series: &[TrendSeries],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    let points: Vec<(i32, f64)> = series
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .collect();
    if points.is_empty() {
        bail!("no data to plot");
    }
    let (mut min_year, mut max_year) = points
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), (y, _)| (lo.min(*y), hi.max(*y)));
    if min_year == max_year {
        min_year -= 1;
        max_year += 1;
    }
    let (mut min_val, mut max_val) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
            (lo.min(*v), hi.max(*v))
        });
    if (max_val - min_val).abs() < f64::EPSILON {
        min_val -= 1.0;
        max_val += 1.0;
    }
    let pad = (max_val - min_val) * 0.05;

    let root = SVGBackend::new(out_path.as_ref(), (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Notebook Title Length Over Time", ("sans-serif", 20))
        .margin(16)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(
            min_year as f64..max_year as f64,
            (min_val - pad)..(max_val + pad),
        )
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_fmt = |x: &f64| (x.round() as i32).to_string();
    chart
        .configure_mesh()
        .x_labels(((max_year - min_year + 1) as usize).min(12))
        .x_desc("Year")
        .y_desc("NotebookLength")
        .x_label_formatter(&x_fmt)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for (k, s) in series.iter().enumerate() {
        if s.points.is_empty() {
            continue;
        }
        let color = office_color(k);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|(y, v)| (*y as f64, *v)),
                &color,
            ))
            .map_err(|e| anyhow!("{:?}", e))?
            .label(s.country.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
