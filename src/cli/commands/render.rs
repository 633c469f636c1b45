//! Human and JSON rendering of dashboard views

use crate::app::models::{AggregateView, Dataset, FilterCriteria, FilterOptions};
use crate::app::services::dashboard::DashboardView;
use crate::app::services::exporter::ExportSummary;
use crate::config::InsightsConfig;
use crate::constants::{BLANK_LABEL, EXPORT_MIME_TYPE, REPORT_SUBTITLE, REPORT_TITLE};
use colored::*;
use serde_json::{Value, json};

const BAR_CHAR: char = '#';
const EMPTY_GROUP_LINE: &str = "  (no rides match the current filters)";

/// Full human-readable report for one view
pub fn human_report(
    view: &DashboardView,
    config: &InsightsConfig,
    show_rows: Option<usize>,
) -> String {
    let mut output = format!(
        "📊 {}\n{}\n{}\n\n",
        REPORT_TITLE.bright_green().bold(),
        "=".repeat(REPORT_TITLE.chars().count() + 3),
        REPORT_SUBTITLE
    );

    output.push_str(&format!("🔎 Filters: {}\n\n", describe_criteria(&view.criteria)));
    output.push_str(&kpi_block(&view.aggregates, config));
    output.push('\n');
    output.push_str(&grouped_tables(&view.aggregates, config));

    if let Some(limit) = show_rows {
        output.push('\n');
        output.push_str(&data_table(&view.filtered, limit));
    }

    output.push('\n');
    let image = &view.dashboard_image;
    if image.available {
        output.push_str(&format!("🖼️  Dashboard image: {}\n", image.path.display()));
    } else {
        output.push_str(&format!(
            "🖼️  Dashboard image: {} ({})\n",
            image.path.display(),
            "not found".bright_yellow()
        ));
    }

    output
}

/// The three headline metrics
pub fn kpi_block(aggregates: &AggregateView, config: &InsightsConfig) -> String {
    format!(
        "Total Rides:         {}\n\
         Total Revenue:       {}\n\
         Avg Customer Rating: {}\n",
        aggregates.total_rides.to_string().bright_white().bold(),
        format!(
            "{}{}",
            config.currency_symbol,
            aggregates.total_revenue_display()
        )
        .bright_white()
        .bold(),
        aggregates.avg_rating.to_string().bright_white().bold()
    )
}

fn grouped_tables(aggregates: &AggregateView, config: &InsightsConfig) -> String {
    let width = config.bar_width;
    let mut output = String::new();

    let dates: Vec<(String, String, f64)> = aggregates
        .rides_by_date
        .iter()
        .map(|entry| (entry.date.clone(), entry.rides.to_string(), entry.rides as f64))
        .collect();
    output.push_str(&bar_table("Rides by Date", &dates, width));

    let payments: Vec<(String, String, f64)> = aggregates
        .revenue_by_payment
        .iter()
        .map(|entry| {
            (
                display_label(&entry.payment_method),
                format!("{}{:.2}", config.currency_symbol, entry.revenue),
                entry.revenue,
            )
        })
        .collect();
    output.push_str(&bar_table("Revenue by Payment Method", &payments, width));

    let vehicles: Vec<(String, String, f64)> = aggregates
        .rating_by_vehicle
        .iter()
        .map(|entry| {
            (
                display_label(&entry.vehicle_type),
                entry.avg_rating.to_string(),
                entry.avg_rating.value().unwrap_or(0.0),
            )
        })
        .collect();
    output.push_str(&bar_table(
        "Avg Customer Rating by Vehicle Type",
        &vehicles,
        width,
    ));

    let drivers: Vec<(String, String, f64)> = aggregates
        .driver_rating_distribution
        .iter()
        .map(|entry| (entry.rating.to_string(), entry.rides.to_string(), entry.rides as f64))
        .collect();
    output.push_str(&bar_table("Driver Ratings Distribution", &drivers, width));

    output
}

/// One titled table of `(label, value text, magnitude)` rows with text bars
fn bar_table(title: &str, rows: &[(String, String, f64)], width: usize) -> String {
    let mut output = format!("{}\n", title.bright_cyan().bold());

    if rows.is_empty() {
        output.push_str(EMPTY_GROUP_LINE);
        output.push('\n');
        return output;
    }

    let label_width = rows.iter().map(|(label, _, _)| label.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value, _)| value.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, _, magnitude)| *magnitude).fold(0.0, f64::max);

    for (label, value, magnitude) in rows {
        output.push_str(&format!(
            "  {:<label_width$}  {:>value_width$}  {}\n",
            label,
            value,
            text_bar(*magnitude, max, width),
        ));
    }

    output
}

/// Bar proportional to `value / max`; any positive value gets at least one mark
pub fn text_bar(value: f64, max: f64, width: usize) -> String {
    if value.is_nan() || max.is_nan() || value <= 0.0 || max <= 0.0 {
        return String::new();
    }

    let marks = ((value / max) * width as f64).round() as usize;
    BAR_CHAR.to_string().repeat(marks.clamp(1, width))
}

fn data_table(dataset: &Dataset, limit: usize) -> String {
    let shown = limit.min(dataset.len());
    let mut output = format!(
        "{} (showing {} of {} rides)\n",
        "Filtered Data".bright_cyan().bold(),
        shown,
        dataset.len()
    );

    output.push_str(&format!("  {}\n", dataset.headers().join(" | ")));
    for record in dataset.iter().take(shown) {
        output.push_str(&format!("  {}\n", record.fields().join(" | ")));
    }

    output
}

fn display_label(value: &str) -> String {
    if value.is_empty() {
        BLANK_LABEL.to_string()
    } else {
        value.to_string()
    }
}

/// One-line description of the active filters
pub fn describe_criteria(criteria: &FilterCriteria) -> String {
    if criteria.is_unrestricted() {
        return "none".to_string();
    }

    let mut parts = Vec::new();
    if let Some(pattern) = criteria.search_pattern() {
        parts.push(format!("booking id contains \"{}\"", pattern));
    }
    for (name, values) in [
        ("vehicle", &criteria.vehicle_types),
        ("status", &criteria.booking_statuses),
        ("payment", &criteria.payment_methods),
    ] {
        if !values.is_empty() {
            let listed: Vec<String> = values.iter().map(|v| display_label(v)).collect();
            parts.push(format!("{} in [{}]", name, listed.join(", ")));
        }
    }

    parts.join("; ")
}

/// Human-readable listing of picker options
pub fn human_options(options: &FilterOptions) -> String {
    let mut output = format!("{}\n", "Available filter values".bright_green().bold());

    for (title, values) in [
        ("Vehicle types", &options.vehicle_types),
        ("Booking statuses", &options.booking_statuses),
        ("Payment methods", &options.payment_methods),
    ] {
        output.push_str(&format!("{} ({}):\n", title.bright_cyan(), values.len()));
        for value in values {
            output.push_str(&format!("  - {}\n", display_label(value)));
        }
    }

    output
}

/// Human-readable confirmation of a written export
pub fn human_export(summary: &ExportSummary) -> String {
    format!(
        "💾 Exported {} rides ({} bytes, {}) to {}\n",
        summary.rows.to_string().bright_white().bold(),
        summary.bytes,
        EXPORT_MIME_TYPE,
        summary.path.display()
    )
}

/// JSON document for one view
pub fn report_json(
    view: &DashboardView,
    show_rows: Option<usize>,
    export: Option<&ExportSummary>,
) -> Value {
    let mut report = json!({
        "title": REPORT_TITLE,
        "filters": view.criteria,
        "kpis": {
            "total_rides": view.aggregates.total_rides,
            "total_revenue": view.aggregates.total_revenue_display(),
            "total_revenue_exact": view.aggregates.total_revenue,
            "avg_customer_rating": view.aggregates.avg_rating,
        },
        "rides_by_date": view.aggregates.rides_by_date,
        "revenue_by_payment": view.aggregates.revenue_by_payment,
        "rating_by_vehicle": view.aggregates.rating_by_vehicle,
        "driver_rating_distribution": view.aggregates.driver_rating_distribution,
        "dashboard_image": view.dashboard_image,
    });

    if let Some(limit) = show_rows {
        report["rows"] = rows_json(&view.filtered, limit);
    }
    if let Some(summary) = export {
        report["export"] = json!({
            "path": summary.path,
            "rows": summary.rows,
            "bytes": summary.bytes,
            "mime_type": EXPORT_MIME_TYPE,
        });
    }

    report
}

fn rows_json(dataset: &Dataset, limit: usize) -> Value {
    let rows: Vec<Value> = dataset
        .iter()
        .take(limit)
        .map(|record| {
            let object: serde_json::Map<String, Value> = dataset
                .headers()
                .iter()
                .zip(record.fields())
                .map(|(header, field)| (header.clone(), Value::String(field.clone())))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}
