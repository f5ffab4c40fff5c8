use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table,
};

use crate::analysis::{ErrorReport, SimulationState};
use crate::models::DemographicTable;

/// Format a population count with no decimals and thousands separators.
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative && rounded.abs() > 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format the per-year error table as a string.
pub fn format_error_table(report: &ErrorReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Model vs. Reference".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Modeled", "Reference", "Error", "Error %"]);

    for entry in &report.per_year {
        table.add_row(vec![
            Cell::new(format!("{}", entry.year)),
            Cell::new(format_count(entry.modeled)),
            Cell::new(format_count(entry.reference)),
            Cell::new(format_count(entry.error)),
            Cell::new(format!("{:.2}%", entry.percent_error)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the per-year error table.
pub fn print_error_table(report: &ErrorReport) {
    print!("{}", format_error_table(report));
}

/// Format the aggregate accuracy metrics as a string.
pub fn format_metrics_table(report: &ErrorReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Accuracy Metrics".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);

    let last_year = report
        .per_year
        .last()
        .map(|e| e.year.to_string())
        .unwrap_or_default();

    table.add_row(vec![
        Cell::new("Mean absolute error (MAE)"),
        Cell::new(format!("{:.2} persons", report.mean_absolute_error)),
    ]);
    table.add_row(vec![
        Cell::new("Root-mean-square error (RMSE)"),
        Cell::new(format!("{:.2} persons", report.root_mean_square_error)),
    ]);
    table.add_row(vec![
        Cell::new("Mean absolute percentage error (MAPE)"),
        Cell::new(format!("{:.2}%", report.mean_absolute_percentage_error)),
    ]);
    table.add_row(vec![
        Cell::new(format!("Error in {last_year}")),
        Cell::new(format!("{} persons", format_count(report.last_error))),
    ]);
    table.add_row(vec![
        Cell::new(format!("Error rate in {last_year}")),
        Cell::new(format!("{:.2}%", report.last_percent_error)),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print the aggregate accuracy metrics table.
pub fn print_metrics_table(report: &ErrorReport) {
    print!("{}", format_metrics_table(report));
}

/// Format predicted populations for the forecast years as a string.
///
/// `first_forecast_year` marks where observations end and predictions begin.
pub fn format_forecast_table(state: &SimulationState, first_forecast_year: i32) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Predicted Population".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Predicted population"]);

    for (year, value) in state.population.iter() {
        if year < first_forecast_year {
            continue;
        }
        table.add_row(vec![
            Cell::new(format!("{year}")),
            Cell::new(format_count(value)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the forecast table.
pub fn print_forecast_table(state: &SimulationState, first_forecast_year: i32) {
    print!("{}", format_forecast_table(state, first_forecast_year));
}

/// Format a quick dataset summary as a string.
pub fn format_summary_table(table: &DemographicTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Dataset Summary".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut summary = Table::new();
    summary
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Fact", "Value"]);

    summary.add_row(vec![Cell::new("Name"), Cell::new(&table.name)]);
    summary.add_row(vec![
        Cell::new("Observed years"),
        Cell::new(format!("{}", table.num_years())),
    ]);
    if let (Some(start), Some(end)) = (table.start_year(), table.end_year()) {
        summary.add_row(vec![
            Cell::new("Year range"),
            Cell::new(format!("{start}-{end}")),
        ]);
    }
    if let Ok(initial) = table.initial_population() {
        summary.add_row(vec![
            Cell::new("Initial population (derived)"),
            Cell::new(format_count(initial)),
        ]);
    }
    if let Some((year, value)) = table.reference_population().last() {
        summary.add_row(vec![
            Cell::new(format!("Reference population in {year}")),
            Cell::new(format_count(value)),
        ]);
    }
    let has_marriage = table.marriage_rate_husband().is_some();
    summary.add_row(vec![
        Cell::new("Marriage rates present"),
        Cell::new(if has_marriage { "yes" } else { "no" }),
    ]);

    output.push_str(&format!("{summary}"));
    output
}

/// Print the dataset summary table.
pub fn print_summary_table(table: &DemographicTable) {
    print!("{}", format_summary_table(table));
}
