use colored::Colorize;

use super::tables::format_count;
use crate::models::YearSeries;

/// Rendering options for terminal charts, passed explicitly instead of
/// living in process-wide state.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Maximum bar width in characters
    pub width: usize,
    /// Colorize series when true; plain text otherwise
    pub use_color: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 50,
            use_color: true,
        }
    }
}

fn bar_length(value: f64, min: f64, max: f64, width: usize) -> usize {
    if max > min {
        let fraction = (value - min) / (max - min);
        1 + (fraction * (width.saturating_sub(1)) as f64).round() as usize
    } else {
        width / 2
    }
}

fn span(series: &[&YearSeries]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for &v in s.values() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min, max)
}

/// Format the modeled-vs-reference line chart as a string.
///
/// Every year gets its own labeled rows; bar length tracks the value within
/// the joint range of both series, so the divergence between the lines is
/// visible even when the values differ by a fraction of a percent.
pub fn format_comparison_chart(
    modeled: &YearSeries,
    reference: &YearSeries,
    config: &ChartConfig,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        "Box Model vs. Reference Population".bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if modeled.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let (min, max) = span(&[modeled, reference]);

    for (year, model_value) in modeled.iter() {
        let bar = "\u{2500}".repeat(bar_length(model_value, min, max, config.width));
        let line = format!("{bar}o");
        let line = if config.use_color {
            line.cyan().to_string()
        } else {
            line
        };
        output.push_str(&format!(
            "  {year} \u{2502} {line} {}\n",
            format_count(model_value)
        ));

        if let Some(reference_value) = reference.get(year) {
            let bar = "\u{254c}".repeat(bar_length(reference_value, min, max, config.width));
            let line = format!("{bar}x");
            let line = if config.use_color {
                line.red().to_string()
            } else {
                line
            };
            output.push_str(&format!(
                "       \u{2502} {line} {}\n",
                format_count(reference_value)
            ));
        }
    }

    output.push('\n');
    let modeled_key = if config.use_color {
        "o Modeled population".cyan().to_string()
    } else {
        "o Modeled population".to_string()
    };
    let reference_key = if config.use_color {
        "x Reference population".red().to_string()
    } else {
        "x Reference population".to_string()
    };
    output.push_str(&format!("  {modeled_key}   {reference_key}\n"));
    output
}

/// Print the modeled-vs-reference chart.
pub fn print_comparison_chart(modeled: &YearSeries, reference: &YearSeries, config: &ChartConfig) {
    print!("{}", format_comparison_chart(modeled, reference, config));
}

/// Format a single-series panel (driving series, marriage rates) as a string.
///
/// `counts` selects thousands-separated labels; rates print with 2 decimals.
pub fn format_series_panel(
    title: &str,
    series: &YearSeries,
    counts: bool,
    config: &ChartConfig,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if series.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let (min, max) = span(&[series]);

    for (year, value) in series.iter() {
        let bar = "\u{2588}".repeat(bar_length(value, min, max, config.width));
        let bar = if config.use_color {
            bar.green().to_string()
        } else {
            bar
        };
        let label = if counts {
            format_count(value)
        } else {
            format!("{value:.2}")
        };
        output.push_str(&format!("  {year} \u{2502} {bar} {label}\n"));
    }

    output
}

/// Print a single-series panel.
pub fn print_series_panel(title: &str, series: &YearSeries, counts: bool, config: &ChartConfig) {
    print!("{}", format_series_panel(title, series, counts, config));
}
