mod tables;
mod charts;

pub use tables::{
    format_count,
    format_error_table, print_error_table,
    format_metrics_table, print_metrics_table,
    format_forecast_table, print_forecast_table,
    format_summary_table, print_summary_table,
};
pub use charts::{
    format_comparison_chart, print_comparison_chart,
    format_series_panel, print_series_panel,
    ChartConfig,
};
