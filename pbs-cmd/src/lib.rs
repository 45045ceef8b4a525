//! Command implementations for the basin streamflow CLI.
//!
//! Provides subcommands for listing sub-basins, forecasting monthly
//! runoff and exporting PDF reports. Parameter validation happens here,
//! at the boundary, so the core pipeline only ever sees named errors.

use clap::Subcommand;

pub mod basins;
pub mod export;
pub mod forecast;
pub mod records;

#[derive(Subcommand)]
pub enum Command {
    /// Forecast monthly runoff for one sub-basin
    Forecast {
        /// Path to the precipitation records CSV
        #[arg(short, long)]
        records_csv: String,

        /// Sub-basin to analyze
        #[arg(short, long)]
        sub_basin: String,

        /// Runoff coefficient C in (0, 1]
        #[arg(short, long, default_value_t = 0.3)]
        coefficient: f64,

        /// Months to forecast (1-12)
        #[arg(long, default_value_t = 3)]
        horizon: u32,

        /// Look-back offset from the end of the forecast for the summary
        /// (defaults to the horizon, i.e. the first forecast month)
        #[arg(long)]
        offset: Option<usize>,

        /// Optional path to dump the chart spec as JSON
        #[arg(long)]
        chart_json: Option<String>,
    },

    /// Export a PDF forecast report for one sub-basin
    Export {
        /// Path to the precipitation records CSV
        #[arg(short, long)]
        records_csv: String,

        /// Sub-basin to report on
        #[arg(short, long)]
        sub_basin: String,

        /// Runoff coefficient C in (0, 1]
        #[arg(short, long, default_value_t = 0.3)]
        coefficient: f64,

        /// Months to forecast (1-12)
        #[arg(long, default_value_t = 3)]
        horizon: u32,

        /// Directory the report is written into
        #[arg(short, long, default_value = ".")]
        out_dir: String,
    },

    /// List the sub-basins present in a records CSV
    SubBasins {
        /// Path to the precipitation records CSV
        #[arg(short, long)]
        records_csv: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Forecast {
            records_csv,
            sub_basin,
            coefficient,
            horizon,
            offset,
            chart_json,
        } => forecast::run_forecast(
            &records_csv,
            &sub_basin,
            coefficient,
            horizon,
            offset,
            chart_json.as_deref(),
        ),
        Command::Export {
            records_csv,
            sub_basin,
            coefficient,
            horizon,
            out_dir,
        } => export::run_export(&records_csv, &sub_basin, coefficient, horizon, &out_dir),
        Command::SubBasins { records_csv } => basins::run_sub_basins(&records_csv),
    }
}
