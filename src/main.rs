//! CLI entry point for `sheet2cube`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sheet2cube::generator::schema_builder::{BuildOptions, JoinScope};
use sheet2cube::output::{formatter, report};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sheet2cube",
    about = "Convert a semantic-model spreadsheet to YAML (cubes, joins, dimensions, measures)"
)]
struct Cli {
    /// Input workbook (.xlsx, .xlsm, .xlsb, .xls, .ods) or .csv file
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (.yml/.yaml, or .json for JSON)
    #[arg(short, long)]
    output: PathBuf,

    /// Include only this cube by name
    #[arg(long)]
    only_cube: Option<String>,

    /// Also restrict joins to those whose primary table is the selected cube
    #[arg(long, requires = "only_cube")]
    scope_joins: bool,

    /// Do not include unknown/extra columns in the output
    #[arg(long)]
    no_include_unknown: bool,

    /// Write a Markdown classification report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print detection details
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            only_cube: self
                .only_cube
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            include_unknown: !self.no_include_unknown,
            join_scope: if self.scope_joins {
                JoinScope::SelectedCube
            } else {
                JoinScope::All
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.build_options();
    let result = match sheet2cube::convert(&cli.input, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = formatter::write_output(&cli.output, &result.model) {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }

    if let Some(report_path) = &cli.report {
        let content = report::build_report(&result.classifications, &result.model, &result.stats);
        if let Err(e) = formatter::write_text(report_path, &content) {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }

    info!(
        cubes = result.model.cubes.len(),
        joins = result.model.joins.len(),
        dimensions = result.model.dimensions.len(),
        measures = result.model.measures.len(),
        dropped_rows = result.stats.dropped_rows.len(),
        "conversion finished"
    );
    println!("Wrote output to: {}", cli.output.display());
}
