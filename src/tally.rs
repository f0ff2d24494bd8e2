use log::{debug, info, warn};

use debate_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use text_diff::print_diff;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_common::simplify_file_name;
use crate::tally::io_csv::{read_csv_rows, render_csv};

mod config_reader;
mod io_common;
mod io_csv;

pub const DEFAULT_INPUT_PATH: &str = "./debate_data.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "./output.csv";
/// Output path that sends the summary to the standard output instead of a file.
pub const STDOUT_OUTPUT: &str = "stdout";

#[derive(Debug, Snafu)]
pub enum TallyError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of CSV file {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error formatting the CSV output"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error flushing the CSV output"))]
    CsvFlush { source: std::io::Error },
    #[snafu(display("The CSV output is not valid UTF-8"))]
    CsvEncoding { source: std::string::FromUtf8Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error summarizing {path}: {source}"))]
    Summary {
        source: SummaryErrors,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },
}

pub type TallyResult<T> = Result<T, TallyError>;
pub type BTallyResult<T> = Result<T, Box<TallyError>>;

/// The files used by one run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input: String,
    /// A file path or `stdout`.
    pub output: String,
    pub reference: Option<String>,
}

/// Merges the command line and the optional configuration file.
///
/// Command line options win over the configuration file, which wins over the defaults.
pub fn resolve_settings(args: &Args) -> BTallyResult<RunSettings> {
    let config = match args.config.as_ref() {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path.as_str())
                .parent()
                .unwrap_or_else(|| Path::new(""));
            config.resolved(root)
        }
        None => SummaryConfig::default(),
    };

    Ok(RunSettings {
        input: args
            .input
            .clone()
            .or(config.input_path)
            .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string()),
        output: args
            .out
            .clone()
            .or(config.output_path)
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
        reference: args.reference.clone().or(config.reference_path),
    })
}

pub fn run_summary_cli(args: &Args) -> BTallyResult<()> {
    let settings = resolve_settings(args)?;
    run_summary(&settings)
}

/// Reads the debates, summarizes them and writes the summary.
///
/// Nothing is written unless the summary is complete and, when a reference is
/// given, identical to the reference.
pub fn run_summary(settings: &RunSettings) -> BTallyResult<()> {
    info!("Attempting to read debate file {:?}", settings.input);
    let rows = read_csv_rows(&settings.input)?;
    info!(
        "Read {} rows from {}",
        rows.len(),
        simplify_file_name(&settings.input)
    );

    let summary = summarize(&rows).context(SummarySnafu {
        path: settings.input.clone(),
    })?;
    debug!("summary: {:?}", summary);

    let rendered = render_csv(summary.rows())?;

    if let Some(reference_p) = settings.reference.as_ref() {
        check_reference(reference_p, &rendered)?;
    }

    write_output(&settings.output, &rendered)
}

fn check_reference(reference_p: &str, rendered: &str) -> BTallyResult<()> {
    // Going through the same writer removes differences in quoting and line endings.
    let reference_rows = read_csv_rows(reference_p)?;
    let reference = render_csv(&reference_rows)?;
    if reference != rendered {
        warn!("Found differences with the reference {}", reference_p);
        print_diff(reference.as_str(), rendered, "\n");
        return Err(Box::new(TallyError::ReferenceMismatch {
            path: reference_p.to_string(),
        }));
    }
    info!("Summary matches reference {}", reference_p);
    Ok(())
}

fn write_output(output: &str, rendered: &str) -> BTallyResult<()> {
    if output == STDOUT_OUTPUT {
        print!("{}", rendered);
    } else {
        fs::write(output, rendered).context(WritingOutputSnafu { path: output })?;
        info!("Summary written to {}", output);
    }
    Ok(())
}
