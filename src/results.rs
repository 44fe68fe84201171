use log::{debug, info, warn};

use election_scraper::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use crate::args::Args;
use crate::results::config_reader::*;
use crate::results::io_common::default_output_path;

mod config_reader;
mod io_colon;
mod io_common;
mod io_ocr;
mod io_sink;
mod io_xl;
mod party_codes;

#[derive(Debug, Snafu)]
pub enum ResultsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningText {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error while scraping {path}: {source}"))]
    Scraping { source: ScrapeErrors, path: String },
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {name:?} not found"))]
    MissingSheet { name: String },
    #[snafu(display("The spreadsheet has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: cannot understand district {content:?}"))]
    UnexpectedDistrict { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: cannot understand votes {content:?}"))]
    UnexpectedVotes { lineno: usize, content: String },
    #[snafu(display("The election year is required for this input type"))]
    MissingYear {},
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the settings"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing rows"))]
    WritingOutput { source: csv::Error },
    #[snafu(display("Error writing file {path}"))]
    SavingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The output differs from the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ResultsResult<T> = Result<T, ResultsError>;

/// The seat reported by an input that does not say it on each line.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    House,
    Senate,
}

impl Seat {
    fn from_arg(arg: Option<&str>) -> ResultsResult<Seat> {
        match arg {
            None | Some("house") => Ok(Seat::House),
            Some("senate") => Ok(Seat::Senate),
            Some(x) => whatever!("Seat {:?} is not supported (house or senate)", x),
        }
    }
}

/// A result read from a spreadsheet or a colon-delimited export.
///
/// These sources carry more information than the printed tables.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ImportedResult {
    pub state_abv: String,
    pub state: String,
    /// The district number or `S` for the Senate.
    pub district: String,
    pub incumbent: bool,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub party: String,
    pub votes: Option<u64>,
    pub percent: Option<f64>,
    pub unopposed: bool,
    pub winner: bool,
    pub year: u32,
    pub seat: Seat,
}

fn load_rules(config_path: Option<&str>) -> ResultsResult<ScrapeRules> {
    let rules = ScrapeRules::default();
    match config_path {
        Some(p) => {
            let settings = read_settings(p)?;
            info!("settings: {:?}", settings);
            settings.apply(rules)
        }
        None => Ok(rules),
    }
}

fn write_output(out_path: &str, output: &str) -> ResultsResult<()> {
    if out_path == "stdout" {
        print!("{}", output);
    } else {
        info!("Writing output to {:?}", out_path);
        fs::write(out_path, output).context(SavingOutputSnafu { path: out_path })?;
    }
    Ok(())
}

fn check_reference(reference_path: &str, output: &str) -> ResultsResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningTextSnafu {
        path: reference_path,
    })?;
    if reference != output {
        warn!("Found differences with the reference {:?}", reference_path);
        print_diff(reference.as_str(), output, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Output matches the reference {:?}", reference_path);
    Ok(())
}

/// Runs one conversion: reads the input, writes the rows, and compares them
/// with the reference if one is given.
#[allow(clippy::too_many_arguments)]
pub fn run_conversion(
    input: &str,
    input_type: &str,
    out_path: &str,
    config_path: Option<&str>,
    year: Option<u32>,
    sheet: Option<&str>,
    seat: Option<&str>,
    reference_path: Option<&str>,
) -> ResultsResult<()> {
    info!("Reading {:?} as {}", input, input_type);
    let output: String = match input_type {
        "ocr" => {
            let rules = load_rules(config_path)?;
            let rows = io_ocr::read_ocr_file(input, &rules)?;
            io_sink::render_rows(&rows)?
        }
        "xls" => {
            let year = year.context(MissingYearSnafu {})?;
            let rows = io_xl::read_excel_results(input, sheet, year)?;
            io_sink::render_imported(&rows)?
        }
        "colon" => {
            let year = year.context(MissingYearSnafu {})?;
            let rows = io_colon::read_colon_results(input, Seat::from_arg(seat)?, year)?;
            io_sink::render_imported(&rows)?
        }
        x => whatever!("Input type not implemented {:?}", x),
    };
    debug!("output: {} bytes", output.len());

    write_output(out_path, &output)?;

    // The reference summary, if provided for comparison
    if let Some(reference) = reference_path {
        check_reference(reference, &output)?;
    }
    Ok(())
}

pub fn run_from_args(args: &Args) -> ResultsResult<()> {
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    run_conversion(
        &args.input,
        args.input_type.as_deref().unwrap_or("ocr"),
        &out_path,
        args.config.as_deref(),
        args.year,
        args.sheet.as_deref(),
        args.seat.as_deref(),
        args.reference.as_deref(),
    )
}
