// Reading the OCR text files.

use crate::results::io_common::simplify_file_name;
use crate::results::*;

use election_scraper::builder::Builder;
use election_scraper::{ElectionResultRow, ScrapeRules};
use log::info;
use snafu::prelude::*;
use std::fs;

pub fn read_ocr_file(path: &str, rules: &ScrapeRules) -> ResultsResult<Vec<ElectionResultRow>> {
    info!("Attempting to read OCR file {:?}", path);
    let bytes = fs::read(path).context(OpeningTextSnafu { path })?;
    // The scans are not always valid UTF-8, the odd bytes are OCR noise anyway.
    let text = String::from_utf8_lossy(&bytes);

    let mut builder = Builder::new(rules);
    for line in text.lines() {
        builder.add_line(line);
    }
    info!(
        "Read {} lines from {}",
        builder.num_lines(),
        simplify_file_name(path)
    );
    builder.scrape().context(ScrapingSnafu { path })
}
