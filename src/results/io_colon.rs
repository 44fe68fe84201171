// Primitives for reading the colon-delimited exports.

use std::fs::File;

use csv::StringRecord;
use log::{debug, info};
use snafu::prelude::*;

use crate::results::{
    io_common::{district_prefix, parse_count, parse_percent},
    party_codes::normalize_party,
    *,
};

// Column positions, shared with the spreadsheets.
pub(crate) const COL_STATE_ABV: usize = 1;
pub(crate) const COL_STATE: usize = 2;
pub(crate) const COL_DISTRICT: usize = 3;
pub(crate) const COL_INCUMBENT: usize = 5;
pub(crate) const COL_FIRST_NAME: usize = 6;
pub(crate) const COL_LAST_NAME: usize = 7;
pub(crate) const COL_NAME: usize = 8;
pub(crate) const COL_TOTAL_MARKER: usize = 9;
pub(crate) const COL_PARTY: usize = 10;
pub(crate) const COL_VOTES: usize = 15;
pub(crate) const COL_PERCENT: usize = 16;
pub(crate) const COL_WINNER: usize = 21;

pub fn read_colon_results(path: &str, seat: Seat, year: u32) -> ResultsResult<Vec<ImportedResult>> {
    info!("Attempting to read colon-delimited file {:?}", path);
    let records = get_records(path)?;
    let mut res: Vec<ImportedResult> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        if let Some(r) = read_record(&line, lineno, seat, year)? {
            res.push(r);
        }
    }
    info!("Read {} results from {:?}", res.len(), path);
    Ok(res)
}

fn get_records(path: &str) -> ResultsResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b':')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(rdr.into_records())
}

fn field(line: &StringRecord, idx: usize, lineno: usize) -> ResultsResult<&str> {
    line.get(idx).context(CsvLineTooShortSnafu { lineno })
}

/// Reads one line. Lines that are not a general election result for a
/// full term are skipped.
pub(crate) fn read_record(
    line: &StringRecord,
    lineno: usize,
    seat: Seat,
    year: u32,
) -> ResultsResult<Option<ImportedResult>> {
    let votes_s = field(line, COL_VOTES, lineno)?;
    let percent_s = field(line, COL_PERCENT, lineno)?;
    // Total rows carry a marker, and primaries have no general election figures.
    let total_s = field(line, COL_TOTAL_MARKER, lineno)?;
    if votes_s.is_empty() || percent_s.is_empty() || !total_s.is_empty() {
        return Ok(None);
    }

    let district_s = field(line, COL_DISTRICT, lineno)?;
    let district = match seat {
        Seat::Senate => "S".to_string(),
        Seat::House => match district_s.trim().parse::<u32>() {
            Ok(d) => d.to_string(),
            Err(_) if district_s.contains("FULL TERM") => {
                let first = district_s.split_whitespace().next().unwrap_or("");
                match first.parse::<u32>() {
                    Ok(d) => d.to_string(),
                    Err(_) => {
                        return UnexpectedDistrictSnafu {
                            lineno,
                            content: district_s,
                        }
                        .fail()
                    }
                }
            }
            Err(_) if district_s.contains("UNEXPIRED") || district_prefix(district_s) == "H" => {
                debug!("read_record: line {}: skipping district {:?}", lineno, district_s);
                return Ok(None);
            }
            Err(_) => {
                return UnexpectedDistrictSnafu {
                    lineno,
                    content: district_s,
                }
                .fail()
            }
        },
    };

    let (votes, percent, unopposed) = match (parse_count(votes_s), parse_percent(percent_s)) {
        (Some(v), Some(p)) => (Some(v), Some(p), false),
        _ if votes_s.trim().eq_ignore_ascii_case("unopposed") => (None, None, true),
        _ if votes_s.trim() == "#" => {
            // Withdrew after the primary.
            debug!("read_record: line {}: withdrawn candidate", lineno);
            return Ok(None);
        }
        _ => {
            return UnexpectedVotesSnafu {
                lineno,
                content: format!("{} {}", votes_s, percent_s),
            }
            .fail()
        }
    };

    Ok(Some(ImportedResult {
        state_abv: field(line, COL_STATE_ABV, lineno)?.to_string(),
        state: field(line, COL_STATE, lineno)?.to_string(),
        district,
        incumbent: !field(line, COL_INCUMBENT, lineno)?.is_empty(),
        first_name: field(line, COL_FIRST_NAME, lineno)?.trim().to_string(),
        last_name: field(line, COL_LAST_NAME, lineno)?.trim().to_string(),
        name: field(line, COL_NAME, lineno)?.trim().to_string(),
        party: normalize_party(field(line, COL_PARTY, lineno)?),
        votes,
        percent,
        unopposed,
        winner: !field(line, COL_WINNER, lineno)?.is_empty(),
        year,
        seat,
    }))
}
