// The comma-delimited outputs.

use crate::results::*;

use election_scraper::ElectionResultRow;
use snafu::prelude::*;

fn into_string(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

/// The scraped rows: five fields, no header, `\n` terminators.
pub fn render_rows(rows: &[ElectionResultRow]) -> ResultsResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    for row in rows.iter() {
        wtr.write_record(&row.fields())
            .context(WritingOutputSnafu {})?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context(SavingOutputSnafu { path: "memory" })?;
    Ok(into_string(bytes))
}

/// The imported results, with a header row.
pub fn render_imported(rows: &[ImportedResult]) -> ResultsResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    for row in rows.iter() {
        wtr.serialize(row).context(WritingOutputSnafu {})?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context(SavingOutputSnafu { path: "memory" })?;
    Ok(into_string(bytes))
}
