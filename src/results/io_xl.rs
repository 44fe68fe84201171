// Reading the yearly results spreadsheets.

use calamine::{open_workbook_auto, DataType, Range, Reader};
use log::{debug, info};
use snafu::prelude::*;

use crate::results::io_colon::{
    COL_DISTRICT, COL_FIRST_NAME, COL_INCUMBENT, COL_LAST_NAME, COL_NAME, COL_PARTY, COL_PERCENT,
    COL_STATE, COL_STATE_ABV, COL_TOTAL_MARKER, COL_VOTES, COL_WINNER,
};
use crate::results::io_common::district_prefix;
use crate::results::party_codes::normalize_party;
use crate::results::*;

// The winner column exists from this year on.
const FIRST_YEAR_WITH_WINNERS: u32 = 2012;

pub fn read_excel_results(
    path: &str,
    sheet: Option<&str>,
    year: u32,
) -> ResultsResult<Vec<ImportedResult>> {
    info!("Attempting to read spreadsheet {:?}", path);
    let wrange = get_range(path, sheet)?;
    let mut res: Vec<ImportedResult> = Vec::new();
    // Skip the column labels.
    for (idx, row) in wrange.rows().enumerate().skip(1) {
        if let Some(r) = read_row(row, idx + 1, year)? {
            res.push(r);
        }
    }
    info!("Read {} results from {:?}", res.len(), path);
    Ok(res)
}

fn get_range(path: &str, sheet: Option<&str>) -> ResultsResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, sheet);
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    let wrange = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingSheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

fn cell(row: &[DataType], idx: usize) -> &DataType {
    row.get(idx).unwrap_or(&DataType::Empty)
}

fn is_empty(row: &[DataType], idx: usize) -> bool {
    matches!(cell(row, idx), DataType::Empty)
}

fn text(row: &[DataType], idx: usize) -> String {
    match cell(row, idx) {
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn read_district(row: &[DataType], lineno: usize) -> ResultsResult<Option<String>> {
    let raw = text(row, COL_DISTRICT);
    let d = district_prefix(&raw);
    if d == "SFULL" {
        return Ok(Some("S".to_string()));
    }
    if d.contains("FULL TERM") {
        let first = raw.split_whitespace().next().unwrap_or("");
        return Ok(Some(first.to_uppercase()));
    }
    if d.contains("UNEXPIRED") || d.contains('*') || d == "SUN" {
        debug!("read_row: line {}: unexpired term {:?}", lineno, raw);
        return Ok(None);
    }
    // Write-in totals
    if d == "H" {
        return Ok(None);
    }
    if !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()) {
        return Ok(Some(d));
    }
    if d.eq_ignore_ascii_case("s") {
        return Ok(Some("S".to_string()));
    }
    UnexpectedDistrictSnafu {
        lineno,
        content: raw,
    }
    .fail()
}

/// Reads one row, `None` when the row is not a general election result
/// that should be kept.
pub(crate) fn read_row(
    row: &[DataType],
    lineno: usize,
    year: u32,
) -> ResultsResult<Option<ImportedResult>> {
    if is_empty(row, COL_VOTES) || is_empty(row, COL_PERCENT) || !is_empty(row, COL_TOTAL_MARKER)
    {
        return Ok(None);
    }

    // The two state columns switched in 2012.
    let (state_abv, state) = {
        let first = text(row, COL_STATE_ABV);
        let second = text(row, COL_STATE);
        if first.chars().count() == 2 {
            (first, second)
        } else {
            (second, first)
        }
    };

    let district = match read_district(row, lineno)? {
        Some(d) => d,
        None => return Ok(None),
    };

    let (votes, percent, unopposed) = match (cell(row, COL_VOTES), cell(row, COL_PERCENT)) {
        (DataType::Float(v), p) => (Some(*v as u64), number(p), false),
        (DataType::Int(v), p) => (Some(*v as u64), number(p), false),
        (DataType::String(s), _) if s.trim().eq_ignore_ascii_case("unopposed") => {
            (None, None, true)
        }
        (DataType::String(s), _) if s.trim() == "#" => {
            debug!("read_row: line {}: withdrawn candidate", lineno);
            return Ok(None);
        }
        (v, p) => {
            return UnexpectedVotesSnafu {
                lineno,
                content: format!("{:?} {:?}", v, p),
            }
            .fail()
        }
    };

    let seat = if district == "S" {
        Seat::Senate
    } else {
        Seat::House
    };

    Ok(Some(ImportedResult {
        state_abv,
        state,
        district,
        incumbent: !is_empty(row, COL_INCUMBENT),
        first_name: text(row, COL_FIRST_NAME),
        last_name: text(row, COL_LAST_NAME),
        name: text(row, COL_NAME),
        party: normalize_party(&text(row, COL_PARTY)),
        votes,
        percent,
        unopposed,
        winner: year >= FIRST_YEAR_WITH_WINNERS && !is_empty(row, COL_WINNER),
        year,
        seat,
    }))
}

fn number(d: &DataType) -> Option<f64> {
    match d {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => crate::results::io_common::parse_percent(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    fn row(abv: DataType, state: DataType, district: DataType, votes: DataType) -> Vec<DataType> {
        let mut r = vec![DataType::Empty; 22];
        r[COL_STATE_ABV] = abv;
        r[COL_STATE] = state;
        r[COL_DISTRICT] = district;
        r[COL_INCUMBENT] = s("(I)");
        r[COL_FIRST_NAME] = s("Jo ");
        r[COL_LAST_NAME] = s("Bonner");
        r[COL_NAME] = s("Bonner, Jo");
        r[COL_PARTY] = s("R");
        r[COL_VOTES] = votes;
        r[COL_PERCENT] = DataType::Float(0.675);
        r[COL_WINNER] = s("W");
        r
    }

    fn alabama(district: DataType, votes: DataType) -> Vec<DataType> {
        row(s("AL"), s("Alabama"), district, votes)
    }

    #[test]
    fn house_result() {
        let r = read_row(&alabama(DataType::Float(1.0), DataType::Float(1234.0)), 2, 2010)
            .unwrap()
            .unwrap();
        assert_eq!(r.state_abv, "AL");
        assert_eq!(r.district, "1");
        assert_eq!(r.first_name, "Jo");
        assert_eq!(r.party, "REP");
        assert_eq!(r.votes, Some(1234));
        assert_eq!(r.percent, Some(0.675));
        assert!(r.incumbent);
        assert!(!r.winner);
        assert_eq!(r.seat, Seat::House);
    }

    #[test]
    fn columns_switched_and_winners() {
        let r = read_row(
            &row(s("Alabama"), s("AL"), s("S"), DataType::Float(10.0)),
            2,
            2012,
        )
        .unwrap()
        .unwrap();
        assert_eq!(r.state_abv, "AL");
        assert_eq!(r.state, "Alabama");
        assert_eq!(r.seat, Seat::Senate);
        assert!(r.winner);
    }

    #[test]
    fn districts() {
        let votes = || DataType::Float(10.0);
        let r = read_row(&alabama(s("5 - FULL TERM"), votes()), 2, 2010)
            .unwrap()
            .unwrap();
        assert_eq!(r.district, "5");
        let r = read_row(&alabama(s("SFULL"), votes()), 2, 2010).unwrap().unwrap();
        assert_eq!(r.district, "S");
        for skipped in ["5 - UNEXPIRED TERM", "3*", "SUN", "H"] {
            assert!(read_row(&alabama(s(skipped), votes()), 2, 2010)
                .unwrap()
                .is_none());
        }
        let err = read_row(&alabama(s("AL"), votes()), 9, 2010).unwrap_err();
        assert!(matches!(err, ResultsError::UnexpectedDistrict { lineno: 9, .. }));
    }

    #[test]
    fn votes() {
        let r = read_row(&alabama(DataType::Float(2.0), s("Unopposed")), 2, 2010)
            .unwrap()
            .unwrap();
        assert!(r.unopposed);
        assert_eq!(r.votes, None);
        assert_eq!(r.percent, None);
        assert!(read_row(&alabama(DataType::Float(2.0), s("#")), 2, 2010)
            .unwrap()
            .is_none());
        let err = read_row(&alabama(DataType::Float(2.0), s("n/a")), 3, 2010).unwrap_err();
        assert!(matches!(err, ResultsError::UnexpectedVotes { lineno: 3, .. }));
    }

    #[test]
    fn filtered_rows() {
        let mut primary = alabama(DataType::Float(2.0), DataType::Float(10.0));
        primary[COL_PERCENT] = DataType::Empty;
        assert!(read_row(&primary, 2, 2010).unwrap().is_none());
        let mut total = alabama(DataType::Float(2.0), DataType::Float(10.0));
        total[COL_TOTAL_MARKER] = s("District Votes:");
        assert!(read_row(&total, 2, 2010).unwrap().is_none());
        // Short rows are padded with empty cells.
        assert!(read_row(&[s("x")], 2, 2010).unwrap().is_none());
    }

    #[test]
    fn missing_file() {
        let err = read_excel_results("/nonexistent/results.xls", None, 2010).unwrap_err();
        assert!(matches!(err, ResultsError::OpeningExcel { .. }));
    }
}
