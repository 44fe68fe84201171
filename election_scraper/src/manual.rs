/*!

This is the long-form manual for `election_scraper` and `congscrape`.

## The printed documents

The House and Senate results of some years are only available as scans of
printed tables. Once passed through OCR, a page looks like this:

```text
OHIO
ENATOR Rob Portman, REP ................................ 1,234,567
EPRESENTATIVE
1. Chabot, REP ................................ Sinnard, DEM ................................
210,014 124,779
2. Wenstrup, REP ................................ 189,870
```

The decorated first letter of each section header is lost by the OCR, which
is why the markers are `ENATOR` and `EPRESENTATIVE`. Dotted leaders separate
each `Name, Party` entry from its count. Contested House races print the
counts on the next line, in the same order as the candidates.

## Output

One row per candidate, five comma separated fields:

```text
state,district,candidate,party,votes
```

* the district is the district number, `0` for an at-large seat and `-1`
  for the Senate;
* the party is lowercased;
* the votes are `-1` for an unopposed race printed without a count
  (Florida does that).

## Supported layouts

* several candidates on one line, counts on the next line;
* a single candidate with the count on the same line;
* the same candidate on several party lines (cross-filing), each line
  getting its own count;
* write-ins, scattering, blank and void ballots, kept as their own rows;
* at-large seats, with the candidates on the line after the section header;
* candidate lists broken over two lines by the OCR.

## Errors

Two conditions stop the scrape: a candidate line without any district
number, and a line of counts that cannot be read as numbers. Both report the
line number and the offending tokens. The fix is to correct the text file by
hand and to run the scrape again.

## Configuration

The markers, the length above which a leader is considered a long fill
(30 by default), the list of non-candidate flags and the state printing
unopposed races without counts can all be overridden, see
[crate::ScrapeRules]. `congscrape` reads them from a JSON file passed with
`--config`:

```json
{
  "longFillThreshold": 40,
  "unopposedCountState": "Florida",
  "extraStateNames": ["American Samoa", "Guam"]
}
```

## Other inputs

`congscrape` also imports the spreadsheets (`--input-type xls`) and the
colon-delimited exports (`--input-type colon`) published for other years.
Those are written with a header row and more columns (incumbency, percent,
winner, year).
*/
