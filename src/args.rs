use clap::Parser;

/// Normalizes historical congressional election results into uniform rows.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the election results: an OCR text file, a spreadsheet
    /// or a colon-delimited export depending on --input-type.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default ocr) The type of the input: ocr, xls or colon.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the rows. By default, the rows are written
    /// next to the input with a .csv extension.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) A JSON file overriding the markers and thresholds used to read
    /// the OCR files. See the manual for the keys.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected output. If provided, congscrape will
    /// check that the output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// The election year, required for the spreadsheet and colon-delimited inputs.
    #[clap(long, value_parser)]
    pub year: Option<u32>,

    /// (default: first sheet) When using a spreadsheet, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub sheet: Option<String>,

    /// (house or senate, default house) The seat reported by a colon-delimited export.
    #[clap(long, value_parser)]
    pub seat: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
