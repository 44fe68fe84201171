// ********* Output data structures ***********

use std::error::Error;
use std::fmt::Display;

use crate::states::STATES;

/// The race a result belongs to.
///
/// The numeric sentinels used by the output files only show up when rendering,
/// see [District::code].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum District {
    /// A geographic House district (always positive).
    Numbered(u32),
    /// The whole state elects its single representative.
    AtLarge,
    /// Statewide Senate race.
    Senate,
}

impl District {
    /// The integer written in the output: the district number, 0 for at-large
    /// and -1 for the Senate.
    pub fn code(&self) -> i64 {
        match self {
            District::Numbered(n) => *n as i64,
            District::AtLarge => 0,
            District::Senate => -1,
        }
    }
}

impl Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Votes {
    Count(u64),
    /// Unopposed race where the document did not print a count.
    Unopposed,
}

impl Votes {
    /// The integer written in the output, -1 when unopposed.
    pub fn code(&self) -> i128 {
        match self {
            Votes::Count(c) => i128::from(*c),
            Votes::Unopposed => -1,
        }
    }
}

impl Display for Votes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Votes::Count(c) => write!(f, "{}", c),
            Votes::Unopposed => write!(f, "-1"),
        }
    }
}

/// One candidate's line item in one race.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct ElectionResultRow {
    pub state: String,
    pub district: District,
    pub candidate_name: String,
    /// Always lowercase.
    pub party: String,
    pub votes: Votes,
}

impl ElectionResultRow {
    /// The five fields in output order.
    pub fn fields(&self) -> [String; 5] {
        [
            self.state.clone(),
            self.district.to_string(),
            self.candidate_name.clone(),
            self.party.clone(),
            self.votes.to_string(),
        ]
    }
}

/// Errors that abort the scrape of a document.
///
/// Both carry enough context to find and fix the offending line by hand.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScrapeErrors {
    /// No district marker could be found on a candidate line.
    StructuralParse {
        line_number: usize,
        junk: Vec<String>,
        line: String,
    },
    /// A vote total could not be read.
    VoteParse {
        line_number: usize,
        state: String,
        district: Option<District>,
        tokens: Vec<String>,
    },
}

impl Error for ScrapeErrors {}

impl Display for ScrapeErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeErrors::StructuralParse {
                line_number,
                junk,
                line,
            } => write!(
                f,
                "line {}: no district marker found (discarded {:?}) in {:?}",
                line_number, junk, line
            ),
            ScrapeErrors::VoteParse {
                line_number,
                state,
                district,
                tokens,
            } => write!(
                f,
                "line {}: cannot read vote totals for state {:?} district {:?}: {:?}",
                line_number, state, district, tokens
            ),
        }
    }
}

// ********* Configuration **********

// The markers are what is left of the section headers once OCR has eaten the
// decorated first letter ("S"ENATOR, "R"EPRESENTATIVE, AT "LARGE").

pub const SENATE_MARKER: &str = "ENATOR";
pub const HOUSE_MARKER: &str = "EPRESENTATIVE";
pub const AT_LARGE_MARKER: &str = "LARGE";
pub const LONG_FILL_THRESHOLD: usize = 30;
pub const UNOPPOSED_COUNT_STATE: &str = "FLORIDA";
pub const NON_CANDIDATE_FLAGS: [&str; 4] = ["write-in", "scattering", "blank", "void"];

/// The constants tied to the printed documents.
///
/// All the marker strings are compared uppercased.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScrapeRules {
    pub senate_marker: String,
    pub house_marker: String,
    pub at_large_marker: String,
    /// Section header remnants that end a name when walking backwards.
    pub name_stop_tokens: Vec<String>,
    /// Tokens strictly longer than this are the long dotted fills.
    pub long_fill_threshold: usize,
    /// The state printing unopposed races without any count.
    pub unopposed_count_state: Option<String>,
    /// Lowercase.
    pub non_candidate_flags: Vec<String>,
    /// Uppercase.
    pub state_names: Vec<String>,
}

impl Default for ScrapeRules {
    fn default() -> Self {
        ScrapeRules {
            senate_marker: SENATE_MARKER.to_string(),
            house_marker: HOUSE_MARKER.to_string(),
            at_large_marker: AT_LARGE_MARKER.to_string(),
            name_stop_tokens: vec![SENATE_MARKER.to_string(), AT_LARGE_MARKER.to_string()],
            long_fill_threshold: LONG_FILL_THRESHOLD,
            unopposed_count_state: Some(UNOPPOSED_COUNT_STATE.to_string()),
            non_candidate_flags: NON_CANDIDATE_FLAGS.iter().map(|s| s.to_string()).collect(),
            state_names: STATES.iter().map(|s| s.to_uppercase()).collect(),
        }
    }
}

impl ScrapeRules {
    pub fn is_state_name(&self, s: &str) -> bool {
        let up = s.to_uppercase();
        self.state_names.iter().any(|n| *n == up)
    }

    pub fn is_unopposed_count_state(&self, state: &str) -> bool {
        match &self.unopposed_count_state {
            Some(s) => s.eq_ignore_ascii_case(state),
            None => false,
        }
    }

    /// Write-ins, scattering, blank and void ballots: kept as rows but not real candidates.
    pub fn is_non_candidate(&self, s: &str) -> bool {
        let low = s.to_lowercase();
        self.non_candidate_flags
            .iter()
            .any(|flag| low.contains(flag.as_str()))
    }

    pub fn is_name_stop(&self, token: &str) -> bool {
        let up = token.to_uppercase();
        self.name_stop_tokens.iter().any(|t| t.to_uppercase() == up)
    }
}
