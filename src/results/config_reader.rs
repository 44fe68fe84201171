use crate::results::*;

use election_scraper::ScrapeRules;
use log::debug;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs;

/// Overrides of the scraping constants, read from a JSON file.
///
/// Every key is optional; the missing ones keep their historical value.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeSettings {
    #[serde(rename = "senateMarker")]
    pub senate_marker: Option<String>,
    #[serde(rename = "houseMarker")]
    pub house_marker: Option<String>,
    #[serde(rename = "atLargeMarker")]
    pub at_large_marker: Option<String>,
    #[serde(rename = "nameStopTokens")]
    pub name_stop_tokens: Option<Vec<String>>,
    #[serde(rename = "longFillThreshold")]
    pub long_fill_threshold: Option<usize>,
    /// An empty string disables the substitution.
    #[serde(rename = "unopposedCountState")]
    pub unopposed_count_state: Option<String>,
    #[serde(rename = "nonCandidateFlags")]
    pub non_candidate_flags: Option<Vec<String>>,
    #[serde(rename = "extraStateNames")]
    pub extra_state_names: Option<Vec<String>>,
}

impl ScrapeSettings {
    pub fn apply(&self, rules: ScrapeRules) -> ResultsResult<ScrapeRules> {
        let mut res = rules;
        if let Some(x) = &self.senate_marker {
            res.senate_marker = read_marker("senateMarker", x)?;
        }
        if let Some(x) = &self.house_marker {
            res.house_marker = read_marker("houseMarker", x)?;
        }
        if let Some(x) = &self.at_large_marker {
            res.at_large_marker = read_marker("atLargeMarker", x)?;
        }
        if let Some(xs) = &self.name_stop_tokens {
            res.name_stop_tokens = xs
                .iter()
                .map(|x| read_marker("nameStopTokens", x))
                .collect::<ResultsResult<Vec<String>>>()?;
        }
        match self.long_fill_threshold {
            Some(0) => whatever!("longFillThreshold must be positive"),
            Some(x) => res.long_fill_threshold = x,
            None => {}
        }
        if let Some(x) = &self.unopposed_count_state {
            res.unopposed_count_state = if x.trim().is_empty() {
                None
            } else {
                Some(x.trim().to_string())
            };
        }
        if let Some(xs) = &self.non_candidate_flags {
            res.non_candidate_flags = xs
                .iter()
                .map(|x| x.trim().to_lowercase())
                .filter(|x| !x.is_empty())
                .collect();
        }
        if let Some(xs) = &self.extra_state_names {
            for x in xs {
                let up = x.trim().to_uppercase();
                if !up.is_empty() && !res.state_names.contains(&up) {
                    res.state_names.push(up);
                }
            }
        }
        Ok(res)
    }
}

fn read_marker(key: &str, x: &str) -> ResultsResult<String> {
    let m = x.trim();
    if m.is_empty() || m.contains(char::is_whitespace) {
        whatever!("{} must be a single token, got {:?}", key, x)
    }
    Ok(m.to_uppercase())
}

pub fn read_settings(path: &str) -> ResultsResult<ScrapeSettings> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_settings: {:?}", contents);
    let settings: ScrapeSettings =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(settings)
}
