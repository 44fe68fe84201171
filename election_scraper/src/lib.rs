mod config;
pub mod builder;
pub mod candidates;
pub mod manual;
pub mod states;
pub mod tokens;
pub mod vocabulary;

use log::{debug, info, warn};

pub use crate::candidates::{CandidateLine, FieldKind};
pub use crate::config::*;
pub use crate::vocabulary::PartyVocabulary;

use crate::candidates::{house_candidate_line, parse_candidates, parse_name};
use crate::tokens::*;

/// Where the scraper is in the printed page.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Phase {
    /// A state header was read (or nothing yet), waiting for a section.
    SeekingState,
    InSenateSection,
    InHouseSection,
    /// Candidates are pending, their counts are expected on a following line.
    AwaitingVoteTotals,
}

/// The line-by-line state machine over one document.
///
/// One instance per document: it holds the state name, the pending candidates
/// and parties waiting for their vote totals and the at-large flag.
#[derive(Debug, Clone)]
pub struct PageScraper {
    rules: ScrapeRules,
    vocabulary: PartyVocabulary,
    phase: Phase,
    state: Option<String>,
    district: Option<District>,
    candidates: Vec<String>,
    parties: Vec<String>,
    at_large_pending: bool,
    line_number: usize,
}

impl PageScraper {
    pub fn new(rules: &ScrapeRules, vocabulary: PartyVocabulary) -> PageScraper {
        PageScraper {
            rules: rules.clone(),
            vocabulary,
            phase: Phase::SeekingState,
            state: None,
            district: None,
            candidates: Vec::new(),
            parties: Vec::new(),
            at_large_pending: false,
            line_number: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// The candidates waiting for a vote line.
    pub fn pending(&self) -> (&[String], &[String]) {
        (&self.candidates, &self.parties)
    }

    /// Processes the next line of the document.
    ///
    /// Returns the rows completed by this line. On error nothing from this line
    /// is returned and the scrape should be abandoned.
    pub fn process_line(&mut self, line: &str) -> Result<Vec<ElectionResultRow>, ScrapeErrors> {
        self.line_number += 1;
        let tokens = tokenize(line);
        let first = match tokens.first() {
            Some(t) => t.clone(),
            None => return Ok(Vec::new()),
        };

        if let Some(state) = self.match_state(&tokens) {
            debug!("process_line: line {}: state {}", self.line_number, state);
            self.reset(state);
            return Ok(Vec::new());
        }

        let is_house_marker = first.eq_ignore_ascii_case(&self.rules.house_marker);

        if first.eq_ignore_ascii_case(&self.rules.senate_marker) {
            return self.senate_line(&tokens);
        }

        if is_house_marker && tokens.len() == 1 {
            // The real candidate line is the next one.
            self.at_large_pending = true;
            return Ok(Vec::new());
        }

        if is_house_marker || is_district_marker(&first) || self.at_large_pending {
            return self.house_line(line, &tokens);
        }

        if self.phase == Phase::AwaitingVoteTotals {
            if starts_with_digit(&first) {
                return self.vote_line(&tokens);
            }
            // OCR broke the candidate list over two lines.
            let (candidates, parties) = parse_candidates(&tokens, &self.rules);
            debug!(
                "process_line: line {}: continuation candidates {:?} parties {:?}",
                self.line_number, candidates, parties
            );
            self.candidates.extend(candidates);
            self.parties.extend(parties);
            return Ok(Vec::new());
        }

        debug!("process_line: line {}: skipping {:?}", self.line_number, line);
        Ok(Vec::new())
    }

    /// Ends the document. Candidates still waiting for their counts are dropped.
    pub fn finish(self) {
        if !self.candidates.is_empty() {
            warn!(
                "finish: dropping {} pending candidates without vote totals: {:?}",
                self.candidates.len(),
                self.candidates
            );
        }
    }

    fn match_state(&self, tokens: &[String]) -> Option<String> {
        if self.rules.is_state_name(&tokens[0]) {
            return Some(tokens[0].clone());
        }
        if tokens.len() >= 2 {
            let two = tokens[..2].join(" ");
            if self.rules.is_state_name(&two) {
                return Some(two);
            }
        }
        None
    }

    fn reset(&mut self, state: String) {
        self.state = Some(state);
        self.district = None;
        self.candidates.clear();
        self.parties.clear();
        self.at_large_pending = false;
        self.phase = Phase::SeekingState;
    }

    fn current_state(&self) -> Option<String> {
        if self.state.is_none() {
            warn!(
                "line {}: results found before any state header, skipping",
                self.line_number
            );
        }
        self.state.clone()
    }

    // Senate results are complete on a single line: name, party, leader, count.
    fn senate_line(&mut self, tokens: &[String]) -> Result<Vec<ElectionResultRow>, ScrapeErrors> {
        let state = match self.current_state() {
            Some(s) => s,
            None => return Ok(Vec::new()),
        };
        let mut rows: Vec<ElectionResultRow> = Vec::new();
        for (idx, token) in tokens.iter().enumerate().skip(1) {
            if !is_separator(token) {
                continue;
            }
            let party_token = tokens[idx - 1].trim();
            let party = party_token.to_lowercase();
            let candidate_name = if self.rules.is_non_candidate(party_token) {
                party.clone()
            } else {
                parse_name(tokens, idx as isize - 2, &self.rules)
            };
            let votes = match tokens.get(idx + 1).and_then(|t| parse_vote_count(t)) {
                Some(v) => v,
                None => {
                    return Err(ScrapeErrors::VoteParse {
                        line_number: self.line_number,
                        state,
                        district: Some(District::Senate),
                        tokens: tokens.to_vec(),
                    });
                }
            };
            rows.push(ElectionResultRow {
                state: state.clone(),
                district: District::Senate,
                candidate_name,
                party,
                votes: Votes::Count(votes),
            });
        }
        debug!("senate_line: line {}: rows {:?}", self.line_number, rows);
        self.phase = Phase::InSenateSection;
        Ok(rows)
    }

    fn house_line(
        &mut self,
        line: &str,
        tokens: &[String],
    ) -> Result<Vec<ElectionResultRow>, ScrapeErrors> {
        let state = match self.current_state() {
            Some(s) => s,
            None => return Ok(Vec::new()),
        };
        let cl = house_candidate_line(line, self.line_number, &self.vocabulary, &self.rules)?;
        self.at_large_pending = false;
        self.district = Some(cl.district);
        self.candidates = cl.candidates;
        self.parties = cl.parties;

        // Unopposed candidates are printed with their count on the same line.
        if self.candidates.len() == 1 && !self.rules.is_unopposed_count_state(&state) {
            if let Some(votes) = tokens.last().and_then(|t| parse_vote_count(t)) {
                let row = ElectionResultRow {
                    state,
                    district: cl.district,
                    candidate_name: self.candidates.remove(0),
                    party: self.parties.remove(0),
                    votes: Votes::Count(votes),
                };
                debug!("house_line: line {}: row {:?}", self.line_number, row);
                self.phase = Phase::InHouseSection;
                return Ok(vec![row]);
            }
            debug!(
                "house_line: line {}: no count on single candidate line, waiting for totals",
                self.line_number
            );
        }
        self.phase = Phase::AwaitingVoteTotals;
        Ok(Vec::new())
    }

    fn vote_line(&mut self, tokens: &[String]) -> Result<Vec<ElectionResultRow>, ScrapeErrors> {
        let state = self.state.clone().unwrap_or_default();
        let parsed: Option<Vec<u64>> = tokens.iter().map(|t| parse_vote_count(t)).collect();
        let votes: Vec<Votes> = match parsed {
            Some(counts) => counts.into_iter().map(Votes::Count).collect(),
            None if self.rules.is_unopposed_count_state(&state) => {
                debug!(
                    "vote_line: line {}: unopposed without count in {}",
                    self.line_number, state
                );
                vec![Votes::Unopposed]
            }
            None => {
                return Err(ScrapeErrors::VoteParse {
                    line_number: self.line_number,
                    state,
                    district: self.district,
                    tokens: tokens.to_vec(),
                });
            }
        };
        if votes.len() != self.candidates.len() {
            warn!(
                "vote_line: line {}: {} counts for {} candidates in {} district {:?}",
                self.line_number,
                votes.len(),
                self.candidates.len(),
                state,
                self.district
            );
        }
        let district = self.district.unwrap_or(District::AtLarge);
        let rows: Vec<ElectionResultRow> = self
            .candidates
            .drain(..)
            .zip(self.parties.drain(..))
            .zip(votes)
            .map(|((candidate_name, party), votes)| ElectionResultRow {
                state: state.clone(),
                district,
                candidate_name,
                party,
                votes,
            })
            .collect();
        self.phase = Phase::InHouseSection;
        Ok(rows)
    }
}

/// Scrapes a whole OCR document.
///
/// The party vocabulary is gathered from the full document first, then the
/// lines are read in order. The first fatal error stops the scrape.
pub fn scrape_document<S: AsRef<str>>(
    lines: &[S],
    rules: &ScrapeRules,
) -> Result<Vec<ElectionResultRow>, ScrapeErrors> {
    info!("Scraping {} lines", lines.len());
    let vocabulary = PartyVocabulary::extract(lines, rules);
    info!("Found {} party labels", vocabulary.len());
    let mut scraper = PageScraper::new(rules, vocabulary);
    let mut rows: Vec<ElectionResultRow> = Vec::new();
    for line in lines.iter() {
        let mut line_rows = scraper.process_line(line.as_ref())?;
        rows.append(&mut line_rows);
    }
    scraper.finish();
    info!("Scraped {} rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        state: &str,
        district: District,
        name: &str,
        party: &str,
        votes: Votes,
    ) -> ElectionResultRow {
        ElectionResultRow {
            state: state.to_string(),
            district,
            candidate_name: name.to_string(),
            party: party.to_string(),
            votes,
        }
    }

    fn fill() -> String {
        ".".repeat(36)
    }

    #[test]
    fn senate_line() {
        let _ = env_logger::builder().is_test(true).try_init();
        let lines = vec!["OHIO", "ENATOR John Doe REP......... 120000"];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![row("OHIO", District::Senate, "John Doe", "rep", Votes::Count(120000))]
        );
        assert_eq!(rows[0].district.code(), -1);
    }

    #[test]
    fn senate_line_with_several_candidates() {
        let lines = vec![
            "Texas",
            concat!(
                "ENATOR John Doe REP ........ 120,000 ",
                "Jane Roe, DEM ........ 90,500 Write-in ........ 12"
            ),
        ];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                row("Texas", District::Senate, "John Doe", "rep", Votes::Count(120000)),
                row("Texas", District::Senate, "Jane Roe", "dem", Votes::Count(90500)),
                row("Texas", District::Senate, "write-in", "write-in", Votes::Count(12)),
            ]
        );
    }

    #[test]
    fn senate_line_without_count_fails() {
        let lines = vec!["Texas", "ENATOR John Doe REP ........ unopposed"];
        let err = scrape_document(&lines, &ScrapeRules::default()).unwrap_err();
        assert!(matches!(
            err,
            ScrapeErrors::VoteParse {
                line_number: 2,
                district: Some(District::Senate),
                ..
            }
        ));
    }

    #[test]
    fn single_candidate_fast_path() {
        let lines = vec!["Ohio", "12. Smith, Jr., DEM...... 5,000"];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![row("Ohio", District::Numbered(12), "Smith, Jr.", "dem", Votes::Count(5000))]
        );
    }

    #[test]
    fn large_counts_stay_positive() {
        let lines = vec!["Ohio", "1. A, DEM ........ 9223372036854775808"];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(rows[0].votes, Votes::Count(9_223_372_036_854_775_808));
        assert_eq!(rows[0].fields()[4], "9223372036854775808");
    }

    #[test]
    fn vote_totals_on_next_line() {
        let lines = vec![
            "Ohio",
            "3. Smith, DEM ........ Jones, REP ........",
            "1,234 5,678",
        ];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                row("Ohio", District::Numbered(3), "Smith", "dem", Votes::Count(1234)),
                row("Ohio", District::Numbered(3), "Jones", "rep", Votes::Count(5678)),
            ]
        );
    }

    #[test]
    fn single_candidate_without_count_waits() {
        let rules = ScrapeRules::default();
        let mut scraper = PageScraper::new(&rules, PartyVocabulary::new());
        assert!(scraper.process_line("Iowa").unwrap().is_empty());
        assert!(scraper
            .process_line("4. Brown, REP ........")
            .unwrap()
            .is_empty());
        assert_eq!(scraper.phase(), Phase::AwaitingVoteTotals);
        let rows = scraper.process_line("88,000").unwrap();
        assert_eq!(
            rows,
            vec![row("Iowa", District::Numbered(4), "Brown", "rep", Votes::Count(88000))]
        );
        assert_eq!(scraper.phase(), Phase::InHouseSection);
        assert!(scraper.pending().0.is_empty());
    }

    #[test]
    fn florida_substitutes_unopposed() {
        let lines = vec!["FLORIDA", "2. Boyd, DEM ........", "Unopposed"];
        // The vote line must start with a digit to be read as totals.
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert!(rows.is_empty());

        let lines = vec!["FLORIDA", "2. Boyd, DEM ........ 123", "1 (unopposed)"];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![row("FLORIDA", District::Numbered(2), "Boyd", "dem", Votes::Unopposed)]
        );
        assert_eq!(rows[0].votes.code(), -1);
    }

    #[test]
    fn other_states_abort_on_bad_totals() {
        let lines = vec!["Georgia", "2. Bishop, DEM ........", "1 (unopposed)"];
        let err = scrape_document(&lines, &ScrapeRules::default()).unwrap_err();
        assert_eq!(
            err,
            ScrapeErrors::VoteParse {
                line_number: 3,
                state: "Georgia".to_string(),
                district: Some(District::Numbered(2)),
                tokens: vec!["1".to_string(), "(unopposed)".to_string()],
            }
        );
    }

    #[test]
    fn at_large_on_next_line() {
        let lines = vec![
            "Wyoming",
            "EPRESENTATIVE",
            "AT LARGE Lummis, REP ........ Grayson, DEM ........",
            "131,661 45,752",
        ];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                row("Wyoming", District::AtLarge, "Lummis", "rep", Votes::Count(131661)),
                row("Wyoming", District::AtLarge, "Grayson", "dem", Votes::Count(45752)),
            ]
        );
        assert!(rows.iter().all(|r| r.district.code() == 0));
    }

    #[test]
    fn broken_candidate_line_is_merged() {
        let continuation = format!("Green, Libertarian {}", fill());
        let lines = vec![
            "New York".to_string(),
            "7. Crowley, DEM ........ Smith, REP ........".to_string(),
            continuation,
            "100 200 30".to_string(),
        ];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                row("New York", District::Numbered(7), "Crowley", "dem", Votes::Count(100)),
                row("New York", District::Numbered(7), "Smith", "rep", Votes::Count(200)),
                row("New York", District::Numbered(7), "Green", "libertarian", Votes::Count(30)),
            ]
        );
    }

    #[test]
    fn state_header_discards_pending() {
        let lines = vec![
            "Ohio",
            "3. Smith, DEM ........ Jones, REP ........",
            "Oregon",
            "1,234 5,678",
        ];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_district_aborts() {
        let lines = vec!["Ohio", "EPRESENTATIVE Smith, DEM ........ 100"];
        let err = scrape_document(&lines, &ScrapeRules::default()).unwrap_err();
        assert!(matches!(
            err,
            ScrapeErrors::StructuralParse { line_number: 2, .. }
        ));
    }

    #[test]
    fn lines_before_first_state_are_ignored() {
        let lines = vec!["1. Introduction ........ 3", "", "Ohio", "1. Smith, DEM ........ 10"];
        let rows = scrape_document(&lines, &ScrapeRules::default()).unwrap();
        assert_eq!(
            rows,
            vec![row("Ohio", District::Numbered(1), "Smith", "dem", Votes::Count(10))]
        );
    }

    #[test]
    fn scraping_is_idempotent() {
        let lines = vec![
            "ALABAMA",
            "ENATOR Richard Shelby, REP ........ 1,000 Write-in ........ 20",
            "1. Byrne, REP ........ 100",
            "2. Roby, REP ........ Wright, DEM ........",
            "113,103 103,758",
        ];
        let rules = ScrapeRules::default();
        let a = scrape_document(&lines, &rules).unwrap();
        let b = scrape_document(&lines, &rules).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }
}
