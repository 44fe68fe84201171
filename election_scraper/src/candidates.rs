use log::debug;

use crate::config::*;
use crate::tokens::*;
use crate::vocabulary::PartyVocabulary;

/// The candidates and parties of a House line, in printed order.
///
/// Invariant: `candidates` and `parties` have the same length.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateLine {
    pub candidates: Vec<String>,
    pub parties: Vec<String>,
    pub district: District,
}

impl CandidateLine {
    fn empty() -> CandidateLine {
        CandidateLine {
            candidates: Vec::new(),
            parties: Vec::new(),
            district: District::AtLarge,
        }
    }
}

/// How to read the first comma-separated field before a leader.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FieldKind {
    /// More party lines for the candidate printed just before.
    PartyContinuation,
    FirstFieldIsCandidate,
}

/// A field containing any known party label is a party continuation.
pub fn classify_first_field(field: &str, vocabulary: &PartyVocabulary) -> FieldKind {
    if vocabulary.matches(field) {
        FieldKind::PartyContinuation
    } else {
        FieldKind::FirstFieldIsCandidate
    }
}

/// Rebuilds a candidate name by walking backward from `start`.
///
/// Stops at fills, numbers (the previous vote count), section header remnants or
/// the start of the line. Trailing commas are dropped from each word.
pub fn parse_name(tokens: &[String], start: isize, rules: &ScrapeRules) -> String {
    let mut words: Vec<&str> = Vec::new();
    let mut idx = start.min(tokens.len() as isize - 1);
    while idx >= 0 {
        let token = tokens[idx as usize].trim();
        if is_long_fill(token, rules.long_fill_threshold)
            || is_separator(token)
            || starts_with_digit(token)
            || rules.is_name_stop(token)
        {
            break;
        }
        words.push(token.strip_suffix(',').unwrap_or(token));
        idx -= 1;
    }
    words.reverse();
    words.join(" ")
}

/// Reads a House candidate line: the district marker followed by
/// `Name, Party ......` entries.
pub fn house_candidate_line(
    line: &str,
    line_number: usize,
    vocabulary: &PartyVocabulary,
    rules: &ScrapeRules,
) -> Result<CandidateLine, ScrapeErrors> {
    let tokens = tokenize(line);
    if tokens.len() <= 1 {
        debug!("house_candidate_line: line {}: junk {:?}", line_number, line);
        return Ok(CandidateLine::empty());
    }

    // Anything before the district marker is junk (page headers, section remnants).
    let mut junk: Vec<String> = Vec::new();
    let mut found: Option<(District, usize)> = None;
    for (idx, token) in tokens.iter().enumerate() {
        if let Some(n) = district_number(token) {
            let district = if n == 0 {
                District::AtLarge
            } else {
                District::Numbered(n)
            };
            found = Some((district, idx + 1));
            break;
        }
        junk.push(token.clone());
        if token.eq_ignore_ascii_case(&rules.at_large_marker) {
            found = Some((District::AtLarge, idx + 1));
            break;
        }
    }
    let (district, start) = match found {
        Some(x) => x,
        None => {
            return Err(ScrapeErrors::StructuralParse {
                line_number,
                junk,
                line: line.to_string(),
            });
        }
    };

    let mut res = CandidateLine {
        candidates: Vec::new(),
        parties: Vec::new(),
        district,
    };
    let mut previous: Option<String> = None;
    let mut buffer: Vec<&str> = Vec::new();
    for token in tokens[start..].iter() {
        if !is_separator(token) {
            buffer.push(token.as_str());
            continue;
        }
        let text = buffer.join(" ");
        buffer.clear();
        if text.trim().is_empty() {
            debug!(
                "house_candidate_line: line {}: empty entry before leader",
                line_number
            );
            continue;
        }
        let fields: Vec<&str> = text.split(',').collect();
        let (candidate, party) = if fields.len() == 1 {
            let field = fields[0].trim();
            if rules.is_non_candidate(field) {
                (field.to_string(), field.to_string())
            } else {
                // Same candidate printed on another party line.
                (previous.clone().unwrap_or_default(), field.to_string())
            }
        } else {
            match classify_first_field(fields[0], vocabulary) {
                FieldKind::PartyContinuation => {
                    (previous.clone().unwrap_or_default(), fields.join(","))
                }
                FieldKind::FirstFieldIsCandidate => {
                    let mut name = fields[0].trim().to_string();
                    let mut rest = &fields[1..];
                    if let Some(suffix) = rest.first() {
                        let s = suffix.trim();
                        if s.eq_ignore_ascii_case("sr.") || s.eq_ignore_ascii_case("jr.") {
                            name = format!("{}, {}", name, s);
                            rest = &rest[1..];
                        }
                    }
                    (name, rest.join(","))
                }
            }
        };
        previous = Some(candidate.clone());
        res.candidates.push(candidate.trim().to_string());
        res.parties.push(party.trim().to_lowercase());
    }
    debug!(
        "house_candidate_line: line {}: district {:?} candidates {:?} parties {:?}",
        line_number, res.district, res.candidates, res.parties
    );
    Ok(res)
}

/// Reads the second half of a candidate list that OCR broke over two lines.
///
/// Only the long fills are trusted as separators here, since the line has no
/// district marker to anchor it. The party is the run of comma-free words just
/// before each fill, and the name is read backward from the word where that run
/// stopped, not from a fixed two tokens before the fill: with
/// `Green, Working Families` the name is `Green`, not `Green Working`.
pub fn parse_candidates(tokens: &[String], rules: &ScrapeRules) -> (Vec<String>, Vec<String>) {
    let threshold = rules.long_fill_threshold;
    let mut candidates: Vec<String> = Vec::new();
    let mut parties: Vec<String> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        if !is_long_fill(token, threshold) {
            continue;
        }
        let mut jj = idx as isize - 1;
        let mut party_words: Vec<&str> = Vec::new();
        while jj >= 0 {
            let word = tokens[jj as usize].as_str();
            if word.contains(',') || word.chars().count() >= threshold || is_separator(word) {
                break;
            }
            party_words.push(word);
            jj -= 1;
        }
        party_words.reverse();
        let party = party_words.join(" ");
        let candidate = if party.to_lowercase().contains("write-in") {
            party.clone()
        } else {
            parse_name(tokens, jj, rules)
        };
        candidates.push(candidate);
        parties.push(party.to_lowercase());
    }
    (candidates, parties)
}
