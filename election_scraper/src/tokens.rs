// Low-level predicates over the whitespace tokens of an OCR line.

/// Minimal length of a leader run glued to the end of a word for it to be split off.
const MIN_GLUED_RUN: usize = 3;

/// Splits a line into tokens.
///
/// OCR often glues the dotted leader to the previous word (`DEM......`). Such
/// tokens are returned as two tokens (`DEM`, `......`).
pub fn tokenize(line: &str) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for token in line.split_whitespace() {
        match split_glued_leader(token) {
            Some((word, run)) => {
                res.push(word.to_string());
                res.push(run.to_string());
            }
            None => res.push(token.to_string()),
        }
    }
    res
}

fn split_glued_leader(token: &str) -> Option<(&str, &str)> {
    let last = token.chars().last()?;
    if last.is_alphanumeric() {
        return None;
    }
    let run_len = token.chars().rev().take_while(|c| *c == last).count();
    let total = token.chars().count();
    if run_len < MIN_GLUED_RUN || run_len == total {
        return None;
    }
    let split_at = token.len() - run_len * last.len_utf8();
    Some((&token[..split_at], &token[split_at..]))
}

/// A run of one repeated punctuation character, the remains of a dotted leader.
pub fn is_separator(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if !first.is_alphanumeric() => {
            let mut len = 1;
            for c in chars {
                if c != first {
                    return false;
                }
                len += 1;
            }
            len > 1
        }
        _ => false,
    }
}

/// The long leaders that fill the printed column up to the vote count.
pub fn is_long_fill(token: &str, threshold: usize) -> bool {
    token.chars().count() > threshold
}

/// The number of a district marker such as `12.`: digits and a single terminator.
pub fn district_number(token: &str) -> Option<u32> {
    let token = token.trim();
    let last = token.chars().last()?;
    if last.is_ascii_digit() || last == ',' {
        return None;
    }
    let digits = &token[..token.len() - last.len_utf8()];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}

pub fn is_district_marker(token: &str) -> bool {
    district_number(token).is_some()
}

/// Parses a printed vote count, ignoring the thousands separators.
pub fn parse_vote_count(token: &str) -> Option<u64> {
    token.replace(',', "").trim().parse::<u64>().ok()
}

pub fn starts_with_digit(token: &str) -> bool {
    token
        .trim()
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glued_leaders_are_split() {
        assert_eq!(
            tokenize("12. Smith, Jr., DEM...... 5000"),
            vec!["12.", "Smith,", "Jr.,", "DEM", "......", "5000"]
        );
        assert_eq!(tokenize("  ........  "), vec!["........"]);
        assert_eq!(tokenize("Jr., Inc.."), vec!["Jr.,", "Inc.."]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn separators() {
        assert!(is_separator("......"));
        assert!(is_separator("--"));
        assert!(!is_separator("."));
        assert!(!is_separator("II"));
        assert!(!is_separator("11"));
        assert!(!is_separator(".-."));
        assert!(!is_separator(""));
    }

    #[test]
    fn long_fills() {
        let fill = ".".repeat(31);
        assert!(is_long_fill(&fill, 30));
        assert!(!is_long_fill(&fill[..30], 30));
    }

    #[test]
    fn district_markers() {
        assert_eq!(district_number("12."), Some(12));
        assert_eq!(district_number("3:"), Some(3));
        assert_eq!(district_number("12"), None);
        assert_eq!(district_number("5,"), None);
        assert_eq!(district_number("1,234"), None);
        assert_eq!(district_number("."), None);
        assert_eq!(district_number("EPRESENTATIVE"), None);
    }

    #[test]
    fn vote_counts() {
        assert_eq!(parse_vote_count("1,234"), Some(1234));
        assert_eq!(parse_vote_count("120000"), Some(120000));
        assert_eq!(parse_vote_count("Unopposed"), None);
        assert!(starts_with_digit("1,234"));
        assert!(!starts_with_digit("Smith"));
        assert!(!starts_with_digit(""));
    }
}
