pub use crate::config::*;

use crate::scrape_document;

/// A builder for feeding a document line by line.
///
/// The vocabulary pre-scan needs the whole document, so the lines are kept
/// until [Builder::scrape] is called.
///
/// ```
/// use election_scraper::builder::Builder;
/// use election_scraper::{District, ScrapeRules};
/// # use election_scraper::ScrapeErrors;
///
/// let mut builder = Builder::new(&ScrapeRules::default()).long_fill_threshold(40);
///
/// builder.add_line("OHIO");
/// builder.add_line("12. Smith, Jr., DEM...... 5000");
///
/// let rows = builder.scrape()?;
/// assert_eq!(rows[0].district, District::Numbered(12));
/// # Ok::<(), ScrapeErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: ScrapeRules,
    pub(crate) _lines: Vec<String>,
}

impl Builder {
    pub fn new(rules: &ScrapeRules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _lines: Vec::new(),
        }
    }

    pub fn long_fill_threshold(self, threshold: usize) -> Builder {
        Builder {
            _rules: ScrapeRules {
                long_fill_threshold: threshold,
                ..self._rules
            },
            _lines: self._lines,
        }
    }

    /// Adds state names on top of the ones already known (territories, districts).
    pub fn state_names(self, names: &[String]) -> Builder {
        let mut rules = self._rules;
        for name in names {
            let up = name.trim().to_uppercase();
            if !rules.state_names.contains(&up) {
                rules.state_names.push(up);
            }
        }
        Builder {
            _rules: rules,
            _lines: self._lines,
        }
    }

    pub fn rules(&self) -> &ScrapeRules {
        &self._rules
    }

    pub fn add_line(&mut self, line: &str) {
        self._lines.push(line.to_string());
    }

    pub fn num_lines(&self) -> usize {
        self._lines.len()
    }

    pub fn scrape(&self) -> Result<Vec<ElectionResultRow>, ScrapeErrors> {
        scrape_document(&self._lines, &self._rules)
    }
}
