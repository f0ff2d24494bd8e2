use std::collections::HashMap;

pub use crate::config::*;

/// A builder for adding debates without going through a table.
///
/// ```
/// pub use debate_tally::builder::Builder;
/// # use debate_tally::SummaryErrors;
///
/// let mut builder = Builder::new()
///     .candidates(&["Anna".to_string(), "Bob".to_string()]);
///
/// // One entry per candidate, each with the cells of every debate round.
/// builder.add_debate(
///     "2020-01-01",
///     &[
///         vec!["Tax, Jobs".to_string(), "Jobs".to_string()],
///         vec!["Climate".to_string()],
///     ],
/// )?;
///
/// let summary = builder.summarize()?;
/// assert_eq!(summary.issues(), &["Tax", "Jobs", "Climate"]);
/// assert_eq!(summary.total_row(), &["", "Total", "1", "2", "1"]);
///
/// # Ok::<(), SummaryErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _candidates: Vec<String>,
    pub(crate) _debates: Vec<Debate>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Sets the candidates, in the order in which they will appear in each debate.
    pub fn candidates(self, cands: &[String]) -> Builder {
        Builder {
            _candidates: cands.to_vec(),
            _debates: self._debates,
        }
    }

    /// Adds a debate.
    ///
    /// cells: for each candidate, the raw cells of each round. A cell may list
    /// several issues separated by commas. Empty cells are allowed.
    pub fn add_debate(&mut self, date: &str, cells: &[Vec<String>]) -> Result<(), SummaryErrors> {
        if cells.len() != self._candidates.len() {
            return Err(SummaryErrors::CandidateMismatch {
                expected: self._candidates.len(),
                found: cells.len(),
            });
        }
        let candidates: Vec<Candidate> = self
            ._candidates
            .iter()
            .zip(cells.iter())
            .map(|(name, rounds)| {
                let mut issue_count: HashMap<String, u64> = HashMap::new();
                for cell in rounds.iter() {
                    crate::add_issues(&mut issue_count, cell);
                }
                Candidate {
                    name: name.clone(),
                    issue_count,
                }
            })
            .collect();
        self._debates.push(Debate {
            date: date.to_string(),
            candidates,
        });
        Ok(())
    }

    pub fn build(self) -> Vec<Debate> {
        self._debates
    }

    /// Collects the issues and builds the summary table of all the debates added so far.
    pub fn summarize(&self) -> Result<SummaryTable, SummaryErrors> {
        let issues = crate::collect_issues(&self._debates);
        crate::build_table(&self._debates, &issues)
    }
}
