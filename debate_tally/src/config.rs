// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The role of a group of columns, decided once when the header is indexed.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ColumnRole {
    /// The column holding the date of the debate.
    Date,
    /// The columns (one per debate round) holding the issues raised by one candidate.
    Candidate,
}

/// All the positions in the header that normalize to the same name.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnGroup {
    pub name: String,
    pub role: ColumnRole,
    pub positions: Vec<usize>,
}

/// The header of the input, grouped by normalized column name.
///
/// Groups are kept in the order in which they first appear in the header.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ColumnIndex {
    pub groups: Vec<ColumnGroup>,
}

impl ColumnIndex {
    /// The group with the given normalized name, if any.
    pub fn get(&self, name: &str) -> Option<&ColumnGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn candidate_groups(&self) -> impl Iterator<Item = &ColumnGroup> {
        self.groups
            .iter()
            .filter(|g| g.role == ColumnRole::Candidate)
    }

    /// The position of the only date column.
    ///
    /// Fails if no column or more than one column carries the date.
    pub fn date_column(&self) -> Result<usize, SummaryErrors> {
        let positions: Vec<usize> = self
            .groups
            .iter()
            .filter(|g| g.role == ColumnRole::Date)
            .flat_map(|g| g.positions.iter().cloned())
            .collect();
        match positions.as_slice() {
            [] => Err(SummaryErrors::MissingDateColumn),
            [pos] => Ok(*pos),
            _ => Err(SummaryErrors::MultipleDateColumns { columns: positions }),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub issue_count: HashMap<String, u64>,
}

impl Candidate {
    pub fn new(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            issue_count: HashMap::new(),
        }
    }

    /// The number of mentions of an issue. Unknown issues count as zero.
    pub fn count(&self, issue: &str) -> u64 {
        self.issue_count.get(issue).cloned().unwrap_or(0)
    }
}

/// One debate: a date and the issues raised by each candidate.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Debate {
    pub date: String,
    pub candidates: Vec<Candidate>,
}

// ******** Output data structures *********

/// The label of the aggregate row.
pub const TOTAL_LABEL: &str = "Total";

/// The rectangular summary: a header, one row per (debate, candidate) pair
/// and a final total row.
///
/// Invariant: every row has as many cells as the header, and there is always
/// a header and a total row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SummaryTable {
    pub(crate) rows: Vec<Vec<String>>,
}

impl SummaryTable {
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..self.rows.len() - 1]
    }

    pub fn total_row(&self) -> &[String] {
        &self.rows[self.rows.len() - 1]
    }

    /// The issue columns, in output order.
    pub fn issues(&self) -> &[String] {
        &self.header()[2..]
    }

    /// All the rows, header and total included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Errors that prevent the summary from completing successfully.
///
/// All of them point at a problem in the source data.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SummaryErrors {
    /// The input does not even contain a header.
    EmptyInput,
    MissingDateColumn,
    /// More than one column normalizes to a date column.
    MultipleDateColumns { columns: Vec<usize> },
    /// A data row does not reach one of the columns named in the header.
    /// `lineno` counts from 1 and includes the header.
    RowTooShort {
        lineno: usize,
        expected: usize,
        found: usize,
    },
    /// A cell that should hold a count could not be read back as an integer.
    NonNumericCell {
        row: usize,
        column: usize,
        content: String,
    },
    /// The builder received cells for a different number of candidates.
    CandidateMismatch { expected: usize, found: usize },
}

impl Error for SummaryErrors {}

impl Display for SummaryErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data integrity error: ")?;
        match self {
            SummaryErrors::EmptyInput => write!(f, "the source data has no header row"),
            SummaryErrors::MissingDateColumn => {
                write!(f, "the source data does not contain a date column")
            }
            SummaryErrors::MultipleDateColumns { columns } => write!(
                f,
                "the source data contains more than one date column (positions {:?})",
                columns
            ),
            SummaryErrors::RowTooShort {
                lineno,
                expected,
                found,
            } => write!(
                f,
                "line {} has {} cells but at least {} are expected",
                lineno, found, expected
            ),
            SummaryErrors::NonNumericCell {
                row,
                column,
                content,
            } => write!(
                f,
                "row {} column {}: expected an integer, found {:?}",
                row, column, content
            ),
            SummaryErrors::CandidateMismatch { expected, found } => write!(
                f,
                "expected cells for {} candidates, found {}",
                expected, found
            ),
        }
    }
}
