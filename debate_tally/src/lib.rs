mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use std::collections::{BTreeSet, HashMap};

pub use crate::config::*;

// Marker of a debate round appended to a column name: `Jane Doe [2]`.
static ROUND_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[0-9]\]").unwrap());

/// The substring that identifies the date column once the name is normalized.
pub const DATE_MARKER: &str = "Date";

/// Removes the debate round markers (`[1]`, `[2]`, ...) from a column name and trims it.
///
/// ```
/// use debate_tally::normalize_column_name;
/// assert_eq!(normalize_column_name("Jane Doe [2]"), "Jane Doe");
/// assert_eq!(normalize_column_name(" Date "), "Date");
/// ```
pub fn normalize_column_name(raw: &str) -> String {
    ROUND_SUFFIX.replace_all(raw, "").trim().to_string()
}

/// Groups the positions of the header under their normalized names.
///
/// The groups keep the order in which a name is first seen, and each group
/// is classified as a date or a candidate group.
pub fn index_columns(header: &[String]) -> ColumnIndex {
    let mut index = ColumnIndex::default();
    for (pos, raw) in header.iter().enumerate() {
        let name = normalize_column_name(raw);
        match index.groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.positions.push(pos),
            None => {
                let role = if name.contains(DATE_MARKER) {
                    ColumnRole::Date
                } else {
                    ColumnRole::Candidate
                };
                index.groups.push(ColumnGroup {
                    name,
                    role,
                    positions: vec![pos],
                });
            }
        }
    }
    debug!("index_columns: {:?}", index);
    index
}

/// Adds the issues listed in one cell to the tally of a candidate.
///
/// A cell is a comma-separated list of issues. Blank entries are ignored.
pub(crate) fn add_issues(issue_count: &mut HashMap<String, u64>, cell: &str) {
    for issue in cell.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        *issue_count.entry(issue.to_string()).or_insert(0) += 1;
    }
}

/// Converts the data rows (the header excluded) into debates, one per row, in input order.
pub fn parse_debates(index: &ColumnIndex, rows: &[Vec<String>]) -> Result<Vec<Debate>, SummaryErrors> {
    let date_pos = index.date_column()?;
    let min_len = index
        .groups
        .iter()
        .flat_map(|g| g.positions.iter())
        .max()
        .map(|p| p + 1)
        .unwrap_or(0);

    let mut debates: Vec<Debate> = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        if row.len() < min_len {
            return Err(SummaryErrors::RowTooShort {
                lineno,
                expected: min_len,
                found: row.len(),
            });
        }

        let candidates: Vec<Candidate> = index
            .candidate_groups()
            .map(|group| {
                let mut candidate = Candidate::new(&group.name);
                for pos in group.positions.iter() {
                    add_issues(&mut candidate.issue_count, &row[*pos]);
                }
                candidate
            })
            .collect();

        let debate = Debate {
            date: row[date_pos].clone(),
            candidates,
        };
        debug!("parse_debates: line {}: {:?}", lineno, debate);
        debates.push(debate);
    }
    info!(
        "parse_debates: {} debates, {} candidates per debate",
        debates.len(),
        index.candidate_groups().count()
    );
    Ok(debates)
}

/// Parses a full table, where the first row is the header.
pub fn parse_rows(rows: &[Vec<String>]) -> Result<Vec<Debate>, SummaryErrors> {
    let (header, data) = rows.split_first().ok_or(SummaryErrors::EmptyInput)?;
    let index = index_columns(header);
    parse_debates(&index, data)
}

/// All the issues mentioned in the debates, without duplicates, in reverse alphabetical order.
pub fn collect_issues(debates: &[Debate]) -> Vec<String> {
    let issues: BTreeSet<&String> = debates
        .iter()
        .flat_map(|d| d.candidates.iter())
        .flat_map(|c| c.issue_count.keys())
        .collect();
    issues.into_iter().rev().cloned().collect()
}

/// Pivots the debates into the summary table, with one column per issue in the given order.
pub fn build_table(debates: &[Debate], issues: &[String]) -> Result<SummaryTable, SummaryErrors> {
    let mut header: Vec<String> = vec!["Date".to_string(), "Candidate".to_string()];
    header.extend(issues.iter().cloned());
    let width = header.len();

    let mut rows: Vec<Vec<String>> = vec![header];
    for debate in debates.iter() {
        for candidate in debate.candidates.iter() {
            let mut row: Vec<String> = Vec::with_capacity(width);
            row.push(debate.date.clone());
            row.push(candidate.name.clone());
            row.extend(issues.iter().map(|issue| candidate.count(issue).to_string()));
            rows.push(row);
        }
    }

    let total_row = compute_total_row(&rows, width)?;
    rows.push(total_row);
    info!(
        "build_table: {} rows, {} issue columns",
        rows.len() - 2,
        issues.len()
    );
    Ok(SummaryTable { rows })
}

// Reads back every count written so far. The values are always integers
// unless the table got corrupted on the way.
fn compute_total_row(rows: &[Vec<String>], width: usize) -> Result<Vec<String>, SummaryErrors> {
    let mut total_row: Vec<String> = vec![String::new(); width];
    total_row[1] = TOTAL_LABEL.to_string();
    for (col, cell) in total_row.iter_mut().enumerate().skip(2) {
        let mut total: u64 = 0;
        for (row_idx, row) in rows.iter().enumerate().skip(1) {
            let content = row.get(col).map(|s| s.as_str()).unwrap_or("");
            let val = content
                .parse::<u64>()
                .map_err(|_| SummaryErrors::NonNumericCell {
                    row: row_idx,
                    column: col,
                    content: content.to_string(),
                })?;
            total += val;
        }
        *cell = total.to_string();
    }
    Ok(total_row)
}

/// Runs the whole pipeline on a table whose first row is the header.
pub fn summarize(rows: &[Vec<String>]) -> Result<SummaryTable, SummaryErrors> {
    let debates = parse_rows(rows)?;
    let issues = collect_issues(&debates);
    debug!("summarize: issues: {:?}", issues);
    build_table(&debates, &issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    // Small xorshift generator, enough to build synthetic tables.
    struct Rng(u64);

    impl Rng {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0 % bound
        }
    }

    #[test]
    fn normalize_strips_round_marker() {
        assert_eq!(normalize_column_name("Candidate A [1]"), "Candidate A");
        assert_eq!(normalize_column_name("Candidate A [3]  "), "Candidate A");
        assert_eq!(normalize_column_name("Date"), "Date");
        assert_eq!(normalize_column_name("  Jane [1][2] "), "Jane");
    }

    #[test]
    fn normalize_keeps_other_brackets() {
        assert_eq!(normalize_column_name("Bob [12]"), "Bob [12]");
        assert_eq!(normalize_column_name("Bob [x]"), "Bob [x]");
        assert_eq!(normalize_column_name("[1]"), "");
    }

    #[test]
    fn index_groups_rounds() {
        let index = index_columns(&strings(&["Date", "Jane Doe [1]", "Jane Doe [2]"]));
        assert_eq!(
            index.groups,
            vec![
                ColumnGroup {
                    name: "Date".to_string(),
                    role: ColumnRole::Date,
                    positions: vec![0],
                },
                ColumnGroup {
                    name: "Jane Doe".to_string(),
                    role: ColumnRole::Candidate,
                    positions: vec![1, 2],
                },
            ]
        );
        assert_eq!(index.date_column(), Ok(0));
    }

    #[test]
    fn index_keeps_first_seen_order() {
        let index = index_columns(&strings(&["Zed [1]", "Debate Date", "Amy [1]", "Zed [2]"]));
        let names: Vec<&str> = index.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Debate Date", "Amy"]);
        assert_eq!(index.get("Zed").unwrap().positions, vec![0, 3]);
        assert_eq!(index.get("Debate Date").unwrap().role, ColumnRole::Date);
    }

    #[test]
    fn cell_with_repeated_issues() {
        let mut counts = HashMap::new();
        add_issues(&mut counts, "Healthcare, Economy, Healthcare");
        assert_eq!(counts.get("Healthcare"), Some(&2));
        assert_eq!(counts.get("Economy"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn blank_cells_add_nothing() {
        let mut counts = HashMap::new();
        add_issues(&mut counts, "");
        add_issues(&mut counts, " , ");
        add_issues(&mut counts, ",,");
        assert!(counts.is_empty());
    }

    #[test]
    fn rounds_merge_into_one_candidate() {
        let rows = table(&[
            &["Date", "Jane Doe [1]", "Jane Doe [2]"],
            &["2020-02-07", "Tax", "Tax, Jobs"],
        ]);
        let debates = parse_rows(&rows).unwrap();
        assert_eq!(debates.len(), 1);
        assert_eq!(debates[0].date, "2020-02-07");
        assert_eq!(debates[0].candidates.len(), 1);
        let jane = &debates[0].candidates[0];
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.count("Tax"), 2);
        assert_eq!(jane.count("Jobs"), 1);
        assert_eq!(jane.count("Climate"), 0);
    }

    #[test]
    fn two_date_columns_fail() {
        let rows = table(&[
            &["Date", "Debate Date", "A [1]"],
            &["2020-01-01", "2020-01-02", "Tax"],
        ]);
        assert_eq!(
            parse_rows(&rows),
            Err(SummaryErrors::MultipleDateColumns {
                columns: vec![0, 1]
            })
        );
        // Also when the two columns collapse into the same name.
        let rows = table(&[&["Date [1]", "Date [2]", "A"]]);
        assert!(matches!(
            summarize(&rows),
            Err(SummaryErrors::MultipleDateColumns { .. })
        ));
    }

    #[test]
    fn missing_date_column_fails() {
        let rows = table(&[&["A [1]", "B [1]"], &["Tax", "Jobs"]]);
        assert_eq!(parse_rows(&rows), Err(SummaryErrors::MissingDateColumn));
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(summarize(&[]), Err(SummaryErrors::EmptyInput));
    }

    #[test]
    fn short_row_fails() {
        let rows = table(&[&["Date", "A [1]", "A [2]"], &["2020-01-01", "Tax"]]);
        assert_eq!(
            parse_rows(&rows),
            Err(SummaryErrors::RowTooShort {
                lineno: 2,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn issues_sorted_descending() {
        let rows = table(&[
            &["Date", "A", "B"],
            &["d1", "Economy, Tax", "Jobs"],
            &["d2", "Tax", "Climate, Economy"],
        ]);
        let debates = parse_rows(&rows).unwrap();
        assert_eq!(
            collect_issues(&debates),
            strings(&["Tax", "Jobs", "Economy", "Climate"])
        );
        assert!(collect_issues(&[]).is_empty());
    }

    #[test]
    fn end_to_end_example() {
        let rows = table(&[&["Date", "A [1]", "A [2]"], &["2020-01-01", "Tax, Jobs", "Jobs"]]);
        let summary = summarize(&rows).unwrap();
        assert_eq!(
            summary.rows(),
            table(&[
                &["Date", "Candidate", "Tax", "Jobs"],
                &["2020-01-01", "A", "1", "2"],
                &["", "Total", "1", "2"],
            ])
            .as_slice()
        );
        assert_eq!(summary.issues(), strings(&["Tax", "Jobs"]).as_slice());
    }

    #[test]
    fn no_issues_at_all() {
        let rows = table(&[&["Date", "A"], &["2020-01-01", ""]]);
        let summary = summarize(&rows).unwrap();
        assert_eq!(
            summary.into_rows(),
            table(&[&["Date", "Candidate"], &["2020-01-01", "A"], &["", "Total"]])
        );
    }

    #[test]
    fn no_data_rows() {
        let rows = table(&[&["Date", "A [1]"]]);
        let summary = summarize(&rows).unwrap();
        assert!(summary.data_rows().is_empty());
        assert_eq!(summary.total_row(), strings(&["", "Total"]).as_slice());
    }

    #[test]
    fn total_row_detects_corruption() {
        let rows = table(&[&["Date", "Candidate", "Tax"], &["d1", "A", "one"]]);
        assert_eq!(
            compute_total_row(&rows, 3),
            Err(SummaryErrors::NonNumericCell {
                row: 1,
                column: 2,
                content: "one".to_string()
            })
        );
    }

    #[test]
    fn randomized_tables_are_consistent() {
        let pool = ["Tax", "Jobs", "Climate", "Health", "Guns", "Trade"];
        let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
        for _ in 0..50 {
            let num_candidates = 1 + rng.next(4) as usize;
            let num_rounds = 1 + rng.next(3) as usize;
            let mut header = vec!["Date".to_string()];
            for c in 0..num_candidates {
                for r in 1..=num_rounds {
                    header.push(format!("Cand{} [{}]", c, r));
                }
            }
            let mut rows = vec![header];
            for d in 0..rng.next(6) {
                let mut row = vec![format!("2020-01-{:02}", d + 1)];
                for _ in 0..(num_candidates * num_rounds) {
                    let picks: Vec<&str> = (0..rng.next(4))
                        .map(|_| pool[rng.next(pool.len() as u64) as usize])
                        .collect();
                    row.push(picks.join(", "));
                }
                rows.push(row);
            }

            let summary = summarize(&rows).unwrap();
            let width = summary.header().len();
            let issues = summary.issues();
            assert_eq!(width, 2 + issues.len());
            assert!(issues.windows(2).all(|w| w[0] > w[1]));
            assert_eq!(
                summary.data_rows().len(),
                (rows.len() - 1) * num_candidates
            );
            assert!(summary.rows().iter().all(|r| r.len() == width));
            for col in 2..width {
                let sum: u64 = summary
                    .data_rows()
                    .iter()
                    .map(|r| r[col].parse::<u64>().unwrap())
                    .sum();
                assert_eq!(summary.total_row()[col], sum.to_string());
            }

            // Same input, same output.
            assert_eq!(summarize(&rows).unwrap(), summary);
        }
    }

    #[test]
    fn row_order_does_not_change_columns() {
        let rows = table(&[
            &["Date", "A", "B"],
            &["d1", "Economy", "Tax"],
            &["d2", "Jobs", "Climate"],
        ]);
        let reversed = vec![rows[0].clone(), rows[2].clone(), rows[1].clone()];
        assert_eq!(
            summarize(&rows).unwrap().header(),
            summarize(&reversed).unwrap().header()
        );
    }
}
