// Primitives for reading and writing CSV files.

use std::io::Read;

use crate::tally::*;

/// Reads all the records of a CSV file, the header included.
///
/// All the records must have the same number of cells.
pub fn read_csv_rows(path: &str) -> BTallyResult<Vec<Vec<String>>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    Ok(read_records(rdr, path)?)
}

fn read_records<R: Read>(rdr: csv::Reader<R>, path: &str) -> TallyResult<Vec<Vec<String>>> {
    let mut res: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        debug!("read_records: lineno: {:?} row: {:?}", lineno, line);
        res.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(res)
}

/// Formats the rows as CSV, with `\n` line endings and quotes only where needed.
pub fn render_csv(rows: &[Vec<String>]) -> BTallyResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows.iter() {
        wtr.write_record(row).context(CsvWriteSnafu {})?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context(CsvFlushSnafu {})?;
    let res = String::from_utf8(bytes).context(CsvEncodingSnafu {})?;
    Ok(res)
}
