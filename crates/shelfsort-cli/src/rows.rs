//! Row input and result output

use anyhow::Context;
use clap::ValueEnum;
use shelfsort_classifiers::{InputRow, RowResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// How input rows are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One response per line, identified by line number
    Lines,
    /// One JSON object per line: {"id": "...", "response": "..."}
    Jsonl,
}

/// Read every row from `reader`
pub fn read_rows(reader: impl BufRead, format: InputFormat) -> anyhow::Result<Vec<InputRow>> {
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("reading input")?;
        let line_no = idx + 1;

        match format {
            InputFormat::Lines => rows.push(InputRow::new(line_no.to_string(), line)),
            InputFormat::Jsonl => {
                if line.trim().is_empty() {
                    continue;
                }
                let mut row: InputRow = serde_json::from_str(&line)
                    .with_context(|| format!("invalid JSON on line {}", line_no))?;
                if row.id.is_none() {
                    row.id = Some(line_no.to_string());
                }
                rows.push(row);
            }
        }
    }

    Ok(rows)
}

/// Read rows from `path`, or stdin when no path is given
pub fn read_rows_from(path: Option<&Path>, format: InputFormat) -> anyhow::Result<Vec<InputRow>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_rows(BufReader::new(file), format)
        }
        None => read_rows(io::stdin().lock(), format),
    }
}

/// Write results to `path`, or stdout when no path is given
pub fn write_results_to(path: Option<&Path>, rows: &[RowResult]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_results(BufWriter::new(file), rows)
        }
        None => write_results(BufWriter::new(io::stdout().lock()), rows),
    }
}

/// Write one JSON object per row
pub fn write_results(mut writer: impl Write, rows: &[RowResult]) -> anyhow::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
