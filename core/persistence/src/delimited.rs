//! FILENAME: core/persistence/src/delimited.rs
//! PURPOSE: Delimited text (CSV and friends) to and from a Dataset.
//! CONTEXT: The caller picks the delimiter; no sniffing happens here. Fields
//! may be wrapped in double quotes, with `""` standing for a literal quote,
//! and quoted fields may span lines. The first record is the header.

use std::fs;
use std::io::Write;
use std::path::Path;

use matrix_engine::{log_info, Dataset};

use crate::{PersistenceError, CAT_PERSIST};

const QUOTE: char = '"';

/// Splits `text` into records of fields.
fn parse_records(text: &str, delimiter: char) -> Result<Vec<Vec<String>>, PersistenceError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut record_quoted = false;
    let mut line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                if c == '\n' {
                    line += 1;
                }
                field.push(c);
            }
            continue;
        }

        match c {
            QUOTE if field.is_empty() => {
                in_quotes = true;
                record_quoted = true;
            }
            c if c == delimiter => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record), record_quoted);
                record_quoted = false;
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(PersistenceError::InvalidFormat(format!(
            "unterminated quoted field at line {}",
            line
        )));
    }
    if !field.is_empty() || !record.is_empty() || record_quoted {
        record.push(field);
        push_record(&mut records, record, record_quoted);
    }

    Ok(records)
}

/// Blank lines are not records; a lone `""` is a record with one empty field.
fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>, quoted: bool) {
    let blank = !quoted && record.len() == 1 && record[0].is_empty();
    if !blank {
        records.push(record);
    }
}

/// Parses delimited text whose first record is the header.
pub fn read_delimited(text: &str, delimiter: char) -> Result<Dataset, PersistenceError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = parse_records(text, delimiter)?.into_iter();
    let header = records
        .next()
        .ok_or_else(|| PersistenceError::InvalidFormat("no header row".to_string()))?;

    let dataset = Dataset::new(header, records.collect())?;
    log_info!(
        CAT_PERSIST,
        "read {} rows x {} columns",
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

pub fn read_delimited_file(path: &Path, delimiter: char) -> Result<Dataset, PersistenceError> {
    read_delimited(&fs::read_to_string(path)?, delimiter)
}

fn needs_quotes(field: &str, delimiter: char) -> bool {
    field.contains(delimiter) || field.contains(QUOTE) || field.contains('\n') || field.contains('\r')
}

fn write_record<W: Write>(
    writer: &mut W,
    fields: &[String],
    delimiter: char,
) -> Result<(), PersistenceError> {
    // A bare empty line would read back as a blank line.
    if let [only] = fields {
        if only.is_empty() {
            writeln!(writer, "\"\"")?;
            return Ok(());
        }
    }
    let line = fields
        .iter()
        .map(|field| {
            if needs_quotes(field, delimiter) {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(&delimiter.to_string());
    writeln!(writer, "{}", line)?;
    Ok(())
}

/// Writes the header then every row, one record per line.
pub fn write_delimited<W: Write>(
    dataset: &Dataset,
    writer: &mut W,
    delimiter: char,
) -> Result<(), PersistenceError> {
    write_record(writer, dataset.columns(), delimiter)?;
    for row in dataset.rows() {
        write_record(writer, row, delimiter)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_delimited_file(dataset: &Dataset, path: &Path, delimiter: char) -> Result<(), PersistenceError> {
    let mut file = std::io::BufWriter::new(fs::File::create(path)?);
    write_delimited(dataset, &mut file, delimiter)?;
    log_info!(CAT_PERSIST, "wrote {} rows to {:?}", dataset.row_count(), path);
    Ok(())
}
