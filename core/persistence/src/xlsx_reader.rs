//! FILENAME: core/persistence/src/xlsx_reader.rs
//! PURPOSE: Load one worksheet as a Dataset (first row = header).

use calamine::{open_workbook, Data, Reader, Xlsx};
use matrix_engine::{log_info, Dataset};
use std::path::Path;

use crate::{PersistenceError, CAT_PERSIST};

/// Text form of a cell. Whole floats print without a fraction so that
/// `4070.0` compares equal to a typed-in `4070`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("{:?}", e),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Reads `sheet` (or the first sheet) into a Dataset.
pub fn load_dataset_xlsx(path: &Path, sheet: Option<&str>) -> Result<Dataset, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| PersistenceError::InvalidFormat(format!("sheet '{}' not found", name)))?,
        None => sheet_names.first().cloned().ok_or_else(|| {
            PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
        })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows.next().ok_or_else(|| {
        PersistenceError::InvalidFormat(format!("sheet '{}' is empty", sheet_name))
    })?;
    let body: Vec<Vec<String>> = rows
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    let dataset = Dataset::new(header, body)?;
    log_info!(
        CAT_PERSIST,
        "loaded sheet '{}' from {:?}: {} rows",
        sheet_name,
        path,
        dataset.row_count()
    );
    Ok(dataset)
}
