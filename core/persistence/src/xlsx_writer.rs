//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, CAT_PERSIST};
use matrix_engine::{log_info, Dataset};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use std::path::Path;

/// Worksheet name used for exported datasets.
pub const EXPORT_SHEET_NAME: &str = "Configurations";

fn column_index(col: usize) -> Result<u16, PersistenceError> {
    u16::try_from(col)
        .map_err(|_| PersistenceError::InvalidFormat(format!("column {} exceeds XLSX limits", col)))
}

fn row_index(row: usize) -> Result<u32, PersistenceError> {
    u32::try_from(row)
        .map_err(|_| PersistenceError::InvalidFormat(format!("row {} exceeds XLSX limits", row)))
}

/// Writes the dataset to one worksheet with a bold header row.
pub fn save_dataset_xlsx(dataset: &Dataset, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, name) in dataset.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, name, &header_format)?;
    }

    for (r, row) in dataset.rows().iter().enumerate() {
        let xlsx_row = row_index(r + 1)?;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet.write_string(xlsx_row, column_index(col)?, value)?;
        }
    }

    xlsx.save(path)?;
    log_info!(CAT_PERSIST, "saved {} rows to {:?}", dataset.row_count(), path);
    Ok(())
}
