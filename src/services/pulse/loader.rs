use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

use crate::error::AppError;
use crate::models::RawSheet;

/// Load the first worksheet of an xlsx workbook. The header row sits at a
/// fixed offset below the top of the sheet; rows above it are banner rows
/// and are discarded.
pub fn load(path: &Path, header_row: usize) -> Result<RawSheet, AppError> {
    tracing::info!("Loading workbook {}", path.display());

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        tracing::error!("Failed to open workbook {}: {}", path.display(), e);
        AppError::Load(format!("Failed to open workbook {}: {}", path.display(), e))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| AppError::Load("No sheets found in workbook".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| AppError::Load(format!("Failed to read worksheet {}: {}", sheet_name, e)))?;

    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();

    let headers: Vec<String> = rows
        .get(header_row)
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .ok_or_else(|| {
            AppError::Load(format!(
                "Worksheet {} has no header row at offset {}",
                sheet_name, header_row
            ))
        })?;

    let data_rows: Vec<Vec<Data>> = rows.into_iter().skip(header_row + 1).collect();

    tracing::info!(
        "Loaded sheet {}: {} columns, {} data rows",
        sheet_name,
        headers.len(),
        data_rows.len()
    );

    Ok(RawSheet {
        headers,
        rows: data_rows,
    })
}
