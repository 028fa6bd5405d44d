use std::path::Path;

use crate::error::AppError;
use crate::models::MetricsSnapshot;

/// Sheet the computed snapshot is appended to. Replaced on each export.
pub const SNAPSHOT_SHEET: &str = "Weekly Snapshot";

const COLUMNS: &[&str] = &[
    "week_ending",
    "total_units",
    "occupied_units",
    "vacant_rented",
    "vacant_unrented",
    "physical_occupancy",
    "pre_leased",
    "monthly_rent",
    "net_monthly_income",
    "economic_occupancy",
    "delinquency",
    "delinquency_change",
    "guest_cards",
    "applicants",
    "closing_ratio",
    "capex",
    "checking_5026",
    "business_checking_2487",
];

fn field_value(snapshot: &MetricsSnapshot, column: &str) -> f64 {
    match column {
        "total_units" => snapshot.total_units,
        "occupied_units" => snapshot.occupied_units,
        "vacant_rented" => snapshot.vacant_rented,
        "vacant_unrented" => snapshot.vacant_unrented,
        "physical_occupancy" => snapshot.physical_occupancy,
        "pre_leased" => snapshot.pre_leased,
        "monthly_rent" => snapshot.monthly_rent,
        "net_monthly_income" => snapshot.net_monthly_income,
        "economic_occupancy" => snapshot.economic_occupancy,
        "delinquency" => snapshot.delinquency,
        "delinquency_change" => snapshot.delinquency_change,
        "guest_cards" => snapshot.guest_cards,
        "applicants" => snapshot.applicants,
        "closing_ratio" => snapshot.closing_ratio,
        "capex" => snapshot.capex,
        "checking_5026" => snapshot.checking_5026,
        "business_checking_2487" => snapshot.business_checking_2487,
        _ => 0.0,
    }
}

/// Rewrite the workbook with the snapshot appended as its own sheet: one
/// header row, one value row. An existing snapshot sheet is replaced.
/// Explicit side effect, only on caller request.
pub fn write_snapshot(snapshot: &MetricsSnapshot, path: &Path) -> Result<(), AppError> {
    tracing::info!("Exporting snapshot to {} in {}", SNAPSHOT_SHEET, path.display());

    let mut book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| AppError::Export(format!("Failed to open workbook for export: {}", e)))?;

    // Replace a previous export if present
    let _ = book.remove_sheet_by_name(SNAPSHOT_SHEET);

    let sheet = book
        .new_sheet(SNAPSHOT_SHEET)
        .map_err(|e| AppError::Export(format!("Failed to create snapshot sheet: {}", e)))?;

    for (idx, column) in COLUMNS.iter().enumerate() {
        let col = (idx + 1) as u32;
        sheet.get_cell_mut((col, 1)).set_value(column.to_string());
        if *column == "week_ending" {
            sheet
                .get_cell_mut((col, 2))
                .set_value(snapshot.week_ending.to_string());
        } else {
            sheet
                .get_cell_mut((col, 2))
                .set_value_number(field_value(snapshot, column));
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| AppError::Export(format!("Failed to write workbook: {}", e)))?;

    tracing::info!("Snapshot exported to {}", path.display());
    Ok(())
}
