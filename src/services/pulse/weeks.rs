use super::columns::{ColumnMap, MetricKey};
use super::utils::cell_to_date;
use crate::error::AppError;
use crate::models::{RawSheet, WeekRecord};

/// Pick the current and previous reporting periods. Rows whose week-ending
/// cell is missing or undatable are dropped before ranking; the remaining
/// rows are ordered by date, so original row order never matters.
pub fn select_weeks(
    sheet: &RawSheet,
    column_map: &ColumnMap,
) -> Result<(WeekRecord, Option<WeekRecord>), AppError> {
    let week_col = column_map.index_of(MetricKey::WeekEnding).ok_or_else(|| {
        AppError::NoValidWeeks(format!(
            "No week-ending column found. Available columns: {:?}",
            sheet.headers
        ))
    })?;

    let mut records: Vec<WeekRecord> = sheet
        .rows
        .iter()
        .filter_map(|row| {
            let date = row.get(week_col).and_then(cell_to_date)?;
            Some(WeekRecord {
                week_ending: date,
                cells: row.clone(),
            })
        })
        .collect();

    records.sort_by_key(|r| r.week_ending);

    let Some(current) = records.pop() else {
        return Err(AppError::NoValidWeeks(
            "No rows with a parseable week-ending date".to_string(),
        ));
    };
    let previous = records.pop();

    tracing::info!(
        "Current week: {}, previous week: {}",
        current.week_ending,
        previous
            .as_ref()
            .map(|p| p.week_ending.to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    Ok((current, previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pulse::columns::resolve_columns;
    use calamine::Data;
    use chrono::NaiveDate;

    fn sheet(rows: Vec<Vec<Data>>) -> RawSheet {
        RawSheet {
            headers: vec!["Week Ending".to_string(), "Total Units".to_string()],
            rows,
        }
    }

    fn date_row(date: &str, units: f64) -> Vec<Data> {
        vec![Data::String(date.to_string()), Data::Float(units)]
    }

    #[test]
    fn ranks_by_date_regardless_of_row_order() {
        let sheet = sheet(vec![
            date_row("2024-01-15", 100.0),
            date_row("2024-01-01", 100.0),
            date_row("2024-01-08", 100.0),
        ]);
        let map = resolve_columns(&sheet);
        let (current, previous) = select_weeks(&sheet, &map).unwrap();

        assert_eq!(current.week_ending, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(
            previous.unwrap().week_ending,
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
    }

    #[test]
    fn single_valid_row_has_no_previous() {
        let sheet = sheet(vec![date_row("2024-01-15", 100.0)]);
        let map = resolve_columns(&sheet);
        let (current, previous) = select_weeks(&sheet, &map).unwrap();

        assert_eq!(current.week_ending, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert!(previous.is_none());
    }

    #[test]
    fn undatable_rows_are_dropped() {
        let sheet = sheet(vec![
            vec![Data::String("totals".to_string()), Data::Float(0.0)],
            date_row("2024-01-08", 100.0),
            vec![Data::Empty, Data::Float(0.0)],
        ]);
        let map = resolve_columns(&sheet);
        let (current, previous) = select_weeks(&sheet, &map).unwrap();

        assert_eq!(current.week_ending, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert!(previous.is_none());
    }

    #[test]
    fn all_rows_undatable_is_an_error() {
        let sheet = sheet(vec![vec![Data::Empty, Data::Float(1.0)]]);
        let map = resolve_columns(&sheet);
        assert!(matches!(
            select_weeks(&sheet, &map),
            Err(AppError::NoValidWeeks(_))
        ));
    }

    #[test]
    fn missing_week_column_is_an_error() {
        let sheet = RawSheet {
            headers: vec!["Total Units".to_string()],
            rows: vec![vec![Data::Float(100.0)]],
        };
        let map = resolve_columns(&sheet);
        assert!(matches!(
            select_weeks(&sheet, &map),
            Err(AppError::NoValidWeeks(_))
        ));
    }
}
