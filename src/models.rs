use calamine::Data;
use chrono::NaiveDate;
use serde::Serialize;

/// One worksheet as loaded: header names plus the data rows below the
/// header offset. Column names are free text and may differ between
/// workbook versions.
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

/// A single reporting-period row, tagged with its parsed week-ending date.
#[derive(Debug, Clone)]
pub struct WeekRecord {
    pub week_ending: NaiveDate,
    pub cells: Vec<Data>,
}

/// Flat record of raw and derived fields for one reporting period.
/// Created fresh on each extraction; immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub week_ending: NaiveDate,
    pub total_units: f64,
    pub occupied_units: f64,
    pub vacant_rented: f64,
    pub vacant_unrented: f64,
    pub physical_occupancy: f64,
    pub pre_leased: f64,
    pub monthly_rent: f64,
    pub net_monthly_income: f64,
    pub economic_occupancy: f64,
    pub delinquency: f64,
    pub delinquency_change: f64,
    pub guest_cards: f64,
    pub applicants: f64,
    pub closing_ratio: f64,
    pub capex: f64,
    pub checking_5026: f64,
    pub business_checking_2487: f64,
}
