use super::columns::{ColumnMap, MetricKey};
use super::utils::cell_to_f64;
use crate::models::{MetricsSnapshot, WeekRecord};

/// Value of one metric in a record, defaulting to 0 when the column is
/// unresolved or the cell is missing/non-numeric. Unresolved metrics must
/// display as zero, never abort the report.
fn metric(record: &WeekRecord, column_map: &ColumnMap, key: MetricKey) -> f64 {
    column_map
        .index_of(key)
        .and_then(|idx| record.cells.get(idx))
        .map(cell_to_f64)
        .unwrap_or(0.0)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    // Division guards return 0, not NaN. Display-safety policy: a zero
    // denominator renders as 0%, it is not an error.
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Pure computation over the current week and, when present, the previous
/// week (delta fields only).
pub fn compute(
    current: &WeekRecord,
    previous: Option<&WeekRecord>,
    column_map: &ColumnMap,
) -> MetricsSnapshot {
    let total_units = metric(current, column_map, MetricKey::TotalUnits);
    let occupied_units = metric(current, column_map, MetricKey::OccupiedUnits);
    let vacant_rented = metric(current, column_map, MetricKey::VacantRented);
    let vacant_unrented = metric(current, column_map, MetricKey::VacantUnrented);

    let monthly_rent = metric(current, column_map, MetricKey::MonthlyRent);
    let net_monthly_income = metric(current, column_map, MetricKey::NetMonthlyIncome);
    let delinquency = metric(current, column_map, MetricKey::Delinquency);

    let guest_cards = metric(current, column_map, MetricKey::GuestCards);
    let applicants = metric(current, column_map, MetricKey::Applicants);

    let delinquency_change = match previous {
        Some(prev) => delinquency - metric(prev, column_map, MetricKey::Delinquency),
        None => 0.0,
    };

    MetricsSnapshot {
        week_ending: current.week_ending,
        total_units,
        occupied_units,
        vacant_rented,
        vacant_unrented,
        physical_occupancy: ratio(occupied_units, total_units),
        pre_leased: ratio(occupied_units + vacant_rented, total_units),
        monthly_rent,
        net_monthly_income,
        economic_occupancy: ratio(net_monthly_income, monthly_rent),
        delinquency,
        delinquency_change,
        guest_cards,
        applicants,
        closing_ratio: ratio(applicants, guest_cards),
        capex: metric(current, column_map, MetricKey::Capex),
        checking_5026: metric(current, column_map, MetricKey::Checking5026),
        business_checking_2487: metric(current, column_map, MetricKey::BusinessChecking2487),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawSheet;
    use crate::services::pulse::columns::resolve_columns;
    use calamine::Data;
    use chrono::NaiveDate;

    fn fixture(headers: &[&str], current: &[f64], previous: Option<&[f64]>) -> MetricsSnapshot {
        let sheet = RawSheet {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        };
        let map = resolve_columns(&sheet);

        let record = |values: &[f64], day| WeekRecord {
            week_ending: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            cells: values.iter().map(|v| Data::Float(*v)).collect(),
        };
        let current = record(current, 15);
        let previous = previous.map(|v| record(v, 8));
        compute(&current, previous.as_ref(), &map)
    }

    #[test]
    fn physical_occupancy_is_exact_ratio() {
        let snap = fixture(&["Total Units", "Occupied Units"], &[100.0, 95.0], None);
        assert_eq!(snap.physical_occupancy, 95.0);
    }

    #[test]
    fn zero_total_units_yields_zero_occupancy() {
        let snap = fixture(&["Total Units", "Occupied Units"], &[0.0, 95.0], None);
        assert_eq!(snap.physical_occupancy, 0.0);
        assert_eq!(snap.pre_leased, 0.0);
    }

    #[test]
    fn pre_leased_counts_vacant_rented_units() {
        let snap = fixture(
            &["Total Units", "Occupied Units", "Vacant-Rented"],
            &[100.0, 80.0, 10.0],
            None,
        );
        assert_eq!(snap.pre_leased, 90.0);
    }

    #[test]
    fn closing_ratio_guards_zero_guest_cards() {
        let snap = fixture(&["Guest Cards", "Applicants"], &[0.0, 5.0], None);
        assert_eq!(snap.closing_ratio, 0.0);
    }

    #[test]
    fn economic_occupancy_from_income_and_rent() {
        let snap = fixture(
            &["Monthly Rent", "Net monthly income"],
            &[120_000.0, 90_000.0],
            None,
        );
        assert_eq!(snap.economic_occupancy, 75.0);
    }

    #[test]
    fn delinquency_change_against_previous_week() {
        let snap = fixture(&["Delinquency"], &[4_500.0], Some(&[3_000.0]));
        assert_eq!(snap.delinquency_change, 1_500.0);
    }

    #[test]
    fn delinquency_change_is_zero_without_previous() {
        let snap = fixture(&["Delinquency"], &[4_500.0], None);
        assert_eq!(snap.delinquency_change, 0.0);
    }

    #[test]
    fn unresolved_metrics_default_to_zero() {
        let snap = fixture(&["Total Units"], &[100.0], None);
        assert_eq!(snap.monthly_rent, 0.0);
        assert_eq!(snap.economic_occupancy, 0.0);
        assert_eq!(snap.capex, 0.0);
    }
}
