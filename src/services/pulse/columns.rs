use crate::models::RawSheet;

/// Canonical metric keys expected in the weekly pulse workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    WeekEnding,
    TotalUnits,
    OccupiedUnits,
    VacantRented,
    VacantUnrented,
    MonthlyRent,
    NetMonthlyIncome,
    Delinquency,
    GuestCards,
    Applicants,
    Capex,
    Checking5026,
    BusinessChecking2487,
}

/// Substring rule for one key: every term in `all` must appear in the
/// lowercased header, no term in `none` may.
struct ColumnRule {
    key: MetricKey,
    all: &'static [&'static str],
    none: &'static [&'static str],
}

// Evaluated top to bottom in this exact order; headers are scanned in
// column order and the first match per key wins. An ordered slice, not a
// map: rule sequence is part of the matching contract.
const RULES: &[ColumnRule] = &[
    ColumnRule { key: MetricKey::WeekEnding, all: &["week", "ending"], none: &[] },
    ColumnRule { key: MetricKey::TotalUnits, all: &["total", "unit"], none: &[] },
    ColumnRule { key: MetricKey::OccupiedUnits, all: &["occupied", "unit"], none: &[] },
    ColumnRule { key: MetricKey::VacantRented, all: &["vacant", "rented"], none: &["unrented"] },
    ColumnRule { key: MetricKey::VacantUnrented, all: &["vacant", "unrented"], none: &[] },
    ColumnRule { key: MetricKey::MonthlyRent, all: &["monthly rent"], none: &[] },
    ColumnRule { key: MetricKey::NetMonthlyIncome, all: &["net monthly income"], none: &[] },
    ColumnRule { key: MetricKey::Delinquency, all: &["delinq"], none: &[] },
    ColumnRule { key: MetricKey::GuestCards, all: &["guest card"], none: &[] },
    ColumnRule { key: MetricKey::Applicants, all: &["applicant"], none: &["conversion"] },
    ColumnRule { key: MetricKey::Capex, all: &["capex"], none: &[] },
    ColumnRule { key: MetricKey::Checking5026, all: &["5026"], none: &[] },
    ColumnRule { key: MetricKey::BusinessChecking2487, all: &["2487"], none: &[] },
];

#[derive(Debug, Clone)]
pub struct ResolvedColumn {
    pub name: String,
    pub index: usize,
}

/// Resolved correspondence between canonical keys and actual headers for
/// one load. Keys with no matching header are simply absent.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    entries: Vec<(MetricKey, ResolvedColumn)>,
}

impl ColumnMap {
    pub fn get(&self, key: MetricKey) -> Option<&ResolvedColumn> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, col)| col)
    }

    pub fn index_of(&self, key: MetricKey) -> Option<usize> {
        self.get(key).map(|col| col.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn resolve_columns(sheet: &RawSheet) -> ColumnMap {
    let lowered: Vec<String> = sheet
        .headers
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let mut entries = Vec::new();
    for rule in RULES {
        let matched = lowered.iter().position(|header| {
            rule.all.iter().all(|term| header.contains(term))
                && rule.none.iter().all(|term| !header.contains(term))
        });
        if let Some(index) = matched {
            entries.push((
                rule.key,
                ResolvedColumn {
                    name: sheet.headers[index].clone(),
                    index,
                },
            ));
        }
    }

    tracing::debug!("Resolved {} of {} metric columns", entries.len(), RULES.len());
    ColumnMap { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_headers(headers: &[&str]) -> RawSheet {
        RawSheet {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn resolves_known_headers_and_leaves_rest_absent() {
        let sheet = sheet_with_headers(&["Week Ending", "Total Units", "Occupied Units"]);
        let map = resolve_columns(&sheet);

        assert_eq!(map.get(MetricKey::WeekEnding).unwrap().name, "Week Ending");
        assert_eq!(map.get(MetricKey::TotalUnits).unwrap().name, "Total Units");
        assert_eq!(map.get(MetricKey::OccupiedUnits).unwrap().name, "Occupied Units");
        assert!(map.get(MetricKey::MonthlyRent).is_none());
    }

    #[test]
    fn first_matching_column_wins() {
        let sheet = sheet_with_headers(&["Total Units", "Total Units (budget)"]);
        let map = resolve_columns(&sheet);
        assert_eq!(map.index_of(MetricKey::TotalUnits), Some(0));
    }

    #[test]
    fn vacant_rented_does_not_capture_unrented() {
        let sheet = sheet_with_headers(&["Vacant-Unrented", "Vacant-Rented"]);
        let map = resolve_columns(&sheet);

        assert_eq!(map.get(MetricKey::VacantRented).unwrap().name, "Vacant-Rented");
        assert_eq!(map.get(MetricKey::VacantUnrented).unwrap().name, "Vacant-Unrented");
    }

    #[test]
    fn applicants_skips_conversion_columns() {
        let sheet = sheet_with_headers(&["Applicant Conversion %", "Applicants"]);
        let map = resolve_columns(&sheet);
        assert_eq!(map.get(MetricKey::Applicants).unwrap().name, "Applicants");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let sheet = sheet_with_headers(&["WEEK ENDING", "monthly rent ($)"]);
        let map = resolve_columns(&sheet);
        assert!(map.get(MetricKey::WeekEnding).is_some());
        assert!(map.get(MetricKey::MonthlyRent).is_some());
    }
}
