use crate::models::MetricsSnapshot;

/// Dollar amount with thousands separators, two decimals.
fn money(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-${}.{}", grouped, frac_part)
    } else {
        format!("${}.{}", grouped, frac_part)
    }
}

fn signed_money(value: f64) -> String {
    if value < 0.0 {
        money(value)
    } else {
        format!("+{}", money(value))
    }
}

/// Plain-text report for the CLI consumer. Sections mirror the weekly
/// pulse layout; the delinquency-change line only appears when nonzero.
pub fn render(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    let sub = "-".repeat(30);

    out.push_str(&rule);
    out.push_str("\nCOSGROVE PULSE - WEEKLY REPORT\n");
    out.push_str(&rule);
    out.push_str(&format!("\n\nWeek ending: {}\n", snapshot.week_ending));

    out.push_str("\nOCCUPANCY\n");
    out.push_str(&sub);
    out.push_str(&format!("\nTotal Units: {}\n", snapshot.total_units));
    out.push_str(&format!("Occupied Units: {}\n", snapshot.occupied_units));
    out.push_str(&format!("Vacant-Rented: {}\n", snapshot.vacant_rented));
    out.push_str(&format!("Vacant-Unrented: {}\n", snapshot.vacant_unrented));
    out.push_str(&format!(
        "Physical Occupancy: {:.1}%\n",
        snapshot.physical_occupancy
    ));
    out.push_str(&format!("Pre-Leased: {:.1}%\n", snapshot.pre_leased));

    out.push_str("\nFINANCIAL\n");
    out.push_str(&sub);
    out.push_str(&format!("\nMonthly Rent: {}\n", money(snapshot.monthly_rent)));
    out.push_str(&format!(
        "Net Monthly Income: {}\n",
        money(snapshot.net_monthly_income)
    ));
    out.push_str(&format!(
        "Economic Occupancy: {:.1}%\n",
        snapshot.economic_occupancy
    ));
    out.push_str(&format!("Delinquency: {}\n", money(snapshot.delinquency)));
    if snapshot.delinquency_change != 0.0 {
        out.push_str(&format!(
            "Delinquency Change: {}\n",
            signed_money(snapshot.delinquency_change)
        ));
    }

    out.push_str("\nLEASING\n");
    out.push_str(&sub);
    out.push_str(&format!("\nGuest Cards: {}\n", snapshot.guest_cards));
    out.push_str(&format!("Applicants: {}\n", snapshot.applicants));
    out.push_str(&format!("Closing Ratio: {:.1}%\n", snapshot.closing_ratio));

    out.push_str("\nACCOUNT BALANCES\n");
    out.push_str(&sub);
    out.push_str(&format!("\nCAPEX: {}\n", money(snapshot.capex)));
    out.push_str(&format!("Checking 5026: {}\n", money(snapshot.checking_5026)));
    out.push_str(&format!(
        "Business Checking 2487: {}\n",
        money(snapshot.business_checking_2487)
    ));

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out
}
