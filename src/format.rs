//! Display helpers for the command-line front end. Nothing here feeds back
//! into a calculation.

use crate::equivalence::{EquivalenceRow, MassUnit};

/// Two-decimal quantity followed by its unit.
pub fn quantity(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

/// Integer with comma thousands separators.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole dollars, rounded down.
pub fn currency(value: f64) -> String {
    format!("${}", group_thousands(value.floor() as i64))
}

/// Days below a year, years from 365 days on.
pub fn training_duration(days: f64) -> String {
    if days < 365.0 {
        format!("{:.2} days", days)
    } else {
        format!("{:.2} years", days / 365.0)
    }
}

pub fn inference_time(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.2} ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.2} s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.2} min", seconds / 60.0)
    } else {
        format!("{:.2} hr", seconds / 3600.0)
    }
}

pub fn energy_wh(kwh: f64) -> String {
    format!("{:.2} Wh", kwh * 1000.0)
}

/// Four decimals with trailing zeros trimmed: 0.4000 -> "0.4", 10 -> "10".
pub fn per_unit(value: f64) -> String {
    let s = format!("{:.4}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Rounded multiple; gram-scale fractions keep four decimals.
pub fn multiple(row: &EquivalenceRow) -> String {
    if row.unit == MassUnit::GramsCo2e && row.multiple > 0.0 && row.multiple < 1.0 {
        format!("{:.4}", row.multiple)
    } else {
        group_thousands(row.multiple.round() as i64)
    }
}

/// One equivalence line, e.g. `✈️  19 Taipei-Tokyo round-trip flights (0.4 tCO2eq each)`.
pub fn equivalence_line(row: &EquivalenceRow) -> String {
    format!(
        "{}  {} {} ({} {} each)",
        row.icon,
        multiple(row),
        row.label,
        per_unit(row.per_unit_emissions),
        row.unit
    )
}
