use chrono::NaiveDate;

/// Formats `value` with thousands separators and at most two decimals,
/// dropping trailing zeros: `1500.5` → `₹1,500.5`.
pub fn format_amount(value: f64, symbol: &str) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{symbol}{grouped}")
    } else {
        format!("{sign}{symbol}{grouped}.{fraction}")
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}
