//! Number formatting for report and shell output.

/// Group an unsigned digit string with thousands separators.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "$1,234,567.89" style price rendering.
pub fn price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_digits(&(cents / 100).to_string());
    let sign = if negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, whole, cents % 100)
}

/// "1,020" style count rendering.
pub fn count(value: i64) -> String {
    let negative = value < 0;
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
