use chrono::NaiveDate;

/// Format a whole-dollar amount with thousands separators, e.g. `$1,350`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a date for the form inputs, e.g. `Sep 04, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Format an optional date, returning a placeholder when unset.
pub fn format_date_or(date: Option<NaiveDate>, placeholder: &str) -> String {
    date.map(format_date).unwrap_or_else(|| placeholder.to_string())
}

/// Truncate a string to a maximum number of chars, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(95), "$95");
        assert_eq!(format_currency(600), "$600");
        assert_eq!(format_currency(1350), "$1,350");
        assert_eq!(format_currency(1234567), "$1,234,567");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 4).unwrap();
        assert_eq!(format_date(date), "Sep 04, 2026");
        assert_eq!(format_date_or(None, "Check-In Date"), "Check-In Date");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        // Multibyte names are measured in chars, not bytes
        assert_eq!(truncate_string("Café Véranda", 12), "Café Véranda");
        assert_eq!(truncate_string("Suite Méditerranée", 10), "Suite M...");
    }
}
