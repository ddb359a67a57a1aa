//! Number and name formatting shared by summaries and charts.

/// Formats an integer with `,` thousands separators.
pub fn format_thousands(value: i64) -> String {
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

/// Formats a count reading, truncating any fractional part.
#[allow(clippy::cast_possible_truncation)]
pub fn format_count(value: f64) -> String {
    format_thousands(value.trunc() as i64)
}

/// Formats a ratio already expressed in percent with two decimals.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Cases per million inhabitants, truncated towards zero.
///
/// Returns `None` for a missing or non-positive population.
#[allow(clippy::cast_possible_truncation)]
pub fn per_million(value: f64, population: Option<f64>) -> Option<i64> {
    let population = population.filter(|p| *p > 0.0)?;
    Some((value / (population / 1_000_000.0)).trunc() as i64)
}

/// Share of `population` covered by `value`, in percent, capped at 100.
pub fn percent_of(value: f64, population: f64) -> Option<f64> {
    (population > 0.0).then(|| (100.0 * value / population).min(100.0))
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Lookup key for an entity name: trimmed, lower-case, spaces as `_`.
pub fn entity_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-45_000), "-45,000");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_count_truncates() {
        assert_eq!(format_count(2469.9), "2,469");
        assert_eq!(format_count(-12.7), "-12");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.345_67), "12.35%");
        assert_eq!(format_percent(100.0), "100.00%");
    }

    #[test]
    fn test_per_million() {
        assert_eq!(per_million(123_456.0, Some(50_000_000.0)), Some(2469));
        assert_eq!(per_million(123_456.0, None), None);
        assert_eq!(per_million(123_456.0, Some(0.0)), None);
    }

    #[test]
    fn test_percent_of_is_capped() {
        assert_eq!(percent_of(50.0, 200.0), Some(25.0));
        assert_eq!(percent_of(300.0, 200.0), Some(100.0));
        assert_eq!(percent_of(1.0, 0.0), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("prince edward island"), "Prince Edward Island");
        assert_eq!(title_case("NEW BRUNSWICK"), "New Brunswick");
        assert_eq!(title_case("guinea-bissau"), "Guinea-Bissau");
    }

    #[test]
    fn test_entity_key() {
        assert_eq!(entity_key(" South Korea "), "south_korea");
        assert_eq!(entity_key("canada"), "canada");
    }
}
