//! Human-readable experience durations.
//!
//! The decimal form is deliberately coarse: the digit after the point is
//! `floor(months / 12 * 10)` of the rounded leftover months, not a calendar
//! fraction. Leftover months that round up to 12 therefore render as ".10".

/// Formats a non-negative duration in fractional years.
///
/// - `< 1` year → whole months ("1 month", "6 months")
/// - whole years → "1 year", "3 years"
/// - otherwise → "{years}.{digit} years"
pub fn format_experience(years: f64) -> String {
    let years = years.max(0.0);

    if years < 1.0 {
        let months = (years * 12.0).round() as i64;
        return if months == 1 {
            "1 month".to_string()
        } else {
            format!("{months} months")
        };
    }

    let whole = years.floor();
    let months = ((years - whole) * 12.0).round();
    let whole = whole as i64;

    if months == 0.0 {
        return if whole == 1 {
            "1 year".to_string()
        } else {
            format!("{whole} years")
        };
    }

    let digit = ((months / 12.0) * 10.0).floor() as i64;
    format!("{whole}.{digit} years")
}

/// Star rating used in the Markdown skills line: one star per started year,
/// never fewer than five.
pub fn experience_stars(years: f64) -> String {
    let stars = years.max(0.0).ceil() as usize;
    "*".repeat(stars.max(5))
}
