//! Utility functions for rendering rating values.

/// Decimals used as soon as one of the ratings is fractional.
const MIN_PRECISION: usize = 2;
/// Past this many decimals, the digits are floating point noise.
const MAX_PRECISION: usize = 6;

/// Returns true when every digit of a formatted number is zero.
fn is_zero(formatted: &str) -> bool {
    formatted.chars().all(|c| c == '0' || c == '.')
}

/// Returns true when `precision` decimals make a real change invisible.
fn hides_change(old_rating: f64, new_rating: f64, precision: usize) -> bool {
    old_rating != new_rating
        && (format_rating(old_rating, precision) == format_rating(new_rating, precision)
            || is_zero(&format!("{:.*}", precision, (new_rating - old_rating).abs())))
}

/// Number of decimals used to render a rating change.
///
/// Integral ratings use none. Otherwise two decimals are used, and more when
/// two decimals would hide that the rating moved, e.g. `1029.999 → 1030.0001`.
///
/// # Examples
///
/// ```no_run
/// assert_eq!(rating_precision(1000.0, 1016.0), 0);
/// assert_eq!(rating_precision(1000.0, 970.5), 2);
/// assert_eq!(rating_precision(1029.999, 1030.0001), 3);
/// ```
pub fn rating_precision(old_rating: f64, new_rating: f64) -> usize {
    if old_rating.fract() == 0.0 && new_rating.fract() == 0.0 {
        return 0;
    }

    let mut precision = MIN_PRECISION;
    while precision < MAX_PRECISION && hides_change(old_rating, new_rating, precision) {
        precision += 1;
    }
    precision
}

/// Formats a rating with a fixed number of decimals.
pub fn format_rating(rating: f64, precision: usize) -> String {
    format!("{:.*}", precision, rating)
}

/// Formats a rating change with an explicit sign.
///
/// A rating that did not move is rendered as `+0`.
pub fn format_rating_change(delta: f64, precision: usize) -> String {
    if delta >= 0.0 {
        format!("+{}", format_rating(delta, precision))
    } else {
        format!("-{}", format_rating(-delta, precision))
    }
}
