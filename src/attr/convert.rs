//! Conversions between attribute strings and typed values.
//!
//! Attribute values cross the public boundary as strings. These helpers parse
//! them into typed values and format typed values back, so handlers never
//! hand-roll the wire format.

/// Parse a signed integer, ignoring surrounding whitespace.
pub fn str_to_int(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

/// Parse a floating point number, ignoring surrounding whitespace.
pub fn str_to_float(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

/// Boolean attribute convention: `YES`, `ON`, `TRUE` or `1` (any case) are
/// true; anything else is false.
pub fn str_to_bool(s: &str) -> bool {
    let s = s.trim();
    s.eq_ignore_ascii_case("YES")
        || s.eq_ignore_ascii_case("ON")
        || s.eq_ignore_ascii_case("TRUE")
        || s == "1"
}

pub fn bool_to_str(b: bool) -> &'static str {
    if b {
        "YES"
    } else {
        "NO"
    }
}

/// Parse a color: `"R G B"` (space, comma or semicolon separated, each
/// 0..=255) or `"#RRGGBB"`.
pub fn str_to_rgb(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some((channel(0)?, channel(2)?, channel(4)?));
    }

    let mut parts = s
        .split(|c: char| c == ' ' || c == ',' || c == ';')
        .filter(|p| !p.is_empty());
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b))
}

pub fn rgb_to_str(r: u8, g: u8, b: u8) -> String {
    format!("{r} {g} {b}")
}

/// Parse a pair such as `"100x200"` with the given separator.
///
/// Either side may be empty (`"x200"`, `"100x"`), giving `None` for that
/// side. A string without the separator parses as the first value only.
pub fn str_to_int_int(s: &str, sep: char) -> (Option<i32>, Option<i32>) {
    let s = s.trim();
    match s.split_once(|c: char| c.eq_ignore_ascii_case(&sep)) {
        Some((a, b)) => (str_to_int(a), str_to_int(b)),
        None => (str_to_int(s), None),
    }
}

pub fn int_int_to_str(a: i32, b: i32, sep: char) -> String {
    format!("{a}{sep}{b}")
}

/// Case-insensitive equality used for enumerated attribute values.
pub fn str_eq_no_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints() {
        assert_eq!(str_to_int(" 42 "), Some(42));
        assert_eq!(str_to_int("-7"), Some(-7));
        assert_eq!(str_to_int("4x"), None);
    }

    #[test]
    fn floats() {
        assert_eq!(str_to_float("0.5"), Some(0.5));
        assert_eq!(str_to_float("abc"), None);
    }

    #[test]
    fn booleans() {
        assert!(str_to_bool("YES"));
        assert!(str_to_bool("yes"));
        assert!(str_to_bool("On"));
        assert!(str_to_bool("1"));
        assert!(!str_to_bool("NO"));
        assert!(!str_to_bool(""));
        assert_eq!(bool_to_str(true), "YES");
    }

    #[test]
    fn rgb_triplets() {
        assert_eq!(str_to_rgb("255 0 0"), Some((255, 0, 0)));
        assert_eq!(str_to_rgb("1,2,3"), Some((1, 2, 3)));
        assert_eq!(str_to_rgb("1;2;3"), Some((1, 2, 3)));
        assert_eq!(str_to_rgb("#10ff00"), Some((16, 255, 0)));
    }

    #[test]
    fn rgb_rejects_garbage() {
        assert_eq!(str_to_rgb("256 0 0"), None);
        assert_eq!(str_to_rgb("1 2"), None);
        assert_eq!(str_to_rgb("1 2 3 4"), None);
        assert_eq!(str_to_rgb("#12"), None);
        assert_eq!(str_to_rgb("red"), None);
    }

    #[test]
    fn rgb_format() {
        assert_eq!(rgb_to_str(1, 2, 3), "1 2 3");
    }

    #[test]
    fn int_pairs() {
        assert_eq!(str_to_int_int("100x200", 'x'), (Some(100), Some(200)));
        assert_eq!(str_to_int_int("100X200", 'x'), (Some(100), Some(200)));
        assert_eq!(str_to_int_int("x200", 'x'), (None, Some(200)));
        assert_eq!(str_to_int_int("100x", 'x'), (Some(100), None));
        assert_eq!(str_to_int_int("100", 'x'), (Some(100), None));
        assert_eq!(str_to_int_int("3,4", ','), (Some(3), Some(4)));
        assert_eq!(int_int_to_str(3, 4, ','), "3,4");
    }

    #[test]
    fn no_case_compare() {
        assert!(str_eq_no_case("Center", "CENTER"));
        assert!(!str_eq_no_case("LEFT", "RIGHT"));
    }
}
