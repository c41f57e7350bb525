//! Id-parameterized attribute names.
//!
//! Attributes such as `TITLE3` (one id) or `CELL2:5` (two ids) address a
//! positional sub-element of an object. A name made only of ids (`3`,
//! `2:5`) addresses the element value itself and maps to [`IDVALUE`].

/// Base name used when the attribute name is only an id.
pub const IDVALUE: &str = "IDVALUE";

/// An attribute name split into its base and numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdName<'a> {
    /// `BASE<id>`
    One(&'a str, i32),
    /// `BASE<lin>:<col>`
    Two(&'a str, i32, i32),
}

impl<'a> IdName<'a> {
    pub fn base(&self) -> &'a str {
        match *self {
            IdName::One(b, _) | IdName::Two(b, _, _) => b,
        }
    }
}

/// Split the trailing digits off `s`, returning `(prefix, digits)`.
fn split_trailing_digits(s: &str) -> (&str, &str) {
    let idx = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}

/// Parse an id-parameterized name.
///
/// Returns `None` for plain names. A leading `-` on the final id is not
/// recognised, so negative ids must be passed through the explicit `*_id`
/// accessors instead.
pub fn parse_id_name(name: &str) -> Option<IdName<'_>> {
    if let Some((left, col)) = name.rsplit_once(':') {
        if col.is_empty() || !col.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let (base, lin) = split_trailing_digits(left);
        if lin.is_empty() || base.contains(':') {
            return None;
        }
        let base = if base.is_empty() { IDVALUE } else { base };
        return Some(IdName::Two(base, lin.parse().ok()?, col.parse().ok()?));
    }

    let (base, id) = split_trailing_digits(name);
    if id.is_empty() {
        return None;
    }
    let base = if base.is_empty() { IDVALUE } else { base };
    Some(IdName::One(base, id.parse().ok()?))
}

/// Compose `BASE<id>`.
pub fn id_name(base: &str, id: i32) -> String {
    if base == IDVALUE {
        id.to_string()
    } else {
        format!("{base}{id}")
    }
}

/// Compose `BASE<lin>:<col>`.
pub fn id2_name(base: &str, lin: i32, col: i32) -> String {
    if base == IDVALUE {
        format!("{lin}:{col}")
    } else {
        format!("{base}{lin}:{col}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_not_ids() {
        assert_eq!(parse_id_name("TITLE"), None);
        assert_eq!(parse_id_name(""), None);
        assert_eq!(parse_id_name("A:B"), None);
    }

    #[test]
    fn single_id() {
        assert_eq!(parse_id_name("TITLE3"), Some(IdName::One("TITLE", 3)));
        assert_eq!(parse_id_name("COLOR12"), Some(IdName::One("COLOR", 12)));
    }

    #[test]
    fn bare_id_maps_to_idvalue() {
        assert_eq!(parse_id_name("7"), Some(IdName::One(IDVALUE, 7)));
        assert_eq!(parse_id_name("2:3"), Some(IdName::Two(IDVALUE, 2, 3)));
    }

    #[test]
    fn double_id() {
        assert_eq!(parse_id_name("CELL2:5"), Some(IdName::Two("CELL", 2, 5)));
        assert_eq!(parse_id_name("CELL:5"), None);
        assert_eq!(parse_id_name("CELL2:"), None);
    }

    #[test]
    fn compose() {
        assert_eq!(id_name("TITLE", 3), "TITLE3");
        assert_eq!(id_name(IDVALUE, 3), "3");
        assert_eq!(id2_name("CELL", 1, 2), "CELL1:2");
        assert_eq!(id2_name(IDVALUE, 1, 2), "1:2");
    }

    #[test]
    fn base_accessor() {
        assert_eq!(IdName::One("A", 1).base(), "A");
        assert_eq!(IdName::Two("B", 1, 2).base(), "B");
    }
}
