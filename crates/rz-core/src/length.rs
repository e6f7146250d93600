//! CSS length parsing for preset dimensions.
//!
//! Preset styles carry lengths like `"768px"`. Only the leading integer is
//! meaningful: whitespace and an optional sign are accepted, any unit or
//! fractional tail is ignored (`" 360.5px"` → 360).

use winnow::ascii::{digit1, space0};
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::one_of;

/// Parse the leading integer of a CSS length. Returns `None` when the
/// value has no leading digits or doesn't fit in an `i64`.
pub fn parse_leading_integer(value: &str) -> Option<i64> {
    let mut rest = value;
    leading_integer.parse_next(&mut rest).ok()
}

/// Parse a preset dimension: the leading integer, which must be positive.
pub fn parse_dimension(value: &str) -> Option<u32> {
    parse_leading_integer(value)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
}

fn leading_integer(input: &mut &str) -> ModalResult<i64> {
    let sign = preceded(space0, opt(one_of(['+', '-']))).parse_next(input)?;
    let magnitude = digit1
        .try_map(|digits: &str| digits.parse::<i64>())
        .parse_next(input)?;
    Ok(if sign == Some('-') {
        -magnitude
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_suffix_is_ignored() {
        assert_eq!(parse_leading_integer("768px"), Some(768));
        assert_eq!(parse_dimension("1920px"), Some(1920));
    }

    #[test]
    fn bare_number_and_whitespace() {
        assert_eq!(parse_leading_integer("  360"), Some(360));
        assert_eq!(parse_leading_integer("+42em"), Some(42));
        assert_eq!(parse_leading_integer("\t -7px"), Some(-7));
        assert_eq!(parse_leading_integer("   "), None);
    }

    #[test]
    fn fraction_is_truncated() {
        assert_eq!(parse_leading_integer("360.9px"), Some(360));
    }

    #[test]
    fn negative_parses_but_is_not_a_dimension() {
        assert_eq!(parse_leading_integer("-10px"), Some(-10));
        assert_eq!(parse_dimension("-10px"), None);
        assert_eq!(parse_dimension("0px"), None);
    }

    #[test]
    fn no_digits() {
        assert_eq!(parse_leading_integer("auto"), None);
        assert_eq!(parse_leading_integer(""), None);
        assert_eq!(parse_leading_integer("px100"), None);
    }
}
