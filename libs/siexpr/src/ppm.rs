//! The `EXPR±Xppm` tolerance extension.
//!
//! `value+Xppm` and `value-Xppm` annotate a measurement tolerance and are
//! rewritten into `(value) * (1 ± (X / 1M))` before going through the normal
//! pipeline. The tolerance may only be attached to a single atom; any
//! operator in the upstream text rejects the whole expression.

use num_rational::BigRational;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::token::Op;
use crate::unit::Unit;

static PPM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<upstream>.*)(?P<sign>[+-])\s*(?P<tol>[0-9.,]+)\s*ppm$")
        .expect("ppm pattern is valid")
});

/// Parse `text`, applying the ppm rewrite when the pattern matches and
/// delegating to the core pipeline otherwise.
pub(crate) fn parse(text: &str, unit: Option<Unit>) -> Result<Option<BigRational>> {
    let Some(caps) = PPM_PATTERN.captures(text) else {
        return crate::run_pipeline(text, unit);
    };
    let upstream = &caps["upstream"];
    let sign = &caps["sign"];
    let tolerance = &caps["tol"];

    if !is_plain_number(tolerance) {
        return Err(Error::PpmRejected("tolerance is not a plain number"));
    }
    if upstream.chars().any(|c| Op::SYMBOLS.contains(&c)) {
        return Err(Error::PpmRejected(
            "tolerance applies to a single atom, not a compound expression",
        ));
    }

    let Some(value) = parse(upstream, unit)? else {
        return Ok(None);
    };
    // The upstream value is spliced back in as an exact rational literal
    // (numer/denom re-parses as a division); the tolerance text is spliced
    // in verbatim, where `,` is an ordinary fractional separator.
    let rewritten = format!("({}) * (1 {} ({} / 1M))", value, sign, tolerance);
    debug!(%rewritten, "ppm rewrite");
    crate::run_pipeline(&rewritten, None)
}

/// A plain decimal number: digits with at most one separator, `,` accepted.
fn is_plain_number(text: &str) -> bool {
    let mut separator_seen = false;
    let mut digit_seen = false;
    for c in text.chars() {
        match c {
            '0'..='9' => digit_seen = true,
            '.' | ',' if !separator_seen => separator_seen = true,
            _ => return false,
        }
    }
    digit_seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn test_plain_number_validation() {
        assert!(is_plain_number("1000"));
        assert!(is_plain_number("1.5"));
        assert!(is_plain_number("1,5"));
        assert!(is_plain_number("5."));
        assert!(is_plain_number(".5"));
        assert!(!is_plain_number("1.2.3"));
        assert!(!is_plain_number("."));
        assert!(!is_plain_number(""));
    }

    #[test]
    fn test_positive_tolerance() {
        let value = parse("100+1000ppm", None).unwrap().unwrap();
        assert_eq!(value, rat(1001, 10));
    }

    #[test]
    fn test_negative_tolerance() {
        let value = parse("100-1000ppm", None).unwrap().unwrap();
        assert_eq!(value, rat(999, 10));
    }

    #[test]
    fn test_tolerance_with_whitespace_and_comma() {
        let value = parse("100 + 1000 ppm", None).unwrap().unwrap();
        assert_eq!(value, rat(1001, 10));
        let value = parse("100+0,5ppm", None).unwrap().unwrap();
        assert_eq!(value, rat(100, 1) * (rat(1, 1) + rat(1, 2_000_000)));
    }

    #[test]
    fn test_compound_upstream_is_rejected() {
        assert_eq!(
            parse("1+2+3ppm", None),
            Err(Error::PpmRejected(
                "tolerance applies to a single atom, not a compound expression"
            ))
        );
        // The operator scan covers the whole upstream text, so a leading
        // sign is rejected as well.
        assert!(matches!(
            parse("-5+10ppm", None),
            Err(Error::PpmRejected(_))
        ));
    }

    #[test]
    fn test_bad_tolerance_is_rejected() {
        assert!(matches!(
            parse("100+1.2.3ppm", None),
            Err(Error::PpmRejected(_))
        ));
    }

    #[test]
    fn test_upstream_with_unit_and_suffix() {
        let value = parse("5kHz+1000ppm", Some(Unit::Hertz)).unwrap().unwrap();
        assert_eq!(value, rat(5005, 1));
    }

    #[test]
    fn test_non_ppm_input_passes_through() {
        let value = parse("2+3*4", None).unwrap().unwrap();
        assert_eq!(value, rat(14, 1));
    }
}
