//! SI magnitude suffix tables and engineering-notation rendering.
//!
//! The parse table accepts every SI prefix from yocto (1e-24) through yotta
//! (1e24), including the sub-1000 steps centi, deci, deca and hecto. The
//! unparse table used for rendering keeps only the powers of 1000 plus the
//! null suffix, so a value is never rendered as e.g. `3da`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, Zero};
use once_cell::sync::Lazy;

/// Exact 10^exp as a rational; negative exponents produce unit fractions.
pub(crate) fn pow10(exp: i32) -> BigRational {
    let magnitude = BigInt::from(10u32).pow(exp.unsigned_abs());
    if exp < 0 {
        BigRational::new(BigInt::one(), magnitude)
    } else {
        BigRational::from_integer(magnitude)
    }
}

/// Suffix spelling -> exact multiplier. Order is irrelevant to lookup; the
/// scanner always takes the longest spelling that matches.
static PARSE_TABLE: Lazy<Vec<(&'static str, BigRational)>> = Lazy::new(|| {
    vec![
        ("y", pow10(-24)),  // yocto
        ("z", pow10(-21)),  // zepto
        ("a", pow10(-18)),  // atto
        ("f", pow10(-15)),  // femto
        ("p", pow10(-12)),  // pico
        ("n", pow10(-9)),   // nano
        ("\u{3bc}", pow10(-6)), // micro
        ("u", pow10(-6)),   // micro, ASCII alias
        ("m", pow10(-3)),   // milli
        ("c", pow10(-2)),   // centi
        ("d", pow10(-1)),   // deci
        ("da", pow10(1)),   // deca
        ("h", pow10(2)),    // hecto
        ("k", pow10(3)),    // kilo
        ("M", pow10(6)),    // mega
        ("G", pow10(9)),    // giga
        ("T", pow10(12)),   // tera
        ("P", pow10(15)),   // peta
        ("E", pow10(18)),   // exa
        ("Z", pow10(21)),   // zetta
        ("Y", pow10(24)),   // yotta
    ]
});

/// Multiplier -> suffix, ascending. Centi, deci, deca and hecto parse fine
/// but are never chosen when rendering; the empty suffix stands for 1.
static UNPARSE_TABLE: Lazy<Vec<(BigRational, &'static str)>> = Lazy::new(|| {
    vec![
        (pow10(-24), "y"),
        (pow10(-21), "z"),
        (pow10(-18), "a"),
        (pow10(-15), "f"),
        (pow10(-12), "p"),
        (pow10(-9), "n"),
        (pow10(-6), "\u{3bc}"),
        (pow10(-3), "m"),
        (pow10(0), ""),
        (pow10(3), "k"),
        (pow10(6), "M"),
        (pow10(9), "G"),
        (pow10(12), "T"),
        (pow10(15), "P"),
        (pow10(18), "E"),
        (pow10(21), "Z"),
        (pow10(24), "Y"),
    ]
});

/// Iterate the parse table entries as (spelling, exact multiplier).
pub fn parse_suffixes() -> impl Iterator<Item = (&'static str, &'static BigRational)> {
    PARSE_TABLE.iter().map(|(spelling, multiplier)| (*spelling, multiplier))
}

/// Look up the exact multiplier for a suffix spelling.
pub fn factor(spelling: &str) -> Option<&'static BigRational> {
    PARSE_TABLE
        .iter()
        .find(|(s, _)| *s == spelling)
        .map(|(_, m)| m)
}

/// Longest suffix match at `pos`. Returns the matched length in chars and
/// the multiplier, so `da` wins over `d` when both apply.
pub(crate) fn match_suffix(chars: &[char], pos: usize) -> Option<(usize, &'static BigRational)> {
    let mut best: Option<(usize, &'static BigRational)> = None;
    for (spelling, multiplier) in PARSE_TABLE.iter() {
        let len = spelling.chars().count();
        if best.is_some_and(|(blen, _)| blen >= len) {
            continue;
        }
        if starts_with_at(chars, pos, spelling) {
            best = Some((len, multiplier));
        }
    }
    best
}

fn starts_with_at(chars: &[char], pos: usize, literal: &str) -> bool {
    let mut i = pos;
    for c in literal.chars() {
        if chars.get(i) != Some(&c) {
            return false;
        }
        i += 1;
    }
    true
}

/// Render a rational in engineering notation using the unparse table.
///
/// The suffix chosen is the largest whose multiplier does not exceed the
/// magnitude of the value. When the scaled mantissa has no terminating
/// decimal expansion the value is rendered as a plain `numer/denom` fraction
/// with no suffix; either form re-parses to the identical rational.
pub fn to_engineering(value: &BigRational) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let magnitude = value.abs();
    let mut chosen = &UNPARSE_TABLE[0];
    for entry in UNPARSE_TABLE.iter() {
        if entry.0 <= magnitude {
            chosen = entry;
        } else {
            break;
        }
    }
    let scaled = value / &chosen.0;
    match decimal_digits(&scaled) {
        Some(text) => format!("{}{}", text, chosen.1),
        None => format!("{}/{}", value.numer(), value.denom()),
    }
}

/// Exact decimal rendering, possible only when the reduced denominator is of
/// the form 2^a * 5^b.
fn decimal_digits(value: &BigRational) -> Option<String> {
    let two = BigInt::from(2u32);
    let five = BigInt::from(5u32);
    let mut den = value.denom().clone();
    let mut twos = 0u32;
    while (&den % &two).is_zero() {
        den /= &two;
        twos += 1;
    }
    let mut fives = 0u32;
    while (&den % &five).is_zero() {
        den /= &five;
        fives += 1;
    }
    if !den.is_one() {
        return None;
    }
    let places = twos.max(fives);
    let scale = BigInt::from(10u32).pow(places);
    let digits = (value * BigRational::from_integer(scale)).to_integer();

    let mut text = digits.abs().to_string();
    if places > 0 {
        let places = places as usize;
        if text.len() <= places {
            text = format!("{:0>width$}", text, width = places + 1);
        }
        text.insert(text.len() - places, '.');
    }
    if value.is_negative() {
        text.insert(0, '-');
    }
    Some(text)
}
