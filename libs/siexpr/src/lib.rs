#![forbid(unsafe_code)]

//! Exact-arithmetic expression engine for SI-suffixed engineering notation.
//!
//! Input text is scanned into a flat infix token sequence, reordered into
//! postfix with the shunting-yard algorithm, and evaluated to an exact
//! rational - no binary floating point at any stage. Literals support
//! scientific notation, SI magnitude suffixes (yocto through yotta, plus
//! centi/deci/deca/hecto and the ASCII `u` micro alias) and an optional
//! physical unit, and whole expressions support the `value±Xppm` tolerance
//! form.
//!
//! ```
//! use siexpr::{parse, parse_hz};
//! use num_rational::BigRational;
//! use num_bigint::BigInt;
//!
//! let rat = |n: i64| BigRational::from_integer(BigInt::from(n));
//! assert_eq!(parse("2+3*4").unwrap(), Some(rat(14)));
//! assert_eq!(parse("20.5*M").unwrap(), Some(rat(20_500_000)));
//! assert_eq!(parse_hz("5kHz").unwrap(), Some(rat(5000)));
//! ```

mod error;
mod eval;
mod lexer;
mod ppm;
mod shunting;
mod si;
mod token;
mod unit;

use tracing::debug;

pub use error::{Error, Result};
pub use num_rational::BigRational;
pub use si::{factor, parse_suffixes, to_engineering};
pub use unit::Unit;

/// Run the core pipeline: tokenize, reorder to postfix, evaluate.
/// Empty or whitespace-only input is the defined "no value" case.
pub(crate) fn run_pipeline(text: &str, unit: Option<Unit>) -> Result<Option<BigRational>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let tokens = lexer::tokenize(text, unit)?;
    let postfix = shunting::to_postfix(tokens)?;
    Ok(Some(eval::evaluate(postfix)?))
}

/// Diagnostic-mode parse: every failure surfaces as its specific [`Error`].
///
/// `unit` selects which unit literal the number grammar must additionally
/// accept; `None` means SI-suffix numbers only. `allow_ppm` enables the
/// `value±Xppm` tolerance form.
pub fn parse_detailed(
    text: &str,
    unit: Option<Unit>,
    allow_ppm: bool,
) -> Result<Option<BigRational>> {
    if allow_ppm {
        ppm::parse(text, unit)
    } else {
        run_pipeline(text, unit)
    }
}

/// Permissive-mode parse: grammar-level failures collapse into `Ok(None)`,
/// matching callers that treat unparseable input as "no value". Fatal
/// errors (division by zero, stray tokens past the grammar) are never
/// swallowed.
pub fn parse_with(
    text: &str,
    unit: Option<Unit>,
    allow_ppm: bool,
) -> Result<Option<BigRational>> {
    match parse_detailed(text, unit, allow_ppm) {
        Ok(value) => Ok(value),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            debug!(input = text, error = %e, "parse failed");
            Ok(None)
        }
    }
}

/// Parse a unitless expression with the ppm extension enabled.
pub fn parse(text: &str) -> Result<Option<BigRational>> {
    parse_with(text, None, true)
}

/// Parse an expression whose literals may carry the hertz unit.
pub fn parse_hz(text: &str) -> Result<Option<BigRational>> {
    parse_with(text, Some(Unit::Hertz), true)
}

/// Parse an expression whose literals may carry the seconds unit.
pub fn parse_s(text: &str) -> Result<Option<BigRational>> {
    parse_with(text, Some(Unit::Second), true)
}
