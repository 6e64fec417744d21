//! Literal and expression scanning.
//!
//! The number literal grammar is a longest-match, non-backtracking scan:
//! optional sign, integer digits, optional fractional part (`.` or `,` as the
//! separator, including the trailing-separator and bare `.5` forms), optional
//! case-insensitive scientific exponent, optional SI suffix, and - when the
//! grammar is built for a unit - that unit's literal spelling. The expression
//! grammar layers parentheses and the four infix operators on top and
//! requires the whole input to be consumed.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Pow;
use tracing::trace;

use crate::error::{Error, Result};
use crate::si;
use crate::token::{Op, Token};
use crate::unit::Unit;

const FRACTION_SEPARATORS: [char; 2] = ['.', ','];

pub(crate) struct Scanner {
    chars: Vec<char>,
    position: usize,
}

impl Scanner {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_digits(&mut self) -> String {
        let start = self.position;
        while self.current().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        self.chars[start..self.position].iter().collect()
    }

    fn at_fraction_separator(&self) -> bool {
        self.current()
            .is_some_and(|c| FRACTION_SEPARATORS.contains(&c))
    }

    /// Consume the longest numeric literal starting at the cursor, or leave
    /// the cursor untouched and return `None`.
    ///
    /// Whitespace may separate the number from its SI suffix or unit
    /// literal (`1 k`, `5 Hz`); only the mantissa and exponent are
    /// adjacency-restricted.
    pub(crate) fn read_number(&mut self, unit: Option<Unit>) -> Option<BigRational> {
        let value = self.read_scientific()?;
        let after_number = self.position;
        self.skip_whitespace();

        let Some(unit) = unit else {
            if let Some((len, multiplier)) = si::match_suffix(&self.chars, self.position) {
                self.position += len;
                return Some(value * multiplier);
            }
            self.position = after_number;
            return Some(value);
        };

        // Unit-aware grammars run two alternatives at the suffix position:
        // the unit literal itself, and an SI suffix followed by an optional
        // unit literal. The longer match wins and the unit literal wins
        // ties, so `5hz` is five hertz rather than hecto-z.
        let unit_alt = unit
            .match_at(&self.chars, self.position)
            .map(|len| self.position + len);
        let suffix_alt = si::match_suffix(&self.chars, self.position).map(|(len, multiplier)| {
            let mut end = self.position + len;
            // The trailing unit may also be whitespace-separated.
            let mut probe = end;
            while self.chars.get(probe).is_some_and(|c| c.is_whitespace()) {
                probe += 1;
            }
            if let Some(unit_len) = unit.match_at(&self.chars, probe) {
                end = probe + unit_len;
            }
            (end, multiplier)
        });
        match (unit_alt, suffix_alt) {
            (Some(unit_end), Some((suffix_end, multiplier))) if suffix_end > unit_end => {
                self.position = suffix_end;
                Some(value * multiplier)
            }
            (Some(unit_end), _) => {
                self.position = unit_end;
                Some(value)
            }
            (None, Some((suffix_end, multiplier))) => {
                self.position = suffix_end;
                Some(value * multiplier)
            }
            (None, None) => {
                self.position = after_number;
                Some(value)
            }
        }
    }

    fn read_scientific(&mut self) -> Option<BigRational> {
        let mantissa = self.read_mantissa()?;
        if matches!(self.current(), Some('e') | Some('E')) {
            let mark = self.position;
            self.advance();
            if let Some(exponent) = self.read_exponent() {
                return Some(mantissa * si::pow10(exponent));
            }
            // No digits followed: the E may still be an exa suffix.
            self.position = mark;
        }
        Some(mantissa)
    }

    fn read_mantissa(&mut self) -> Option<BigRational> {
        let start = self.position;
        let mut negative = false;
        let mut signed = false;
        if matches!(self.current(), Some('+') | Some('-')) {
            negative = self.current() == Some('-');
            signed = true;
            self.advance();
        }
        let int_digits = self.read_digits();
        if int_digits.is_empty() {
            // Bare fractional form `.5`; the grammar gives it no sign.
            if signed || !self.at_fraction_separator() {
                self.position = start;
                return None;
            }
            self.advance();
            let frac_digits = self.read_digits();
            if frac_digits.is_empty() {
                self.position = start;
                return None;
            }
            return Some(decimal_value(false, "0", &frac_digits));
        }
        let mut frac_digits = String::new();
        if self.at_fraction_separator() {
            // Trailing-separator form `5.` is valid and consumes the separator.
            self.advance();
            frac_digits = self.read_digits();
        }
        Some(decimal_value(negative, &int_digits, &frac_digits))
    }

    /// A bare SI suffix standing alone as an atom is a constant holding its
    /// multiplier, so `20.5*M` scales by mega.
    fn read_constant(&mut self) -> Option<BigRational> {
        let (len, multiplier) = si::match_suffix(&self.chars, self.position)?;
        self.position += len;
        Some(multiplier.clone())
    }

    fn read_exponent(&mut self) -> Option<i32> {
        let start = self.position;
        let mut negative = false;
        if matches!(self.current(), Some('+') | Some('-')) {
            negative = self.current() == Some('-');
            self.advance();
        }
        let digits = self.read_digits();
        if digits.is_empty() {
            self.position = start;
            return None;
        }
        let exponent: i32 = match digits.parse() {
            Ok(e) => e,
            Err(_) => {
                self.position = start;
                return None;
            }
        };
        Some(if negative { -exponent } else { exponent })
    }
}

/// The exact base-10 fraction `<int>.<frac>`, negated when the literal
/// carried a minus sign. No binary floating point is involved.
fn decimal_value(negative: bool, int_digits: &str, frac_digits: &str) -> BigRational {
    let mut numer = digits_to_bigint(int_digits);
    numer = numer * BigInt::from(10u32).pow(frac_digits.len() as u32)
        + digits_to_bigint(frac_digits);
    let denom = BigInt::from(10u32).pow(frac_digits.len() as u32);
    let value = BigRational::new(numer, denom);
    if negative {
        -value
    } else {
        value
    }
}

fn digits_to_bigint(digits: &str) -> BigInt {
    digits.chars().fold(BigInt::from(0u32), |acc, c| {
        acc * 10u32 + c.to_digit(10).unwrap_or(0)
    })
}

/// Tokenize one complete infix expression into a flat token sequence.
///
/// An atom is a numeric literal, a bare SI suffix acting as a constant, or a
/// parenthesized sub-expression; atoms are joined by the four binary
/// operators. Whitespace is permitted between tokens and between a number
/// and its suffix or unit; the mantissa and exponent must be contiguous.
/// Leftover input is a grammar failure.
pub(crate) fn tokenize(input: &str, unit: Option<Unit>) -> Result<Vec<Token>> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    let mut depth = 0usize;

    loop {
        // Atom position: any number of opening parens, then a literal.
        scanner.skip_whitespace();
        while scanner.current() == Some('(') {
            tokens.push(Token::OpenParen);
            depth += 1;
            scanner.advance();
            scanner.skip_whitespace();
        }
        let pos = scanner.position;
        let value = scanner
            .read_number(unit)
            .or_else(|| scanner.read_constant())
            .ok_or(Error::Syntax {
                pos,
                message: "expected a numeric literal",
            })?;
        trace!(%value, pos, "scanned literal");
        tokens.push(Token::Number(value));

        // Operator position: closing parens, one operator, or end of input.
        loop {
            scanner.skip_whitespace();
            match scanner.current() {
                Some(')') => {
                    if depth == 0 {
                        return Err(Error::Syntax {
                            pos: scanner.position,
                            message: "unmatched closing parenthesis",
                        });
                    }
                    depth -= 1;
                    tokens.push(Token::CloseParen);
                    scanner.advance();
                }
                Some(c) => {
                    let Some(op) = Op::from_char(c) else {
                        return Err(Error::Syntax {
                            pos: scanner.position,
                            message: "expected an operator or end of input",
                        });
                    };
                    tokens.push(Token::Op(op));
                    scanner.advance();
                    break;
                }
                None => {
                    if depth != 0 {
                        return Err(Error::Syntax {
                            pos: scanner.position,
                            message: "unclosed parenthesis",
                        });
                    }
                    return Ok(tokens);
                }
            }
        }
    }
}
