//! Iterative evaluation of postfix token sequences.

use num_rational::BigRational;
use tracing::trace;

use crate::error::{Error, Result};
use crate::token::Token;

/// Evaluate a postfix sequence with an explicit operand stack, so memory use
/// is bounded by operand count rather than call-stack depth.
///
/// For a binary operator the operand nearer the top of the stack is the
/// right-hand side of the original infix expression.
pub(crate) fn evaluate(postfix: Vec<Token>) -> Result<BigRational> {
    let mut operands: Vec<BigRational> = Vec::new();

    for token in postfix {
        match token {
            Token::Number(value) => operands.push(value),
            Token::Op(op) => {
                let rhs = operands.pop().ok_or_else(|| {
                    Error::InvalidToken(format!("operator '{}' is missing operands", op.symbol()))
                })?;
                let lhs = operands.pop().ok_or_else(|| {
                    Error::InvalidToken(format!("operator '{}' is missing operands", op.symbol()))
                })?;
                let result = op.apply(&lhs, &rhs)?;
                trace!(%lhs, op = %op.symbol(), %rhs, %result, "applied operator");
                operands.push(result);
            }
            Token::OpenParen | Token::CloseParen => {
                return Err(Error::InvalidToken(
                    "parenthesis in postfix sequence".to_string(),
                ))
            }
        }
    }

    let result = operands
        .pop()
        .ok_or_else(|| Error::InvalidToken("empty postfix sequence".to_string()))?;
    if !operands.is_empty() {
        return Err(Error::InvalidToken(
            "leftover operands after evaluation".to_string(),
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Op;
    use num_bigint::BigInt;

    fn num(value: i64) -> Token {
        Token::Number(BigRational::from_integer(BigInt::from(value)))
    }

    fn rat(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn test_evaluates_postfix() {
        // 2 3 4 * +  ==  14
        let result = evaluate(vec![
            num(2),
            num(3),
            num(4),
            Token::Op(Op::Mul),
            Token::Op(Op::Add),
        ])
        .unwrap();
        assert_eq!(result, rat(14, 1));
    }

    #[test]
    fn test_operand_order() {
        // 1 2 -  ==  -1, not 1
        let result = evaluate(vec![num(1), num(2), Token::Op(Op::Sub)]).unwrap();
        assert_eq!(result, rat(-1, 1));
    }

    #[test]
    fn test_division_by_zero() {
        let err = evaluate(vec![num(1), num(0), Token::Op(Op::Div)]).unwrap_err();
        assert_eq!(err, Error::DivisionByZero);
    }

    #[test]
    fn test_malformed_sequences() {
        assert!(matches!(
            evaluate(vec![Token::Op(Op::Add)]),
            Err(Error::InvalidToken(_))
        ));
        assert!(matches!(evaluate(vec![]), Err(Error::InvalidToken(_))));
        assert!(matches!(
            evaluate(vec![num(1), num(2)]),
            Err(Error::InvalidToken(_))
        ));
        assert!(matches!(
            evaluate(vec![Token::OpenParen]),
            Err(Error::InvalidToken(_))
        ));
    }

    #[test]
    fn test_deep_stack_does_not_recurse() {
        // A long left-associated chain must not overflow the call stack.
        let mut tokens = vec![num(1)];
        for _ in 0..10_000 {
            tokens.push(num(1));
            tokens.push(Token::Op(Op::Add));
        }
        assert_eq!(evaluate(tokens).unwrap(), rat(10_001, 1));
    }
}
