//! Infix to postfix conversion (shunting-yard).

use tracing::trace;

use crate::error::{Error, Result};
use crate::token::{Assoc, Token};

/// Reorder a flat infix token sequence into postfix. Pure reordering: no
/// evaluation happens here.
///
/// Unmatched parentheses are reported as errors. The expression grammar
/// already guarantees balance, so hitting one here means the converter was
/// fed a sequence that never went through the grammar.
pub(crate) fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        trace!(?token, "shunting");
        match token {
            Token::Number(_) => output.push(token),
            Token::Op(op) => {
                loop {
                    // Only another operator can be popped; an open paren
                    // stops the scan.
                    let pops = match stack.last() {
                        Some(Token::Op(top)) => match op.assoc() {
                            Assoc::Left => op.precedence() <= top.precedence(),
                            Assoc::Right => op.precedence() < top.precedence(),
                        },
                        _ => false,
                    };
                    if !pops {
                        break;
                    }
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(Token::Op(op));
            }
            Token::OpenParen => stack.push(token),
            Token::CloseParen => loop {
                match stack.pop() {
                    Some(Token::OpenParen) => break,
                    Some(top) => output.push(top),
                    None => return Err(Error::UnbalancedParen),
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if matches!(top, Token::OpenParen) {
            return Err(Error::UnbalancedParen);
        }
        output.push(top);
    }
    Ok(output)
}
