use std::marker::PhantomData;

use winnow::Parser;
use winnow::combinator::opt;
use winnow::error::ParserError;
use winnow::stream::{Stream, StreamIsPartial};

/// Specifies the associativity of an infix operator.
#[derive(Debug, Clone, Copy)]
pub(super) enum Assoc {
    Left,
    /// The operator cannot be chained without parentheses, e.g. `a < b < c` is rejected.
    Neither,
}

pub(super) type Precedence = i64;

/// An operator precedence parser based on the
/// [Pratt algorithm](https://en.wikipedia.org/wiki/Operator-precedence_parser).
///
/// Operators are given as parsers that report their binding power alongside the parsed
/// operator; the `fold_*` callbacks build the resulting node.
#[allow(clippy::too_many_arguments)]
pub(super) fn precedence<I, E, Operand, PrefixOp, SuffixOp, InfixOp, P, PP, PS, PI, FP, FS, FI>(
    init: Precedence,
    parse_operand: P,
    parse_prefix: PP,
    parse_suffix: PS,
    parse_infix: PI,
    fold_prefix: FP,
    fold_suffix: FS,
    fold_infix: FI,
) -> impl Parser<I, Operand, E>
where
    I: Stream + StreamIsPartial,
    P: Parser<I, Operand, E>,
    PP: Parser<I, (Precedence, PrefixOp), E>,
    PS: Parser<I, (Precedence, SuffixOp), E>,
    PI: Parser<I, (Assoc, Precedence, InfixOp), E>,
    FP: FnMut(PrefixOp, Operand) -> Result<Operand, E>,
    FS: FnMut(Operand, SuffixOp) -> Result<Operand, E>,
    FI: FnMut(Operand, InfixOp, Operand) -> Result<Operand, E>,
    E: ParserError<I>,
{
    let mut pratt = Pratt {
        parse_operand,
        parse_prefix,
        parse_suffix,
        parse_infix,
        fold_prefix,
        fold_suffix,
        fold_infix,
        _marker: PhantomData,
    };
    move |i: &mut I| pratt.expression(i, init)
}

struct Pratt<I, E, Operand, PrefixOp, SuffixOp, InfixOp, P, PP, PS, PI, FP, FS, FI> {
    parse_operand: P,
    parse_prefix: PP,
    parse_suffix: PS,
    parse_infix: PI,
    fold_prefix: FP,
    fold_suffix: FS,
    fold_infix: FI,
    _marker: PhantomData<(I, E, Operand, PrefixOp, SuffixOp, InfixOp)>,
}

impl<I, E, Operand, PrefixOp, SuffixOp, InfixOp, P, PP, PS, PI, FP, FS, FI>
    Pratt<I, E, Operand, PrefixOp, SuffixOp, InfixOp, P, PP, PS, PI, FP, FS, FI>
where
    I: Stream + StreamIsPartial,
    P: Parser<I, Operand, E>,
    PP: Parser<I, (Precedence, PrefixOp), E>,
    PS: Parser<I, (Precedence, SuffixOp), E>,
    PI: Parser<I, (Assoc, Precedence, InfixOp), E>,
    FP: FnMut(PrefixOp, Operand) -> Result<Operand, E>,
    FS: FnMut(Operand, SuffixOp) -> Result<Operand, E>,
    FI: FnMut(Operand, InfixOp, Operand) -> Result<Operand, E>,
    E: ParserError<I>,
{
    fn expression(&mut self, i: &mut I, min_power: Precedence) -> Result<Operand, E> {
        let operand = opt(self.parse_operand.by_ref()).parse_next(i)?;
        let mut operand = match operand {
            Some(operand) => operand,
            None => {
                let start = i.checkpoint();
                let len = i.eof_offset();
                // A failed prefix leaves the offending token unconsumed.
                let (power, prefix_op) = match self.parse_prefix.parse_next(i) {
                    Ok(prefix) => prefix,
                    Err(e) => {
                        i.reset(&start);
                        return Err(e);
                    }
                };
                if i.eof_offset() == len {
                    return Err(E::assert(i, "`prefix` parsers must always consume"));
                }
                let operand = self.expression(i, power)?;
                (self.fold_prefix)(prefix_op, operand)?
            }
        };

        let mut previous_non_assoc = None;
        while i.eof_offset() > 0 {
            let start = i.checkpoint();
            if let Some((power, suffix_op)) = opt(self.parse_suffix.by_ref()).parse_next(i)? {
                if power < min_power {
                    i.reset(&start);
                    break;
                }
                operand = (self.fold_suffix)(operand, suffix_op)?;
                continue;
            }

            let Some((assoc, power, infix_op)) = opt(self.parse_infix.by_ref()).parse_next(i)?
            else {
                break;
            };
            let non_assoc = matches!(assoc, Assoc::Neither).then_some(power);
            if power < min_power || previous_non_assoc == Some(power) {
                i.reset(&start);
                break;
            }
            previous_non_assoc = non_assoc;
            let rhs = self.expression(i, power + 1)?;
            operand = (self.fold_infix)(operand, infix_op, rhs)?;
        }
        Ok(operand)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use winnow::ModalResult;
    use winnow::ascii::{digit1, multispace0};
    use winnow::combinator::{delimited, dispatch, empty, fail, peek};
    use winnow::token::any;

    use super::*;

    fn operand(i: &mut &str) -> ModalResult<i64> {
        digit1.try_map(i64::from_str).parse_next(i)
    }

    fn parenthesized(i: &mut &str) -> ModalResult<i64> {
        delimited('(', expr, ')').parse_next(i)
    }

    fn expr(i: &mut &str) -> ModalResult<i64> {
        precedence(
            0,
            delimited(
                multispace0,
                dispatch! {peek(any);
                    '(' => parenthesized,
                    '0'..='9' => operand,
                    _ => fail
                },
                multispace0,
            ),
            delimited(
                multispace0,
                dispatch! {any;
                    '-' => empty.value((3, '-')),
                    _ => fail
                },
                multispace0,
            ),
            delimited(
                multispace0,
                dispatch! {any;
                    '!' => empty.value((4, '!')),
                    _ => fail
                },
                multispace0,
            ),
            delimited(
                multispace0,
                dispatch! {any;
                    '<' => empty.value((Assoc::Neither, 0, '<')),
                    '+' => empty.value((Assoc::Left, 1, '+')),
                    '*' => empty.value((Assoc::Left, 2, '*')),
                    _ => fail
                },
                multispace0,
            ),
            |_, a| Ok(-a),
            |a, _| Ok((1..=a).product()),
            |a, op, b| match op {
                '<' => Ok(i64::from(a < b)),
                '+' => Ok(a + b),
                _ => Ok(a * b),
            },
        )
        .parse_next(i)
    }

    #[test]
    fn test_binding_power() {
        assert_eq!(expr.parse("1 + 3 * 4").unwrap(), 13);
        assert_eq!(expr.parse("(1 + 3) * 4").unwrap(), 16);
        assert_eq!(expr.parse("- 2 + 3!").unwrap(), 4);
    }

    #[test]
    fn test_non_associative_operator() {
        assert_eq!(expr.parse("1 < 2 + 3").unwrap(), 1);
        assert!(expr.parse("1 < 2 < 3").is_err());
    }

    #[test]
    fn test_error_offset_at_missing_operand() {
        let error = expr.parse("1 + ;").unwrap_err();
        assert_eq!(error.offset(), 4);
    }
}
