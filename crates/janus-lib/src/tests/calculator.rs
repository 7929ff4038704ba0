//! Arithmetic expressions: precedence, nesting, negation.

use crate::Error;
use crate::test_utils::{Expr, Op, calculator};

fn num(n: i64) -> Expr {
    Expr::Num(n)
}

#[test]
fn precedence() {
    let calc = calculator();

    assert_eq!(
        calc.parse("1*2+3").unwrap(),
        Expr::bin(Op::Add, Expr::bin(Op::Mul, num(1), num(2)), num(3))
    );
    assert_eq!(
        calc.parse("1+2*3").unwrap(),
        Expr::bin(Op::Add, num(1), Expr::bin(Op::Mul, num(2), num(3)))
    );
}

#[test]
fn left_associative() {
    let calc = calculator();

    assert_eq!(
        calc.parse("8 - 4 - 2").unwrap(),
        Expr::bin(Op::Sub, Expr::bin(Op::Sub, num(8), num(4)), num(2))
    );
}

#[test]
fn parentheses_only_where_needed() {
    let calc = calculator();

    for source in ["(1+2)*3", "1-(2-3)", "-(1+2)", "1*(2/3)", "2*-1", "1--2"] {
        let expr = calc.parse(source).unwrap();
        assert_eq!(calc.print(&expr), source);
    }
}

#[test]
fn redundant_parentheses_are_dropped() {
    let calc = calculator();

    let expr = calc.parse("((1)) + (2 * 3)").unwrap();

    assert_eq!(calc.print(&expr), "1+2*3");
}

#[test]
fn constructed_values_print() {
    let calc = calculator();
    let expr = Expr::bin(
        Op::Div,
        Expr::neg(Expr::bin(Op::Add, num(1), num(2))),
        num(4),
    );

    assert_eq!(calc.print(&expr), "-(1+2)/4");
    assert_eq!(calc.parse(&calc.print(&expr)).unwrap(), expr);
}

#[test]
fn layout_spaces_infix_operators() {
    let calc = calculator();
    let expr = calc.parse("1+2*-3").unwrap();

    insta::assert_snapshot!(calc.print_spaced(&expr), @"1 + 2 * -3");
}

#[test]
fn unclosed_parenthesis() {
    let calc = calculator();

    let error = calc.parse("(1 + 2").unwrap_err();

    assert_eq!(
        error,
        Error::UnexpectedInput {
            offset: 6.into(),
            expected: "')'".to_owned(),
        }
    );
}

#[test]
fn empty_input_is_no_match() {
    let calc = calculator();

    let error = calc.parse("").unwrap_err();

    assert!(matches!(error, Error::NoMatch { .. }), "{error:?}");
    insta::assert_snapshot!(error, @"no match for sum");
}
