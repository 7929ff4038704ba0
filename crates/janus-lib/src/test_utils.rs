//! Shared grammars for tests.

use std::sync::Arc;

use janus_lexer::{Lexer, TokenStream, Tokenizer};

use crate::cst::{Category, CstRef, LayoutPrinter, StringPrinter};
use crate::fold::Fold;
use crate::mapping::{self, Mapping};
use crate::{Error, Or, Outcome, Parser, Recognizer, Reducer, Ref, Result, Then};

pub const INFIX: Category = Category::new(0);

/// Lexer with a single throwaway pattern, for folds and mappings that only
/// need a stream to exist.
pub fn idle_lexer() -> Lexer {
    let mut tokenizer = Tokenizer::new();
    tokenizer.add_text("_").unwrap();
    tokenizer.build().unwrap()
}

pub fn with_stream<R>(f: impl FnOnce(&mut TokenStream<'_>) -> R) -> R {
    let lexer = idle_lexer();
    let mut stream = TokenStream::new(&lexer, "");
    f(&mut stream)
}

/// Layout that puts spaces around infix operators.
#[derive(Default)]
pub struct SpacedPrinter(StringPrinter);

impl SpacedPrinter {
    pub fn finish(self) -> String {
        self.0.finish()
    }
}

impl LayoutPrinter for SpacedPrinter {
    fn text(&mut self, text: &str) {
        self.0.text(text);
    }

    fn annotated(&mut self, category: Category, tree: CstRef<'_>) {
        if category == INFIX {
            self.text(" ");
            tree.print_to(self);
            self.text(" ");
            return;
        }
        tree.print_to(self);
    }
}

/// Integer token mapping.
pub fn int_mapping() -> impl Mapping<(), String, i64> {
    mapping::from_fn(
        |_, _, text: &String| {
            text.parse::<i64>()
                .map_err(|e| Error::InvalidValue(e.to_string()))
        },
        |_, n: &i64| Ok((*n >= 0).then(|| n.to_string())),
    )
}

/// Comma separated integers.
pub struct Numbers {
    pub lexer: Lexer,
    pub num: Parser<(), i64>,
    pub comma: Recognizer<()>,
    pub semi: Recognizer<()>,
}

pub fn numbers() -> Numbers {
    let mut tokenizer = Tokenizer::new();
    let ws = tokenizer.add_regex(r"[ \t\n]+").unwrap();
    tokenizer.skip(ws).unwrap();
    let num = Parser::from_regex("[0-9]+", &mut tokenizer, false, int_mapping()).unwrap();
    let comma = Recognizer::from_string(",", &mut tokenizer, false).unwrap();
    let semi = Recognizer::from_string(";", &mut tokenizer, false).unwrap();
    Numbers {
        lexer: tokenizer.build().unwrap(),
        num,
        comma,
        semi,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Num(i64),
    Neg(Arc<Expr>),
    Bin(Op, Arc<Expr>, Arc<Expr>),
}

impl Expr {
    pub fn bin(op: Op, left: Expr, right: Expr) -> Self {
        Self::Bin(op, Arc::new(left), Arc::new(right))
    }

    pub fn neg(inner: Expr) -> Self {
        Self::Neg(Arc::new(inner))
    }
}

pub struct BinaryFold(pub Op);

impl Fold<(), Expr, Expr> for BinaryFold {
    fn apply(&self, _env: &(), _stream: &TokenStream<'_>, left: &Expr, right: Expr) -> Result<Expr> {
        Ok(Expr::bin(self.0, left.clone(), right))
    }

    fn left_inverse(&self, _env: &(), result: &Expr) -> Outcome<Expr> {
        Ok(match result {
            Expr::Bin(op, left, _) if *op == self.0 => Some(Expr::clone(left)),
            _ => None,
        })
    }

    fn right_inverse(&self, _env: &(), result: &Expr) -> Outcome<Expr> {
        Ok(match result {
            Expr::Bin(op, _, right) if *op == self.0 => Some(Expr::clone(right)),
            _ => None,
        })
    }
}

pub struct Negate;

impl Mapping<(), Expr, Expr> for Negate {
    fn parse(&self, _env: &(), _stream: &TokenStream<'_>, input: &Expr) -> Result<Expr> {
        Ok(Expr::neg(input.clone()))
    }

    fn left(&self, _env: &(), result: &Expr) -> Outcome<Expr> {
        Ok(match result {
            Expr::Neg(inner) => Some(Expr::clone(inner)),
            _ => None,
        })
    }
}

pub struct Calculator {
    pub lexer: Lexer,
    pub sum: Parser<(), Expr>,
}

impl Calculator {
    pub fn parse(&self, source: &str) -> Result<Expr> {
        self.sum.parse_source(&(), &self.lexer, source)
    }

    pub fn print(&self, expr: &Expr) -> String {
        self.sum.print_source(&(), expr).unwrap()
    }

    pub fn print_spaced(&self, expr: &Expr) -> String {
        let mut printer = SpacedPrinter::default();
        self.sum.print_with(&(), expr, &mut printer).unwrap();
        printer.finish()
    }
}

/// ```text
/// num:     [0-9]+
/// term:    num | '(' sum ')'
/// literal: '-' term | term
/// product: literal ('*' literal | '/' literal)*
/// sum:     product ('+' product | '-' product)*
/// ```
pub fn calculator() -> Calculator {
    let mut tokenizer = Tokenizer::new();
    let ws = tokenizer.add_regex(r"[ \t\n]+").unwrap();
    tokenizer.skip(ws).unwrap();

    let num = Parser::from_regex(
        "[0-9]+",
        &mut tokenizer,
        false,
        mapping::from_fn(
            |_, _, text: &String| {
                text.parse::<i64>()
                    .map(Expr::Num)
                    .map_err(|e| Error::InvalidValue(e.to_string()))
            },
            |_, expr: &Expr| {
                Ok(match expr {
                    Expr::Num(n) if *n >= 0 => Some(n.to_string()),
                    _ => None,
                })
            },
        ),
    )
    .unwrap();

    let token = |text: &str, tokenizer: &mut Tokenizer| {
        Recognizer::<()>::from_string(text, tokenizer, false).unwrap()
    };
    let open = token("(", &mut tokenizer);
    let close = token(")", &mut tokenizer);
    let minus = token("-", &mut tokenizer);
    let plus = token("+", &mut tokenizer);
    let times = token("*", &mut tokenizer);
    let slash = token("/", &mut tokenizer);

    let sum = Ref::<(), Expr>::new("sum");

    let term = num.or(&open.then(&sum.parser()).then(&close));
    let negated = minus.then(&term).then(&Reducer::mapping(Negate));
    let literal = negated.or(&term);

    let operand =
        |op: &Recognizer<()>, fold: Op, side: &Parser<(), Expr>| -> Reducer<(), Expr, Expr> {
            op.annotate(INFIX).then(&side.fold(BinaryFold(fold)))
        };

    let product = literal.then(
        &operand(&times, Op::Mul, &literal)
            .or(&operand(&slash, Op::Div, &literal))
            .rep(),
    );
    let sum_body = product.then(
        &operand(&plus, Op::Add, &product)
            .or(&operand(&minus, Op::Sub, &product))
            .rep(),
    );
    sum.define(&sum_body).unwrap();

    Calculator {
        lexer: tokenizer.build().unwrap(),
        sum: sum.parser(),
    }
}
