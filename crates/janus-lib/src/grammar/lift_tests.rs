use janus_lexer::{TextSize, TokenStream};

use crate::fold;
use crate::test_utils::numbers;
use crate::utils::{ConsFold, EmptyList, IntIncrementor};
use crate::{Error, Parser, Reducer, Then};

#[test]
fn mapping_reducer_consumes_nothing() {
    let n = numbers();
    let bump = Reducer::mapping(IntIncrementor::new(0));
    let mut stream = TokenStream::new(&n.lexer, "1");

    assert_eq!(bump.parse(&(), &mut stream, &41).unwrap(), Some(42));
    assert_eq!(stream.offset(), TextSize::from(0));
}

#[test]
fn mapping_reducer_prints_through_its_inverse() {
    let n = numbers();
    let next = n.num.then(&Reducer::mapping(IntIncrementor::new(0)));

    assert_eq!(next.parse_source(&(), &n.lexer, "4").unwrap(), 5);
    assert_eq!(next.print_source(&(), &5).unwrap(), "4");
    assert!(matches!(
        next.print_source(&(), &0),
        Err(Error::NotPrintable(_))
    ));
}

#[test]
fn counter_counts_repetitions() {
    let n = numbers();
    let tick = n.semi.then(&Reducer::mapping(IntIncrementor::new(0)));
    let count = Parser::initializer(0).then(&tick.rep());

    assert_eq!(count.parse_source(&(), &n.lexer, ";;;").unwrap(), 3);
    assert_eq!(count.print_source(&(), &2).unwrap(), ";;");
}

#[test]
fn long_repetition_round_trips() {
    let n = numbers();
    let tick = n.semi.then(&Reducer::mapping(IntIncrementor::new(0)));
    let count = Parser::initializer(0).then(&tick.rep());
    let source = ";".repeat(100_000);

    assert_eq!(count.parse_source(&(), &n.lexer, &source).unwrap(), 100_000);
    assert_eq!(count.print_source(&(), &100_000).unwrap(), source);
}

#[test]
fn fold_reducer_needs_both_inverses() {
    let n = numbers();
    // only folds even numbers back
    let evens = n.num.fold(fold::from_fn(
        |_, _, left: &Vec<i64>, right: i64| {
            let mut list = left.clone();
            list.push(right);
            Ok(list)
        },
        |_, list: &Vec<i64>| Ok(list.split_last().map(|(_, rest)| rest.to_vec())),
        |_, list: &Vec<i64>| Ok(list.last().copied().filter(|v| v % 2 == 0)),
    ));
    let list = EmptyList::parser().then(&evens.rep());

    assert!(matches!(
        list.print_source(&(), &vec![1, 2]),
        Err(Error::NotPrintable(_))
    ));
    assert_eq!(list.print_source(&(), &vec![2, 4]).unwrap(), "24");
}

#[test]
fn fold_reducer_displays_its_parser() {
    let n = numbers();
    let cons: Reducer<(), Vec<i64>, Vec<i64>> = n.num.fold(ConsFold::new(0));

    assert_eq!(cons.to_string(), n.num.to_string());
}

#[test]
fn identity_passes_accumulator_through() {
    let n = numbers();
    let same = Reducer::<(), i64, i64>::identity();
    let mut stream = TokenStream::new(&n.lexer, "");

    assert_eq!(same.parse(&(), &mut stream, &7).unwrap(), Some(7));
    let partial = same.print(&(), &7).unwrap().unwrap();
    assert_eq!(partial.left, 7);
    assert!(partial.tree.is_empty());
}

#[test]
fn optional_reducer_falls_back_to_accumulator() {
    let n = numbers();
    let cons: Reducer<(), Vec<i64>, Vec<i64>> = n.num.fold(ConsFold::new(0));
    let list = EmptyList::parser().then(&n.semi.then(&cons.opt()));

    assert_eq!(list.parse_source(&(), &n.lexer, ";").unwrap(), Vec::<i64>::new());
    assert_eq!(list.parse_source(&(), &n.lexer, "; 3").unwrap(), vec![3]);
    assert_eq!(list.print_source(&(), &vec![]).unwrap(), ";");
    assert_eq!(list.print_source(&(), &vec![3]).unwrap(), ";3");
}
