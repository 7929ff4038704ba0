//! Building dynamic records field by field.

use janus_lexer::{Lexer, Tokenizer};

use crate::mapping;
use crate::utils::{ConsFold, EmptyList, Kind, PropertySetter, Record, RecordType, Value};
use crate::{Error, Or, Parser, Recognizer, Reducer, Then};

struct Assignments {
    lexer: Lexer,
    ident: Parser<(), Value>,
    statement: Parser<(), Record>,
}

/// ```text
/// statement: ident '=' num ';' | ident '=' ident ';'
/// ```
fn assignments() -> Assignments {
    let mut tokenizer = Tokenizer::new();
    let ws = tokenizer.add_regex(r"[ \n]+").unwrap();
    tokenizer.skip(ws).unwrap();

    let ident = Parser::from_regex(
        "[a-z]+",
        &mut tokenizer,
        false,
        mapping::from_fn(
            |_, _, text: &String| Ok(Value::from(text.as_str())),
            |_, value: &Value| {
                Ok(match value {
                    Value::Str(text) => Some(text.clone()),
                    _ => None,
                })
            },
        ),
    )
    .unwrap();
    let num = Parser::from_regex(
        "[0-9]+",
        &mut tokenizer,
        false,
        mapping::from_fn(
            |_, _, text: &String| {
                text.parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| Error::InvalidValue(e.to_string()))
            },
            |_, value: &Value| {
                Ok(match value {
                    Value::Int(n) if *n >= 0 => Some(n.to_string()),
                    _ => None,
                })
            },
        ),
    )
    .unwrap();
    let eq = Recognizer::from_string("=", &mut tokenizer, false).unwrap();
    let semi = Recognizer::from_string(";", &mut tokenizer, false).unwrap();

    let assign = RecordType::new("Assign")
        .field("target", Kind::Str)
        .field("value", Kind::Any)
        .instance();

    let target: Reducer<(), Record, Record> = ident.fold(PropertySetter::new("target"));
    let number: Reducer<(), Record, Record> = num.fold(PropertySetter::new("value"));
    let name: Reducer<(), Record, Record> = ident.fold(PropertySetter::new("value"));

    // the first branch has already set `target` when it gives up
    let numeric = target.then(&eq).then_with(&number, true).then(&semi);
    let named = target.then(&eq).then(&name).then(&semi);
    let statement = Parser::initializer(assign).then_with(&numeric.or(&named), true);

    Assignments {
        lexer: tokenizer.build().unwrap(),
        ident,
        statement,
    }
}

fn assign(target: &str, value: impl Into<Value>) -> Record {
    RecordType::new("Assign")
        .field("target", Kind::Str)
        .field("value", Kind::Any)
        .instance()
        .with("target", Some(target.into()))
        .unwrap()
        .with("value", Some(value.into()))
        .unwrap()
}

#[test]
fn abandoned_branch_leaves_no_trace() {
    let a = assignments();

    let record = a.statement.parse_source(&(), &a.lexer, "x = y;").unwrap();

    assert_eq!(record, assign("x", "y"));
    assert_eq!(a.statement.print_source(&(), &record).unwrap(), "x=y;");
}

#[test]
fn first_branch_wins_when_it_matches() {
    let a = assignments();

    let record = a.statement.parse_source(&(), &a.lexer, "x = 42;").unwrap();

    assert_eq!(record, assign("x", 42));
    assert_eq!(a.statement.print_source(&(), &record).unwrap(), "x=42;");
}

#[test]
fn program_serializes_in_declared_field_order() {
    let a = assignments();
    let item: Reducer<(), Vec<Record>, Vec<Record>> = a.statement.fold(ConsFold::new(0));
    let program = EmptyList::parser().then(&item.rep());

    let records = program
        .parse_source(&(), &a.lexer, "x = 1;\ny = x;\n")
        .unwrap();
    let json = serde_json::to_string_pretty(&records).unwrap();

    insta::assert_snapshot!(json, @r#"
    [
      {
        "type": "Assign",
        "target": "x",
        "value": 1
      },
      {
        "type": "Assign",
        "target": "y",
        "value": "x"
      }
    ]
    "#);
    assert_eq!(program.print_source(&(), &records).unwrap(), "x=1;y=x;");
}

#[test]
fn structural_errors_are_not_non_matches() {
    let a = assignments();
    let misspelled: Reducer<(), Record, Record> = a.ident.fold(PropertySetter::new("taget"));
    let many = Parser::initializer(RecordType::new("Assign").instance()).then(&misspelled.rep());

    let error = many.parse_source(&(), &a.lexer, "x").unwrap_err();

    assert_eq!(
        error,
        Error::UnknownField {
            type_name: "Assign".to_owned(),
            field: "taget".to_owned(),
        }
    );
}

#[test]
fn kind_mismatch_surfaces_while_parsing() {
    let a = assignments();
    let typed = RecordType::new("Count").field("n", Kind::Int).instance();
    let count: Reducer<(), Record, Record> = a.ident.fold(PropertySetter::new("n"));
    let parser = Parser::initializer(typed).then(&count);

    let error = parser.parse_source(&(), &a.lexer, "many").unwrap_err();

    insta::assert_snapshot!(error, @"field `n` of `Count` holds string, expected int");
}
