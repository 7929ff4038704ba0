use std::sync::Arc;

use indoc::indoc;

use super::record::{Kind, Properties, PropertySetter, Record, RecordType, Value};
use crate::Error;
use crate::fold::Fold;
use crate::test_utils::with_stream;

fn point() -> Record {
    RecordType::new("Point")
        .field("x", Kind::Int)
        .field("y", Kind::Int)
        .field("label", Kind::Any)
        .instance()
}

fn set(setter: &PropertySetter, record: &Record, value: impl Into<Value>) -> crate::Result<Record> {
    let value: Value = value.into();
    with_stream(|stream| setter.apply(&(), stream, record, value))
}

#[test]
fn setter_writes_a_copy() {
    let x = PropertySetter::new("x");
    let origin = point();

    let moved = set(&x, &origin, 3).unwrap();

    assert_eq!(moved.get("x").unwrap(), Some(&Value::Int(3)));
    assert_eq!(origin.get("x").unwrap(), None);
}

#[test]
fn setter_inverses_undo_the_write() {
    let x = PropertySetter::new("x");
    let origin = point();
    let moved = set(&x, &origin, 3).unwrap();

    assert_eq!(
        Fold::<(), Record, Value>::left_inverse(&x, &(), &moved).unwrap(),
        Some(origin)
    );
    assert_eq!(
        Fold::<(), Record, Value>::right_inverse(&x, &(), &moved).unwrap(),
        Some(Value::Int(3))
    );
}

#[test]
fn unset_field_has_no_inverse() {
    let y = PropertySetter::new("y");
    let origin = point();

    assert_eq!(Fold::<(), Record, Value>::left_inverse(&y, &(), &origin).unwrap(), None);
    assert_eq!(Fold::<(), Record, Value>::right_inverse(&y, &(), &origin).unwrap(), None);
}

#[test]
fn unknown_field_is_an_error() {
    let z = PropertySetter::new("z");
    let origin = point();

    assert_eq!(
        set(&z, &origin, 1),
        Err(Error::UnknownField {
            type_name: "Point".to_owned(),
            field: "z".to_owned(),
        })
    );
    assert!(Fold::<(), Record, Value>::left_inverse(&z, &(), &origin).is_err());
    assert!(Fold::<(), Record, Value>::right_inverse(&z, &(), &origin).is_err());
}

#[test]
fn mismatched_kind_is_an_error() {
    let x = PropertySetter::new("x");

    let err = set(&x, &point(), "three").unwrap_err();

    insta::assert_snapshot!(err, @"field `x` of `Point` holds string, expected int");
}

#[test]
fn any_field_takes_every_kind() {
    let label = PropertySetter::new("label");

    let tagged = set(&label, &point(), vec![Value::from(true)]).unwrap();

    assert_eq!(
        tagged.get("label").unwrap(),
        Some(&Value::List(vec![Value::Bool(true)]))
    );
}

#[test]
fn branches_do_not_see_each_others_writes() {
    let x = PropertySetter::new("x");
    let y = PropertySetter::new("y");
    let prefix = set(&x, &point(), 1).unwrap();

    let first = set(&y, &prefix, 2).unwrap();
    let second = set(&y, &prefix, 3).unwrap();

    assert_eq!(prefix.get("y").unwrap(), None);
    assert_eq!(first.get("y").unwrap(), Some(&Value::Int(2)));
    assert_eq!(second.get("y").unwrap(), Some(&Value::Int(3)));
    assert_eq!(first.get("x").unwrap(), Some(&Value::Int(1)));
}

#[test]
fn copies_share_storage_until_written() {
    let x = PropertySetter::new("x");
    let prefix = set(&x, &point(), 1).unwrap();

    let copy = prefix.clone();
    assert!(copy.shares_storage_with(&prefix));

    let written = set(&x, &copy, 2).unwrap();
    assert!(!written.shares_storage_with(&prefix));
    assert_eq!(prefix.get("x").unwrap(), Some(&Value::Int(1)));
}

#[test]
fn equality_ignores_write_order() {
    let x = PropertySetter::new("x");
    let y = PropertySetter::new("y");

    let xy = set(&y, &set(&x, &point(), 1).unwrap(), 2).unwrap();
    let yx = set(&x, &set(&y, &point(), 2).unwrap(), 1).unwrap();

    assert_eq!(xy, yx);
}

#[test]
fn value_properties_reach_into_records() {
    let x = PropertySetter::new("x");
    let origin = Value::Record(point());

    let moved = with_stream(|stream| x.apply(&(), stream, &origin, Value::Int(4))).unwrap();

    assert_eq!(moved.property("x").unwrap(), Some(Value::Int(4)));
    assert_eq!(
        Value::Int(1).property("x"),
        Err(Error::UnknownField {
            type_name: "int".to_owned(),
            field: "x".to_owned(),
        })
    );
}

#[test]
fn nested_records() {
    let line = RecordType::new("Line")
        .field("from", Kind::Record)
        .field("to", Kind::Record)
        .instance();
    let from = PropertySetter::new("from");

    let with_start = set(&from, &line, point()).unwrap();

    assert_eq!(
        with_start.get("from").unwrap().and_then(Value::as_record),
        Some(&point())
    );
    assert!(Arc::ptr_eq(with_start.record_type(), line.record_type()));
}

#[test]
fn serializes_type_then_declared_fields() {
    let x = PropertySetter::new("x");
    let label = PropertySetter::new("label");
    // written out of declared order
    let record = set(&x, &set(&label, &point(), "origin").unwrap(), 0).unwrap();

    let json = serde_json::to_string_pretty(&record).unwrap();

    assert_eq!(
        json,
        indoc! {r#"
            {
              "type": "Point",
              "x": 0,
              "label": "origin"
            }"#}
    );
}
