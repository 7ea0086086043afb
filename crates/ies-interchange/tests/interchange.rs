use std::path::PathBuf;

use ies_interchange::{
    Entity, InterchangeError, export_interchange, export_interchange_pretty, import_interchange,
};
use ies_model::field::{CANDELA_MULTIPLIER, NUM_LAMPS};
use ies_model::{FieldValue, IesDocument, Tilt};
use proptest::prelude::*;

fn tiny_document() -> IesDocument {
    let mut document = IesDocument::new().with_filename("tiny.ies");
    document.tilt = Some(Tilt::None);
    document.add_keyword_parts("TEST", "tiny");
    document.add_field_parts(NUM_LAMPS, 1_i64);
    document.add_field_parts(CANDELA_MULTIPLIER, 1.0);
    document.add_candela_parts(90.0, 0.0, 50.0);
    document.add_candela_parts(0.0, 0.0, 100.0);
    document
}

#[test]
fn pretty_export_matches_snapshot() {
    let output = export_interchange_pretty(&tiny_document()).unwrap();
    insta::assert_snapshot!("tiny_document", output);
}

#[test]
fn parsed_file_round_trips() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../ies-lm63/tests/data/downlight.ies");
    let document = ies_lm63::read_ies(&path).unwrap();

    let text = export_interchange(&document).unwrap();
    let copy = import_interchange(&text).unwrap();

    assert_eq!(copy, document);
    assert_ne!(copy.id(), document.id());
    assert_eq!(copy.candela_count(), 15);
    for (_, _, candela) in copy.iter_candela() {
        assert_eq!(candela.parent(), Some(copy.id()));
    }
    let names: Vec<&str> = copy.fields().map(|f| f.name.as_str()).collect();
    let original: Vec<&str> = document.fields().map(|f| f.name.as_str()).collect();
    assert_eq!(names, original);
}

#[test]
fn included_tilt_round_trips() {
    let mut document = tiny_document();
    document.tilt = Some(Tilt::Include {
        lines: vec!["1".into(), "2".into(), "0 90".into(), "1.0 0.5".into()],
    });
    let copy = import_interchange(&export_interchange(&document).unwrap()).unwrap();
    assert_eq!(copy.tilt, document.tilt);
}

#[test]
fn top_level_must_be_a_document() {
    let err = import_interchange(r#"{"kind":"keyword","name":"TEST","value":"x"}"#).unwrap_err();
    assert!(matches!(
        err,
        InterchangeError::UnexpectedKind {
            expected: "document",
            found: "keyword",
            ..
        }
    ));
}

#[test]
fn nested_entity_of_wrong_kind_is_rejected() {
    let text = r#"{
        "kind": "document",
        "keywords": [
            {"kind": "keyword", "name": "TEST", "value": "x"},
            {"kind": "field", "name": "num_lamps", "value": 1}
        ]
    }"#;
    let err = import_interchange(text).unwrap_err();
    match err {
        InterchangeError::UnexpectedKind {
            expected, location, ..
        } => {
            assert_eq!(expected, "keyword");
            assert_eq!(location, "keywords[1]");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mismatched_angle_key_is_rejected() {
    let text = r#"{
        "kind": "document",
        "candela_values": {
            "0": {"90": {"kind": "candela_value", "vertical": 0.0, "horizontal": 0.0, "value": 1.0}}
        }
    }"#;
    let err = import_interchange(text).unwrap_err();
    assert!(matches!(
        err,
        InterchangeError::AngleKeyMismatch {
            key_horizontal,
            horizontal,
            ..
        } if key_horizontal == 90.0 && horizontal == 0.0
    ));
}

#[test]
fn malformed_json_is_reported() {
    let text = r#"{"kind":"document","fields":[{"kind":"field","name":"width","value":"wide"}]}"#;
    let err = import_interchange(text).unwrap_err();
    assert!(matches!(err, InterchangeError::Malformed { .. }));

    let err = import_interchange(r#"{"kind":"document","keywords":["#).unwrap_err();
    match err {
        InterchangeError::Malformed { message, .. } => assert!(message.contains("EOF"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_kind_is_malformed() {
    let err = Entity::decode(r#"{"kind":"luminaire"}"#).unwrap_err();
    assert!(matches!(err, InterchangeError::Malformed { .. }));
}

fn arb_field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        (-1000i64..1000).prop_map(FieldValue::Integer),
        (-4000i64..4000).prop_map(|n| FieldValue::Real(n as f64 / 4.0)),
    ]
}

fn arb_document() -> impl Strategy<Value = IesDocument> {
    (
        prop::option::of("[a-z]{1,8}\\.ies"),
        prop::collection::btree_map("[A-Z]{1,10}", "[ -~]{0,20}", 0..5),
        prop::collection::btree_map("[a-z_]{1,12}", arb_field_value(), 0..8),
        prop::collection::vec((0u32..36, 0u32..8, 0u32..40_000), 0..30),
    )
        .prop_map(|(filename, keywords, fields, grid)| {
            let mut document = IesDocument::new();
            document.filename = filename;
            document.tilt = Some(Tilt::None);
            for (name, value) in keywords {
                document.add_keyword_parts(name, value);
            }
            for (name, value) in fields {
                document.add_field_parts(name, value);
            }
            for (v, h, value) in grid {
                document.add_candela_parts(
                    f64::from(v) * 2.5,
                    f64::from(h) * 45.0,
                    f64::from(value) / 8.0,
                );
            }
            document
        })
}

proptest! {
    #[test]
    fn export_then_import_is_identity(document in arb_document()) {
        let copy = import_interchange(&export_interchange(&document).unwrap()).unwrap();
        prop_assert_eq!(&copy, &document);

        let pretty = import_interchange(&export_interchange_pretty(&document).unwrap()).unwrap();
        prop_assert_eq!(&pretty, &document);
    }
}
