use crate::*;

#[test]
fn parse_literal_reads_scalars() {
    assert_eq!(ArgValue::parse_literal("64"), ArgValue::Int(64));
    assert_eq!(ArgValue::parse_literal(" -3 "), ArgValue::Int(-3));
    assert_eq!(ArgValue::parse_literal("0.5"), ArgValue::Float(0.5));
    assert_eq!(ArgValue::parse_literal("True"), ArgValue::Bool(true));
    assert_eq!(ArgValue::parse_literal("false"), ArgValue::Bool(false));
    assert_eq!(
        ArgValue::parse_literal("'nearest'"),
        ArgValue::Str("nearest".to_string())
    );
}

#[test]
fn parse_literal_reads_nested_lists() {
    assert_eq!(
        ArgValue::parse_literal("[1, [2, 'a'], True]"),
        ArgValue::Seq(vec![
            ArgValue::Int(1),
            ArgValue::Seq(vec![ArgValue::Int(2), ArgValue::Str("a".to_string())]),
            ArgValue::Bool(true),
        ])
    );
    assert_eq!(ArgValue::parse_literal("[]"), ArgValue::Seq(Vec::new()));
}

#[test]
fn parse_literal_keeps_unparseable_text_verbatim() {
    for raw in ["nc", "None", "nan", "inf", "2*3", "[1, 2", "__import__('os')"] {
        assert_eq!(ArgValue::parse_literal(raw), ArgValue::Str(raw.to_string()), "{raw}");
    }
}

#[test]
fn from_yaml_maps_native_values() {
    let v: serde_yaml::Value = serde_yaml::from_str("[null, 2, 'nearest', 1.5, true, [3]]").unwrap();
    assert_eq!(
        ArgValue::from_yaml(&v),
        ArgValue::Seq(vec![
            ArgValue::Str("None".to_string()),
            ArgValue::Int(2),
            ArgValue::Str("nearest".to_string()),
            ArgValue::Float(1.5),
            ArgValue::Bool(true),
            ArgValue::Seq(vec![ArgValue::Int(3)]),
        ])
    );
}

#[test]
fn display_uses_python_like_repr() {
    let v = ArgValue::Seq(vec![
        ArgValue::Str("None".to_string()),
        ArgValue::Int(2),
        ArgValue::Str("nearest".to_string()),
        ArgValue::Float(2.0),
        ArgValue::Bool(false),
    ]);
    assert_eq!(v.to_string(), "[None, 2, 'nearest', 2.0, False]");
}

#[test]
fn is_two_matches_int_and_float_only() {
    assert!(ArgValue::Int(2).is_two());
    assert!(ArgValue::Float(2.0).is_two());
    assert!(!ArgValue::Str("2".to_string()).is_two());
    assert!(!ArgValue::Bool(true).is_two());
}
