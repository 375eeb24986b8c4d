use std::borrow::Cow;

#[cfg(feature = "num-bigint")]
use num_bigint::BigInt;

use ojson::{JsonErrorType, LinePosition, NumberInt, OrderedObject, OrderedValue, RawNumber};

macro_rules! round_trip_tests {
    ($($name:ident => $json:literal;)*) => {
        $(
            paste::item! {
                #[test]
                fn [< round_trip_ $name >]() {
                    let value = OrderedValue::parse($json.as_bytes()).unwrap();
                    assert_eq!(value.to_json_string().unwrap(), $json);
                }
            }
        )*
    };
}

round_trip_tests! {
    object_simple => r#"{"one":1,"two":2}"#;
    object_empty => "{}";
    object_nested => r#"{"a":{"b":{"c":[]}}}"#;
    object_duplicate_keys => r#"{"k":1,"k":2,"k":3}"#;
    array_empty => "[]";
    array_mixed => r#"[1,"two",null,true,{"three":3}]"#;
    string_top_level => r#""hello""#;
    string_unicode => r#""£100 → spent""#;
    number_int => "123";
    number_negative => "-8";
    number_zero => "0";
    number_float => "0.1";
    number_float_trailing_zeros => "1.100";
    number_exponent => "2.5e10";
    number_big => "123456789012345678901234567890";
    bool_true => "true";
    bool_false => "false";
    null => "null";
}

macro_rules! decode_error_tests {
    ($($name:ident => $json:literal, $error_type:expr;)*) => {
        $(
            paste::item! {
                #[test]
                fn [< decode_error_ $name >]() {
                    let error = OrderedValue::parse($json.as_bytes()).unwrap_err();
                    assert_eq!(error.error_type, $error_type);
                }
            }
        )*
    };
}

decode_error_tests! {
    numeric_key => r#"{1:2}"#, JsonErrorType::KeyMustBeAString;
    bare_key => r#"{key:2}"#, JsonErrorType::KeyMustBeAString;
    missing_colon => r#"{"key" 2}"#, JsonErrorType::ExpectedColon;
    trailing_comma_object => r#"{"key":2,}"#, JsonErrorType::TrailingComma;
    trailing_comma_array => "[1,]", JsonErrorType::TrailingComma;
    unclosed_object => r#"{"key":2"#, JsonErrorType::EofWhileParsingObject;
    unclosed_array => "[1,2", JsonErrorType::EofWhileParsingList;
    unclosed_string => r#""never ends"#, JsonErrorType::EofWhileParsingString;
    empty_input => "", JsonErrorType::EofWhileParsingValue;
    leading_zero => "01", JsonErrorType::InvalidNumber;
    incomplete_exponent => "1e", JsonErrorType::EofWhileParsingValue;
    bad_ident => "truth", JsonErrorType::ExpectedSomeIdent;
    trailing_characters => "null null", JsonErrorType::TrailingCharacters;
    comma_only => ",", JsonErrorType::ExpectedSomeValue;
    invalid_escape => r#""a\qb""#, JsonErrorType::InvalidEscape;
    lone_low_surrogate => r#""\udc00""#, JsonErrorType::LoneLeadingSurrogateInHexEscape;
    unpaired_high_surrogate => r#""\ud800x""#, JsonErrorType::UnexpectedEndOfHexEscape;
}

#[test]
fn decode_error_control_character() {
    let error = OrderedValue::parse(b"\"a\tb\"").unwrap_err();
    assert_eq!(error.error_type, JsonErrorType::ControlCharacterWhileParsingString);
}

#[test]
fn decode_error_position() {
    let json = "{\n  \"a\": x\n}";
    let error = OrderedValue::parse(json.as_bytes()).unwrap_err();
    assert_eq!(error.error_type, JsonErrorType::ExpectedSomeValue);
    assert_eq!(error.index, 9);
    assert_eq!(error.get_position(json.as_bytes()), LinePosition::new(2, 8));
    assert_eq!(error.description(json.as_bytes()), "expected value at line 2 column 8");
    assert_eq!(error.to_string(), "expected value at index 9");
}

#[test]
fn recursion_limit() {
    let json = format!("{}1{}", "[".repeat(500), "]".repeat(500));
    let error = OrderedValue::parse(json.as_bytes()).unwrap_err();
    assert_eq!(error.error_type, JsonErrorType::RecursionLimitExceeded);
}

#[test]
fn top_level_shapes() {
    assert!(matches!(OrderedValue::parse(b"null").unwrap(), OrderedValue::Null));
    assert!(matches!(OrderedValue::parse(b"true").unwrap(), OrderedValue::Bool(true)));
    assert!(matches!(OrderedValue::parse(b"3").unwrap(), OrderedValue::Number(_)));
    assert!(matches!(OrderedValue::parse(b"\"s\"").unwrap(), OrderedValue::Str(_)));
    assert!(matches!(OrderedValue::parse(b"[]").unwrap(), OrderedValue::Array(_)));
    assert!(matches!(OrderedValue::parse(b"{}").unwrap(), OrderedValue::Object(_)));
}

#[test]
fn iteration_order_preserved() {
    let json = r#"{"one":{"hendrik":"sedin"},"two":{"daniel":"sedin"},"three":["vancouver","canucks"],"four":"hockey"}"#;
    let value = OrderedValue::parse(json.as_bytes()).unwrap();
    let object = value.as_object().unwrap();

    let keys: Vec<&str> = object.keys().collect();
    assert_eq!(keys, ["one", "two", "three", "four"]);

    let encoded: Vec<String> = object.values().map(|v| v.to_json_string().unwrap()).collect();
    assert_eq!(
        encoded,
        [
            r#"{"hendrik":"sedin"}"#,
            r#"{"daniel":"sedin"}"#,
            r#"["vancouver","canucks"]"#,
            r#""hockey""#,
        ]
    );

    assert_eq!(value.to_json_string().unwrap(), json);
}

#[test]
fn entries_cursor_reset_and_exhaustion() {
    let value = OrderedValue::parse(br#"{"a":1,"b":2}"#).unwrap();
    let object = value.as_object().unwrap();

    let mut entries = object.iter();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.next().unwrap().0, "a");
    assert_eq!(entries.next().unwrap().0, "b");
    assert!(entries.next().is_none());
    // exhausted cursors stay exhausted
    assert!(entries.next().is_none());

    entries.reset();
    let keys: Vec<&str> = entries.by_ref().map(|(k, _)| k).collect();
    assert_eq!(keys, ["a", "b"]);

    entries.reset();
    assert_eq!(entries.next().unwrap().0, "a");

    // independent cursors over the same object don't interfere
    let mut first = object.iter();
    let mut second = object.iter();
    assert_eq!(first.next().unwrap().0, "a");
    assert_eq!(second.next().unwrap().0, "a");
    assert_eq!(first.next().unwrap().0, "b");
}

#[test]
fn set_replaces_in_place() {
    let mut value = OrderedValue::parse(br#"{"a":1,"b":2,"c":3}"#).unwrap();
    let object = value.as_object_mut().unwrap();

    let previous = object.set("b", 22);
    assert_eq!(previous, Some(OrderedValue::from(2)));
    assert_eq!(object.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(object.get("b"), Some(&OrderedValue::from(22)));

    assert!(object.set("d", 4).is_none());
    assert_eq!(object.len(), 4);
    assert_eq!(object.keys().collect::<Vec<_>>(), ["a", "b", "c", "d"]);

    assert_eq!(value.to_json_string().unwrap(), r#"{"a":1,"b":22,"c":3,"d":4}"#);
}

#[test]
fn append_allows_duplicate_keys() {
    let mut object = OrderedObject::new();
    object.append("k", 1);
    object.append("k", 2);

    assert_eq!(object.len(), 2);
    // keyed lookup resolves duplicates to the first entry
    assert_eq!(object.get("k"), Some(&OrderedValue::from(1)));

    let keys: Vec<&str> = object.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["k", "k"]);

    let value = OrderedValue::from(object);
    assert_eq!(value.to_json_string().unwrap(), r#"{"k":1,"k":2}"#);
}

#[test]
fn get_first_wins_with_many_entries() {
    let mut object = OrderedObject::new();
    object.append("dup", 0);
    for i in 1..=20_i64 {
        object.append(format!("key{i}"), i);
    }
    object.append("dup", 99);

    assert_eq!(object.len(), 22);
    // the lazy lookup index must agree with a linear scan: first entry wins
    assert_eq!(object.get("dup"), Some(&OrderedValue::from(0)));
    assert_eq!(object.get("key7"), Some(&OrderedValue::from(7)));
    assert!(object.get("missing").is_none());

    // mutation after the index is built still lands in the right entry
    object.set("key3", 33);
    assert_eq!(object.get("key3"), Some(&OrderedValue::from(33)));
    object.append("late", 100);
    assert_eq!(object.get("late"), Some(&OrderedValue::from(100)));
}

#[test]
fn get_mut_updates_value() {
    let mut value = OrderedValue::parse(br#"{"a":{"b":1}}"#).unwrap();
    let object = value.as_object_mut().unwrap();
    let inner = object.get_mut("a").unwrap().as_object_mut().unwrap();
    inner.set("b", 2);

    assert_eq!(value.to_json_string().unwrap(), r#"{"a":{"b":2}}"#);
}

#[test]
fn object_from_iterator() {
    let object: OrderedObject<'static> = [("z", 1), ("a", 2)].into_iter().collect();
    assert_eq!(object.keys().collect::<Vec<_>>(), ["z", "a"]);
    assert_eq!(object.get("a"), Some(&OrderedValue::from(2)));
}

#[test]
fn number_fidelity() {
    let value = OrderedValue::parse(b"[0.10, -0, 1e3, 9999999999999999999999]").unwrap();
    let array = value.as_array().unwrap();

    let raw: Vec<&str> = array.iter().map(|v| v.as_number().unwrap().as_str()).collect();
    assert_eq!(raw, ["0.10", "-0", "1e3", "9999999999999999999999"]);

    assert_eq!(value.to_json_string().unwrap(), "[0.10,-0,1e3,9999999999999999999999]");
}

#[test]
fn number_typed_access() {
    let value = OrderedValue::parse(b"123").unwrap();
    let number = value.as_number().unwrap();
    assert!(number.is_int());
    assert_eq!(number.as_int(), Some(NumberInt::Int(123)));
    assert_eq!(number.as_float(), Some(123.0));

    let value = OrderedValue::parse(b"1.5").unwrap();
    let number = value.as_number().unwrap();
    assert!(!number.is_int());
    assert!(number.as_int().is_none());
    assert_eq!(number.as_float(), Some(1.5));
}

#[cfg(feature = "num-bigint")]
#[test]
fn number_big_int_access() {
    let value = OrderedValue::parse(b"123456789012345678901234567890").unwrap();
    let expected: BigInt = "123456789012345678901234567890".parse().unwrap();
    assert_eq!(value.as_number().unwrap().as_int(), Some(NumberInt::BigInt(expected)));
}

#[test]
fn number_from_f64() {
    assert_eq!(RawNumber::from_f64(1.5).unwrap().as_str(), "1.5");
    assert!(RawNumber::from_f64(f64::NAN).is_none());
    assert!(RawNumber::from_f64(f64::INFINITY).is_none());
}

#[test]
fn string_escapes_decode() {
    let value = OrderedValue::parse(r#""a\nb\t\"c\" A 😀""#.as_bytes()).unwrap();
    assert_eq!(value.as_str(), Some("a\nb\t\"c\" A 😀"));
}

#[test]
fn unicode_escapes_decode() {
    let value = OrderedValue::parse(br#""\u0041 \ud83d\ude00""#).unwrap();
    assert_eq!(value.as_str(), Some("A 😀"));
}

#[test]
fn borrowed_and_owned_strings() {
    let data = br#"["plain","esc\naped"]"#.to_vec();
    let value = OrderedValue::parse(&data).unwrap();
    let array = value.as_array().unwrap();
    assert!(matches!(&array[0], OrderedValue::Str(Cow::Borrowed(_))));
    assert!(matches!(&array[1], OrderedValue::Str(Cow::Owned(_))));

    let detached = value.into_static();
    drop(data);
    assert_eq!(detached.to_json_string().unwrap(), "[\"plain\",\"esc\\naped\"]");
}

#[test]
fn keys_escaped_on_write() {
    let mut object = OrderedObject::new();
    object.append("has \"quotes\"", OrderedValue::Null);
    object.append("line\nbreak", true);
    let value = OrderedValue::from(object);

    let encoded = value.to_json_string().unwrap();
    assert_eq!(encoded, r#"{"has \"quotes\"":null,"line\nbreak":true}"#);

    // and the escaped form decodes back to the same document
    let reparsed = OrderedValue::parse(encoded.as_bytes()).unwrap();
    assert_eq!(reparsed.to_json_string().unwrap(), encoded);
    assert!(reparsed.as_object().unwrap().get("has \"quotes\"").is_some());
}

#[test]
fn whitespace_normalized() {
    let value = OrderedValue::parse(b" { \"a\" : [ 1 , 2 ] } ").unwrap();
    assert_eq!(value.to_json_string().unwrap(), r#"{"a":[1,2]}"#);
}

#[test]
fn to_static_leaves_original_usable() {
    let data = br#"{"k":"v"}"#.to_vec();
    let value = OrderedValue::parse(&data).unwrap();
    let copy = value.to_static();
    assert_eq!(copy, value.to_static());
    assert_eq!(copy.to_json().unwrap(), value.to_json().unwrap());
}
