use serde_json::{Number, Value};

/// Emptiness as used by the `empty` / `not_empty` predicates.
///
/// `null`, `false`, numeric zero, `""`, `"0"` and empty arrays or objects are empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value == 0.0),
        Value::String(text) => text.is_empty() || text == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Strict membership in `{null, 0, "0"}`. Float zero is not a member.
pub fn is_null_or_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(number) => number.as_i64() == Some(0) || number.as_u64() == Some(0),
        Value::String(text) => text == "0",
        _ => false,
    }
}

/// Weak equality with type coercion.
///
/// Booleans compare by truthiness, `null` equals the empty value of the other
/// side (but only the empty string among strings), numbers and numeric strings
/// compare numerically, arrays and objects compare member-wise.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => *flag == !is_empty(other),
        (Value::Null, other) | (other, Value::Null) => match other {
            Value::String(text) => text.is_empty(),
            _ => is_empty(other),
        },
        (Value::Number(left), Value::Number(right)) => numbers_eq(left, right),
        (Value::Number(number), Value::String(text))
        | (Value::String(text), Value::Number(number)) => match parse_numeric(text) {
            Some(parsed) => number.as_f64() == Some(parsed),
            None => false,
        },
        (Value::String(left), Value::String(right)) => {
            match (parse_numeric(left), parse_numeric(right)) {
                (Some(left), Some(right)) => left == right,
                _ => left == right,
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right)
                    .all(|(left, right)| loose_eq(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right
                        .get(key)
                        .is_some_and(|other| loose_eq(value, other))
                })
        }
        (Value::Array(items), Value::Object(map)) | (Value::Object(map), Value::Array(items)) => {
            items.is_empty() && map.is_empty()
        }
        _ => false,
    }
}

/// String form of a value, as used when matching type discriminators.
pub fn to_loose_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(number) => format_number(number),
        Value::String(text) => text.clone(),
        Value::Array(_) => "Array".to_string(),
        Value::Object(_) => "Object".to_string(),
    }
}

fn numbers_eq(left: &Number, right: &Number) -> bool {
    if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        return left == right;
    }
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        return left == right;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

fn format_number(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        return value.to_string();
    }
    if let Some(value) = number.as_u64() {
        return value.to_string();
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
        Some(value) => value.to_string(),
        None => number.to_string(),
    }
}

/// Parses a numeric string: optional surrounding whitespace, sign, digits with an
/// optional decimal point and an optional exponent. Hex, `inf` and `NaN` are rejected.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let mut idx = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        idx += 1;
    }

    let mut mantissa_digits = 0;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
        mantissa_digits += 1;
    }
    if idx < bytes.len() && bytes[idx] == b'.' {
        idx += 1;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if idx < bytes.len() && matches!(bytes[idx], b'e' | b'E') {
        idx += 1;
        if matches!(bytes.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }
        let exponent_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == exponent_start {
            return None;
        }
    }

    if idx != bytes.len() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_compare_numerically() {
        assert!(loose_eq(&json!("1"), &json!(1)));
        assert!(loose_eq(&json!("1"), &json!("01")));
        assert!(loose_eq(&json!("10"), &json!("1e1")));
        assert!(loose_eq(&json!(1), &json!(1.0)));
        assert!(!loose_eq(&json!("abc"), &json!(0)));
        assert!(!loose_eq(&json!("1a"), &json!(1)));
    }

    #[test]
    fn null_and_bool_coercions() {
        assert!(loose_eq(&json!(null), &json!(false)));
        assert!(loose_eq(&json!(null), &json!("")));
        assert!(!loose_eq(&json!(null), &json!("0")));
        assert!(loose_eq(&json!(null), &json!(0)));
        assert!(loose_eq(&json!(null), &json!([])));
        assert!(loose_eq(&json!(true), &json!("yes")));
        assert!(loose_eq(&json!(false), &json!("0")));
        assert!(!loose_eq(&json!(true), &json!(0)));
    }

    #[test]
    fn collections_compare_member_wise() {
        assert!(loose_eq(&json!([1, "2"]), &json!(["1", 2])));
        assert!(!loose_eq(&json!([1, 2]), &json!([2, 1])));
        assert!(loose_eq(&json!({"a": "1"}), &json!({"a": 1})));
        assert!(!loose_eq(&json!({"a": 1}), &json!({"b": 1})));
        assert!(loose_eq(&json!([]), &json!({})));
        assert!(!loose_eq(&json!([1]), &json!(1)));
    }

    #[test]
    fn null_or_zero_is_strict() {
        assert!(is_null_or_zero(&json!(null)));
        assert!(is_null_or_zero(&json!(0)));
        assert!(is_null_or_zero(&json!("0")));
        assert!(!is_null_or_zero(&json!(0.0)));
        assert!(!is_null_or_zero(&json!("")));
        assert!(!is_null_or_zero(&json!(false)));
    }

    #[test]
    fn numeric_parsing_rejects_non_decimal_forms() {
        assert_eq!(parse_numeric(" 1.5 "), Some(1.5));
        assert_eq!(parse_numeric("-2e3"), Some(-2000.0));
        assert_eq!(parse_numeric(".5"), Some(0.5));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("0x1A"), None);
        assert_eq!(parse_numeric("1e"), None);
    }

    #[test]
    fn loose_strings_for_discriminators() {
        assert_eq!(to_loose_string(&json!(5)), "5");
        assert_eq!(to_loose_string(&json!(2.0)), "2");
        assert_eq!(to_loose_string(&json!(true)), "1");
        assert_eq!(to_loose_string(&json!(null)), "");
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|value| json!(value)),
            "[0-9a-z .e-]{0,4}".prop_map(Value::String),
        ]
    }

    proptest! {
        #[test]
        fn loose_eq_is_symmetric(left in scalar(), right in scalar()) {
            prop_assert_eq!(loose_eq(&left, &right), loose_eq(&right, &left));
        }

        #[test]
        fn loose_eq_is_reflexive(value in scalar()) {
            prop_assert!(loose_eq(&value, &value));
        }
    }
}
