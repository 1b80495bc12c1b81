//! Helpers over loosely-typed JSON values.

use serde_json::Value;

/// Loose truthiness of a JSON value.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; every other value,
/// including empty arrays and objects, is truthy.
///
/// # Examples
///
/// ```
/// use repscore_core::is_truthy;
/// use serde_json::json;
///
/// assert!(is_truthy(&json!(true)));
/// assert!(is_truthy(&json!("yes")));
/// assert!(is_truthy(&json!([])));
/// assert!(!is_truthy(&json!(0)));
/// assert!(!is_truthy(&json!("")));
/// assert!(!is_truthy(&json!(null)));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
