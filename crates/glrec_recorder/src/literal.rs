//! Script literals for argument values
//!
//! Primitives render the way `JSON.stringify` would; buffer views render as a
//! typed array constructor with the elements inlined.

use glrec_core::{BufferView, Value};

/// Literal for a primitive or buffer view. `None` for anything else
/// (handles, opaque objects, `undefined`).
pub fn literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(json_number(*n)),
        Value::String(s) => Some(json_string(s)),
        Value::BufferView(view) => Some(buffer_view(view)),
        Value::Undefined | Value::Handle(_) | Value::Opaque(_) => None,
    }
}

/// Number as JSON: integral values without a fraction, non-finite as `null`.
pub fn json_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    number_text(n)
}

fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e21 {
        // Also folds -0 into 0
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

/// Array element text, where non-finite values keep their script names.
fn element_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        number_text(n)
    }
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "null".to_string())
}

fn buffer_view(view: &BufferView) -> String {
    let elements: Vec<String> = view.elements().iter().map(|&n| element_text(n)).collect();
    format!(
        "new {}([{}])",
        view.kind().constructor_name(),
        elements.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glrec_core::{HandleKind, ResourceHandle};

    #[test]
    fn test_numbers() {
        assert_eq!(json_number(16384.0), "16384");
        assert_eq!(json_number(0.5), "0.5");
        assert_eq!(json_number(-2.0), "-2");
        assert_eq!(json_number(-0.0), "0");
        assert_eq!(json_number(f64::NAN), "null");
        assert_eq!(json_number(f64::INFINITY), "null");
    }

    #[test]
    fn test_strings_are_quoted_and_escaped() {
        assert_eq!(literal(&Value::from("uColor")).unwrap(), "\"uColor\"");
        assert_eq!(
            literal(&Value::from("line\n\"q\"")).unwrap(),
            "\"line\\n\\\"q\\\"\""
        );
    }

    #[test]
    fn test_booleans_and_null() {
        assert_eq!(literal(&Value::Bool(false)).unwrap(), "false");
        assert_eq!(literal(&Value::Null).unwrap(), "null");
    }

    #[test]
    fn test_buffer_views() {
        let view = BufferView::float32(&[1.0, 0.5, -1.0]);
        assert_eq!(
            literal(&Value::from(view)).unwrap(),
            "new Float32Array([1,0.5,-1])"
        );

        let indices = BufferView::uint16(&[0, 1, 2]);
        assert_eq!(
            literal(&Value::from(indices)).unwrap(),
            "new Uint16Array([0,1,2])"
        );

        let empty = BufferView::uint8(&[]);
        assert_eq!(literal(&Value::from(empty)).unwrap(), "new Uint8Array([])");

        let odd = BufferView::float64(&[f64::NAN, f64::NEG_INFINITY]);
        assert_eq!(
            literal(&Value::from(odd)).unwrap(),
            "new Float64Array([NaN,-Infinity])"
        );
    }

    #[test]
    fn test_non_literals() {
        assert_eq!(literal(&Value::Undefined), None);
        assert_eq!(literal(&Value::Opaque("WebGLQuery".into())), None);
        let handle = ResourceHandle::new(HandleKind::Texture);
        assert_eq!(literal(&Value::from(handle)), None);
    }
}
