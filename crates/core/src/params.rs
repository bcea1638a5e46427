//! Pure helpers for reading typed parameters out of a `serde_json::Value`
//! object, plus the linear range mapping every parameter goes through.
//!
//! The extractors never fail: a missing key or a value of the wrong type
//! yields the caller's default.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON floats and integers.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Linearly re-maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Not clamped: values outside the input range extrapolate. A degenerate
/// input range maps everything to `out_min`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}
