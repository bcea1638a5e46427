//! Range controls bound to engine parameters.
//!
//! A [`ControlPanel`] is built from an engine's parameter schema: every
//! entry carrying `min` and `max` becomes a [`Control`] that behaves like an
//! HTML range input. Writes are clamped and snapped to the control's step,
//! and the panel hands back a fresh configuration object for the engine
//! instead of mutating shared state.

use serde_json::{Map, Value};

use crate::error::EngineError;
use crate::params::param_f64;

/// A single numeric range control with its live value.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    name: String,
    min: f64,
    max: f64,
    step: f64,
    value: f64,
}

impl Control {
    /// Creates a control. `step <= 0` means continuous.
    pub fn new(name: impl Into<String>, min: f64, max: f64, step: f64, value: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut control = Self {
            name: name.into(),
            min,
            max,
            step,
            value: min,
        };
        control.set(value);
        control
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Writes a raw input value, clamped to `[min, max]` and snapped to the
    /// nearest step. Returns the stored value. NaN leaves the value unchanged.
    pub fn set(&mut self, raw: f64) -> f64 {
        if raw.is_nan() {
            return self.value;
        }
        let mut v = raw.clamp(self.min, self.max);
        if self.step > 0.0 {
            v = self.min + ((v - self.min) / self.step).round() * self.step;
            v = v.clamp(self.min, self.max);
        }
        self.value = v;
        v
    }

    /// Text for the paired read-only label.
    pub fn label(&self) -> String {
        if self.is_integral() {
            format!("{}", self.value.round() as i64)
        } else {
            format!("{:.2}", self.value)
        }
    }

    fn is_integral(&self) -> bool {
        self.step > 0.0 && self.step.fract() == 0.0 && self.min.fract() == 0.0
    }

    fn json_value(&self) -> Value {
        if self.is_integral() {
            Value::from(self.value.round() as i64)
        } else {
            Value::from(self.value)
        }
    }
}

/// The set of range controls for one engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPanel {
    controls: Vec<Control>,
}

impl ControlPanel {
    /// Builds controls from a parameter schema and the current values.
    ///
    /// Schema entries without numeric `min` and `max` (for example string
    /// options) are skipped. Initial values come from `values`, falling back
    /// to the schema `default`, then to `min`.
    pub fn from_schema(schema: &Value, values: &Value) -> Self {
        let controls = schema
            .as_object()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(name, spec)| {
                        let min = spec.get("min").and_then(Value::as_f64)?;
                        let max = spec.get("max").and_then(Value::as_f64)?;
                        let step = param_f64(spec, "step", 0.0);
                        let default = param_f64(spec, "default", min);
                        let value = param_f64(values, name, default);
                        Some(Control::new(name.as_str(), min, max, step, value))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { controls }
    }

    /// All controls, in schema key order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Looks up a control by name.
    pub fn get(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name == name)
    }

    /// Writes a raw input value into the named control.
    ///
    /// Returns `EngineError::ParamNotFound` if no control has that name.
    pub fn set(&mut self, name: &str, raw: f64) -> Result<&Control, EngineError> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| EngineError::ParamNotFound(name.to_string()))?;
        control.set(raw);
        Ok(control)
    }

    /// The current control values as a configuration object.
    pub fn values(&self) -> Value {
        let map: Map<String, Value> = self
            .controls
            .iter()
            .map(|c| (c.name.clone(), c.json_value()))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "polymer": {"type": "number", "default": 70, "min": 0, "max": 100, "step": 1},
            "energy": {"type": "number", "default": 30, "min": 0, "max": 100, "step": 1},
            "blend": {"type": "number", "default": 0.5, "min": 0.0, "max": 1.0, "step": 0.05},
            "mode": {"type": "string", "default": "fade", "options": ["fade", "wrap"]}
        })
    }

    #[test]
    fn control_clamps_to_range() {
        let mut c = Control::new("energy", 0.0, 100.0, 1.0, 30.0);
        assert_eq!(c.set(250.0), 100.0);
        assert_eq!(c.set(-4.0), 0.0);
    }

    #[test]
    fn control_snaps_to_step() {
        let mut c = Control::new("concentration", 10.0, 300.0, 5.0, 150.0);
        assert_eq!(c.set(52.4), 50.0);
        assert_eq!(c.set(53.0), 55.0);
    }

    #[test]
    fn continuous_control_keeps_raw_value() {
        let mut c = Control::new("gain", 0.0, 1.0, 0.0, 0.0);
        assert!((c.set(0.123) - 0.123).abs() < 1e-12);
    }

    #[test]
    fn control_ignores_nan() {
        let mut c = Control::new("energy", 0.0, 100.0, 1.0, 30.0);
        assert_eq!(c.set(f64::NAN), 30.0);
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let c = Control::new("x", 10.0, 0.0, 1.0, 5.0);
        assert_eq!((c.min(), c.max()), (0.0, 10.0));
    }

    #[test]
    fn labels_follow_step_precision() {
        assert_eq!(Control::new("p", 0.0, 100.0, 1.0, 70.0).label(), "70");
        assert_eq!(Control::new("b", 0.0, 1.0, 0.05, 0.25).label(), "0.25");
    }

    #[test]
    fn from_schema_skips_non_numeric_entries() {
        let panel = ControlPanel::from_schema(&schema(), &json!({}));
        let names: Vec<&str> = panel.controls().iter().map(Control::name).collect();
        assert_eq!(names.len(), 3);
        assert!(!names.contains(&"mode"));
    }

    #[test]
    fn from_schema_prefers_current_values_over_defaults() {
        let panel = ControlPanel::from_schema(&schema(), &json!({"polymer": 12}));
        assert_eq!(panel.get("polymer").unwrap().value(), 12.0);
        assert_eq!(panel.get("energy").unwrap().value(), 30.0);
    }

    #[test]
    fn set_unknown_control_is_an_error() {
        let mut panel = ControlPanel::from_schema(&schema(), &json!({}));
        assert!(matches!(
            panel.set("viscosity", 1.0),
            Err(EngineError::ParamNotFound(_))
        ));
    }

    #[test]
    fn set_returns_control_for_redisplay() {
        let mut panel = ControlPanel::from_schema(&schema(), &json!({}));
        let control = panel.set("energy", 42.6).unwrap();
        assert_eq!(control.label(), "43");
    }

    #[test]
    fn values_emit_integers_for_integral_controls() {
        let mut panel = ControlPanel::from_schema(&schema(), &json!({}));
        panel.set("polymer", 55.0).unwrap();
        let values = panel.values();
        assert_eq!(values["polymer"], json!(55));
        assert!(values["polymer"].is_u64());
        assert!(values["blend"].is_f64());
        assert!(values.get("mode").is_none());
    }

    #[test]
    fn non_object_schema_yields_empty_panel() {
        let panel = ControlPanel::from_schema(&json!([1, 2]), &json!({}));
        assert!(panel.controls().is_empty());
    }
}
