//! The per-frame loop shared by every host.
//!
//! A [`Sketch`] owns one engine and the range controls built from its
//! schema. Hosts call [`Sketch::frame`] once per animation tick and
//! [`Sketch::input`] whenever a slider moves.

use polymer_sketch_core::canvas::{Canvas, Painter};
use polymer_sketch_core::error::EngineError;
use polymer_sketch_core::{ControlPanel, Engine, Seed};
use tracing::debug;

use crate::EngineKind;

pub struct Sketch {
    engine: EngineKind,
    controls: ControlPanel,
    frames: u64,
}

impl Sketch {
    /// Wraps an engine, deriving its controls from the parameter schema.
    ///
    /// The engine is handed the controls' clamped and snapped values right
    /// away, so the first slider input cannot move any other setting.
    pub fn new(mut engine: EngineKind) -> Result<Self, EngineError> {
        let controls = ControlPanel::from_schema(&engine.param_schema(), &engine.params());
        engine.set_params(&controls.values())?;
        Ok(Self {
            engine,
            controls,
            frames: 0,
        })
    }

    pub fn engine(&self) -> &EngineKind {
        &self.engine
    }

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draws one frame: background wash, one simulation step, then particles.
    pub fn frame(&mut self, painter: &mut dyn Painter) -> Result<(), EngineError> {
        painter.fill_background(self.engine.background());
        self.engine.step()?;
        self.engine.draw(painter);
        self.frames += 1;
        Ok(())
    }

    /// Rebuilds the engine's particle population from its current settings.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Handles a slider input event and returns the text for its label.
    ///
    /// The raw value is clamped and snapped by the control, then the whole
    /// control set is handed to the engine as a new configuration.
    pub fn input(&mut self, name: &str, raw: f64) -> Result<String, EngineError> {
        let label = self.controls.set(name, raw)?.label();
        self.engine.set_params(&self.controls.values())?;
        debug!(control = name, value = %label, "control changed");
        Ok(label)
    }
}

/// Renders a [`Seed`] headlessly onto a fresh canvas.
///
/// The canvas starts as the opaque engine background and receives
/// `seed.frames` frames.
pub fn render(seed: &Seed) -> Result<(Canvas, Sketch), EngineError> {
    let engine = EngineKind::from_seed(seed)?;
    let mut canvas = Canvas::new(seed.width, seed.height, engine.background().color)?;
    let mut sketch = Sketch::new(engine)?;
    for _ in 0..seed.frames {
        sketch.frame(&mut canvas)?;
    }
    debug!(
        engine = %seed.engine,
        frames = seed.frames,
        population = sketch.engine().population(),
        "render complete"
    );
    Ok((canvas, sketch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use polymer_sketch_field::{Mode, ParticleField, PolymerParams};
    use serde_json::json;

    fn sketch(params: serde_json::Value) -> Sketch {
        Sketch::new(EngineKind::from_name("polymer", 200, 100, 7, &params).unwrap()).unwrap()
    }

    #[test]
    fn controls_cover_the_three_sliders() {
        let s = sketch(json!({}));
        let names: Vec<&str> = s.controls().controls().iter().map(|c| c.name()).collect();
        for name in ["polymer", "concentration", "energy"] {
            assert!(names.contains(&name), "missing control {name}");
        }
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn controls_start_at_engine_values() {
        let s = sketch(json!({"polymer": 12, "energy": 80}));
        assert_eq!(s.controls().get("polymer").unwrap().value(), 12.0);
        assert_eq!(s.controls().get("energy").unwrap().value(), 80.0);
        assert_eq!(s.controls().get("concentration").unwrap().value(), 150.0);
    }

    fn positions(sketch: &Sketch) -> Vec<DVec2> {
        match sketch.engine() {
            EngineKind::Polymer(field) => field.particles().iter().map(|p| p.position).collect(),
        }
    }

    #[test]
    fn new_syncs_engine_with_clamped_controls() {
        let params = PolymerParams {
            polymer: 70.4,
            concentration: 5,
            mode: Mode::Wrap,
            ..PolymerParams::default()
        };
        let field = ParticleField::new(200, 100, 7, params).unwrap();
        let s = Sketch::new(EngineKind::Polymer(field)).unwrap();
        assert_eq!(s.engine().population(), 10);
        assert_eq!(s.engine().params()["polymer"], 70.0);
    }

    #[test]
    fn slider_input_does_not_rebuild_when_concentration_is_unchanged() {
        let params = PolymerParams {
            concentration: 5,
            mode: Mode::Wrap,
            ..PolymerParams::default()
        };
        let field = ParticleField::new(200, 100, 7, params).unwrap();
        let mut s = Sketch::new(EngineKind::Polymer(field)).unwrap();
        let before = positions(&s);
        s.input("polymer", 20.0).unwrap();
        s.input("energy", 55.0).unwrap();
        assert_eq!(positions(&s), before);
        assert_eq!(s.engine().population(), 10);
    }

    #[test]
    fn input_updates_engine_and_returns_label() {
        let mut s = sketch(json!({}));
        let label = s.input("energy", 42.4).unwrap();
        assert_eq!(label, "42");
        assert_eq!(s.engine().params()["energy"], 42.0);
    }

    #[test]
    fn input_clamps_out_of_range_values() {
        let mut s = sketch(json!({}));
        assert_eq!(s.input("concentration", 5000.0).unwrap(), "300");
        assert_eq!(s.input("concentration", 1.0).unwrap(), "10");
    }

    #[test]
    fn input_unknown_control_is_an_error() {
        let mut s = sketch(json!({}));
        assert!(matches!(
            s.input("viscosity", 1.0),
            Err(EngineError::ParamNotFound(_))
        ));
    }

    #[test]
    fn input_keeps_non_slider_params() {
        let mut s = sketch(json!({"mode": "wrap", "palette": "ember"}));
        s.input("polymer", 5.0).unwrap();
        assert_eq!(s.engine().params()["mode"], "wrap");
        assert_eq!(s.engine().params()["palette"], "ember");
    }

    #[test]
    fn wrap_concentration_input_rebuilds_population() {
        let mut s = sketch(json!({"mode": "wrap"}));
        s.input("concentration", 50.0).unwrap();
        assert_eq!(s.engine().population(), 50);
    }

    #[test]
    fn reset_keeps_settings() {
        let mut s = sketch(json!({"mode": "wrap"}));
        s.input("concentration", 40.0).unwrap();
        s.reset();
        assert_eq!(s.engine().population(), 40);
        assert_eq!(s.controls().get("concentration").unwrap().value(), 40.0);
    }

    #[test]
    fn frame_counts_and_paints() {
        let mut s = sketch(json!({}));
        let mut canvas = Canvas::new(200, 100, s.engine().background().color).unwrap();
        s.frame(&mut canvas).unwrap();
        s.frame(&mut canvas).unwrap();
        assert_eq!(s.frames(), 2);
        let bg = s.engine().background().color;
        assert!(canvas.pixels().iter().any(|&p| p != bg));
    }

    #[test]
    fn render_is_deterministic() {
        let mut seed = Seed::new("polymer", 120, 80, 5);
        seed.frames = 30;
        let (a, _) = render(&seed).unwrap();
        let (b, _) = render(&seed).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn render_zero_frames_is_plain_background() {
        let seed = Seed::new("polymer", 10, 10, 5);
        let (canvas, sketch) = render(&seed).unwrap();
        let bg = sketch.engine().background().color;
        assert!(canvas.pixels().iter().all(|&p| p == bg));
    }

    #[test]
    fn render_rejects_unknown_engine() {
        let seed = Seed::new("gravity", 10, 10, 5);
        assert!(matches!(render(&seed), Err(EngineError::UnknownEngine(_))));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn input_label_stays_within_control_range(
                index in 0usize..3,
                raw in -1000.0_f64..1000.0,
            ) {
                let name = ["polymer", "concentration", "energy"][index];
                let mut s = sketch(json!({"mode": "wrap", "concentration": 10}));
                let label = s.input(name, raw).unwrap();
                let control = s.controls().get(name).unwrap();
                let shown: f64 = label.parse().unwrap();
                prop_assert!(shown >= control.min() && shown <= control.max());
                prop_assert_eq!(shown, control.value());
                prop_assert_eq!(s.engine().params()[name].as_f64(), Some(control.value()));
            }
        }
    }
}
