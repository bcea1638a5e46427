#![deny(unsafe_code)]
//! Browser bindings for the polymer sketch.
//!
//! [`mount`] creates a canvas inside a container element, wires the
//! `polymerSlider` / `concentrationSlider` / `energySlider` range inputs (and
//! their `...Value` labels) to the sketch's controls, and drives the frame
//! loop from `requestAnimationFrame`.

use glam::DVec2;
use polymer_sketch_core::canvas::Painter;
use polymer_sketch_core::color::Rgba;
use polymer_sketch_core::{Control, Engine};
use polymer_sketch_engines::{EngineKind, Sketch};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlInputElement};

/// Canvas size when not fitting a container.
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 400;

/// Control name, slider element id and label element id.
const SLIDERS: &[(&str, &str, &str)] = &[
    ("polymer", "polymerSlider", "polymerValue"),
    ("concentration", "concentrationSlider", "concentrationValue"),
    ("energy", "energySlider", "energyValue"),
];

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// [`Painter`] over a browser 2D context.
pub struct Canvas2dPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl Painter for Canvas2dPainter {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_background(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, center: DVec2, diameter: f64, color: Rgba) {
        if !center.is_finite() || diameter <= 0.0 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x, center.y, diameter * 0.5, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}

/// Handle to a mounted sketch.
#[wasm_bindgen]
pub struct SketchHandle {
    sketch: Rc<RefCell<Sketch>>,
}

#[wasm_bindgen]
impl SketchHandle {
    /// Feeds a control value as if its slider moved; returns the label text.
    pub fn input(&self, name: &str, value: f64) -> Result<String, JsValue> {
        self.sketch
            .borrow_mut()
            .input(name, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current engine parameters as a JSON string.
    pub fn params(&self) -> String {
        self.sketch.borrow().engine().params().to_string()
    }

    /// Frames drawn since mounting.
    pub fn frames(&self) -> f64 {
        self.sketch.borrow().frames() as f64
    }

    /// Live particle count.
    pub fn particle_count(&self) -> usize {
        self.sketch.borrow().engine().population()
    }

    /// Rebuilds the particle population from the current settings.
    pub fn reset(&self) {
        self.sketch.borrow_mut().reset();
    }
}

/// Mounts a sketch into the element with id `container_id`.
///
/// `mode` is `"fade"` or `"wrap"`. With `fit_container` the canvas takes
/// the container's width (and a fixed 400 px height), otherwise 800x400.
#[wasm_bindgen]
pub fn mount(container_id: &str, mode: &str, fit_container: bool) -> Result<SketchHandle, JsValue> {
    let document = web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{container_id}'")))?;

    let (width, height) = canvas_size(fit_container, container.client_width());
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    container.append_child(&canvas)?;

    let seed = js_sys::Date::now() as u64;
    let params = serde_json::json!({ "mode": mode });
    let engine = EngineKind::from_name("polymer", width as usize, height as usize, seed, &params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let sketch = Sketch::new(engine).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let sketch = Rc::new(RefCell::new(sketch));

    bind_sliders(&document, &sketch)?;
    start_loop(Canvas2dPainter::new(&canvas)?, Rc::clone(&sketch))?;

    Ok(SketchHandle { sketch })
}

fn canvas_size(fit_container: bool, container_width: i32) -> (u32, u32) {
    if fit_container && container_width > 0 {
        (container_width as u32, DEFAULT_HEIGHT)
    } else {
        (DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Attaches `input` listeners to whichever sliders exist on the page.
fn bind_sliders(document: &Document, sketch: &Rc<RefCell<Sketch>>) -> Result<(), JsValue> {
    for &(name, slider_id, label_id) in SLIDERS {
        let Some(slider) = document
            .get_element_by_id(slider_id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        let label = document.get_element_by_id(label_id);

        if let Some(control) = sketch.borrow().controls().get(name) {
            configure_slider(&slider, control);
            if let Some(label) = &label {
                label.set_text_content(Some(&control.label()));
            }
        }

        let sketch = Rc::clone(sketch);
        let input = slider.clone();
        let on_input = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let result = sketch.borrow_mut().input(name, input.value_as_number());
            if let (Ok(text), Some(label)) = (result, &label) {
                label.set_text_content(Some(&text));
            }
        });
        slider.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        // The listener lives as long as the page.
        on_input.forget();
    }
    Ok(())
}

fn configure_slider(slider: &HtmlInputElement, control: &Control) {
    slider.set_min(&control.min().to_string());
    slider.set_max(&control.max().to_string());
    if control.step() > 0.0 {
        slider.set_step(&control.step().to_string());
    }
    slider.set_value(&control.value().to_string());
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Runs one sketch frame per animation frame until a frame fails.
fn start_loop(mut painter: Canvas2dPainter, sketch: Rc<RefCell<Sketch>>) -> Result<(), JsValue> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);

    *slot.borrow_mut() = Some(Closure::new(move || {
        // A failed frame stops the loop by not scheduling the next one.
        if sketch.borrow_mut().frame(&mut painter).is_err() {
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = request_animation_frame(callback);
        }
    }));

    let started = match slot.borrow().as_ref() {
        Some(callback) => request_animation_frame(callback).map(|_| ()),
        None => Ok(()),
    };
    started
}
