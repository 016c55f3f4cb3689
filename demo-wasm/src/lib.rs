use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tearcloth::{
    ClothConfig, FrameScheduler, InputAdapter, PointerButton, SimulationStepper, StrokeStyle,
    Surface,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

const CANVAS_WIDTH: u32 = 1200;
const CANVAS_HEIGHT: u32 = 800;

// ---- Host glue ----

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface<f32> for CanvasSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.clear_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ctx.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ctx.line_to(x as f64, y as f64);
    }

    #[allow(deprecated)]
    fn stroke(&mut self, style: &StrokeStyle) {
        self.ctx.set_stroke_style(&JsValue::from_str(&style.color));
        self.ctx.set_line_width(style.width);
        self.ctx.stroke();
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` as a [`FrameScheduler`].
struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
    pending: Option<i32>,
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) {
        if let Some(cb) = self.callback.borrow().as_ref() {
            match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.pending = Some(id),
                Err(err) => web_sys::console::error_2(&"requestAnimationFrame failed".into(), &err),
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                web_sys::console::error_2(&"cancelAnimationFrame failed".into(), &err);
            }
        }
    }
}

struct App {
    stepper: SimulationStepper<f32>,
    input: InputAdapter<f32>,
    surface: CanvasSurface,
    last_timestamp: Option<f64>,
}

fn js_error(err: tearcloth::ClothError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn pointer_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        (event.client_x() as f64 - rect.left()) as f32,
        (event.client_y() as f64 - rect.top()) as f32,
    )
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    app: Rc<RefCell<App>>,
    frames: Rc<RefCell<AnimationFrames>>,
    canvas: HtmlCanvasElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

#[wasm_bindgen]
impl ClothDemo {
    /// Attach to the `<canvas>` with id `canvas_id` and build the default cloth.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ClothDemo, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let config = ClothConfig::new().with_surface_size(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
        let stepper = SimulationStepper::from_config(config).map_err(js_error)?;
        let input = InputAdapter::new(stepper.mesh());
        web_sys::console::log_1(
            &format!(
                "ClothDemo created: {} particles, {} constraints",
                stepper.mesh().particle_count(),
                stepper.mesh().constraint_count()
            )
            .into(),
        );

        let app = Rc::new(RefCell::new(App {
            stepper,
            input,
            surface: CanvasSurface { ctx },
            last_timestamp: None,
        }));
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let frames = Rc::new(RefCell::new(AnimationFrames {
            window,
            callback: callback.clone(),
            pending: None,
        }));

        {
            let app = app.clone();
            // Weak: `frames` owns this closure through `callback`.
            let frames: Weak<RefCell<AnimationFrames>> = Rc::downgrade(&frames);
            *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                let Some(frames) = frames.upgrade() else {
                    return;
                };
                let mut app = app.borrow_mut();
                let elapsed = match app.last_timestamp.replace(timestamp) {
                    Some(prev) => ((timestamp - prev) / 1000.0) as f32,
                    None => 0.016,
                };
                let App { stepper, surface, .. } = &mut *app;
                stepper.tick(surface, &mut *frames.borrow_mut(), elapsed);
            }) as Box<dyn FnMut(f64)>));
        }

        let mut listeners = Vec::new();

        let on_move = {
            let app = app.clone();
            let canvas_ref = canvas.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                event.prevent_default();
                let (x, y) = pointer_position(&canvas_ref, &event);
                let mut app = app.borrow_mut();
                let App { stepper, input, .. } = &mut *app;
                if let Err(err) = input.pointer_move(stepper.mesh_mut(), x, y) {
                    web_sys::console::warn_1(&err.to_string().into());
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        listeners.push(("mousemove", on_move));

        let on_down = {
            let app = app.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let button = if event.button() == 2 {
                    PointerButton::Secondary
                } else {
                    PointerButton::Primary
                };
                app.borrow_mut().input.pointer_down(button);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        canvas.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
        listeners.push(("mousedown", on_down));

        let on_up = {
            let app = app.clone();
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                app.borrow_mut().input.pointer_up();
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        canvas.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;
        listeners.push(("mouseup", on_up));

        let on_context_menu = Closure::wrap(Box::new(|event: MouseEvent| {
            event.prevent_default();
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback(
            "contextmenu",
            on_context_menu.as_ref().unchecked_ref(),
        )?;
        listeners.push(("contextmenu", on_context_menu));

        Ok(ClothDemo {
            app,
            frames,
            canvas,
            listeners,
        })
    }

    /// Begin the animation loop. No-op if it is already running.
    pub fn start(&self) -> bool {
        let mut frames = self.frames.borrow_mut();
        self.app.borrow_mut().stepper.start(&mut *frames)
    }

    /// Cancel the pending frame and halt the loop.
    pub fn stop(&self) -> bool {
        let mut frames = self.frames.borrow_mut();
        let mut app = self.app.borrow_mut();
        app.last_timestamp = None;
        app.stepper.stop(&mut *frames)
    }

    pub fn is_running(&self) -> bool {
        self.app.borrow().stepper.is_running()
    }

    pub fn constraint_count(&self) -> usize {
        self.app.borrow().stepper.mesh().constraint_count()
    }

    /// Returns flat [x0, y0, x1, y1, ...] in row-major order
    pub fn positions(&self) -> Vec<f32> {
        let app = self.app.borrow();
        let pos = app.stepper.mesh().positions();
        let mut out = Vec::with_capacity(pos.len() * 2);
        for p in &pos {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }
}

impl Drop for ClothDemo {
    fn drop(&mut self) {
        self.frames.borrow_mut().cancel_frame();
        for (event, listener) in &self.listeners {
            if let Err(err) = self
                .canvas
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            {
                web_sys::console::error_2(&"removeEventListener failed".into(), &err);
            }
        }
    }
}
