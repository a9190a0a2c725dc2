//! The `<ki-games-invaders>` custom element
//!
//! A small inline JS shim defines the element class; its connected and
//! disconnected callbacks drive an `InvadersWidget` built by a Rust factory.
//! Closures handed to the browser hold `Weak` references to the widget, so
//! callbacks arriving after it was freed do nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, ShadowRoot, Window};

use super::canvas::CanvasSurface;
use crate::INVADERS_TAG;
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::engine::Engine;
use crate::platform::{FrameHandle, Host};
use crate::registry::{ElementRegistry, RegistryError};
use crate::renderer::Overlay;
use crate::tuning::Tuning;

#[wasm_bindgen(inline_js = "
    export function define_game_element(name, factory) {
        if (customElements.get(name)) {
            return false;
        }
        customElements.define(name, class extends HTMLElement {
            constructor() {
                super();
                this.attachShadow({ mode: 'open' });
                this._widget = null;
            }
            connectedCallback() {
                const widget = factory(this);
                if (widget) {
                    this._widget = widget;
                    widget.connect();
                }
            }
            disconnectedCallback() {
                if (this._widget) {
                    this._widget.disconnect();
                    this._widget.free();
                    this._widget = null;
                }
            }
        });
        return true;
    }
")]
extern "C" {
    fn define_game_element(name: &str, factory: &js_sys::Function) -> bool;
}

thread_local! {
    static REGISTRY: RefCell<ElementRegistry> = RefCell::new(ElementRegistry::new());
}

/// Register `<ki-games-invaders>` with the browser (once per page).
/// Called by the `games/ki-games-invaders.js` bootstrap the loader injects.
#[wasm_bindgen(js_name = defineInvaders)]
pub fn register() {
    let name = match REGISTRY.with(|r| r.borrow_mut().define(INVADERS_TAG)) {
        Ok(name) => name,
        Err(RegistryError::AlreadyDefined(name)) => {
            log::debug!("<{}> already registered", name);
            return;
        }
        Err(e) => {
            log::error!("Cannot register widget: {}", e);
            return;
        }
    };

    let factory = Closure::<dyn FnMut(HtmlElement) -> JsValue>::new(|host: HtmlElement| {
        match InvadersWidget::new(host) {
            Ok(widget) => widget.into(),
            Err(e) => {
                log::error!("Failed to build invaders widget: {:?}", e);
                JsValue::NULL
            }
        }
    });

    if define_game_element(name.as_str(), factory.as_ref().unchecked_ref()) {
        log::info!("Registered <{}>", name);
    } else {
        log::warn!("<{}> was already defined by another script", name);
    }
    // Registered for the page lifetime
    factory.forget();
}

fn shell_html() -> String {
    format!(
        r#"<style>
    :host {{
        display: block;
        position: relative;
        width: {w}px;
        height: {h}px;
        border: 2px solid #00ff00;
        background-color: #000000;
        font-family: 'Courier New', Courier, monospace;
    }}
    canvas {{
        display: block;
    }}
    #overlay {{
        position: absolute;
        top: 0;
        left: 0;
        width: 100%;
        height: 100%;
        display: none;
        flex-direction: column;
        justify-content: center;
        align-items: center;
        text-align: center;
        font-size: 24px;
        color: #00ff00;
        background: rgba(0, 0, 0, 0.7);
    }}
</style>
<canvas id="game-canvas" width="{w}" height="{h}"></canvas>
<div id="overlay"></div>"#,
        w = GAME_WIDTH as u32,
        h = GAME_HEIGHT as u32,
    )
}

/// Host services backed by `document` key listeners and animation frames
pub struct DomHost {
    window: Window,
    document: Document,
    callbacks: Option<Callbacks>,
}

/// JS callbacks routed back into one widget
struct Callbacks {
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
    on_key_up: Closure<dyn FnMut(KeyboardEvent)>,
    on_frame: Closure<dyn FnMut(f64)>,
}

impl DomHost {
    fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            callbacks: None,
        }
    }

    /// Route key and frame callbacks to `widget`
    fn bind(&mut self, widget: &Weak<RefCell<Widget>>) {
        let on_key_down = {
            let widget = widget.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(widget) = widget.upgrade() {
                    widget.borrow_mut().engine.key_down(&event.code());
                }
            })
        };

        let on_key_up = {
            let widget = widget.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(widget) = widget.upgrade() {
                    widget.borrow_mut().engine.key_up(&event.code());
                }
            })
        };

        let on_frame = {
            let widget = widget.clone();
            Closure::<dyn FnMut(_)>::new(move |_time: f64| {
                if let Some(widget) = widget.upgrade() {
                    widget.borrow_mut().run_frame();
                }
            })
        };

        self.callbacks = Some(Callbacks {
            on_key_down,
            on_key_up,
            on_frame,
        });
    }
}

impl Host for DomHost {
    fn subscribe_input(&mut self) {
        let Some(cb) = &self.callbacks else {
            log::error!("Input subscription before the host was bound");
            return;
        };
        let _ = self
            .document
            .add_event_listener_with_callback("keydown", cb.on_key_down.as_ref().unchecked_ref());
        let _ = self
            .document
            .add_event_listener_with_callback("keyup", cb.on_key_up.as_ref().unchecked_ref());
    }

    fn unsubscribe_input(&mut self) {
        let Some(cb) = &self.callbacks else {
            return;
        };
        let _ = self.document.remove_event_listener_with_callback(
            "keydown",
            cb.on_key_down.as_ref().unchecked_ref(),
        );
        let _ = self
            .document
            .remove_event_listener_with_callback("keyup", cb.on_key_up.as_ref().unchecked_ref());
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let cb = self.callbacks.as_ref()?;
        match self
            .window
            .request_animation_frame(cb.on_frame.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

/// Overlay `div` above the canvas; rewritten only when its content changes
struct OverlayLayer {
    document: Document,
    element: HtmlElement,
    shown: Option<Overlay>,
}

impl OverlayLayer {
    fn show(&mut self, overlay: Option<Overlay>) {
        if overlay == self.shown {
            return;
        }

        self.element.set_text_content(None);
        let style = self.element.style();
        match &overlay {
            Some(content) => {
                self.append("h1", &content.title);
                for line in &content.lines {
                    self.append("p", line);
                }
                let _ = style.set_property("display", "flex");
            }
            None => {
                let _ = style.set_property("display", "none");
            }
        }
        self.shown = overlay;
    }

    fn append(&self, tag: &str, text: &str) {
        if let Ok(el) = self.document.create_element(tag) {
            el.set_text_content(Some(text));
            let _ = self.element.append_child(&el);
        }
    }
}

struct Widget {
    engine: Engine<DomHost>,
    canvas: CanvasSurface,
    overlay: OverlayLayer,
}

impl Widget {
    fn run_frame(&mut self) {
        let overlay = self.engine.frame(&mut self.canvas);
        self.overlay.show(overlay);
    }
}

/// Handle the element shim holds between connect and disconnect
#[wasm_bindgen]
pub struct InvadersWidget {
    inner: Rc<RefCell<Widget>>,
}

#[wasm_bindgen]
impl InvadersWidget {
    /// Build the shadow-DOM shell and an engine for `host`
    #[wasm_bindgen(constructor)]
    pub fn new(host: HtmlElement) -> Result<InvadersWidget, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root: ShadowRoot = host
            .shadow_root()
            .ok_or_else(|| JsValue::from_str("element has no shadow root"))?;

        root.set_inner_html(&shell_html());

        let canvas: HtmlCanvasElement = root
            .get_element_by_id("game-canvas")
            .ok_or_else(|| JsValue::from_str("missing canvas"))?
            .dyn_into()?;
        let overlay: HtmlElement = root
            .get_element_by_id("overlay")
            .ok_or_else(|| JsValue::from_str("missing overlay"))?
            .dyn_into()?;

        let canvas = CanvasSurface::new(&canvas)?;
        let overlay = OverlayLayer {
            document: document.clone(),
            element: overlay,
            shown: None,
        };
        let seed = js_sys::Date::now() as u64;

        let engine = Engine::new(DomHost::new(window, document), Tuning::default(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let inner = Rc::new(RefCell::new(Widget {
            engine,
            canvas,
            overlay,
        }));
        inner
            .borrow_mut()
            .engine
            .host_mut()
            .bind(&Rc::downgrade(&inner));

        log::debug!("Invaders widget built (seed {})", seed);
        Ok(InvadersWidget { inner })
    }

    /// Start the game (element connected)
    pub fn connect(&self) {
        self.inner.borrow_mut().engine.attach();
    }

    /// Stop the game (element disconnected)
    pub fn disconnect(&self) {
        self.inner.borrow_mut().engine.detach();
    }
}
