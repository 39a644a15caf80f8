//!
//! Browser backend: the live DOM via web-sys, and the JavaScript-facing
//! `plusSlides` / `currentSlide` entry points.
//!

use crate::config::SlideshowConfig;
use crate::controller::Slideshow;
use crate::error::Error;
use crate::Dom;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod callback;

pub use callback::ClickBinding;

#[derive(Clone)]
pub struct WebDom {
    document: web_sys::Document,
}

impl WebDom {
    pub fn new() -> Result<Self, Error> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(Error::MissingDocument)?;

        Ok(Self::from_document(document))
    }

    pub fn from_document(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn elements_by_class_name(&self, class: &str) -> Vec<web_sys::Element> {
        let collection = self.document.get_elements_by_class_name(class);

        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }
}

impl Dom for WebDom {
    type Element = web_sys::Element;

    fn slides(&self, config: &SlideshowConfig) -> Result<Vec<web_sys::Element>, Error> {
        Ok(self.elements_by_class_name(&config.slide_class))
    }

    fn indicators(&self, config: &SlideshowConfig) -> Result<Vec<web_sys::Element>, Error> {
        Ok(self.elements_by_class_name(&config.indicator_class))
    }

    fn set_shown(
        &self,
        element: &web_sys::Element,
        shown: bool,
        config: &SlideshowConfig,
    ) -> Result<(), Error> {
        element
            .dyn_ref::<web_sys::HtmlElement>()
            .ok_or(Error::NotAnElement)?
            .style()
            .set_property("display", config.display_value(shown))
            .map_err(|_| Error::SetStyle)
    }

    fn set_active(
        &self,
        element: &web_sys::Element,
        active: bool,
        config: &SlideshowConfig,
    ) -> Result<(), Error> {
        let class_list = element.class_list();

        let result = if active {
            class_list.add_1(&config.active_class)
        } else {
            class_list.remove_1(&config.active_class)
        };

        result.map_err(|_| Error::SetClass)
    }
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

#[wasm_bindgen(inline_js = "export function install_slideshow(slideshow) {
    window.plusSlides = (n) => slideshow.plusSlides(n);
    window.currentSlide = (n) => slideshow.currentSlide(n);
}")]
extern "C" {
    fn install_slideshow(slideshow: JsValue);
}

type Shared = Rc<RefCell<Slideshow<WebDom>>>;

///
/// A slideshow over the page's document, exported to JavaScript.
///
#[wasm_bindgen]
pub struct WebSlideshow {
    slideshow: Shared,
    bindings: Vec<ClickBinding>,
}

impl WebSlideshow {
    pub fn with_config(config: SlideshowConfig) -> Result<Self, Error> {
        let slideshow = Slideshow::mount(WebDom::new()?, config)?;

        Ok(Self {
            slideshow: Rc::new(RefCell::new(slideshow)),
            bindings: vec![],
        })
    }

    /// Attach click handlers to the prev/next controls and to every dot.
    /// Replaces any handlers bound earlier.
    pub fn bind(&mut self) -> Result<usize, Error> {
        self.bindings.clear();

        let (prev, next, dots) = {
            let slideshow = self.slideshow.borrow();
            let dom = slideshow.dom();
            let config = slideshow.config();

            (
                dom.elements_by_class_name(&config.prev_class),
                dom.elements_by_class_name(&config.next_class),
                dom.indicators(config)?,
            )
        };

        for element in prev {
            self.bind_one(element, |slideshow| slideshow.previous())?;
        }
        for element in next {
            self.bind_one(element, |slideshow| slideshow.next())?;
        }
        for (position, element) in dots.into_iter().enumerate() {
            let index = position as i64 + 1;
            self.bind_one(element, move |slideshow| slideshow.jump_to(index))?;
        }

        tracing::debug!(bindings = self.bindings.len(), "bound slideshow controls");

        Ok(self.bindings.len())
    }

    fn bind_one<F>(&mut self, element: web_sys::Element, action: F) -> Result<(), Error>
    where
        F: Fn(&mut Slideshow<WebDom>) -> Result<crate::RenderPlan, Error> + 'static,
    {
        let element = element
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| Error::NotAnElement)?;
        let slideshow = self.slideshow.clone();

        self.bindings.push(ClickBinding::new(element, move || {
            if let Err(error) = action(&mut slideshow.borrow_mut()) {
                tracing::error!(%error, "slideshow click failed");
            }
        }));

        Ok(())
    }
}

#[wasm_bindgen]
impl WebSlideshow {
    /// Show the first slide of the default `mySlides` / `dot` markup.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebSlideshow, JsValue> {
        Ok(Self::with_config(SlideshowConfig::default())?)
    }

    #[wasm_bindgen(js_name = plusSlides)]
    pub fn plus_slides(&self, n: i32) -> Result<(), JsValue> {
        self.slideshow.borrow_mut().advance(n as i64)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = currentSlide)]
    pub fn current_slide(&self, n: i32) -> Result<(), JsValue> {
        self.slideshow.borrow_mut().jump_to(n as i64)?;
        Ok(())
    }

    pub fn index(&self) -> usize {
        self.slideshow.borrow().index()
    }

    #[wasm_bindgen(js_name = bindControls)]
    pub fn bind_controls(&mut self) -> Result<usize, JsValue> {
        Ok(self.bind()?)
    }

    /// Expose `plusSlides` and `currentSlide` on `window`, so inline
    /// `onclick` attributes in existing markup reach this slideshow.
    #[wasm_bindgen(js_name = installGlobal)]
    pub fn install_global(self) {
        let js_value: JsValue = self.into();

        install_slideshow(js_value);
    }
}

/// Route `tracing` output to the browser console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    if tracing_wasm::try_set_as_global_default().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Page-load entry point for the classic markup.
#[wasm_bindgen(js_name = startSlideshow)]
pub fn start_slideshow() -> Result<(), JsValue> {
    init_logging();
    WebSlideshow::new()?.install_global();
    Ok(())
}
