use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

///
/// A Rust closure installed as an element's `onclick` handler.
///
/// The handler stays installed for as long as the binding lives;
/// dropping it clears `onclick` before the closure is freed.
///
pub struct ClickBinding {
    element: web_sys::HtmlElement,
    _web_closure: Closure<dyn FnMut()>,
}

impl ClickBinding {
    pub fn new(element: web_sys::HtmlElement, function: impl FnMut() + 'static) -> Self {
        let web_closure = Closure::wrap(Box::new(function) as Box<dyn FnMut()>);

        element.set_onclick(Some(web_closure.as_ref().unchecked_ref()));

        Self {
            element,
            _web_closure: web_closure,
        }
    }
}

impl Drop for ClickBinding {
    fn drop(&mut self) {
        self.element.set_onclick(None);
    }
}
