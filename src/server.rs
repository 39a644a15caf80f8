//!
//! In-memory DOM, for rendering slideshow markup outside a browser
//! and for exercising the controller in tests.
//!

use crate::config::SlideshowConfig;
use crate::error::Error;
use crate::Dom;

mod server_dom;

pub use server_dom::{Node, NodeKind, RcNode};

///
/// A document consisting of a `<body>` element.
///
/// Cloning is cheap and yields a handle to the same tree.
///
#[derive(Clone)]
pub struct ServerDom {
    body: RcNode,
}

impl ServerDom {
    pub fn new() -> Self {
        Self {
            body: Node::create_element("body", &[]),
        }
    }

    pub fn body(&self) -> &RcNode {
        &self.body
    }

    pub fn builder_at_body(&self) -> ServerBuilder {
        ServerBuilder {
            stack: vec![self.body.clone()],
        }
    }

    /// Append the standard slideshow markup: a container with `n_slides`
    /// slides and prev/next controls, followed by a row of dots.
    ///
    /// Slides, controls and dots take `slide_class`, `prev_class`,
    /// `next_class` and `indicator_class` from `config`. The surrounding
    /// `slideshow-container`, `fade` and `numbertext` classes are fixed.
    /// [SlideshowConfig::with_classes] only sets the slide and dot classes,
    /// so controls keep the `prev` / `next` defaults.
    pub fn mount_slideshow(&self, n_slides: usize, config: &SlideshowConfig) -> Result<(), Error> {
        let mut builder = self.builder_at_body();

        builder.enter_element("div", &["slideshow-container"])?;
        for n in 1..=n_slides {
            builder.enter_element("div", &[config.slide_class.as_str(), "fade"])?;
            builder.enter_element("div", &["numbertext"])?;
            builder.text(&format!("{} / {}", n, n_slides))?;
            builder.exit_element()?;
            builder.exit_element()?;
        }
        builder.enter_element("a", &[config.prev_class.as_str()])?;
        builder.text("\u{276e}")?;
        builder.exit_element()?;
        builder.enter_element("a", &[config.next_class.as_str()])?;
        builder.text("\u{276f}")?;
        builder.exit_element()?;
        builder.exit_element()?;

        builder.enter_element("div", &[])?;
        for _ in 0..n_slides {
            builder.enter_element("span", &[config.indicator_class.as_str()])?;
            builder.exit_element()?;
        }
        builder.exit_element()?;

        Ok(())
    }

    pub fn render(&self) -> String {
        self.body.to_string()
    }
}

impl Default for ServerDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for ServerDom {
    type Element = RcNode;

    fn slides(&self, config: &SlideshowConfig) -> Result<Vec<RcNode>, Error> {
        Ok(self.body.elements_by_class_name(&config.slide_class))
    }

    fn indicators(&self, config: &SlideshowConfig) -> Result<Vec<RcNode>, Error> {
        Ok(self.body.elements_by_class_name(&config.indicator_class))
    }

    fn set_shown(&self, element: &RcNode, shown: bool, config: &SlideshowConfig) -> Result<(), Error> {
        element.set_display(config.display_value(shown))
    }

    fn set_active(&self, element: &RcNode, active: bool, config: &SlideshowConfig) -> Result<(), Error> {
        if active {
            element.add_class(&config.active_class)
        } else {
            element.remove_class(&config.active_class)
        }
    }
}

///
/// Appends nodes at a cursor that descends into entered elements.
///
pub struct ServerBuilder {
    stack: Vec<RcNode>,
}

impl ServerBuilder {
    fn parent(&self) -> &RcNode {
        // The body is never popped
        &self.stack[self.stack.len() - 1]
    }

    pub fn enter_element(&mut self, tag_name: &'static str, classes: &[&str]) -> Result<RcNode, Error> {
        let element = self
            .parent()
            .append_child(Node::create_element(tag_name, classes))?;
        self.stack.push(element.clone());
        Ok(element)
    }

    pub fn text(&mut self, text: &str) -> Result<RcNode, Error> {
        self.parent().append_child(Node::create_text(text.to_string()))
    }

    pub fn exit_element(&mut self) -> Result<RcNode, Error> {
        if self.stack.len() <= 1 {
            return Err(Error::DomCorruption);
        }

        self.stack.pop().ok_or(Error::DomCorruption)
    }
}
