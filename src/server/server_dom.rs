use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Error;

pub type RcNode = Rc<Node>;

pub struct Node {
    pub kind: NodeKind,

    links: RefCell<Links>,
}

pub enum NodeKind {
    Text(RefCell<String>),
    Element {
        tag_name: &'static str,
        classes: RefCell<Vec<String>>,
        display: RefCell<Option<String>>,
    },
}

#[derive(Default)]
struct Links {
    pub parent: Option<Weak<Node>>,

    pub next_sibling: Option<RcNode>,
    pub prev_sibling: Option<Weak<Node>>,

    pub first_child: Option<RcNode>,
    pub last_child: Option<Weak<Node>>,
}

impl Node {
    pub fn is(&self, other: &Node) -> bool {
        self as *const _ == other as *const _
    }

    pub fn create_element(tag_name: &'static str, classes: &[&str]) -> RcNode {
        Rc::new(Node {
            kind: NodeKind::Element {
                tag_name,
                classes: RefCell::new(classes.iter().map(|class| class.to_string()).collect()),
                display: RefCell::new(None),
            },
            links: RefCell::new(Links::default()),
        })
    }

    pub fn create_text(text: String) -> RcNode {
        Rc::new(Node {
            kind: NodeKind::Text(RefCell::new(text)),
            links: RefCell::new(Links::default()),
        })
    }

    pub fn has_class(&self, class: &str) -> bool {
        match &self.kind {
            NodeKind::Element { classes, .. } => classes.borrow().iter().any(|it| it == class),
            NodeKind::Text(_) => false,
        }
    }

    /// Add a class unless already present.
    pub fn add_class(&self, class: &str) -> Result<(), Error> {
        match &self.kind {
            NodeKind::Element { classes, .. } => {
                let mut classes = classes.borrow_mut();
                if !classes.iter().any(|it| it == class) {
                    classes.push(class.to_string());
                }
                Ok(())
            }
            NodeKind::Text(_) => Err(Error::NotAnElement),
        }
    }

    pub fn remove_class(&self, class: &str) -> Result<(), Error> {
        match &self.kind {
            NodeKind::Element { classes, .. } => {
                classes.borrow_mut().retain(|it| it != class);
                Ok(())
            }
            NodeKind::Text(_) => Err(Error::NotAnElement),
        }
    }

    pub fn display(&self) -> Option<String> {
        match &self.kind {
            NodeKind::Element { display, .. } => display.borrow().clone(),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_display(&self, value: &str) -> Result<(), Error> {
        match &self.kind {
            NodeKind::Element { display, .. } => {
                *display.borrow_mut() = Some(value.to_string());
                Ok(())
            }
            NodeKind::Text(_) => Err(Error::NotAnElement),
        }
    }

    pub fn parent(&self) -> Option<RcNode> {
        self.links
            .borrow()
            .parent
            .as_ref()
            .and_then(|parent| parent.upgrade())
    }

    pub fn first_child(&self) -> Option<RcNode> {
        self.links.borrow().first_child.clone()
    }

    pub fn last_child(&self) -> Option<RcNode> {
        self.links
            .borrow()
            .last_child
            .as_ref()
            .and_then(|weak| weak.upgrade())
    }

    pub fn next_sibling(&self) -> Option<RcNode> {
        self.links.borrow().next_sibling.clone()
    }

    pub fn prev_sibling(&self) -> Option<RcNode> {
        self.links
            .borrow()
            .prev_sibling
            .as_ref()
            .and_then(|weak| weak.upgrade())
    }

    pub fn children(&self) -> Vec<RcNode> {
        let mut children = vec![];
        let mut child = self.first_child();

        while let Some(node) = child {
            child = node.next_sibling();
            children.push(node);
        }

        children
    }

    /// All descendant elements carrying `class`, in document order.
    pub fn elements_by_class_name(&self, class: &str) -> Vec<RcNode> {
        fn recurse(node: &Node, class: &str, found: &mut Vec<RcNode>) {
            for child in node.children() {
                if child.has_class(class) {
                    found.push(child.clone());
                }
                recurse(&child, class, found);
            }
        }

        let mut found = vec![];
        recurse(self, class, &mut found);
        found
    }

    pub fn append_child(self: &Rc<Self>, child: RcNode) -> Result<RcNode, Error> {
        self.insert_before(child, None)
    }

    /// Move `child` into this element's child list, before `reference`
    /// (or last when `reference` is `None`).
    /// `reference` must be a child of this element.
    pub fn insert_before(
        self: &Rc<Self>,
        child: RcNode,
        reference: Option<RcNode>,
    ) -> Result<RcNode, Error> {
        if child.is(self) {
            return Err(Error::DomCorruption);
        }
        if let Some(reference) = &reference {
            let is_own_child = reference.parent().map_or(false, |parent| parent.is(self));
            if !is_own_child || reference.is(&child) {
                return Err(Error::DomCorruption);
            }
        }

        child.unlink()?;

        {
            let mut parent_links = self.links.borrow_mut();
            let mut child_links = child.links.borrow_mut();

            if let Some(reference) = reference {
                let mut next_links = reference.links.borrow_mut();

                let old_prev = match &next_links.prev_sibling {
                    Some(weak) => Some(weak.upgrade().ok_or(Error::DomCorruption)?),
                    None => None,
                };

                match old_prev {
                    // first child
                    None => {
                        parent_links.first_child = Some(child.clone());
                    }
                    // not first
                    Some(old_prev) => {
                        old_prev.links.borrow_mut().next_sibling = Some(child.clone());
                        child_links.prev_sibling = Some(Rc::downgrade(&old_prev));
                    }
                }

                next_links.prev_sibling = Some(Rc::downgrade(&child));
                child_links.next_sibling = Some(reference.clone());
            } else {
                let last_child = parent_links.last_child.as_ref().and_then(|weak| weak.upgrade());

                match last_child {
                    Some(last_child) => {
                        let mut last_links = last_child.links.borrow_mut();
                        if last_links.next_sibling.is_some() {
                            return Err(Error::DomCorruption);
                        }

                        last_links.next_sibling = Some(child.clone());
                        child_links.prev_sibling = Some(Rc::downgrade(&last_child));
                    }
                    None => {
                        parent_links.first_child = Some(child.clone());
                    }
                }

                parent_links.last_child = Some(Rc::downgrade(&child));
            }

            child_links.parent = Some(Rc::downgrade(self));
        }

        Ok(child)
    }

    pub fn remove_child(&self, child: RcNode) -> Result<RcNode, Error> {
        match child.parent() {
            Some(parent) if parent.is(self) => {
                child.unlink()?;
                Ok(child)
            }
            _ => Err(Error::DomCorruption),
        }
    }

    /// Unlink from current child list
    fn unlink(&self) -> Result<(), Error> {
        let mut self_links = self.links.borrow_mut();

        let parent = match self_links.parent.as_ref().and_then(|parent| parent.upgrade()) {
            Some(parent) => parent,
            None => {
                if self_links.prev_sibling.is_some() || self_links.next_sibling.is_some() {
                    return Err(Error::DomCorruption);
                }
                self_links.parent = None;
                return Ok(());
            }
        };

        let prev = match &self_links.prev_sibling {
            Some(weak) => Some(weak.upgrade().ok_or(Error::DomCorruption)?),
            None => None,
        };

        let mut parent_links = parent.links.borrow_mut();

        self_links.parent = None;
        self_links.prev_sibling = None;

        match (prev, self_links.next_sibling.take()) {
            // only child:
            (None, None) => {
                parent_links.last_child = None;
                parent_links.first_child = None;
            }
            // first child:
            (None, Some(next)) => {
                next.links.borrow_mut().prev_sibling = None;
                parent_links.first_child = Some(next);
            }
            // last child:
            (Some(prev), None) => {
                prev.links.borrow_mut().next_sibling = None;
                parent_links.last_child = Some(Rc::downgrade(&prev));
            }
            // internal child:
            (Some(prev), Some(next)) => {
                next.links.borrow_mut().prev_sibling = Some(Rc::downgrade(&prev));
                prev.links.borrow_mut().next_sibling = Some(next);
            }
        }

        Ok(())
    }
}

impl Drop for Node {
    // Unlink all the nodes in the direct child list
    fn drop(&mut self) {
        let mut next_sibling = {
            let self_links = self.links.borrow_mut();
            self_links.first_child.clone()
        };

        while let Some(sibling) = next_sibling.take() {
            next_sibling = {
                let mut links = sibling.links.borrow_mut();

                links.parent = None;
                links.prev_sibling = None;
                links.next_sibling.take()
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Element {
                tag_name,
                classes,
                display,
            } => {
                write!(f, "<{}", tag_name)?;

                let classes = classes.borrow();
                if !classes.is_empty() {
                    write!(f, " class=\"{}\"", classes.join(" "))?;
                }
                if let Some(display) = display.borrow().as_ref() {
                    write!(f, " style=\"display:{}\"", display)?;
                }

                let children = self.children();
                if children.is_empty() {
                    write!(f, "/>")
                } else {
                    write!(f, ">")?;
                    for child in children {
                        write!(f, "{}", child)?;
                    }
                    write!(f, "</{}>", tag_name)
                }
            }
            NodeKind::Text(text) => write!(f, "{}", text.borrow()),
        }
    }
}
