#![cfg_attr(not(feature = "web"), forbid(unsafe_code))]

//!
//! The slideshow crate drives a classic "one slide at a time" widget:
//! a set of slide elements where exactly one is shown, next/previous
//! controls, and a row of indicator dots where exactly one is active.
//!
//! The DOM is abstracted behind [Dom], so the same controller runs against
//! the browser (feature `web`) and against an in-memory tree (feature `server`).
//!

pub mod config;
pub mod controller;
pub mod error;
pub mod index;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "web")]
pub mod web;

pub use config::SlideshowConfig;
pub use controller::Slideshow;
pub use error::Error;
pub use index::{OvershootPolicy, RenderPlan};

///
/// The element tree a slideshow lives in.
///
/// Collections are queried fresh on every render, so implementors
/// must not cache them.
///
pub trait Dom {
    type Element: Clone;

    /// Current slide elements, in document order.
    fn slides(&self, config: &SlideshowConfig) -> Result<Vec<Self::Element>, Error>;

    /// Current indicator elements, in document order.
    fn indicators(&self, config: &SlideshowConfig) -> Result<Vec<Self::Element>, Error>;

    fn set_shown(
        &self,
        element: &Self::Element,
        shown: bool,
        config: &SlideshowConfig,
    ) -> Result<(), Error>;

    fn set_active(
        &self,
        element: &Self::Element,
        active: bool,
        config: &SlideshowConfig,
    ) -> Result<(), Error>;
}
