use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// There were no slide elements to show.
    #[error("no slide elements found")]
    NoSlides,

    #[error("node is not an element")]
    NotAnElement,

    #[error("failed to set display style")]
    SetStyle,

    #[error("failed to update class list")]
    SetClass,

    #[error("element tree is corrupt")]
    DomCorruption,

    #[error("no document available")]
    MissingDocument,
}
