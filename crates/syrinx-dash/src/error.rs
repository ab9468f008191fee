use thiserror::Error;

/// Manifest synthesis failures.
///
/// Raised only while generating a document; reading already-cached manifest
/// text never fails. Each failure names the manifest element that could not
/// be attached so a broken representation can be diagnosed precisely.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreationError {
    #[error("could not add the {element} element to the manifest: {reason}")]
    CouldNotAddElement { element: &'static str, reason: String },
}

impl CreationError {
    pub fn could_not_add_element<R: Into<String>>(element: &'static str, reason: R) -> Self {
        Self::CouldNotAddElement {
            element,
            reason: reason.into(),
        }
    }

    /// The manifest element this failure is about.
    #[must_use]
    pub fn element(&self) -> &'static str {
        match self {
            Self::CouldNotAddElement { element, .. } => element,
        }
    }
}

pub type CreationResult<T> = Result<T, CreationError>;
