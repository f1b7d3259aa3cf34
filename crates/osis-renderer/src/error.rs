//! Errors of the outer surfaces. Rendering itself never fails.

use miette::{Diagnostic, NamedSource, SourceSpan};
use smol_str::SmolStr;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum RenderError {
    /// Two handlers claimed the same element
    #[error("a handler for <{0}> is already registered")]
    #[diagnostic(code(osis::dispatch::duplicate_handler))]
    DuplicateHandler(SmolStr),

    /// Malformed OSIS input
    #[error(transparent)]
    #[diagnostic_source]
    Xml(#[from] XmlError),
}

/// Malformed XML, with the location of the failure in the source document.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("invalid OSIS: {message}")]
#[diagnostic(code(osis::xml))]
pub struct XmlError {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("here")]
    err_location: SourceSpan,
    #[help]
    advice: Option<String>,
}

impl XmlError {
    pub fn new(message: impl Into<String>, src: NamedSource<String>, offset: usize) -> Self {
        let len = src.inner().len();
        let offset = offset.min(len);
        Self {
            message: message.into(),
            src,
            err_location: SourceSpan::new(offset.into(), 0),
            advice: None,
        }
    }

    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice = Some(advice.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the failure in the source document.
    pub fn offset(&self) -> usize {
        self.err_location.offset()
    }
}
